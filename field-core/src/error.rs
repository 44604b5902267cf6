use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Invalid configuration for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("No drawing surface available")]
    SurfaceUnavailable,
}

pub type GridResult<T> = Result<T, GridError>;
