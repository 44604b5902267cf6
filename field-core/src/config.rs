use crate::error::{GridError, GridResult};
use glam::Vec2;

/// Whether the field pushes particles away from the attractor or pulls them in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Polarity {
    #[default]
    Repulsive,
    Attractive,
}

impl Polarity {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Polarity::Repulsive => -1.0,
            Polarity::Attractive => 1.0,
        }
    }
}

/// How the displacement of a particle is scaled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldMode {
    /// Global reach, displacement of `field_radius * field_strength`.
    #[default]
    StrengthScaled,
    /// Zero push beyond `field_radius`, `field_limit_strength` inside it.
    RadiusLimited,
}

/// Which scene a [`crate::render_loop::RenderLoop`] runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// Grid driven by the pointer or orbit attractor only.
    #[default]
    Field,
    /// Adds a [`crate::body::CollisionBody`] bouncing over the grid.
    Bouncing,
}

/// Static parameters of a particle lattice and its field.
///
/// `rows` counts lattice positions along x and `columns` along y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub margin: f32,
    pub rows: usize,
    pub columns: usize,
    pub gap: f32,
    pub radius: f32,
    pub manual_control: bool,
    pub field_radius: f32,
    pub polarity: Polarity,
    pub field_strength: f32,
    pub mode: FieldMode,
    pub field_limit_strength: f32,
    pub easing: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            margin: 10.0,
            rows: 50,
            columns: 50,
            gap: 2.0,
            radius: 16.0,
            manual_control: true,
            field_radius: 30.0,
            polarity: Polarity::Repulsive,
            field_strength: 2.5,
            mode: FieldMode::StrengthScaled,
            field_limit_strength: 15.0,
            easing: 0.02,
        }
    }
}

impl GridConfig {
    /// Distance between two neighbouring anchors.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.radius + self.gap
    }

    /// Anchor of the lattice position `(i, j)`.
    pub fn anchor(&self, i: usize, j: usize) -> Vec2 {
        Vec2::new(
            i as f32 * self.pitch() + self.margin,
            j as f32 * self.pitch() + self.margin,
        )
    }

    /// Width and height of the surface needed to hold the lattice.
    pub fn surface_size(&self) -> Vec2 {
        let extent = |count: usize| count as f32 * self.pitch() + 2.0 * self.margin + self.gap;
        Vec2::new(extent(self.rows), extent(self.columns))
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Rejects geometry that would produce negative sizes or non-finite
    /// positions. Empty lattices are accepted.
    pub fn validate(&self) -> GridResult<()> {
        non_negative("margin", self.margin)?;
        non_negative("gap", self.gap)?;
        non_negative("radius", self.radius)?;
        non_negative("field_radius", self.field_radius)?;
        non_negative("field_strength", self.field_strength)?;
        non_negative("field_limit_strength", self.field_limit_strength)?;
        unit_interval("easing", self.easing, false)
    }
}

/// How a [`crate::body::CollisionBody`] moves while nobody holds it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionModel {
    /// Constant speed along `angle` (radians), reflected by angle.
    Heading { angle: f32, speed: f32 },
    /// Explicit velocity, multiplied by `friction` every tick.
    Velocity { velocity: Vec2, friction: f32 },
}

impl Default for MotionModel {
    fn default() -> Self {
        MotionModel::Heading {
            angle: std::f32::consts::FRAC_PI_4,
            speed: 3.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyConfig {
    pub radius: f32,
    pub motion: MotionModel,
    /// Keep the attractor field running underneath the body.
    pub field_enabled: bool,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            radius: 60.0,
            motion: MotionModel::default(),
            field_enabled: false,
        }
    }
}

impl BodyConfig {
    pub fn validate(&self) -> GridResult<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid("body.radius", format!("must be > 0, got {}", self.radius)));
        }
        match self.motion {
            MotionModel::Heading { angle, speed } => {
                finite("body.angle", angle)?;
                non_negative("body.speed", speed)
            }
            MotionModel::Velocity { velocity, friction } => {
                finite("body.velocity.x", velocity.x)?;
                finite("body.velocity.y", velocity.y)?;
                unit_interval("body.friction", friction, true)
            }
        }
    }
}

fn invalid(field: &'static str, reason: String) -> GridError {
    GridError::InvalidConfig { field, reason }
}

fn finite(field: &'static str, value: f32) -> GridResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> GridResult<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(invalid(field, format!("must be >= 0, got {value}")));
    }
    Ok(())
}

/// `(0, 1]`, or `[0, 1]` when `allow_zero` is set.
fn unit_interval(field: &'static str, value: f32, allow_zero: bool) -> GridResult<()> {
    finite(field, value)?;
    let low_ok = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if !low_ok || value > 1.0 {
        let low = if allow_zero { "[0" } else { "(0" };
        return Err(invalid(field, format!("must be in {low}, 1], got {value}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn surface_size_matches_lattice_extent() {
        let cfg = GridConfig::default();
        let size = cfg.surface_size();

        // 50 * (16 + 2) + 2 * 10 + 2
        assert_relative_eq!(size.x, 922.0);
        assert_relative_eq!(size.y, 922.0);
    }

    #[test]
    fn rows_run_along_x_and_columns_along_y() {
        let cfg = GridConfig {
            rows: 3,
            columns: 1,
            ..GridConfig::default()
        };

        assert_eq!(cfg.anchor(2, 0), Vec2::new(46.0, 10.0));
        assert_relative_eq!(cfg.surface_size().x, 3.0 * 18.0 + 22.0);
        assert_relative_eq!(cfg.surface_size().y, 18.0 + 22.0);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(GridConfig::default().validate().is_ok());
        assert!(BodyConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_lattice_is_accepted() {
        let cfg = GridConfig {
            rows: 0,
            columns: 0,
            ..GridConfig::default()
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.particle_count(), 0);
    }

    #[test]
    fn negative_radius_is_rejected() {
        let cfg = GridConfig {
            radius: -1.0,
            ..GridConfig::default()
        };

        match cfg.validate() {
            Err(GridError::InvalidConfig { field, .. }) => assert_eq!(field, "radius"),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn easing_must_be_in_unit_interval() {
        for easing in [0.0, -0.5, 1.5, f32::NAN] {
            let cfg = GridConfig {
                easing,
                ..GridConfig::default()
            };
            assert!(cfg.validate().is_err(), "easing {easing} should be rejected");
        }

        let snappy = GridConfig {
            easing: 1.0,
            ..GridConfig::default()
        };
        assert!(snappy.validate().is_ok());
    }

    #[test]
    fn body_friction_outside_unit_interval_is_rejected() {
        let body = BodyConfig {
            motion: MotionModel::Velocity {
                velocity: Vec2::new(1.0, 0.0),
                friction: 1.2,
            },
            ..BodyConfig::default()
        };
        assert!(body.validate().is_err());

        let zero_radius = BodyConfig {
            radius: 0.0,
            ..BodyConfig::default()
        };
        assert!(zero_radius.validate().is_err());
    }
}
