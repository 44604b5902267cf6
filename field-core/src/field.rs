//! Radial field mapping a particle anchor and an attractor to a destination.

use crate::config::{FieldMode, GridConfig};
use glam::Vec2;

/// Computes where the particle anchored at `anchor` should move to.
///
/// The vector from the anchor to the attractor is flipped for repulsive
/// fields and then normalized, so in [`FieldMode::StrengthScaled`] every
/// particle is displaced by exactly `field_radius * field_strength` no
/// matter how far away the attractor is; only the direction changes.
/// [`FieldMode::RadiusLimited`] leaves particles farther than
/// `field_radius` on their anchor and pushes the rest by
/// `field_limit_strength`.
///
/// ### Returns
/// - `Some(dest)` - the new destination.
/// - `None` - the attractor sits exactly on the anchor (or the input is not
///   finite); the caller should keep the previous destination.
pub fn compute_destination(anchor: Vec2, attractor: Vec2, cfg: &GridConfig) -> Option<Vec2> {
    let rel = (attractor - anchor) * cfg.polarity.sign();
    let d = rel.length();

    match cfg.mode {
        FieldMode::RadiusLimited if d > cfg.field_radius => Some(anchor),
        _ if d == 0.0 || !d.is_finite() => None,
        FieldMode::RadiusLimited => Some(anchor + rel * cfg.field_limit_strength / d),
        FieldMode::StrengthScaled => {
            Some(anchor + rel * cfg.field_radius * cfg.field_strength / d)
        }
    }
}
