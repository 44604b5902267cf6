//! Effective attractor position: live pointer or autonomous orbit.

use crate::surface::Bounds;
use glam::{DVec2, Vec2};

/// Where the attractor position of the last resolve came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AttractorSource {
    #[default]
    Orbit,
    Pointer,
}

/// Lissajous-like orbit in screen coordinates.
///
/// `frame_time` is the clock timestamp in milliseconds and `viewport` the
/// size of the whole window the surface lives in.
pub fn orbit(frame_time: f64, viewport: Vec2) -> Vec2 {
    let t = frame_time / 4.0;
    let fx = 0.5 + 0.3 * (0.002 * t).cos() * (0.005 * t).sin();
    let fy = 0.5 + 0.2 * (0.005 * t).cos() + 0.1 * (0.01 * t).cos();
    (DVec2::new(fx, fy) * viewport.as_dvec2()).as_vec2()
}

/// Resolves the attractor in surface-local coordinates.
///
/// ### Parameters
/// - `raw_input` - Last pointer position in screen coordinates.
/// - `has_live_input` - Whether any pointer movement was ever observed.
/// - `manual_control` - Whether the pointer may take over from the orbit.
/// - `frame_time` - Clock timestamp in milliseconds.
/// - `viewport` - Window size used to scale the orbit.
/// - `origin` - Top-left corner of the surface in screen coordinates.
pub fn resolve(
    raw_input: Vec2,
    has_live_input: bool,
    manual_control: bool,
    frame_time: f64,
    viewport: Vec2,
    origin: Vec2,
) -> (Vec2, AttractorSource) {
    if has_live_input && manual_control {
        (raw_input - origin, AttractorSource::Pointer)
    } else {
        (orbit(frame_time, viewport) - origin, AttractorSource::Orbit)
    }
}

/// Pointer state shared between input callbacks and the render tick.
///
/// Input handlers write the raw pointer position and layout; the tick reads
/// them through [`AttractorDriver::resolve`]. The live-input flag is a
/// one-way latch for the lifetime of the driver.
#[derive(Clone, Debug)]
pub struct AttractorDriver {
    raw: Vec2,
    live: bool,
    bounds: Bounds,
    viewport: Vec2,
    position: Vec2,
    source: AttractorSource,
}

impl AttractorDriver {
    pub fn new(bounds: Bounds, viewport: Vec2) -> Self {
        Self {
            raw: Vec2::ZERO,
            live: false,
            bounds,
            viewport,
            position: Vec2::ZERO,
            source: AttractorSource::Orbit,
        }
    }

    /// Records a pointer or touch move in screen coordinates.
    pub fn observe_pointer(&mut self, screen: Vec2) {
        self.raw = screen;
        if !self.live {
            log::debug!("live pointer input observed at {screen}");
            self.live = true;
        }
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn has_live_input(&self) -> bool {
        self.live
    }

    /// Attractor position computed by the last [`AttractorDriver::resolve`].
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn source(&self) -> AttractorSource {
        self.source
    }

    pub fn resolve(&mut self, manual_control: bool, frame_time: f64) -> Vec2 {
        let (position, source) = resolve(
            self.raw,
            self.live,
            manual_control,
            frame_time,
            self.viewport,
            self.bounds.origin(),
        );
        self.position = position;
        self.source = source;
        position
    }
}
