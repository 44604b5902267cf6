//! Per-frame pipeline tying the attractor, grid and collision body together.
//!
//! One [`RenderLoop`] is one running session. The host calls
//! [`RenderLoop::handle_input`] from its event callbacks and
//! [`RenderLoop::tick`] once per display refresh, on the same thread:
//! 1. clear the surface,
//! 2. resolve the attractor (pointer or orbit),
//! 3. move the collision body, if any,
//! 4. advance the grid and let the body perturb it,
//! 5. draw every particle.
//!
//! [`RenderLoop::draw`] repaints without advancing, for paused hosts.

use crate::{
    attractor::AttractorDriver,
    body::CollisionBody,
    config::{BodyConfig, GridConfig, Variant},
    error::GridResult,
    grid::ParticleGrid,
    particle::Particle,
    surface::{Bounds, Surface},
    types::Rgb,
};
use glam::Vec2;
use rand::Rng;

/// Fill used for every particle when no collision body tints them.
pub const FLAT_FILL: Rgb = Rgb::BLACK;

/// Host events, positions in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove(Vec2),
    /// First touch point of a touch-move.
    TouchMove(Vec2),
    PointerDown(Vec2),
    TouchStart(Vec2),
    PointerUp,
    TouchEnd,
    /// The surface moved or the window was resized.
    Resize { bounds: Bounds, viewport: Vec2 },
}

#[derive(Debug)]
pub struct RenderLoop {
    cfg: GridConfig,
    body_cfg: BodyConfig,
    variant: Variant,
    grid: ParticleGrid,
    driver: AttractorDriver,
    body: Option<CollisionBody>,
    frames: u64,
}

impl RenderLoop {
    /// Starts a session for a surface placed at `bounds` inside a window of
    /// size `viewport`.
    ///
    /// ### Errors
    /// Returns [`crate::error::GridError::InvalidConfig`] when either
    /// configuration fails validation.
    pub fn new(
        cfg: GridConfig,
        body_cfg: BodyConfig,
        variant: Variant,
        bounds: Bounds,
        viewport: Vec2,
    ) -> GridResult<Self> {
        body_cfg.validate()?;
        let grid = ParticleGrid::new(cfg)?;
        let body = Self::spawn_body(&cfg, &body_cfg, variant);

        Ok(Self {
            cfg,
            body_cfg,
            variant,
            grid,
            driver: AttractorDriver::new(bounds, viewport),
            body,
            frames: 0,
        })
    }

    fn spawn_body(cfg: &GridConfig, body_cfg: &BodyConfig, variant: Variant) -> Option<CollisionBody> {
        match variant {
            Variant::Field => None,
            Variant::Bouncing => Some(CollisionBody::new(cfg.surface_size() * 0.5, body_cfg)),
        }
    }

    /// Rebuilds the grid and pointer state for a new configuration.
    ///
    /// Surface bounds and viewport carry over. On error the running session
    /// is left untouched.
    pub fn reconfigure(
        &mut self,
        cfg: GridConfig,
        body_cfg: BodyConfig,
        variant: Variant,
    ) -> GridResult<()> {
        let bounds = self.driver.bounds();
        let viewport = self.driver.viewport();
        *self = Self::new(cfg, body_cfg, variant, bounds, viewport)?;
        log::debug!("render loop reconfigured: {variant:?}, {} particles", self.grid.len());
        Ok(())
    }

    /// Replaces the collision body with one at the surface center heading in
    /// a random direction. No-op for [`Variant::Field`].
    pub fn respawn_body(&mut self, rng: &mut impl Rng) {
        if self.variant == Variant::Bouncing {
            let center = self.cfg.surface_size() * 0.5;
            self.body = Some(CollisionBody::with_random_heading(center, &self.body_cfg, rng));
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.cfg
    }

    pub fn body_config(&self) -> &BodyConfig {
        &self.body_cfg
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn grid(&self) -> &ParticleGrid {
        &self.grid
    }

    pub fn driver(&self) -> &AttractorDriver {
        &self.driver
    }

    pub fn body(&self) -> Option<&CollisionBody> {
        self.body.as_ref()
    }

    /// Number of ticks run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove(p) | InputEvent::TouchMove(p) => {
                self.driver.observe_pointer(p);
                if let Some(body) = &mut self.body {
                    body.pointer_move(p - self.driver.bounds().origin());
                }
            }
            InputEvent::PointerDown(p) | InputEvent::TouchStart(p) => {
                if let Some(body) = &mut self.body {
                    body.pointer_down(p - self.driver.bounds().origin());
                }
            }
            InputEvent::PointerUp | InputEvent::TouchEnd => {
                if let Some(body) = &mut self.body {
                    body.pointer_up();
                }
            }
            InputEvent::Resize { bounds, viewport } => {
                self.driver.set_bounds(bounds);
                self.driver.set_viewport(viewport);
            }
        }
    }

    /// Runs one frame against `surface`.
    ///
    /// `frame_time` is the clock timestamp in milliseconds; it only drives
    /// the orbit. A tick never fails: an empty grid draws nothing.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S, frame_time: f64) {
        let size = surface.bounds().size();
        self.update(size, frame_time);
        self.draw(surface);
        self.frames += 1;
    }

    fn update(&mut self, size: Vec2, frame_time: f64) {
        let attractor = self.driver.resolve(self.cfg.manual_control, frame_time);
        let easing = self.cfg.easing;

        match &mut self.body {
            Some(body) => {
                body.step(size);
                if self.body_cfg.field_enabled {
                    self.grid.advance(attractor, easing);
                } else {
                    self.grid.settle(easing);
                }
                body.perturb(&mut self.grid);
            }
            None => self.grid.advance(attractor, easing),
        }
    }

    /// Clears `surface` and draws the current particle positions without
    /// advancing the simulation.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let bounds = surface.bounds();
        surface.clear(0.0, 0.0, bounds.width, bounds.height);

        match &self.body {
            Some(body) => self
                .grid
                .draw(surface, Some(|p: &Particle| body.color_for(p))),
            None => {
                surface.set_fill_color(FLAT_FILL);
                self.grid.draw(surface, None::<fn(&Particle) -> Rgb>);
            }
        }
    }
}
