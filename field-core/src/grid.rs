use crate::{
    config::GridConfig,
    error::GridResult,
    field,
    particle::Particle,
    surface::Surface,
    types::Rgb,
};
use glam::Vec2;

/// The fixed lattice of particles.
///
/// Particles are stored row-major by lattice index `(i, j)` at
/// `i * columns + j`. Particles never interact, so every per-particle update
/// is independent of iteration order.
#[derive(Debug)]
pub struct ParticleGrid {
    pub particles: Vec<Particle>,
    cfg: GridConfig,
}

impl ParticleGrid {
    /// Builds a lattice of `rows * columns` particles resting on their anchors.
    ///
    /// ### Errors
    /// Returns [`crate::error::GridError::InvalidConfig`] if `cfg` fails
    /// [`GridConfig::validate`].
    pub fn new(cfg: GridConfig) -> GridResult<Self> {
        cfg.validate()?;

        let mut particles = Vec::with_capacity(cfg.particle_count());
        for i in 0..cfg.rows {
            for j in 0..cfg.columns {
                particles.push(Particle::new(cfg.anchor(i, j), cfg.radius));
            }
        }

        let size = cfg.surface_size();
        log::info!(
            "particle grid built: {} particles on a {}x{} surface",
            particles.len(),
            size.x,
            size.y
        );

        Ok(Self { particles, cfg })
    }

    pub fn config(&self) -> &GridConfig {
        &self.cfg
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Recomputes every destination from `attractor`, then eases each draw
    /// position toward it.
    ///
    /// A particle whose anchor coincides with the attractor keeps its
    /// previous destination for this frame.
    pub fn advance(&mut self, attractor: Vec2, easing: f32) {
        let cfg = &self.cfg;
        for p in &mut self.particles {
            match field::compute_destination(p.anchor, attractor, cfg) {
                Some(dest) => p.dest = dest,
                None => log::trace!("field undefined at {}, keeping destination", p.anchor),
            }
            p.ease(easing);
        }
    }

    /// Eases every particle toward its current destination without
    /// consulting the field.
    pub fn settle(&mut self, easing: f32) {
        for p in &mut self.particles {
            p.ease(easing);
        }
    }

    /// Emits one filled square per particle.
    ///
    /// `color` picks a fill per particle; `None` draws every particle with
    /// the surface's current fill color.
    pub fn draw<S, F>(&self, surface: &mut S, mut color: Option<F>)
    where
        S: Surface + ?Sized,
        F: FnMut(&Particle) -> Rgb,
    {
        for p in &self.particles {
            if let Some(color) = color.as_mut() {
                surface.set_fill_color(color(p));
            }
            surface.fill_rect(p.draw.x, p.draw.y, p.radius, p.radius);
        }
    }
}
