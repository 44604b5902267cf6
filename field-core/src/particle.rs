use glam::Vec2;

/// A single square of the lattice.
///
/// `anchor` never moves after construction. `draw` is eased toward `dest`
/// every frame; `original` is the position the collision body restores the
/// destination to once the particle is clear of it.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub anchor: Vec2,
    pub draw: Vec2,
    pub dest: Vec2,
    pub original: Vec2,
    pub radius: f32,
    /// Set while the collision body has displaced this particle.
    pub pushed: bool,
}

impl Particle {
    pub fn new(anchor: Vec2, radius: f32) -> Self {
        Self {
            anchor,
            draw: anchor,
            dest: anchor,
            original: anchor,
            radius,
            pushed: false,
        }
    }

    /// Moves `draw` a fraction `easing` of the way toward `dest`.
    #[inline]
    pub fn ease(&mut self, easing: f32) {
        if self.dest != self.draw {
            self.draw += (self.dest - self.draw) * easing;
        }
    }

    /// Shifts both the rendered position and its target.
    #[inline]
    pub fn displace(&mut self, offset: Vec2) {
        self.draw += offset;
        self.dest += offset;
    }
}
