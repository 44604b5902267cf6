//! Bouncing disc that shoves particles aside and tints them by distance.

use crate::{
    config::{BodyConfig, MotionModel},
    grid::ParticleGrid,
    particle::Particle,
    types::Rgb,
};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Fraction of the overlap depth a particle is pushed out per tick.
const PUSH_FACTOR: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
enum DragState {
    Free,
    /// Pinned to the pointer. `throw` is the latest pointer delta and
    /// `moved` records whether it arrived since the last tick.
    Held { last: Vec2, throw: Vec2, moved: bool },
}

#[derive(Clone, Debug)]
pub struct CollisionBody {
    pub pos: Vec2,
    pub radius: f32,
    pub motion: MotionModel,
    state: DragState,
}

impl CollisionBody {
    pub fn new(pos: Vec2, cfg: &BodyConfig) -> Self {
        Self {
            pos,
            radius: cfg.radius,
            motion: cfg.motion,
            state: DragState::Free,
        }
    }

    /// Like [`CollisionBody::new`], but a heading model starts at a random angle.
    pub fn with_random_heading(pos: Vec2, cfg: &BodyConfig, rng: &mut impl Rng) -> Self {
        let mut body = Self::new(pos, cfg);
        if let MotionModel::Heading { angle, .. } = &mut body.motion {
            *angle = rng.random_range(0.0..TAU);
        }
        body
    }

    pub fn is_held(&self) -> bool {
        matches!(self.state, DragState::Held { .. })
    }

    /// Displacement applied by the next free tick, before reflection.
    pub fn velocity(&self) -> Vec2 {
        match self.motion {
            MotionModel::Heading { angle, speed } => Vec2::from_angle(angle) * speed,
            MotionModel::Velocity { velocity, .. } => velocity,
        }
    }

    /// Grabs the body if `pointer` lies strictly inside it.
    pub fn pointer_down(&mut self, pointer: Vec2) -> bool {
        if self.is_held() || pointer.distance(self.pos) >= self.radius {
            return false;
        }
        if let MotionModel::Velocity { velocity, .. } = &mut self.motion {
            *velocity = Vec2::ZERO;
        }
        self.pos = pointer;
        self.state = DragState::Held {
            last: pointer,
            throw: Vec2::ZERO,
            moved: false,
        };
        log::debug!("collision body grabbed at {pointer}");
        true
    }

    pub fn pointer_move(&mut self, pointer: Vec2) {
        if let DragState::Held { last, throw, moved } = &mut self.state {
            *throw = pointer - *last;
            *last = pointer;
            *moved = true;
            self.pos = pointer;
        }
    }

    /// Releases a held body.
    ///
    /// A heading body resumes its heading; a velocity body leaves with the
    /// last pointer delta, which then decays through friction. A pointer
    /// that sat still for a whole tick before release throws nothing.
    pub fn pointer_up(&mut self) {
        let DragState::Held { throw, .. } = self.state else {
            return;
        };
        if let MotionModel::Velocity { velocity, .. } = &mut self.motion {
            *velocity = throw;
        }
        self.state = DragState::Free;
        log::debug!("collision body released at {} with velocity {}", self.pos, self.velocity());
    }

    /// Advances a free body by one tick inside a surface of `size`.
    ///
    /// A velocity component is reflected when the next position would put
    /// the disc across the matching edge while still moving toward it.
    /// A held body stays put; its throw is dropped if the pointer did not
    /// move since the previous tick.
    pub fn step(&mut self, size: Vec2) {
        if let DragState::Held { throw, moved, .. } = &mut self.state {
            if !*moved {
                *throw = Vec2::ZERO;
            }
            *moved = false;
            return;
        }

        if let MotionModel::Velocity { velocity, friction } = &mut self.motion {
            *velocity *= *friction;
        }

        let v = self.velocity();
        let next = self.pos + v;
        let r = self.radius;
        let flip_x = (next.x - r < 0.0 && v.x < 0.0) || (next.x + r > size.x && v.x > 0.0);
        let flip_y = (next.y - r < 0.0 && v.y < 0.0) || (next.y + r > size.y && v.y > 0.0);

        match &mut self.motion {
            MotionModel::Heading { angle, .. } => {
                if flip_x {
                    *angle = PI - *angle;
                }
                if flip_y {
                    *angle = -*angle;
                }
                *angle = angle.rem_euclid(TAU);
            }
            MotionModel::Velocity { velocity, .. } => {
                if flip_x {
                    velocity.x = -velocity.x;
                }
                if flip_y {
                    velocity.y = -velocity.y;
                }
            }
        }

        self.pos += self.velocity();
    }

    /// Whether the particle's square hit-box overlaps the disc.
    pub fn intersects(&self, p: &Particle) -> bool {
        let nearest = self.pos.clamp(p.draw, p.draw + Vec2::splat(p.radius));
        nearest.distance_squared(self.pos) < self.radius * self.radius
    }

    /// Pushes particles inside the disc outward and restores the destination
    /// of previously pushed particles once their hit-box is clear.
    pub fn perturb(&self, grid: &mut ParticleGrid) {
        for p in &mut grid.particles {
            let offset = p.draw - self.pos;
            let d = offset.length();
            if d < self.radius {
                let angle = offset.y.atan2(offset.x);
                p.displace(Vec2::from_angle(angle) * (self.radius - d) * PUSH_FACTOR);
                p.pushed = true;
            }
            if p.pushed && !self.intersects(p) {
                p.dest = p.original;
                p.pushed = false;
            }
        }
    }

    /// Distance-based tint of a particle.
    pub fn color_for(&self, p: &Particle) -> Rgb {
        color_gradient(p.draw.distance(self.pos), self.radius)
    }
}

/// `rgb(-k, 256 - k, 128)` with `k = floor(255 * distance / radius)`.
///
/// Channels are left unclamped; surfaces saturate them to `0..=255`, so the
/// red channel always renders as 0 and green fades out at `distance ≈ radius`.
pub fn color_gradient(distance: f32, radius: f32) -> Rgb {
    let k = (255.0 * distance / radius).floor() as i32;
    Rgb::new(-k, 256 - k, 128)
}
