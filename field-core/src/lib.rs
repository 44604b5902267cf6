//! Core interactive particle grid library.
//!
//! Main components:
//! - [`config`]: grid, field and collision body configuration.
//! - [`field`]: radial field mapping a particle and attractor to a destination.
//! - [`attractor`]: pointer-or-orbit attractor resolution.
//! - [`particle`] / [`grid`]: the lattice and its per-frame easing.
//! - [`body`]: bouncing disc that perturbs and tints particles.
//! - [`surface`]: drawing surface trait and a software framebuffer.
//! - [`render_loop`]: the per-frame pipeline tying everything together.
//! - [`error`] / [`types`]: shared error and value types.

pub mod attractor;
pub mod body;
pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod particle;
pub mod render_loop;
pub mod surface;
pub mod types;
