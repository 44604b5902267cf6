//! Drawing surface abstraction plus a software framebuffer implementation.

use crate::{
    error::{GridError, GridResult},
    types::Rgb,
};
use glam::Vec2;

/// Placement of a surface in screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bounds of a surface of `size` placed at the screen origin.
    pub fn from_size(size: Vec2) -> Self {
        Self::new(0.0, 0.0, size.x, size.y)
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Checks that the bounds cover at least part of a pixel.
    ///
    /// ### Errors
    /// [`GridError::SurfaceUnavailable`] if any component is not finite or
    /// the width or height is not positive.
    pub fn drawable(self) -> GridResult<Self> {
        let finite = self.origin().is_finite() && self.size().is_finite();
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(GridError::SurfaceUnavailable);
        }
        Ok(self)
    }
}

/// The render target a [`crate::render_loop::RenderLoop`] draws into.
///
/// All coordinates are surface-local.
pub trait Surface {
    fn clear(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn set_fill_color(&mut self, color: Rgb);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn bounds(&self) -> Bounds;
}

/// RGBA8 pixel buffer.
///
/// Rectangles are rasterized by pixel centers, so a fill covers pixel `px`
/// when `x <= px + 0.5 < x + w`. Cleared pixels are fully transparent.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 4]>,
    fill: [u8; 4],
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width * height],
            fill: [0, 0, 0, 255],
        }
    }

    /// A framebuffer large enough for `size`, rounded up to whole pixels.
    pub fn with_size(size: Vec2) -> Self {
        Self::new(size.x.max(0.0).ceil() as usize, size.y.max(0.0).ceil() as usize)
    }

    /// Like [`Framebuffer::with_size`], but refuses a surface with no pixels.
    /// Headless hosts use this to render a session off-screen.
    ///
    /// ### Errors
    /// [`GridError::SurfaceUnavailable`] if `size` is not [`Bounds::drawable`].
    pub fn try_with_size(size: Vec2) -> GridResult<Self> {
        let bounds = Bounds::from_size(size).drawable()?;
        Ok(Self::with_size(bounds.size()))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixels, `width * height` entries.
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Number of pixels that are not fully transparent.
    pub fn painted(&self) -> usize {
        self.pixels.iter().filter(|p| p[3] != 0).count()
    }

    /// Pixel span covered by `[start, start + len)` on an axis of `limit` pixels.
    fn span(start: f32, len: f32, limit: usize) -> std::ops::Range<usize> {
        if !(start.is_finite() && len.is_finite()) || len <= 0.0 {
            return 0..0;
        }
        let lo = (start - 0.5).ceil().max(0.0) as usize;
        let hi = ((start + len - 0.5).ceil().max(0.0) as usize).min(limit);
        lo.min(hi)..hi
    }

    fn paint(&mut self, x: f32, y: f32, w: f32, h: f32, value: [u8; 4]) {
        let cols = Self::span(x, w, self.width);
        for row in Self::span(y, h, self.height) {
            let base = row * self.width;
            self.pixels[base + cols.start..base + cols.end].fill(value);
        }
    }
}

impl Surface for Framebuffer {
    fn clear(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.paint(x, y, w, h, [0; 4]);
    }

    fn set_fill_color(&mut self, color: Rgb) {
        let [r, g, b] = color.to_rgb8();
        self.fill = [r, g, b, 255];
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let fill = self.fill;
        self.paint(x, y, w, h, fill);
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width as f32, self.height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_covers_exactly_the_requested_pixels() {
        let mut fb = Framebuffer::new(8, 8);
        fb.set_fill_color(Rgb::new(10, 20, 30));

        fb.fill_rect(2.0, 3.0, 2.0, 2.0);

        assert_eq!(fb.painted(), 4);
        assert_eq!(fb.pixel(2, 3), Some([10, 20, 30, 255]));
        assert_eq!(fb.pixel(3, 4), Some([10, 20, 30, 255]));
        assert_eq!(fb.pixel(4, 3), Some([0; 4]));
    }

    #[test]
    fn fill_rect_is_clipped_to_the_buffer() {
        let mut fb = Framebuffer::new(4, 4);

        fb.fill_rect(-10.0, 2.0, 100.0, 100.0);

        assert_eq!(fb.painted(), 8);
        assert_eq!(fb.pixel(0, 1), Some([0; 4]));
        assert_eq!(fb.pixel(3, 3), Some([0, 0, 0, 255]));
    }

    #[test]
    fn degenerate_rects_paint_nothing() {
        let mut fb = Framebuffer::new(4, 4);

        fb.fill_rect(1.0, 1.0, 0.0, 2.0);
        fb.fill_rect(1.0, 1.0, -2.0, 2.0);
        fb.fill_rect(f32::NAN, 1.0, 2.0, 2.0);
        fb.fill_rect(10.0, 10.0, 2.0, 2.0);

        assert_eq!(fb.painted(), 0);
    }

    #[test]
    fn fill_color_is_saturated() {
        let mut fb = Framebuffer::new(1, 1);
        fb.set_fill_color(Rgb::new(-40, 256, 128));

        fb.fill_rect(0.0, 0.0, 1.0, 1.0);

        assert_eq!(fb.pixel(0, 0), Some([0, 255, 128, 255]));
    }

    #[test]
    fn clear_resets_pixels_to_transparent() {
        let mut fb = Framebuffer::new(4, 4);
        fb.fill_rect(0.0, 0.0, 4.0, 4.0);
        assert_eq!(fb.painted(), 16);

        let b = fb.bounds();
        fb.clear(b.left, b.top, b.width, b.height);

        assert_eq!(fb.painted(), 0);
    }

    #[test]
    fn try_with_size_rejects_empty_surfaces() {
        assert_eq!(
            Framebuffer::try_with_size(Vec2::new(0.0, 10.0)).err(),
            Some(GridError::SurfaceUnavailable)
        );
        assert!(Framebuffer::try_with_size(Vec2::new(f32::NAN, 10.0)).is_err());
        assert!(Framebuffer::try_with_size(Vec2::new(0.5, 0.5)).is_ok());
    }

    #[test]
    fn drawable_bounds_need_a_positive_finite_area() {
        let b = Bounds::new(8.0, 30.0, 0.5, 2.0);
        assert_eq!(b.drawable(), Ok(b));
        assert_eq!(
            Bounds::new(8.0, 30.0, 100.0, 0.0).drawable(),
            Err(GridError::SurfaceUnavailable)
        );
        assert!(Bounds::new(f32::INFINITY, 0.0, 10.0, 10.0).drawable().is_err());
        assert!(Bounds::default().drawable().is_err());
    }

    #[test]
    fn with_size_rounds_up() {
        let fb = Framebuffer::with_size(Vec2::new(10.2, 3.0));
        assert_eq!((fb.width(), fb.height()), (11, 3));
        assert_eq!(fb.bounds().size(), Vec2::new(11.0, 3.0));
    }
}
