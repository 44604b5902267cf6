/// An unclamped RGB fill color.
///
/// Channels are kept signed so that gradient formulas can produce values
/// outside `0..=255`; every [`crate::surface::Surface`] saturates them when
/// it rasterizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// Saturates each channel to `0..=255`.
    pub fn to_rgb8(self) -> [u8; 3] {
        [
            self.r.clamp(0, 255) as u8,
            self.g.clamp(0, 255) as u8,
            self.b.clamp(0, 255) as u8,
        ]
    }
}
