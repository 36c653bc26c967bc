//! # Bitmap Module
//!
//! Pixel access over caller-owned buffers.
//!
//! The engine never allocates or frees image storage. It only needs to read
//! and write individual pixels, so any buffer that can expose `(x, y)`
//! access can take part by implementing [`PixelAccess`].
//!
//! Implementations are provided for the `image` crate's `RgbImage` and
//! `RgbaImage`, and for `&mut T` so callers can keep ownership of their
//! buffers while passing them through duplicate removal.

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// An RGB color. Alpha is never part of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A gray color with all three channels set to `level`
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Packed `0x00RRGGBB` representation, used for equality checks
    pub const fn packed(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Sum of the three channels
    pub fn channel_sum(&self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }
}

/// Read/write pixel access by coordinate.
///
/// `x` runs over `0..width()` and `y` over `0..height()`. Callers stay
/// inside those bounds; implementations may panic on out-of-range access,
/// the same as the underlying buffer would.
pub trait PixelAccess {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Color of the pixel at `(x, y)`
    fn get_pixel(&self, x: u32, y: u32) -> Color;

    /// Replace the color at `(x, y)`, leaving any non-RGB channels untouched
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);

    /// `(width, height)`
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Total number of pixels
    fn pixel_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }
}

impl PixelAccess for RgbImage {
    fn width(&self) -> u32 {
        RgbImage::width(self)
    }

    fn height(&self) -> u32 {
        RgbImage::height(self)
    }

    fn get_pixel(&self, x: u32, y: u32) -> Color {
        let Rgb([r, g, b]) = *RgbImage::get_pixel(self, x, y);
        Color::new(r, g, b)
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.put_pixel(x, y, Rgb([color.r, color.g, color.b]));
    }
}

impl PixelAccess for RgbaImage {
    fn width(&self) -> u32 {
        RgbaImage::width(self)
    }

    fn height(&self) -> u32 {
        RgbaImage::height(self)
    }

    fn get_pixel(&self, x: u32, y: u32) -> Color {
        let Rgba([r, g, b, _]) = *RgbaImage::get_pixel(self, x, y);
        Color::new(r, g, b)
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let pixel = self.get_pixel_mut(x, y);
        let alpha = pixel[3];
        *pixel = Rgba([color.r, color.g, color.b, alpha]);
    }
}

impl<T: PixelAccess + ?Sized> PixelAccess for &mut T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn get_pixel(&self, x: u32, y: u32) -> Color {
        (**self).get_pixel(x, y)
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        (**self).set_pixel(x, y, color)
    }
}
