//! In-place grayscale transform.
//!
//! The default [`GrayscaleMode::Threshold`] computes the channel average,
//! scales it to `0.0..=1.0`, rounds, and scales back up. Rounding at that
//! stage means every pixel ends up either black or white: a pixel whose
//! average is 127 or below becomes `(0, 0, 0)`, anything brighter becomes
//! `(255, 255, 255)`. Comparison results downstream depend on this, so it
//! stays the default.
//!
//! [`GrayscaleMode::Average`] keeps the full 0-255 ramp instead.

use crate::core::bitmap::{Color, PixelAccess};
use serde::{Deserialize, Serialize};

/// How a pixel's channels collapse into one gray level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrayscaleMode {
    /// Black or white only: `round(avg / 255) * 255`
    #[default]
    Threshold,
    /// Full ramp: `round(avg)`
    Average,
}

impl GrayscaleMode {
    /// Gray level for a single color
    pub fn gray_level(&self, color: Color) -> u8 {
        let average = color.channel_sum() as f64 / 3.0;
        match self {
            GrayscaleMode::Threshold => ((average / 255.0).round() * 255.0) as u8,
            GrayscaleMode::Average => average.round() as u8,
        }
    }
}

impl std::fmt::Display for GrayscaleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrayscaleMode::Threshold => write!(f, "threshold"),
            GrayscaleMode::Average => write!(f, "average"),
        }
    }
}

/// Convert `image` to grayscale in place using [`GrayscaleMode::Threshold`]
pub fn grayscale<I: PixelAccess + ?Sized>(image: &mut I) {
    grayscale_with(image, GrayscaleMode::Threshold);
}

/// Convert `image` to grayscale in place using `mode`
pub fn grayscale_with<I: PixelAccess + ?Sized>(image: &mut I, mode: GrayscaleMode) {
    let (width, height) = image.dimensions();
    for y in 0..height {
        for x in 0..width {
            let level = mode.gray_level(image.get_pixel(x, y));
            image.set_pixel(x, y, Color::gray(level));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn single_pixel(r: u8, g: u8, b: u8) -> RgbImage {
        RgbImage::from_pixel(1, 1, Rgb([r, g, b]))
    }

    #[test]
    fn mid_tones_collapse_to_black() {
        let mut image = single_pixel(100, 150, 200);
        grayscale(&mut image);
        assert_eq!(image.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn white_stays_white() {
        let mut image = single_pixel(255, 255, 255);
        grayscale(&mut image);
        assert_eq!(image.get_pixel(0, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn threshold_boundary() {
        // 381 / 3 = 127 -> below half; 384 / 3 = 128 -> above half
        assert_eq!(GrayscaleMode::Threshold.gray_level(Color::gray(127)), 0);
        assert_eq!(GrayscaleMode::Threshold.gray_level(Color::gray(128)), 255);
    }

    #[test]
    fn average_mode_keeps_ramp() {
        let mut image = single_pixel(100, 150, 200);
        grayscale_with(&mut image, GrayscaleMode::Average);
        assert_eq!(image.get_pixel(0, 0), &Rgb([150, 150, 150]));
    }

    #[test]
    fn average_mode_rounds() {
        // (10 + 10 + 11) / 3 = 10.33
        assert_eq!(GrayscaleMode::Average.gray_level(Color::new(10, 10, 11)), 10);
        // (10 + 11 + 11) / 3 = 10.67
        assert_eq!(GrayscaleMode::Average.gray_level(Color::new(10, 11, 11)), 11);
    }

    #[test]
    fn grayscale_is_idempotent() {
        for mode in [GrayscaleMode::Threshold, GrayscaleMode::Average] {
            let mut image = RgbImage::from_fn(4, 3, |x, y| {
                Rgb([(x * 60) as u8, (y * 90) as u8, ((x + y) * 30) as u8])
            });
            grayscale_with(&mut image, mode);
            let once = image.clone();
            grayscale_with(&mut image, mode);
            assert_eq!(image, once, "mode {mode}");
        }
    }

    #[test]
    fn every_pixel_is_gray_afterwards() {
        let mut image = RgbImage::from_fn(5, 7, |x, y| Rgb([(x * 50) as u8, 200, (y * 30) as u8]));
        grayscale(&mut image);
        assert!(image.pixels().all(|Rgb([r, g, b])| r == g && g == b));
    }

    #[test]
    fn alpha_is_untouched() {
        let mut image = RgbaImage::from_pixel(2, 2, Rgba([250, 250, 250, 12]));
        grayscale(&mut image);
        assert!(image.pixels().all(|p| *p == Rgba([255, 255, 255, 12])));
    }

    #[test]
    fn empty_image_is_a_no_op() {
        let mut image = RgbImage::new(0, 0);
        grayscale(&mut image);
        assert_eq!(image.dimensions(), (0, 0));
    }

    #[test]
    fn mode_serializes_snake_case() {
        let json = serde_json::to_string(&GrayscaleMode::Average).unwrap();
        assert_eq!(json, "\"average\"");
    }
}
