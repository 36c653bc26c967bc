//! Column-major pixel extraction.

use crate::core::bitmap::{Color, PixelAccess};

/// Flatten `image` into a sequence of colors.
///
/// The outer loop runs over `x` and the inner loop over `y`, so index
/// `x * height + y` holds the pixel at `(x, y)`. Two images with the same
/// dimensions produce sequences that line up index for index.
pub fn extract_pixels<I: PixelAccess + ?Sized>(image: &I) -> Vec<Color> {
    let (width, height) = image.dimensions();
    let mut pixels = Vec::with_capacity(image.pixel_count() as usize);
    for x in 0..width {
        for y in 0..height {
            pixels.push(image.get_pixel(x, y));
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn length_is_width_times_height() {
        let image = RgbImage::new(4, 3);
        assert_eq!(extract_pixels(&image).len(), 12);
    }

    #[test]
    fn order_is_column_major() {
        // Encode the coordinates into the red and green channels
        let image = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, 0]));
        let pixels = extract_pixels(&image);

        let coordinates: Vec<_> = pixels.iter().map(|c| (c.r, c.g)).collect();
        assert_eq!(
            coordinates,
            vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn empty_image_yields_nothing() {
        assert!(extract_pixels(&RgbImage::new(0, 5)).is_empty());
    }
}
