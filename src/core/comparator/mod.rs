//! # Comparator Module
//!
//! Pairwise pixel-difference comparison.
//!
//! ## How It Works
//! 1. Check both images share the same width and height
//! 2. Extract both pixel sequences in column-major order
//! 3. For every position whose packed colors differ, count a match and add
//!    both images' channel values into the per-channel sums
//! 4. Derive the difference ratio from the match count
//!
//! ## Difference Scale
//! | Scale | Formula |
//! |-------|---------|
//! | `Legacy` (default) | `matches * 100 / 256` |
//! | `PixelCount` | `matches * 100 / (width * height)` |
//!
//! The legacy divisor does not depend on image size, so for anything larger
//! than 256 pixels the ratio can exceed 100. It is kept as the default so
//! thresholds tuned against it keep working.

mod traits;

pub use traits::{ComparisonStrategy, DuplicateRule, ExceedsStrategy, ThresholdStrategy};

use crate::core::bitmap::PixelAccess;
use crate::core::pixels::extract_pixels;
use crate::error::CompareError;
use serde::{Deserialize, Serialize};

/// Divisor used by [`DifferenceScale::Legacy`]
const LEGACY_DIVISOR: f64 = 256.0;

/// How the match count is turned into a difference ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceScale {
    /// `matches * 100 / 256`, independent of image size
    #[default]
    Legacy,
    /// `matches * 100 / pixel_count`, a true percentage
    PixelCount,
}

impl DifferenceScale {
    /// Difference ratio for `matches` differing positions out of `pixel_count`
    pub fn ratio(&self, matches: u64, pixel_count: u64) -> f64 {
        match self {
            DifferenceScale::Legacy => matches as f64 * 100.0 / LEGACY_DIVISOR,
            DifferenceScale::PixelCount => {
                if pixel_count == 0 {
                    0.0
                } else {
                    matches as f64 * 100.0 / pixel_count as f64
                }
            }
        }
    }
}

impl std::fmt::Display for DifferenceScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DifferenceScale::Legacy => write!(f, "legacy"),
            DifferenceScale::PixelCount => write!(f, "pixel-count"),
        }
    }
}

/// Result of comparing two images
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Per-channel sums `[red, green, blue]` over differing positions,
    /// adding both images' channel values at each such position
    pub sums: [u64; 3],
    /// Number of pixel positions whose colors differ
    pub matches: u64,
    /// Difference ratio derived from `matches`
    pub difference: f64,
}

impl ComparisonResult {
    /// Whether the two images were pixel-identical
    pub fn is_identical(&self) -> bool {
        self.matches == 0
    }
}

/// A comparison between two images of a collection, by original index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairMatch {
    /// Index of the image that was kept
    pub kept: usize,
    /// Index of the image that was removed
    pub removed: usize,
    /// The comparison that triggered the removal
    pub result: ComparisonResult,
}

/// Fail with [`CompareError::DimensionMismatch`] unless both shapes agree
pub fn ensure_same_dimensions<A, B>(a: &A, b: &B) -> Result<(), CompareError>
where
    A: PixelAccess + ?Sized,
    B: PixelAccess + ?Sized,
{
    let (left, right) = (a.dimensions(), b.dimensions());
    if left != right {
        return Err(CompareError::DimensionMismatch { left, right });
    }
    Ok(())
}

/// Compare two images using [`DifferenceScale::Legacy`]
pub fn compare<A, B>(a: &A, b: &B) -> Result<ComparisonResult, CompareError>
where
    A: PixelAccess + ?Sized,
    B: PixelAccess + ?Sized,
{
    compare_with(a, b, DifferenceScale::Legacy)
}

/// Compare two images, deriving the difference ratio with `scale`
pub fn compare_with<A, B>(
    a: &A,
    b: &B,
    scale: DifferenceScale,
) -> Result<ComparisonResult, CompareError>
where
    A: PixelAccess + ?Sized,
    B: PixelAccess + ?Sized,
{
    ensure_same_dimensions(a, b)?;

    let pixels_a = extract_pixels(a);
    let pixels_b = extract_pixels(b);

    let mut sums = [0u64; 3];
    let mut matches = 0u64;

    for (first, second) in pixels_a.iter().zip(pixels_b.iter()) {
        if first.packed() != second.packed() {
            matches += 1;
            sums[0] += first.r as u64 + second.r as u64;
            sums[1] += first.g as u64 + second.g as u64;
            sums[2] += first.b as u64 + second.b as u64;
        }
    }

    let difference = scale.ratio(matches, a.pixel_count());
    tracing::trace!(matches, difference, "compared image pair");

    Ok(ComparisonResult {
        sums,
        matches,
        difference,
    })
}
