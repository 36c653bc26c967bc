//! # Dedup Module
//!
//! Removes near-duplicates from a collection of same-shape images.
//!
//! ## Stages
//! 1. **Validate** - thresholds, and that every image shares one shape
//! 2. **Grayscale** - every image is converted in place
//! 3. **Scan** - every ordered pair `(i, j)` with `i != j` is compared
//! 4. **Filter** - marked images are split off, order is preserved
//!
//! ## Removal
//! Images are tracked by their original index rather than their position in
//! a shrinking list. When a pair is a near-duplicate the later index is
//! marked; pairs touching an already-marked image are skipped. The earliest
//! image of each cluster of near-duplicates survives.
//!
//! ## Mixed sizes
//! [`dedup_by_shape`] groups decoded files by `(width, height)` and runs
//! each group separately, for callers that cannot guarantee one shape.
//!
//! ## Parallelism
//! Grayscale conversion runs across images with rayon. The pair scan is
//! sequential.

mod config;
mod remover;
mod shapes;

pub use config::DedupConfig;
pub use remover::{DedupOutcome, DuplicateRemover};
pub use shapes::{dedup_by_shape, FileMatch, ShapeOutcome};

use crate::core::bitmap::PixelAccess;
use crate::error::DedupError;

/// Grayscale every image, then drop near-duplicates.
///
/// A pair is a near-duplicate when it differs in at most `match_threshold`
/// pixel positions and its difference ratio is at most
/// `difference_threshold`. Of each such pair the earlier image is kept.
///
/// Pass `&mut` references to keep ownership of the buffers:
///
/// ```rust,ignore
/// let kept = remove_duplicates(0, 0.0, shots.iter_mut().collect())?;
/// ```
pub fn remove_duplicates<I>(
    match_threshold: i64,
    difference_threshold: f64,
    images: Vec<I>,
) -> Result<Vec<I>, DedupError>
where
    I: PixelAccess + Send,
{
    let remover = DedupConfig::new()
        .match_threshold(match_threshold)
        .difference_threshold(difference_threshold)
        .build()?;
    Ok(remover.run(images)?.kept)
}
