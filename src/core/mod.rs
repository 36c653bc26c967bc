//! # Core Module
//!
//! The stateless comparison engine.
//!
//! ## Modules
//! - `bitmap` - Pixel access abstraction over caller-owned buffers
//! - `grayscale` - In-place grayscale transform
//! - `pixels` - Column-major pixel extraction
//! - `comparator` - Pairwise pixel-difference comparison
//! - `dedup` - Near-duplicate removal over a collection
//! - `scanner` - Discovers and loads image files (CLI support)

pub mod bitmap;
pub mod comparator;
pub mod dedup;
pub mod grayscale;
pub mod pixels;
pub mod scanner;

// Re-export commonly used types
pub use comparator::{ComparisonResult, DifferenceScale, PairMatch};
pub use dedup::{DedupConfig, DedupOutcome, DuplicateRemover};
pub use grayscale::GrayscaleMode;
pub use bitmap::{Color, PixelAccess};
