//! # Bitmap Dedup
//!
//! Lightweight heuristics for spotting visually similar bitmaps, such as
//! repeated screenshots.
//!
//! ## Operations
//! - **Grayscale** - collapse every pixel to a gray level, in place
//! - **Compare** - count differing pixel positions between two bitmaps
//! - **Remove duplicates** - drop near-duplicates from a collection
//!
//! ## Architecture
//! - `core` - The comparison engine (stateless, works on borrowed buffers)
//! - `events` - Event-driven progress reporting
//! - `error` - Error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use crate::core::comparator::{compare, ComparisonResult};
pub use crate::core::dedup::remove_duplicates;
pub use crate::core::grayscale::grayscale;
pub use crate::core::bitmap::{Color, PixelAccess};
pub use error::{DedupError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    // A subscriber installed by the host application wins.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
