//! # Scanner Module
//!
//! Finds image files on disk and decodes them into RGBA buffers for the
//! command line front end. The comparison engine itself never touches the
//! filesystem.
//!
//! Directories are walked for the extensions `image` can decode: png,
//! jpg/jpeg, bmp, gif, tiff/tif and webp.
//!
//! ## Example
//! ```rust,ignore
//! use bitmap_dedup::core::scanner::{load_images, ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let found = scanner.scan(&["/Users/me/Screenshots".into()]);
//! let loaded = load_images(&found.files, &null_sender());
//! ```

mod filter;
mod loader;
mod walker;

pub use filter::ImageFilter;
pub use loader::{load_image, load_images, LoadResult, LoadedImage};
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::LoadError;
use std::path::PathBuf;

/// Result of a scan
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered files, sorted by path
    pub files: Vec<PathBuf>,
    /// Non-fatal errors hit while walking
    pub errors: Vec<LoadError>,
}
