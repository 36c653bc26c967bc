//! # Error Module
//!
//! Error types for grayscale, comparison and duplicate removal.
//!
//! ## Design Principles
//! - **Never panic** on caller data - return errors instead
//! - **Include context** - shapes, threshold values, paths
//! - **Fail fast** - preconditions are checked before any pixel is read

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error
#[derive(Error, Debug)]
pub enum DedupError {
    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),

    #[error("Threshold error: {0}")]
    Threshold(#[from] ThresholdError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Failed to read configuration {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Errors raised by pairwise comparison
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("Image dimensions differ: {left:?} vs {right:?} (width, height)")]
    DimensionMismatch {
        left: (u32, u32),
        right: (u32, u32),
    },
}

/// Errors raised when validating duplicate-removal thresholds
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    #[error("Invalid match threshold: {value} (must be 0 or greater)")]
    NegativeMatchThreshold { value: i64 },

    #[error("Invalid difference threshold: {value} (must be a number, 0 or greater)")]
    InvalidDifferenceThreshold { value: f64 },
}

/// Errors that occur while loading images for the command line
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Failed to read directory {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DedupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_includes_both_shapes() {
        let error = CompareError::DimensionMismatch {
            left: (4, 3),
            right: (5, 3),
        };
        let message = error.to_string();
        assert!(message.contains("(4, 3)"));
        assert!(message.contains("(5, 3)"));
    }

    #[test]
    fn threshold_error_includes_value() {
        let error = ThresholdError::NegativeMatchThreshold { value: -2 };
        assert!(error.to_string().contains("-2"));
    }

    #[test]
    fn decode_error_includes_path() {
        let error = LoadError::Decode {
            path: PathBuf::from("/shots/broken.png"),
            reason: "bad header".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/shots/broken.png"));
        assert!(message.contains("bad header"));
    }

    #[test]
    fn config_read_error_keeps_path_and_source() {
        use std::error::Error as _;

        let error = DedupError::ConfigRead {
            path: PathBuf::from("/etc/dedup.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };

        assert!(error.to_string().contains("/etc/dedup.json"));
        assert!(error.source().is_some());
    }

    #[test]
    fn compare_error_converts_to_top_level() {
        let error: DedupError = CompareError::DimensionMismatch {
            left: (1, 1),
            right: (2, 2),
        }
        .into();
        assert!(matches!(error, DedupError::Compare(_)));
    }
}
