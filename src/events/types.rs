//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted while loading and deduplicating images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Image loading events (command line only)
    Load(LoadEvent),
    /// Grayscale pre-processing events
    Grayscale(GrayscaleEvent),
    /// Pairwise comparison events
    Compare(CompareEvent),
}

/// Events while discovering and decoding image files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LoadEvent {
    /// Loading has started
    Started { total_files: usize },
    /// An image was decoded
    ImageLoaded { path: PathBuf },
    /// A file could not be decoded; loading continues
    Error { path: PathBuf, message: String },
    /// Loading completed
    Completed { total_images: usize },
}

/// Events during grayscale pre-processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GrayscaleEvent {
    /// Conversion has started
    Started { total_images: usize },
    /// Every image has been converted
    Completed { total_images: usize },
}

/// Events during the pairwise scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CompareEvent {
    /// The scan has started
    Started {
        total_images: usize,
        total_comparisons: usize,
    },
    /// Progress update during the scan
    Progress(CompareProgress),
    /// A near-duplicate was found and marked for removal
    DuplicateFound { kept: usize, removed: usize },
    /// The scan completed
    Completed { kept: usize, removed: usize },
}

/// Progress information during the pairwise scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareProgress {
    /// Ordered pairs visited so far, including skipped ones
    pub comparisons_completed: usize,
    /// Total number of ordered pairs
    pub total_comparisons: usize,
    /// Images marked for removal so far
    pub duplicates_found: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::Compare(CompareEvent::Progress(CompareProgress {
            comparisons_completed: 10,
            total_comparisons: 42,
            duplicates_found: 2,
        }));

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Compare(CompareEvent::Progress(p)) => {
                assert_eq!(p.total_comparisons, 42);
                assert_eq!(p.duplicates_found, 2);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn load_error_keeps_path() {
        let event = Event::Load(LoadEvent::Error {
            path: PathBuf::from("/shots/bad.png"),
            message: "truncated".to_string(),
        });

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("/shots/bad.png"));
    }
}
