//! Duplicate removal over decoded files of mixed sizes.

use super::DuplicateRemover;
use crate::core::comparator::ComparisonResult;
use crate::core::scanner::LoadedImage;
use crate::error::DedupError;
use crate::events::EventSender;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

/// A file dropped as a near-duplicate of another
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileMatch {
    /// The file that would be dropped
    pub removed: PathBuf,
    /// The earlier file it duplicates
    pub kept: PathBuf,
    pub result: ComparisonResult,
}

/// Result of [`dedup_by_shape`]
#[derive(Debug, Default)]
pub struct ShapeOutcome {
    /// Number of distinct `(width, height)` groups
    pub shape_groups: usize,
    /// Surviving files, sorted by path
    pub kept: Vec<PathBuf>,
    /// Dropped files, sorted by removed path
    pub matches: Vec<FileMatch>,
}

/// Deduplicate decoded files, one `(width, height)` group at a time.
///
/// Only same-shape images can be compared, so each group runs through the
/// remover on its own. Within a group images keep their input order, which
/// decides the survivor of each cluster.
pub fn dedup_by_shape(
    remover: &DuplicateRemover,
    images: Vec<LoadedImage>,
    events: &EventSender,
) -> Result<ShapeOutcome, DedupError> {
    let mut groups: BTreeMap<(u32, u32), Vec<LoadedImage>> = BTreeMap::new();
    for loaded in images {
        groups
            .entry(loaded.image.dimensions())
            .or_default()
            .push(loaded);
    }

    let mut outcome = ShapeOutcome {
        shape_groups: groups.len(),
        ..Default::default()
    };

    for ((width, height), group) in groups {
        let (paths, buffers): (Vec<PathBuf>, Vec<_>) =
            group.into_iter().map(|l| (l.path, l.image)).unzip();
        info!(width, height, images = buffers.len(), "deduplicating shape group");

        let run = remover.run_with_events(buffers, events)?;
        outcome
            .kept
            .extend(run.kept_indices.iter().map(|&i| paths[i].clone()));
        outcome.matches.extend(run.matches.iter().map(|m| FileMatch {
            removed: paths[m.removed].clone(),
            kept: paths[m.kept].clone(),
            result: m.result,
        }));
    }

    outcome.kept.sort();
    outcome.matches.sort_by(|a, b| a.removed.cmp(&b.removed));
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::null_sender;
    use image::{Rgba, RgbaImage};

    fn loaded(name: &str, width: u32, white_columns: u32) -> LoadedImage {
        LoadedImage {
            path: PathBuf::from(name),
            image: RgbaImage::from_fn(width, 2, |x, _| {
                if x < white_columns {
                    Rgba([255, 255, 255, 255])
                } else {
                    Rgba([0, 0, 0, 255])
                }
            }),
        }
    }

    #[test]
    fn each_size_is_deduplicated_separately() {
        let images = vec![
            loaded("wide-a.png", 6, 1),
            loaded("narrow-a.png", 3, 1),
            loaded("wide-b.png", 6, 1),
            loaded("narrow-b.png", 3, 1),
        ];

        let outcome = dedup_by_shape(&DuplicateRemover::default(), images, &null_sender()).unwrap();

        assert_eq!(outcome.shape_groups, 2);
        assert_eq!(
            outcome.kept,
            vec![PathBuf::from("narrow-a.png"), PathBuf::from("wide-a.png")]
        );
        let removed: Vec<_> = outcome.matches.iter().map(|m| m.removed.clone()).collect();
        assert_eq!(
            removed,
            vec![PathBuf::from("narrow-b.png"), PathBuf::from("wide-b.png")]
        );
        assert_eq!(outcome.matches[0].kept, PathBuf::from("narrow-a.png"));
    }

    #[test]
    fn lone_sizes_are_kept() {
        let images = vec![loaded("a.png", 4, 1), loaded("b.png", 5, 1)];

        let outcome = dedup_by_shape(&DuplicateRemover::default(), images, &null_sender()).unwrap();

        assert_eq!(outcome.kept.len(), 2);
        assert!(outcome.matches.is_empty());
    }

    #[test]
    fn empty_input_has_no_groups() {
        let outcome =
            dedup_by_shape(&DuplicateRemover::default(), Vec::new(), &null_sender()).unwrap();

        assert_eq!(outcome.shape_groups, 0);
        assert!(outcome.kept.is_empty());
    }
}
