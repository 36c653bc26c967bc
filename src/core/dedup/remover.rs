//! Duplicate remover implementation.

use crate::core::bitmap::PixelAccess;
use crate::core::comparator::{
    compare_with, ensure_same_dimensions, ComparisonStrategy, DifferenceScale, PairMatch,
    ThresholdStrategy,
};
use crate::core::grayscale::{grayscale_with, GrayscaleMode};
use crate::error::DedupError;
use crate::events::{
    null_sender, CompareEvent, CompareProgress, Event, EventSender, GrayscaleEvent,
};
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, info, trace};

/// Result of a duplicate-removal run
#[derive(Debug)]
pub struct DedupOutcome<I> {
    /// Images that survived, in their original order
    pub kept: Vec<I>,
    /// Original indices of `kept`
    pub kept_indices: Vec<usize>,
    /// Images marked as near-duplicates, in their original order
    pub removed: Vec<I>,
    /// Original indices of `removed`
    pub removed_indices: Vec<usize>,
    /// One entry per removal, in the order removals happened
    pub matches: Vec<PairMatch>,
}

/// Removes near-duplicates from a collection.
///
/// Holds no state between runs; build one from a
/// [`DedupConfig`](super::DedupConfig) or with [`DuplicateRemover::new`].
pub struct DuplicateRemover {
    strategy: Box<dyn ComparisonStrategy>,
    grayscale: GrayscaleMode,
    scale: DifferenceScale,
}

impl DuplicateRemover {
    /// Create a remover from its parts
    pub fn new(
        strategy: Box<dyn ComparisonStrategy>,
        grayscale: GrayscaleMode,
        scale: DifferenceScale,
    ) -> Self {
        Self {
            strategy,
            grayscale,
            scale,
        }
    }

    /// The strategy deciding which pairs are duplicates
    pub fn strategy(&self) -> &dyn ComparisonStrategy {
        self.strategy.as_ref()
    }

    /// Run without events
    pub fn run<I>(&self, images: Vec<I>) -> Result<DedupOutcome<I>, DedupError>
    where
        I: PixelAccess + Send,
    {
        self.run_with_events(images, &null_sender())
    }

    /// Run with event reporting
    pub fn run_with_events<I>(
        &self,
        mut images: Vec<I>,
        events: &EventSender,
    ) -> Result<DedupOutcome<I>, DedupError>
    where
        I: PixelAccess + Send,
    {
        let n = images.len();

        // Check shapes up front so a mismatch leaves every image untouched
        if let Some((first, rest)) = images.split_first() {
            for other in rest {
                ensure_same_dimensions(first, other)?;
            }
        }

        info!(
            images = n,
            strategy = %self.strategy.description(),
            "removing duplicates"
        );

        // Phase 1: grayscale
        events.send(Event::Grayscale(GrayscaleEvent::Started { total_images: n }));
        let mode = self.grayscale;
        images
            .par_iter_mut()
            .for_each(|image| grayscale_with(image, mode));
        events.send(Event::Grayscale(GrayscaleEvent::Completed { total_images: n }));
        debug!(images = n, %mode, "grayscale applied");

        // Phase 2: pairwise scan over original indices
        let total_comparisons = n * n.saturating_sub(1);
        events.send(Event::Compare(CompareEvent::Started {
            total_images: n,
            total_comparisons,
        }));

        let update_interval = std::cmp::min(1000, std::cmp::max(1, total_comparisons / 50));
        let mut removed: HashSet<usize> = HashSet::new();
        let mut matches = Vec::new();
        let mut comparisons_completed = 0;

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }

                comparisons_completed += 1;
                if comparisons_completed % update_interval == 0 {
                    events.send(Event::Compare(CompareEvent::Progress(CompareProgress {
                        comparisons_completed,
                        total_comparisons,
                        duplicates_found: removed.len(),
                    })));
                }

                if removed.contains(&i) || removed.contains(&j) {
                    continue;
                }

                let result = compare_with(&images[i], &images[j], self.scale)?;
                if !self.strategy.is_duplicate(&result) {
                    continue;
                }

                let (kept, later) = (i.min(j), i.max(j));
                if removed.insert(later) {
                    trace!(kept, removed = later, matches = result.matches, "near-duplicate");
                    events.send(Event::Compare(CompareEvent::DuplicateFound {
                        kept,
                        removed: later,
                    }));
                    matches.push(PairMatch {
                        kept,
                        removed: later,
                        result,
                    });
                }
            }
        }

        // Phase 3: filter by index
        let mut outcome = DedupOutcome {
            kept: Vec::with_capacity(n - removed.len()),
            kept_indices: Vec::with_capacity(n - removed.len()),
            removed: Vec::with_capacity(removed.len()),
            removed_indices: Vec::with_capacity(removed.len()),
            matches,
        };
        for (index, image) in images.into_iter().enumerate() {
            if removed.contains(&index) {
                outcome.removed.push(image);
                outcome.removed_indices.push(index);
            } else {
                outcome.kept.push(image);
                outcome.kept_indices.push(index);
            }
        }

        events.send(Event::Compare(CompareEvent::Completed {
            kept: outcome.kept.len(),
            removed: outcome.removed.len(),
        }));
        info!(
            kept = outcome.kept.len(),
            removed = outcome.removed.len(),
            "duplicate removal finished"
        );

        Ok(outcome)
    }
}

impl Default for DuplicateRemover {
    fn default() -> Self {
        Self::new(
            Box::new(ThresholdStrategy::default()),
            GrayscaleMode::default(),
            DifferenceScale::default(),
        )
    }
}
