//! Trait definitions for duplicate strategies.

use super::ComparisonResult;
use serde::{Deserialize, Serialize};

/// Strategy trait for deciding whether a compared pair is a near-duplicate
pub trait ComparisonStrategy: Send + Sync {
    /// Determine if two images should be considered duplicates
    fn is_duplicate(&self, result: &ComparisonResult) -> bool;

    /// Human-readable description of the strategy
    fn description(&self) -> String;
}

/// Which side of the thresholds counts as a duplicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateRule {
    /// Both values at or below their thresholds ([`ThresholdStrategy`])
    #[default]
    Within,
    /// Both values strictly above their thresholds ([`ExceedsStrategy`])
    Exceeds,
}

impl DuplicateRule {
    /// Build the strategy for this rule
    pub fn strategy(
        &self,
        match_threshold: u64,
        difference_threshold: f64,
    ) -> Box<dyn ComparisonStrategy> {
        match self {
            DuplicateRule::Within => {
                Box::new(ThresholdStrategy::new(match_threshold, difference_threshold))
            }
            DuplicateRule::Exceeds => {
                Box::new(ExceedsStrategy::new(match_threshold, difference_threshold))
            }
        }
    }
}

/// Pairs differing in at most `match_threshold` positions, with a
/// difference ratio of at most `difference_threshold`, are duplicates
#[derive(Debug, Clone)]
pub struct ThresholdStrategy {
    match_threshold: u64,
    difference_threshold: f64,
}

impl ThresholdStrategy {
    /// Create a new threshold strategy
    pub fn new(match_threshold: u64, difference_threshold: f64) -> Self {
        Self {
            match_threshold,
            difference_threshold,
        }
    }

    /// Only pixel-identical images (after grayscale) are duplicates
    pub fn exact() -> Self {
        Self::new(0, 0.0)
    }
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        Self::exact()
    }
}

impl ComparisonStrategy for ThresholdStrategy {
    fn is_duplicate(&self, result: &ComparisonResult) -> bool {
        result.matches <= self.match_threshold && result.difference <= self.difference_threshold
    }

    fn description(&self) -> String {
        format!(
            "Within strategy: pairs with at most {} differing pixels and difference <= {} are duplicates",
            self.match_threshold, self.difference_threshold
        )
    }
}

/// Pairs whose match count and difference ratio both exceed their
/// thresholds are duplicates.
///
/// Only the condition follows the older rule. The remover still marks just
/// the later image of a matching pair, so the earlier one always survives.
#[derive(Debug, Clone)]
pub struct ExceedsStrategy {
    match_threshold: u64,
    difference_threshold: f64,
}

impl ExceedsStrategy {
    /// Create a new exceeds strategy
    pub fn new(match_threshold: u64, difference_threshold: f64) -> Self {
        Self {
            match_threshold,
            difference_threshold,
        }
    }
}

impl ComparisonStrategy for ExceedsStrategy {
    fn is_duplicate(&self, result: &ComparisonResult) -> bool {
        result.matches > self.match_threshold && result.difference > self.difference_threshold
    }

    fn description(&self) -> String {
        format!(
            "Exceeds strategy: pairs with more than {} differing pixels and difference > {} are duplicates",
            self.match_threshold, self.difference_threshold
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(matches: u64, difference: f64) -> ComparisonResult {
        ComparisonResult {
            sums: [0, 0, 0],
            matches,
            difference,
        }
    }

    #[test]
    fn threshold_strategy_at_boundary() {
        let strategy = ThresholdStrategy::new(5, 2.0);

        assert!(strategy.is_duplicate(&result(4, 1.0)));
        assert!(strategy.is_duplicate(&result(5, 2.0)));
        assert!(!strategy.is_duplicate(&result(6, 2.0)));
        assert!(!strategy.is_duplicate(&result(5, 2.5)));
    }

    #[test]
    fn exact_strategy_only_accepts_identical() {
        let strategy = ThresholdStrategy::exact();

        assert!(strategy.is_duplicate(&result(0, 0.0)));
        assert!(!strategy.is_duplicate(&result(1, 100.0 / 256.0)));
    }

    #[test]
    fn exceeds_strategy_needs_both_above() {
        let strategy = ExceedsStrategy::new(10, 5.0);

        assert!(strategy.is_duplicate(&result(11, 5.5)));
        assert!(!strategy.is_duplicate(&result(10, 5.5)));
        assert!(!strategy.is_duplicate(&result(11, 5.0)));
    }

    #[test]
    fn rule_builds_matching_strategy() {
        let within = DuplicateRule::Within.strategy(3, 1.0);
        let exceeds = DuplicateRule::Exceeds.strategy(3, 1.0);

        assert!(within.is_duplicate(&result(0, 0.0)));
        assert!(!exceeds.is_duplicate(&result(0, 0.0)));
        assert!(exceeds.description().starts_with("Exceeds"));
    }

    #[test]
    fn description_includes_thresholds() {
        let desc = ThresholdStrategy::new(7, 3.5).description();

        assert!(desc.contains('7'));
        assert!(desc.contains("3.5"));
    }
}
