//! Duplicate-removal configuration.

use super::DuplicateRemover;
use crate::core::comparator::{DifferenceScale, DuplicateRule};
use crate::core::grayscale::GrayscaleMode;
use crate::error::{DedupError, ThresholdError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a [`DuplicateRemover`].
///
/// Every field has a default, so a JSON file only needs the keys it
/// changes:
///
/// ```json
/// { "match_threshold": 12, "difference_threshold": 4.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Match-count threshold
    pub match_threshold: i64,
    /// Difference-ratio threshold
    pub difference_threshold: f64,
    /// Grayscale mode applied before comparing
    pub grayscale: GrayscaleMode,
    /// How match counts become difference ratios
    pub difference_scale: DifferenceScale,
    /// Which side of the thresholds marks a duplicate
    pub rule: DuplicateRule,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0,
            difference_threshold: 0.0,
            grayscale: GrayscaleMode::default(),
            difference_scale: DifferenceScale::default(),
            rule: DuplicateRule::default(),
        }
    }
}

impl DedupConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, DedupError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self, DedupError> {
        let json = std::fs::read_to_string(path).map_err(|source| DedupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Set the match-count threshold
    pub fn match_threshold(mut self, threshold: i64) -> Self {
        self.match_threshold = threshold;
        self
    }

    /// Set the difference-ratio threshold
    pub fn difference_threshold(mut self, threshold: f64) -> Self {
        self.difference_threshold = threshold;
        self
    }

    /// Set the grayscale mode
    pub fn grayscale(mut self, mode: GrayscaleMode) -> Self {
        self.grayscale = mode;
        self
    }

    /// Set the difference scale
    pub fn difference_scale(mut self, scale: DifferenceScale) -> Self {
        self.difference_scale = scale;
        self
    }

    /// Set the duplicate rule
    pub fn rule(mut self, rule: DuplicateRule) -> Self {
        self.rule = rule;
        self
    }

    /// Check both thresholds
    pub fn validate(&self) -> Result<(), ThresholdError> {
        if self.match_threshold < 0 {
            return Err(ThresholdError::NegativeMatchThreshold {
                value: self.match_threshold,
            });
        }
        if self.difference_threshold.is_nan() || self.difference_threshold < 0.0 {
            return Err(ThresholdError::InvalidDifferenceThreshold {
                value: self.difference_threshold,
            });
        }
        Ok(())
    }

    /// Validate and build the remover
    pub fn build(&self) -> Result<DuplicateRemover, ThresholdError> {
        self.validate()?;
        let strategy = self
            .rule
            .strategy(self.match_threshold as u64, self.difference_threshold);
        Ok(DuplicateRemover::new(
            strategy,
            self.grayscale,
            self.difference_scale,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_reference_behavior() {
        let config = DedupConfig::new();
        assert_eq!(config.match_threshold, 0);
        assert_eq!(config.difference_threshold, 0.0);
        assert_eq!(config.grayscale, GrayscaleMode::Threshold);
        assert_eq!(config.difference_scale, DifferenceScale::Legacy);
        assert_eq!(config.rule, DuplicateRule::Within);
    }

    #[test]
    fn builder_sets_fields() {
        let config = DedupConfig::new()
            .match_threshold(12)
            .difference_threshold(4.5)
            .grayscale(GrayscaleMode::Average)
            .difference_scale(DifferenceScale::PixelCount)
            .rule(DuplicateRule::Exceeds);

        assert_eq!(config.match_threshold, 12);
        assert_eq!(config.difference_threshold, 4.5);
        assert_eq!(config.grayscale, GrayscaleMode::Average);
        assert_eq!(config.difference_scale, DifferenceScale::PixelCount);
        assert_eq!(config.rule, DuplicateRule::Exceeds);
    }

    #[test]
    fn negative_match_threshold_is_rejected() {
        let result = DedupConfig::new().match_threshold(-1).build();
        assert!(matches!(
            result,
            Err(ThresholdError::NegativeMatchThreshold { value: -1 })
        ));
    }

    #[test]
    fn negative_difference_threshold_is_rejected() {
        let result = DedupConfig::new().difference_threshold(-0.5).validate();
        assert!(matches!(
            result,
            Err(ThresholdError::InvalidDifferenceThreshold { .. })
        ));
    }

    #[test]
    fn nan_difference_threshold_is_rejected() {
        let result = DedupConfig::new().difference_threshold(f64::NAN).validate();
        assert!(result.is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = DedupConfig::from_json(r#"{ "match_threshold": 3, "grayscale": "average" }"#)
            .unwrap();

        assert_eq!(config.match_threshold, 3);
        assert_eq!(config.grayscale, GrayscaleMode::Average);
        assert_eq!(config.difference_threshold, 0.0);
        assert_eq!(config.difference_scale, DifferenceScale::Legacy);
    }

    #[test]
    fn malformed_json_keeps_parser_error() {
        use std::error::Error as _;

        let error = DedupConfig::from_json("{ not json").unwrap_err();

        assert!(matches!(error, DedupError::ConfigParse(_)));
        assert!(error.source().is_some());
    }

    #[test]
    fn wrong_field_type_is_a_parse_error() {
        let error = DedupConfig::from_json(r#"{ "match_threshold": "many" }"#).unwrap_err();
        assert!(matches!(error, DedupError::ConfigParse(_)));
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = DedupConfig::new()
            .difference_scale(DifferenceScale::PixelCount)
            .rule(DuplicateRule::Exceeds);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"pixel_count\""));
        assert_eq!(DedupConfig::from_json(&json).unwrap(), config);
    }
}
