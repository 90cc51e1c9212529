//! Configuration structures for the segmentation pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TfdocError};

/// Default thresholds, weights and extraction limits.
pub mod defaults {
    /// Segments scoring at or below this are dropped.
    pub const MIN_CONFIDENCE: f32 = 0.3;
    /// Upper bound of a refined segment confidence.
    pub const MAX_CONFIDENCE: f32 = 0.95;
    /// Segments with fewer characters than this are penalized.
    pub const SHORT_CONTENT_LENGTH: usize = 100;
    /// Multiplier applied to short segments.
    pub const SHORT_CONTENT_PENALTY: f32 = 0.5;
    /// Weight of keyword density in the refined confidence.
    pub const KEYWORD_WEIGHT: f32 = 0.4;
    /// Weight of the structural checklist in the refined confidence.
    pub const STRUCTURAL_WEIGHT: f32 = 0.6;
    /// Confidence of the single segment synthesized when no boundary is found.
    pub const FALLBACK_CONFIDENCE: f32 = 0.7;
    /// Whole-text classification scores at or below this map to `Unknown`.
    pub const FALLBACK_MIN_SCORE: f32 = 0.3;
    /// Lines per page used to estimate page ranges.
    pub const LINES_PER_PAGE: usize = 50;

    /// Confidence of fields found by the generic `label: value` extractor.
    pub const GENERIC_CONFIDENCE: f32 = 0.6;
    /// Maximum number of generic fields per segment.
    pub const GENERIC_MAX_FIELDS: usize = 10;
    /// Generic labels must be shorter than this.
    pub const GENERIC_MAX_LABEL_LEN: usize = 50;
    /// Generic values must be shorter than this.
    pub const GENERIC_MAX_VALUE_LEN: usize = 200;
}

/// Main configuration for the tfdoc pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfdocConfig {
    /// Boundary detection and refinement configuration.
    pub segmentation: SegmentationConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// OCR error correction configuration.
    pub correction: CorrectionConfig,
}

/// Boundary detection and refinement configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Minimum refined confidence; segments at or below it are dropped.
    pub min_confidence: f32,

    /// Cap applied to the refined confidence.
    pub max_confidence: f32,

    /// Content length (in characters) under which the short-content penalty applies.
    pub short_content_length: usize,

    /// Multiplier applied to short segments.
    pub short_content_penalty: f32,

    /// Weight of keyword density.
    pub keyword_weight: f32,

    /// Weight of the structural score.
    pub structural_weight: f32,

    /// Confidence given to the fallback whole-text segment.
    pub fallback_confidence: f32,

    /// Minimum whole-text classification score to accept a type.
    pub fallback_min_score: f32,

    /// Lines per estimated page.
    pub lines_per_page: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_confidence: defaults::MIN_CONFIDENCE,
            max_confidence: defaults::MAX_CONFIDENCE,
            short_content_length: defaults::SHORT_CONTENT_LENGTH,
            short_content_penalty: defaults::SHORT_CONTENT_PENALTY,
            keyword_weight: defaults::KEYWORD_WEIGHT,
            structural_weight: defaults::STRUCTURAL_WEIGHT,
            fallback_confidence: defaults::FALLBACK_CONFIDENCE,
            fallback_min_score: defaults::FALLBACK_MIN_SCORE,
            lines_per_page: defaults::LINES_PER_PAGE,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Confidence of generic `label: value` fields.
    pub generic_confidence: f32,

    /// Maximum generic fields per segment.
    pub generic_max_fields: usize,

    /// Generic labels must be shorter than this many characters.
    pub generic_max_label_len: usize,

    /// Generic values must be shorter than this many characters.
    pub generic_max_value_len: usize,

    /// Parse amounts, dates and quantities into typed values.
    pub normalize_values: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            generic_confidence: defaults::GENERIC_CONFIDENCE,
            generic_max_fields: defaults::GENERIC_MAX_FIELDS,
            generic_max_label_len: defaults::GENERIC_MAX_LABEL_LEN,
            generic_max_value_len: defaults::GENERIC_MAX_VALUE_LEN,
            normalize_values: true,
        }
    }
}

/// OCR error correction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionConfig {
    /// Run O/0 and I/1 correction before segmentation.
    pub enabled: bool,
}

impl TfdocConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that every threshold is in range.
    pub fn validate(&self) -> Result<()> {
        let seg = &self.segmentation;

        let unit_values = [
            ("segmentation.min_confidence", seg.min_confidence),
            ("segmentation.max_confidence", seg.max_confidence),
            ("segmentation.short_content_penalty", seg.short_content_penalty),
            ("segmentation.keyword_weight", seg.keyword_weight),
            ("segmentation.structural_weight", seg.structural_weight),
            ("segmentation.fallback_confidence", seg.fallback_confidence),
            ("segmentation.fallback_min_score", seg.fallback_min_score),
            ("extraction.generic_confidence", self.extraction.generic_confidence),
        ];

        for (key, value) in unit_values {
            if !(0.0..=1.0).contains(&value) {
                return Err(TfdocError::Config(format!(
                    "{} must be between 0.0 and 1.0, got {}",
                    key, value
                )));
            }
        }

        if seg.lines_per_page == 0 {
            return Err(TfdocError::Config(
                "segmentation.lines_per_page must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_constants() {
        let config = TfdocConfig::default();
        assert_eq!(config.segmentation.min_confidence, 0.3);
        assert_eq!(config.segmentation.short_content_penalty, 0.5);
        assert_eq!(config.segmentation.lines_per_page, 50);
        assert_eq!(config.extraction.generic_max_fields, 10);
        assert!(!config.correction.enabled);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TfdocConfig =
            serde_json::from_str(r#"{"segmentation": {"min_confidence": 0.5}}"#).unwrap();

        assert_eq!(config.segmentation.min_confidence, 0.5);
        assert_eq!(config.segmentation.max_confidence, 0.95);
        assert_eq!(config.extraction, ExtractionConfig::default());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = TfdocConfig::default();
        config.segmentation.short_content_penalty = 1.5;
        assert!(matches!(config.validate(), Err(TfdocError::Config(_))));

        let mut config = TfdocConfig::default();
        config.segmentation.lines_per_page = 0;
        assert!(config.validate().is_err());

        assert!(TfdocConfig::default().validate().is_ok());
    }
}
