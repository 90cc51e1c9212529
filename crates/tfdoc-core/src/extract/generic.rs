//! `label: value` extraction for types without a dedicated rule set.

use super::patterns::LABEL_VALUE;
use super::SegmentExtractor;
use crate::models::config::ExtractionConfig;
use crate::models::document::{ExtractedField, FieldKind};

/// Extracts up to `max_fields` `label: value` lines in line order.
#[derive(Debug, Clone)]
pub struct GenericExtractor {
    confidence: f32,
    max_fields: usize,
    max_label_len: usize,
    max_value_len: usize,
}

impl GenericExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            confidence: config.generic_confidence,
            max_fields: config.generic_max_fields,
            max_label_len: config.generic_max_label_len,
            max_value_len: config.generic_max_value_len,
        }
    }

    fn parse_line<'t>(&self, line: &'t str) -> Option<(&'t str, &'t str)> {
        let caps = LABEL_VALUE.captures(line.trim())?;
        let label = caps.get(1)?.as_str().trim();
        let value = caps.get(2)?.as_str().trim();

        if label.is_empty() || value.is_empty() {
            return None;
        }
        if label.chars().count() >= self.max_label_len
            || value.chars().count() >= self.max_value_len
        {
            return None;
        }
        Some((label, value))
    }
}

impl Default for GenericExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl SegmentExtractor for GenericExtractor {
    fn extract(&self, segment_id: &str, content: &str) -> Vec<ExtractedField> {
        content
            .lines()
            .filter_map(|line| self.parse_line(line))
            .take(self.max_fields)
            .map(|(label, value)| ExtractedField {
                segment_id: segment_id.to_string(),
                field_name: label.to_string(),
                field_value: value.to_string(),
                confidence: self.confidence,
                kind: FieldKind::Generic,
                typed_value: None,
            })
            .collect()
    }
}
