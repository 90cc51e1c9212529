//! Field extraction for segmented trade documents.

mod generic;
pub mod patterns;
pub mod rules;
pub mod values;

pub use generic::GenericExtractor;
pub use rules::{rules_for, FieldRule};
pub use values::{parse_amount, parse_date, parse_quantity, typed_value};

use tracing::trace;

use crate::models::config::ExtractionConfig;
use crate::models::document::{DocumentType, ExtractedField};
use crate::segment::RefinedSegment;

/// Trait for per-type segment extractors.
pub trait SegmentExtractor {
    /// Extract fields from the content of one segment.
    fn extract(&self, segment_id: &str, content: &str) -> Vec<ExtractedField>;
}

/// Runs a fixed, ordered rule set. Each rule yields at most one field.
pub struct RuleSetExtractor {
    rules: &'static [FieldRule],
    normalize_values: bool,
}

impl RuleSetExtractor {
    pub fn new(rules: &'static [FieldRule], normalize_values: bool) -> Self {
        Self {
            rules,
            normalize_values,
        }
    }
}

impl SegmentExtractor for RuleSetExtractor {
    fn extract(&self, segment_id: &str, content: &str) -> Vec<ExtractedField> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let value = rule.apply(content)?;
                trace!(field = rule.field_name, value, "Rule matched");

                let typed = if self.normalize_values {
                    typed_value(rule.kind, value)
                } else {
                    None
                };

                Some(ExtractedField {
                    segment_id: segment_id.to_string(),
                    field_name: rule.field_name.to_string(),
                    field_value: value.to_string(),
                    confidence: rule.confidence,
                    kind: rule.kind,
                    typed_value: typed,
                })
            })
            .collect()
    }
}

/// Dispatches segments to the extractor for their document type.
#[derive(Debug, Clone, Default)]
pub struct FieldExtractor {
    config: ExtractionConfig,
}

impl FieldExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Extract fields from a refined segment.
    pub fn extract(&self, segment: &RefinedSegment, segment_id: &str) -> Vec<ExtractedField> {
        self.extract_text(segment.document_type(), segment.content(), segment_id)
    }

    /// Extract fields from arbitrary text, treating it as `document_type`.
    pub fn extract_text(
        &self,
        document_type: DocumentType,
        content: &str,
        segment_id: &str,
    ) -> Vec<ExtractedField> {
        match rules_for(document_type) {
            Some(rules) => RuleSetExtractor::new(rules, self.config.normalize_values)
                .extract(segment_id, content),
            None => GenericExtractor::new(&self.config).extract(segment_id, content),
        }
    }
}
