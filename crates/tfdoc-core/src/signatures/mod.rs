//! Document signature registry.
//!
//! A signature is the fixed pattern/keyword definition used to recognize one
//! document type. The registry is built once and never mutated, so it can be
//! shared freely across threads.

mod registry;

use regex::Regex;

use crate::models::document::DocumentType;

use registry::SIGNATURES;

/// Recognition rules for one document type.
#[derive(Debug)]
pub struct DocumentSignature {
    /// Type this signature recognizes.
    pub document_type: DocumentType,

    /// Patterns marking the first line of a document (any-match).
    pub start_patterns: Vec<Regex>,

    /// Patterns marking the last line of a document (any-match).
    pub end_patterns: Vec<Regex>,

    /// Lower-case topical keywords, matched as substrings.
    pub keywords: Vec<&'static str>,
}

impl DocumentSignature {
    /// Number of start patterns matching `text`.
    pub fn start_match_count(&self, text: &str) -> usize {
        self.start_patterns.iter().filter(|p| p.is_match(text)).count()
    }

    pub fn matches_start(&self, text: &str) -> bool {
        self.start_patterns.iter().any(|p| p.is_match(text))
    }

    pub fn matches_end(&self, text: &str) -> bool {
        self.end_patterns.iter().any(|p| p.is_match(text))
    }

    /// Number of distinct keywords present in `text` (case-insensitive).
    pub fn keyword_hits(&self, text: &str) -> usize {
        let lower = text.to_lowercase();
        self.keywords.iter().filter(|k| lower.contains(*k)).count()
    }

    /// Fraction of keywords present in `text`.
    pub fn keyword_ratio(&self, text: &str) -> f32 {
        if self.keywords.is_empty() {
            return 0.0;
        }
        self.keyword_hits(text) as f32 / self.keywords.len() as f32
    }

    /// Fraction of start patterns matching anywhere in `text`.
    pub fn start_pattern_ratio(&self, text: &str) -> f32 {
        if self.start_patterns.is_empty() {
            return 0.0;
        }
        self.start_match_count(text) as f32 / self.start_patterns.len() as f32
    }
}

/// All registered signatures, in declared order.
pub fn all_signatures() -> &'static [DocumentSignature] {
    SIGNATURES.as_slice()
}

/// Signature for `document_type`, or `None` for types without one (`Unknown`).
pub fn lookup_signature(document_type: DocumentType) -> Option<&'static DocumentSignature> {
    SIGNATURES
        .iter()
        .find(|s| s.document_type == document_type)
}
