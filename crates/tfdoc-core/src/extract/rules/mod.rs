//! Per-type extraction rule tables.
//!
//! Rules run in declaration order and each yields at most one field.

mod bill_of_lading;
mod commercial_invoice;
mod letter_of_credit;
mod packing_list;

use regex::Regex;

use crate::models::document::{DocumentType, FieldKind};

pub use bill_of_lading::BILL_OF_LADING_RULES;
pub use commercial_invoice::COMMERCIAL_INVOICE_RULES;
pub use letter_of_credit::LETTER_OF_CREDIT_RULES;
pub use packing_list::PACKING_LIST_RULES;

/// One field extraction rule.
#[derive(Debug)]
pub struct FieldRule {
    /// Canonical field name.
    pub field_name: &'static str,
    /// Pattern whose first capture group is the value.
    pub pattern: &'static Regex,
    /// Fixed confidence for matches of this rule.
    pub confidence: f32,
    pub kind: FieldKind,
}

impl FieldRule {
    pub fn new(
        field_name: &'static str,
        pattern: &'static Regex,
        confidence: f32,
        kind: FieldKind,
    ) -> Self {
        Self {
            field_name,
            pattern,
            confidence,
            kind,
        }
    }

    /// First trimmed, non-empty capture in `text`.
    pub fn apply<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|value| !value.is_empty())
    }
}

/// Dedicated rule set for `document_type`, `None` for types using the
/// generic extractor.
pub fn rules_for(document_type: DocumentType) -> Option<&'static [FieldRule]> {
    match document_type {
        DocumentType::LetterOfCredit => Some(LETTER_OF_CREDIT_RULES.as_slice()),
        DocumentType::CommercialInvoice => Some(COMMERCIAL_INVOICE_RULES.as_slice()),
        DocumentType::BillOfLading => Some(BILL_OF_LADING_RULES.as_slice()),
        DocumentType::PackingList => Some(PACKING_LIST_RULES.as_slice()),
        DocumentType::CertificateOfOrigin
        | DocumentType::InsuranceCertificate
        | DocumentType::Unknown => None,
    }
}
