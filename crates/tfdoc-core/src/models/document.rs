//! Output models for segmented trade-finance documents.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Closed set of document types the engine can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "Letter of Credit")]
    LetterOfCredit,
    #[serde(rename = "Commercial Invoice")]
    CommercialInvoice,
    #[serde(rename = "Bill of Lading")]
    BillOfLading,
    #[serde(rename = "Packing List")]
    PackingList,
    #[serde(rename = "Certificate of Origin")]
    CertificateOfOrigin,
    #[serde(rename = "Insurance Certificate")]
    InsuranceCertificate,
    /// Fallback when no signature matches.
    #[serde(rename = "Unknown Document")]
    Unknown,
}

impl DocumentType {
    /// All recognizable types in registry order (excludes `Unknown`).
    pub const KNOWN: [DocumentType; 6] = [
        DocumentType::LetterOfCredit,
        DocumentType::CommercialInvoice,
        DocumentType::BillOfLading,
        DocumentType::PackingList,
        DocumentType::CertificateOfOrigin,
        DocumentType::InsuranceCertificate,
    ];

    /// Human-readable name, as used in output records.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LetterOfCredit => "Letter of Credit",
            Self::CommercialInvoice => "Commercial Invoice",
            Self::BillOfLading => "Bill of Lading",
            Self::PackingList => "Packing List",
            Self::CertificateOfOrigin => "Certificate of Origin",
            Self::InsuranceCertificate => "Insurance Certificate",
            Self::Unknown => "Unknown Document",
        }
    }

    /// Short snake_case key, handy on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Self::LetterOfCredit => "letter_of_credit",
            Self::CommercialInvoice => "commercial_invoice",
            Self::BillOfLading => "bill_of_lading",
            Self::PackingList => "packing_list",
            Self::CertificateOfOrigin => "certificate_of_origin",
            Self::InsuranceCertificate => "insurance_certificate",
            Self::Unknown => "unknown",
        }
    }

    /// Parse from a display name or key (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        Self::KNOWN
            .iter()
            .chain(std::iter::once(&Self::Unknown))
            .copied()
            .find(|t| {
                t.name().to_lowercase() == normalized || t.key().replace('_', " ") == normalized
            })
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Estimated page span of a segment (1-based, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: usize,
    pub end: usize,
}

impl PageRange {
    /// Estimate pages from line indices.
    pub fn from_lines(line_start: usize, line_end: usize, lines_per_page: usize) -> Self {
        let per_page = lines_per_page.max(1);
        Self {
            start: line_start / per_page + 1,
            end: line_end / per_page + 1,
        }
    }
}

/// Positional and size information about a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentMetadata {
    /// First line index (inclusive).
    pub line_start: usize,
    /// Last line index (inclusive).
    pub line_end: usize,
    /// Whitespace-separated words in the content.
    pub word_count: usize,
    /// Characters in the content.
    pub character_count: usize,
}

/// What kind of value an extracted field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Reference numbers (LC number, invoice number, container number).
    Identifier,
    /// Free text such as names and addresses.
    Text,
    /// Currency amount.
    Amount,
    /// Calendar date.
    Date,
    /// Weight, volume or package count.
    Quantity,
    /// Found by the generic `label: value` extractor.
    Generic,
}

/// Parsed form of an extracted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypedValue {
    Amount { currency: String, value: Decimal },
    Date { value: NaiveDate },
    Quantity {
        value: Decimal,
        #[serde(skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
}

/// A single named field extracted from a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedField {
    /// Identifier of the owning segment.
    pub segment_id: String,

    /// Canonical field name.
    pub field_name: String,

    /// Trimmed field value as found in the text.
    pub field_value: String,

    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,

    /// Kind of value.
    pub kind: FieldKind,

    /// Parsed value, when the raw value could be understood.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typed_value: Option<TypedValue>,
}

/// One logical document found within the input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Identifier, unique within one report.
    pub id: String,

    /// Detected document type.
    pub document_type: DocumentType,

    /// Estimated pages.
    pub page_range: PageRange,

    /// Segment text, lines joined with newlines.
    pub content: String,

    /// Refined confidence (0.0 - 1.0).
    pub confidence: f32,

    /// Fields extracted from the content.
    pub extracted_fields: Vec<ExtractedField>,

    /// Position and size information.
    pub metadata: SegmentMetadata,
}

impl Segment {
    /// First field with the given name.
    pub fn field(&self, name: &str) -> Option<&ExtractedField> {
        self.extracted_fields.iter().find(|f| f.field_name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_type_names() {
        assert_eq!(DocumentType::LetterOfCredit.to_string(), "Letter of Credit");
        assert_eq!(DocumentType::Unknown.name(), "Unknown Document");
    }

    #[test]
    fn test_document_type_from_name() {
        assert_eq!(
            DocumentType::from_name("bill of lading"),
            Some(DocumentType::BillOfLading)
        );
        assert_eq!(
            DocumentType::from_name("commercial_invoice"),
            Some(DocumentType::CommercialInvoice)
        );
        assert_eq!(
            DocumentType::from_name("Unknown Document"),
            Some(DocumentType::Unknown)
        );
        assert_eq!(DocumentType::from_name("purchase order"), None);
    }

    #[test]
    fn test_document_type_serializes_as_name() {
        let json = serde_json::to_string(&DocumentType::PackingList).unwrap();
        assert_eq!(json, "\"Packing List\"");

        let parsed: DocumentType = serde_json::from_str("\"Bill of Lading\"").unwrap();
        assert_eq!(parsed, DocumentType::BillOfLading);
    }

    #[test]
    fn test_page_range_from_lines() {
        assert_eq!(PageRange::from_lines(0, 49, 50), PageRange { start: 1, end: 1 });
        assert_eq!(PageRange::from_lines(49, 50, 50), PageRange { start: 1, end: 2 });
        assert_eq!(PageRange::from_lines(120, 180, 50), PageRange { start: 3, end: 4 });
    }

    #[test]
    fn test_field_serializes_camel_case() {
        let field = ExtractedField {
            segment_id: "doc-1".to_string(),
            field_name: "Beneficiary".to_string(),
            field_value: "ABC Trading".to_string(),
            confidence: 0.8,
            kind: FieldKind::Text,
            typed_value: None,
        };

        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["fieldName"], "Beneficiary");
        assert_eq!(value["segmentId"], "doc-1");
        assert_eq!(value["kind"], "text");
        assert!(value.get("typedValue").is_none());
    }
}
