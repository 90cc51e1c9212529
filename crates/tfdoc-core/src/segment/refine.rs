//! Confidence refinement of raw segments.

use tracing::debug;

use super::boundary::RawSegment;
use crate::models::config::SegmentationConfig;
use crate::models::document::DocumentType;
use crate::signatures::lookup_signature;

/// Structural score for types without a checklist.
const DEFAULT_STRUCTURAL_SCORE: f32 = 0.5;

/// Each entry lists alternative spellings of one required sub-field.
type Checklist = &'static [&'static [&'static str]];

const LETTER_OF_CREDIT_CHECKLIST: Checklist = &[
    &["lc number", "l/c number", "lc no", "l/c no", "credit number", "credit no"],
    &["beneficiary"],
    &["applicant"],
    &["amount"],
    &["expiry"],
];

const COMMERCIAL_INVOICE_CHECKLIST: Checklist = &[
    &["invoice number", "invoice no", "invoice #"],
    &["date"],
    &["total"],
    &["description"],
];

const BILL_OF_LADING_CHECKLIST: Checklist = &[
    &["vessel"],
    &["port"],
    &["consignee"],
    &["shipper"],
];

fn checklist(document_type: DocumentType) -> Option<(Checklist, f32)> {
    match document_type {
        DocumentType::LetterOfCredit => Some((LETTER_OF_CREDIT_CHECKLIST, 0.2)),
        DocumentType::CommercialInvoice => Some((COMMERCIAL_INVOICE_CHECKLIST, 0.25)),
        DocumentType::BillOfLading => Some((BILL_OF_LADING_CHECKLIST, 0.25)),
        DocumentType::PackingList
        | DocumentType::CertificateOfOrigin
        | DocumentType::InsuranceCertificate
        | DocumentType::Unknown => None,
    }
}

/// Weighted presence of the type's required sub-fields, capped at 1.0.
pub fn structural_score(document_type: DocumentType, content: &str) -> f32 {
    let Some((items, weight)) = checklist(document_type) else {
        return DEFAULT_STRUCTURAL_SCORE;
    };

    let lower = content.to_lowercase();
    let present = items
        .iter()
        .filter(|alternatives| alternatives.iter().any(|a| lower.contains(a)))
        .count();

    (present as f32 * weight).min(1.0)
}

/// A raw segment with its recalculated confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinedSegment {
    pub raw: RawSegment,
    /// Keyword hits / total keywords.
    pub keyword_density: f32,
    /// Checklist score.
    pub structural_score: f32,
    /// Final confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Whether the short-content penalty was applied.
    pub short_content: bool,
    /// Whether the confidence cleared the minimum threshold.
    pub accepted: bool,
}

impl RefinedSegment {
    pub fn document_type(&self) -> DocumentType {
        self.raw.document_type
    }

    pub fn content(&self) -> &str {
        &self.raw.content
    }
}

/// Re-scores raw segments and drops weak ones.
#[derive(Debug, Clone)]
pub struct SegmentRefiner {
    config: SegmentationConfig,
}

impl SegmentRefiner {
    pub fn new(config: SegmentationConfig) -> Self {
        Self { config }
    }

    /// Score one segment without filtering it.
    ///
    /// `Unknown` segments have no signature to score against and keep their
    /// provisional confidence.
    pub fn score(&self, raw: &RawSegment) -> RefinedSegment {
        let cfg = &self.config;
        let short_content = raw.content.chars().count() < cfg.short_content_length;

        let (keyword_density, structural, confidence) = match lookup_signature(raw.document_type) {
            Some(signature) => {
                let density = signature.keyword_ratio(&raw.content);
                let structural = structural_score(raw.document_type, &raw.content);
                let mut confidence = (density * cfg.keyword_weight
                    + structural * cfg.structural_weight)
                    .min(cfg.max_confidence);
                if short_content {
                    confidence *= cfg.short_content_penalty;
                }
                (density, structural, confidence)
            }
            None => (0.0, 0.0, raw.confidence),
        };

        let confidence = confidence.clamp(0.0, 1.0);

        RefinedSegment {
            raw: raw.clone(),
            keyword_density,
            structural_score: structural,
            confidence,
            short_content: short_content && !raw.document_type.is_unknown(),
            accepted: confidence > cfg.min_confidence,
        }
    }

    /// Score all segments, keeping accepted ones in their original order.
    pub fn refine(&self, raw_segments: &[RawSegment]) -> Vec<RefinedSegment> {
        raw_segments
            .iter()
            .map(|raw| self.score(raw))
            .filter(|refined| {
                if !refined.accepted {
                    debug!(
                        "Dropping {} segment at lines {}..={} (confidence {:.2})",
                        refined.document_type(),
                        refined.raw.start_line,
                        refined.raw.end_line,
                        refined.confidence
                    );
                }
                refined.accepted
            })
            .collect()
    }
}

impl Default for SegmentRefiner {
    fn default() -> Self {
        Self::new(SegmentationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::boundary::SegmentOrigin;
    use pretty_assertions::assert_eq;

    fn raw(document_type: DocumentType, content: &str) -> RawSegment {
        RawSegment {
            document_type,
            start_line: 0,
            end_line: content.lines().count().saturating_sub(1),
            content: content.to_string(),
            confidence: 0.7,
            origin: SegmentOrigin::Boundary,
        }
    }

    #[test]
    fn test_structural_scores() {
        let lc = "DOCUMENTARY CREDIT NUMBER: 1\nBENEFICIARY: A\nAPPLICANT: B\nAMOUNT: USD 1\nEXPIRY: 2024";
        assert!((structural_score(DocumentType::LetterOfCredit, lc) - 1.0).abs() < 1e-6);
        assert!((structural_score(DocumentType::LetterOfCredit, "BENEFICIARY: A") - 0.2).abs() < 1e-6);

        let bl = "SHIPPER: A\nCONSIGNEE: B";
        assert!((structural_score(DocumentType::BillOfLading, bl) - 0.5).abs() < 1e-6);

        assert_eq!(structural_score(DocumentType::PackingList, "anything"), 0.5);
        assert_eq!(structural_score(DocumentType::InsuranceCertificate, ""), 0.5);
    }

    #[test]
    fn test_short_invoice_survives() {
        let refiner = SegmentRefiner::default();
        let segment = raw(
            DocumentType::CommercialInvoice,
            "COMMERCIAL INVOICE\nINVOICE NUMBER: INV-123\nTOTAL AMOUNT: USD 500.00",
        );

        let refined = refiner.score(&segment);
        // (0.8 * 0.4 + 0.5 * 0.6) * 0.5
        assert!(refined.short_content);
        assert!((refined.confidence - 0.31).abs() < 1e-5);
        assert!(refined.accepted);
    }

    #[test]
    fn test_short_content_penalty_halves_confidence() {
        let refiner = SegmentRefiner::default();
        let short = "LETTER OF CREDIT\nBENEFICIARY\nAPPLICANT";
        assert_eq!(short.chars().count(), 38);
        let long = format!("{}\n{}", short, "x".repeat(80));

        let short_score = refiner.score(&raw(DocumentType::LetterOfCredit, short));
        let long_score = refiner.score(&raw(DocumentType::LetterOfCredit, &long));

        assert!(short_score.short_content);
        assert!(!long_score.short_content);
        assert!((short_score.confidence - long_score.confidence * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_confidence_is_capped() {
        let refiner = SegmentRefiner::default();
        let content = "LETTER OF CREDIT DOCUMENTARY CREDIT NUMBER LC-1\n\
                       BENEFICIARY APPLICANT ISSUING BANK ADVISING BANK\n\
                       EXPIRY AMOUNT LATEST SHIPMENT UCP 600";
        let refined = refiner.score(&raw(DocumentType::LetterOfCredit, content));

        assert!((refined.keyword_density - 1.0).abs() < 1e-6);
        assert!((refined.confidence - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_weak_segments_dropped_in_order() {
        let refiner = SegmentRefiner::default();
        let strong = "BILL OF LADING\nSHIPPER: A\nCONSIGNEE: B\nVESSEL: C\nPORT OF LOADING: D\n\
                      PORT OF DISCHARGE: E\nNOTIFY PARTY: F\nFREIGHT PREPAID";
        let segments = vec![
            raw(DocumentType::PackingList, "PACKING LIST"),
            raw(DocumentType::BillOfLading, strong),
            raw(DocumentType::CommercialInvoice, "INVOICE"),
        ];

        let refined = refiner.refine(&segments);
        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].document_type(), DocumentType::BillOfLading);
        assert!(refined.len() <= segments.len());
    }

    #[test]
    fn test_unknown_keeps_provisional_confidence() {
        let refiner = SegmentRefiner::default();
        let mut segment = raw(DocumentType::Unknown, "hello world");
        segment.origin = SegmentOrigin::Fallback;

        let refined = refiner.score(&segment);
        assert!((refined.confidence - 0.7).abs() < 1e-6);
        assert!(refined.accepted);
        assert!(!refined.short_content);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let config = SegmentationConfig {
            min_confidence: 0.8,
            ..SegmentationConfig::default()
        };
        let refiner = SegmentRefiner::new(config);
        let segment = raw(DocumentType::Unknown, "hello world");
        assert!(refiner.refine(&[segment]).is_empty());
    }
}
