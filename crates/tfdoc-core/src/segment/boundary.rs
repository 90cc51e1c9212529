//! Boundary detection over normalized lines.

use serde::Serialize;
use tracing::{debug, trace};

use super::classify::classify_text;
use crate::models::config::SegmentationConfig;
use crate::models::document::DocumentType;
use crate::signatures::{all_signatures, lookup_signature, DocumentSignature};

const BASE_START_CONFIDENCE: f32 = 0.5;
const PER_PATTERN_CONFIDENCE: f32 = 0.2;
const MAX_START_CONFIDENCE: f32 = 0.9;

/// How a raw segment came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentOrigin {
    /// Opened by a start pattern.
    Boundary,
    /// Synthesized over the whole input because nothing matched.
    Fallback,
}

/// A candidate document found within the input.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSegment {
    pub document_type: DocumentType,
    /// First line index.
    pub start_line: usize,
    /// Last line index (inclusive).
    pub end_line: usize,
    /// Lines `start_line..=end_line` joined with newlines.
    pub content: String,
    /// Provisional confidence from the start match.
    pub confidence: f32,
    pub origin: SegmentOrigin,
}

#[derive(Debug, Clone, Copy)]
struct OpenSegment {
    document_type: DocumentType,
    start_line: usize,
    confidence: f32,
}

impl OpenSegment {
    fn close(self, lines: &[String], end_line: usize) -> RawSegment {
        debug!(
            "Closing {} segment at lines {}..={}",
            self.document_type, self.start_line, end_line
        );
        RawSegment {
            document_type: self.document_type,
            start_line: self.start_line,
            end_line,
            content: lines[self.start_line..=end_line].join("\n"),
            confidence: self.confidence,
            origin: SegmentOrigin::Boundary,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum DetectorState {
    NoOpenSegment,
    Open(OpenSegment),
}

/// Sequential, non-nesting boundary detector.
#[derive(Debug, Clone)]
pub struct BoundaryDetector {
    fallback_confidence: f32,
    fallback_min_score: f32,
}

impl BoundaryDetector {
    /// Create a detector with default settings.
    pub fn new() -> Self {
        Self::from_config(&SegmentationConfig::default())
    }

    pub fn from_config(config: &SegmentationConfig) -> Self {
        Self {
            fallback_confidence: config.fallback_confidence,
            fallback_min_score: config.fallback_min_score,
        }
    }

    /// Split normalized lines into ordered raw segments.
    ///
    /// Returns an empty list only for empty input; otherwise at least one
    /// segment is produced, falling back to whole-text classification.
    pub fn detect(&self, lines: &[String]) -> Vec<RawSegment> {
        let mut segments = Vec::new();
        let mut state = DetectorState::NoOpenSegment;

        for (index, line) in lines.iter().enumerate() {
            if let Some((signature, matches)) = first_start_match(line) {
                let opened = OpenSegment {
                    document_type: signature.document_type,
                    start_line: index,
                    confidence: start_confidence(matches),
                };

                state = match state {
                    // Repeated headers of the open type do not re-split.
                    DetectorState::Open(open) if open.document_type == signature.document_type => {
                        trace!("Ignoring repeated {} start at line {}", open.document_type, index);
                        DetectorState::Open(open)
                    }
                    DetectorState::Open(open) => {
                        segments.push(open.close(lines, index - 1));
                        debug!("Opening {} segment at line {}", opened.document_type, index);
                        DetectorState::Open(opened)
                    }
                    DetectorState::NoOpenSegment => {
                        debug!("Opening {} segment at line {}", opened.document_type, index);
                        DetectorState::Open(opened)
                    }
                };
            }

            if let DetectorState::Open(open) = state {
                let ends = lookup_signature(open.document_type)
                    .is_some_and(|sig| sig.matches_end(line));
                if ends {
                    segments.push(open.close(lines, index));
                    state = DetectorState::NoOpenSegment;
                }
            }
        }

        if let DetectorState::Open(open) = state {
            segments.push(open.close(lines, lines.len() - 1));
        }

        if segments.is_empty() && !lines.is_empty() {
            segments.push(self.fallback_segment(lines));
        }

        segments
    }

    fn fallback_segment(&self, lines: &[String]) -> RawSegment {
        let content = lines.join("\n");
        let classification = classify_text(&content, self.fallback_min_score);

        debug!(
            "No boundary found, classified whole text as {} (score {:.2})",
            classification.document_type, classification.score
        );

        RawSegment {
            document_type: classification.document_type,
            start_line: 0,
            end_line: lines.len() - 1,
            content,
            confidence: self.fallback_confidence,
            origin: SegmentOrigin::Fallback,
        }
    }
}

impl Default for BoundaryDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// First signature, in registry order, with a start pattern matching `line`.
fn first_start_match(line: &str) -> Option<(&'static DocumentSignature, usize)> {
    all_signatures().iter().find_map(|sig| {
        let matches = sig.start_match_count(line);
        (matches > 0).then_some((sig, matches))
    })
}

fn start_confidence(matches: usize) -> f32 {
    (BASE_START_CONFIDENCE + PER_PATTERN_CONFIDENCE * matches as f32).min(MAX_START_CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::normalize_lines;
    use pretty_assertions::assert_eq;

    fn detect(text: &str) -> Vec<RawSegment> {
        BoundaryDetector::new().detect(&normalize_lines(text))
    }

    fn spans(segments: &[RawSegment]) -> Vec<(DocumentType, usize, usize)> {
        segments
            .iter()
            .map(|s| (s.document_type, s.start_line, s.end_line))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(detect("").is_empty());
        assert!(detect("  \n \n").is_empty());
    }

    #[test]
    fn test_single_document_runs_to_end() {
        let segments = detect("COMMERCIAL INVOICE\nINVOICE NUMBER: INV-123\nTOTAL AMOUNT: USD 500.00");

        assert_eq!(spans(&segments), vec![(DocumentType::CommercialInvoice, 0, 2)]);
        assert_eq!(segments[0].origin, SegmentOrigin::Boundary);
        assert_eq!(
            segments[0].content,
            "COMMERCIAL INVOICE\nINVOICE NUMBER: INV-123\nTOTAL AMOUNT: USD 500.00"
        );
        assert!((segments[0].confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_type_change_closes_previous() {
        let text = "LETTER OF CREDIT\nBENEFICIARY: A\nBILL OF LADING\nSHIPPER: B\nPACKING LIST\nCARTONS: 3";
        let segments = detect(text);

        assert_eq!(
            spans(&segments),
            vec![
                (DocumentType::LetterOfCredit, 0, 1),
                (DocumentType::BillOfLading, 2, 3),
                (DocumentType::PackingList, 4, 5),
            ]
        );
        assert_eq!(segments[1].content, "BILL OF LADING\nSHIPPER: B");
    }

    #[test]
    fn test_end_pattern_closes_inclusive() {
        let text = "DOCUMENTARY CREDIT\nAPPLICANT: X\nSUBJECT TO UCP 600\nstray footer\nCOMMERCIAL INVOICE\nTOTAL: USD 1";
        let segments = detect(text);

        assert_eq!(
            spans(&segments),
            vec![
                (DocumentType::LetterOfCredit, 0, 2),
                (DocumentType::CommercialInvoice, 4, 5),
            ]
        );
        assert!(segments[0].content.ends_with("SUBJECT TO UCP 600"));
    }

    #[test]
    fn test_repeated_header_does_not_split() {
        let text = "COMMERCIAL INVOICE\nPage 1\nCOMMERCIAL INVOICE\nPage 2";
        let segments = detect(text);
        assert_eq!(spans(&segments), vec![(DocumentType::CommercialInvoice, 0, 3)]);
    }

    #[test]
    fn test_preamble_before_first_start_is_skipped() {
        let text = "Scanned by OfficeScan\nBILL OF LADING\nVESSEL: MSC ANNA";
        let segments = detect(text);
        assert_eq!(spans(&segments), vec![(DocumentType::BillOfLading, 1, 2)]);
    }

    #[test]
    fn test_provisional_confidence_counts_patterns() {
        let segments = detect("LETTER OF CREDIT NO. LC-9\nBILL OF LADING NO. B-1\nINVOICE");
        let confidences: Vec<f32> = segments.iter().map(|s| s.confidence).collect();

        // Two patterns: 0.5 + 0.4; one pattern: 0.5 + 0.2.
        assert!((confidences[0] - 0.9).abs() < 1e-6);
        assert!((confidences[1] - 0.9).abs() < 1e-6);
        assert!((confidences[2] - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_start_confidence_is_capped() {
        assert!((start_confidence(1) - 0.7).abs() < 1e-6);
        assert!((start_confidence(3) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_registry_order_breaks_ties() {
        // Both the invoice header and the LC "MT 700" pattern match.
        let segments = detect("COMMERCIAL INVOICE MT 700\nline");
        assert_eq!(segments[0].document_type, DocumentType::LetterOfCredit);
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let segments = detect("hello world");

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].document_type, DocumentType::Unknown);
        assert_eq!(segments[0].origin, SegmentOrigin::Fallback);
        assert!((segments[0].confidence - 0.7).abs() < 1e-6);
        assert_eq!((segments[0].start_line, segments[0].end_line), (0, 0));
    }

    #[test]
    fn test_segments_never_overlap() {
        let text = "INVOICE\na\nb\nBILL OF LADING\nc\nAS AGENT FOR THE CARRIER\nd\nINVOICE\ne";
        let segments = detect(text);

        for pair in segments.windows(2) {
            assert!(pair[0].start_line <= pair[0].end_line);
            assert!(pair[0].end_line < pair[1].start_line);
        }
    }
}
