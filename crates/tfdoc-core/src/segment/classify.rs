//! Whole-text classification, used when no boundary is found.

use serde::Serialize;

use crate::models::document::DocumentType;
use crate::signatures::all_signatures;

const KEYWORD_WEIGHT: f32 = 0.6;
const PATTERN_WEIGHT: f32 = 0.4;

/// Score of one signature against a text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeScore {
    pub document_type: DocumentType,
    /// Matched keywords / total keywords.
    pub keyword_ratio: f32,
    /// Start patterns matching anywhere / total start patterns.
    pub pattern_ratio: f32,
    /// Weighted blend of both ratios.
    pub score: f32,
}

/// Outcome of classifying a whole text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Winning type, `Unknown` when no score clears the minimum.
    pub document_type: DocumentType,
    /// Score of the winning signature (0.0 for `Unknown` without candidates).
    pub score: f32,
    /// Scores of every signature, in registry order.
    pub scores: Vec<TypeScore>,
}

/// Classify `text` as a single document.
///
/// The highest score wins, earlier registry entries winning ties. A best score
/// at or below `min_score` yields `Unknown`.
pub fn classify_text(text: &str, min_score: f32) -> Classification {
    let scores: Vec<TypeScore> = all_signatures()
        .iter()
        .map(|sig| {
            let keyword_ratio = sig.keyword_ratio(text);
            let pattern_ratio = sig.start_pattern_ratio(text);
            TypeScore {
                document_type: sig.document_type,
                keyword_ratio,
                pattern_ratio,
                score: KEYWORD_WEIGHT * keyword_ratio + PATTERN_WEIGHT * pattern_ratio,
            }
        })
        .collect();

    let best = scores.iter().fold(None::<&TypeScore>, |best, candidate| match best {
        Some(b) if b.score >= candidate.score => Some(b),
        _ => Some(candidate),
    });

    let (document_type, score) = match best {
        Some(b) if b.score > min_score => (b.document_type, b.score),
        Some(b) => (DocumentType::Unknown, b.score),
        None => (DocumentType::Unknown, 0.0),
    };

    Classification {
        document_type,
        score,
        scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_unrecognizable_text() {
        let result = classify_text("hello world", 0.3);
        assert_eq!(result.document_type, DocumentType::Unknown);
        assert_eq!(result.scores.len(), 6);
        assert!(result.scores.iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn test_classify_by_keywords_only() {
        // No line starts a document, but the vocabulary is clearly a B/L.
        let text = "Shipper: ACME\nConsignee: To order\nNotify party: Beta\n\
                    Vessel: MSC ANNA\nPort of loading: Shanghai\n\
                    Port of discharge: Hamburg\nFreight prepaid";
        let result = classify_text(text, 0.3);

        assert_eq!(result.document_type, DocumentType::BillOfLading);
        let bl = &result.scores[2];
        assert!((bl.keyword_ratio - 0.7).abs() < 1e-6);
        assert_eq!(bl.pattern_ratio, 0.0);
        assert!((result.score - 0.42).abs() < 1e-6);
    }

    #[test]
    fn test_classify_uses_patterns() {
        let text = "PACKING LIST\nPACKING LIST NO. PL-7\nGross weight 10 KGS";
        let result = classify_text(text, 0.3);
        assert_eq!(result.document_type, DocumentType::PackingList);

        let pl = &result.scores[3];
        assert!((pl.pattern_ratio - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_classify_below_threshold_is_unknown() {
        // One invoice keyword out of five: 0.6 * 0.2 = 0.12.
        let result = classify_text("the total is unclear", 0.3);
        assert_eq!(result.document_type, DocumentType::Unknown);
        assert!(result.score > 0.0 && result.score <= 0.3);
    }
}
