//! OCR input handed over by the text-acquisition step.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TfdocError};

/// A recognized word with its confidence and position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrWord {
    /// Recognized text.
    pub text: String,

    /// Recognition confidence (0.0 - 1.0).
    pub confidence: f32,

    /// Axis-aligned bounding box (x1, y1, x2, y2).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f32; 4]>,
}

/// Raw OCR output for one uploaded file.
///
/// Word metadata is carried through for display; segmentation only reads `text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrDocument {
    /// Full text, pages separated by blank lines.
    pub text: String,

    /// Per-word recognition metadata.
    #[serde(default)]
    pub words: Vec<OcrWord>,
}

impl OcrDocument {
    /// Wrap plain text without word metadata.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            words: Vec::new(),
        }
    }

    /// Parse an OCR dump from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(json)?;

        if let Some(word) = doc
            .words
            .iter()
            .find(|w| !(0.0..=1.0).contains(&w.confidence))
        {
            return Err(TfdocError::InvalidInput(format!(
                "word '{}' has confidence {} outside 0.0-1.0",
                word.text, word.confidence
            )));
        }

        Ok(doc)
    }

    /// Mean word confidence, if any words are present.
    pub fn mean_confidence(&self) -> Option<f32> {
        if self.words.is_empty() {
            return None;
        }
        let sum: f32 = self.words.iter().map(|w| w.confidence).sum();
        Some(sum / self.words.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_with_words() {
        let json = r#"{
            "text": "BILL OF LADING",
            "words": [
                {"text": "BILL", "confidence": 0.9, "bbox": [0, 0, 40, 12]},
                {"text": "OF", "confidence": 0.8},
                {"text": "LADING", "confidence": 0.7}
            ]
        }"#;

        let doc = OcrDocument::from_json(json).unwrap();
        assert_eq!(doc.words.len(), 3);
        assert_eq!(doc.words[0].bbox, Some([0.0, 0.0, 40.0, 12.0]));
        let mean = doc.mean_confidence().unwrap();
        assert!((mean - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_from_json_text_only() {
        let doc = OcrDocument::from_json(r#"{"text": "hello"}"#).unwrap();
        assert!(doc.words.is_empty());
        assert_eq!(doc.mean_confidence(), None);
    }

    #[test]
    fn test_from_json_rejects_bad_confidence() {
        let json = r#"{"text": "x", "words": [{"text": "x", "confidence": 7.0}]}"#;
        assert!(matches!(
            OcrDocument::from_json(json),
            Err(TfdocError::InvalidInput(_))
        ));
    }
}
