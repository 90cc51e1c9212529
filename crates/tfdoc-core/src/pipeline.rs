//! End-to-end segmentation pipeline.

use std::borrow::Cow;
use std::sync::mpsc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::correction::correct_ocr_errors;
use crate::extract::FieldExtractor;
use crate::models::config::TfdocConfig;
use crate::models::document::{PageRange, Segment, SegmentMetadata};
use crate::models::ocr::OcrDocument;
use crate::segment::{normalize_lines, BoundaryDetector, RefinedSegment, SegmentRefiner};

/// Pipeline stage reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStage {
    Correcting,
    Normalizing,
    Detecting,
    Refining,
    Extracting,
    Complete,
}

/// A progress notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub stage: ProgressStage,
    /// Overall progress (0.0 - 1.0).
    pub fraction: f32,
    pub message: String,
}

/// Receives progress notifications from a pipeline run.
pub trait ProgressObserver {
    fn on_progress(&self, update: ProgressUpdate);
}

impl<F> ProgressObserver for F
where
    F: Fn(ProgressUpdate),
{
    fn on_progress(&self, update: ProgressUpdate) {
        self(update)
    }
}

impl ProgressObserver for mpsc::Sender<ProgressUpdate> {
    fn on_progress(&self, update: ProgressUpdate) {
        // A dropped receiver only means nobody is listening.
        let _ = self.send(update);
    }
}

/// Discards all updates.
impl ProgressObserver for () {
    fn on_progress(&self, _update: ProgressUpdate) {}
}

/// Result of segmenting one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationReport {
    pub document_id: String,
    /// Accepted segments in document order.
    pub segments: Vec<Segment>,
    /// Segments found before refinement.
    pub raw_segment_count: usize,
    /// Segments dropped by the confidence threshold.
    pub dropped_segment_count: usize,
    /// Mean OCR word confidence, when word metadata was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_confidence: Option<f32>,
    pub warnings: Vec<String>,
    pub processing_time_ms: u64,
}

impl SegmentationReport {
    /// Total number of extracted fields across all segments.
    pub fn field_count(&self) -> usize {
        self.segments.iter().map(|s| s.extracted_fields.len()).sum()
    }
}

// `Instant::now` panics on wasm32-unknown-unknown, so timings read 0 there.
#[cfg(not(target_arch = "wasm32"))]
fn start_timer() -> Option<Instant> {
    Some(Instant::now())
}

#[cfg(target_arch = "wasm32")]
fn start_timer() -> Option<Instant> {
    None
}

/// Splits OCR text into typed segments and extracts their fields.
///
/// Stateless between calls; one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct DocumentSegmenter {
    config: TfdocConfig,
    detector: BoundaryDetector,
    refiner: SegmentRefiner,
    extractor: FieldExtractor,
}

impl DocumentSegmenter {
    pub fn new(config: TfdocConfig) -> Self {
        Self {
            detector: BoundaryDetector::from_config(&config.segmentation),
            refiner: SegmentRefiner::new(config.segmentation.clone()),
            extractor: FieldExtractor::new(config.extraction.clone()),
            config,
        }
    }

    pub fn config(&self) -> &TfdocConfig {
        &self.config
    }

    /// Segment an OCR document.
    pub fn process(&self, document: &OcrDocument, document_id: &str) -> SegmentationReport {
        self.process_with_progress(document, document_id, &())
    }

    /// Segment plain text without word metadata.
    pub fn process_text(&self, text: &str, document_id: &str) -> SegmentationReport {
        self.process(&OcrDocument::from_text(text), document_id)
    }

    /// Segment an OCR document, reporting each stage to `observer`.
    pub fn process_with_progress(
        &self,
        document: &OcrDocument,
        document_id: &str,
        observer: &dyn ProgressObserver,
    ) -> SegmentationReport {
        let timer = start_timer();
        let mut warnings = Vec::new();

        info!(
            "Segmenting document {} ({} characters)",
            document_id,
            document.text.len()
        );

        let text: Cow<'_, str> = if self.config.correction.enabled {
            notify(observer, ProgressStage::Correcting, 0.0, "Correcting OCR errors");
            let correction = correct_ocr_errors(&document.text);
            debug!("Applied {} OCR corrections", correction.replacements);
            Cow::Owned(correction.text)
        } else {
            Cow::Borrowed(&document.text)
        };

        notify(observer, ProgressStage::Normalizing, 0.1, "Normalizing lines");
        let lines = normalize_lines(&text);
        if lines.is_empty() {
            warnings.push("Input contains no text".to_string());
        }

        notify(observer, ProgressStage::Detecting, 0.2, "Detecting document boundaries");
        let raw_segments = self.detector.detect(&lines);

        notify(observer, ProgressStage::Refining, 0.5, "Scoring segments");
        let refined = self.refiner.refine(&raw_segments);
        let dropped = raw_segments.len() - refined.len();

        if refined.is_empty() && !raw_segments.is_empty() {
            warnings.push(format!(
                "All {} detected segments fell below the confidence threshold of {}",
                raw_segments.len(),
                self.config.segmentation.min_confidence
            ));
        }

        notify(observer, ProgressStage::Extracting, 0.7, "Extracting fields");
        let segments: Vec<Segment> = refined
            .iter()
            .enumerate()
            .map(|(index, segment)| self.build_segment(document_id, index, segment))
            .collect();

        let processing_time_ms = timer
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or_default();

        info!(
            "Found {} segments ({} dropped) in {}ms",
            segments.len(),
            dropped,
            processing_time_ms
        );
        notify(observer, ProgressStage::Complete, 1.0, "Done");

        SegmentationReport {
            document_id: document_id.to_string(),
            segments,
            raw_segment_count: raw_segments.len(),
            dropped_segment_count: dropped,
            ocr_confidence: document.mean_confidence(),
            warnings,
            processing_time_ms,
        }
    }

    fn build_segment(&self, document_id: &str, index: usize, refined: &RefinedSegment) -> Segment {
        let id = format!("{}-{}", document_id, index + 1);
        let raw = &refined.raw;
        let extracted_fields = self.extractor.extract(refined, &id);

        debug!(
            "Segment {} is {} with {} fields",
            id,
            raw.document_type,
            extracted_fields.len()
        );

        Segment {
            page_range: PageRange::from_lines(
                raw.start_line,
                raw.end_line,
                self.config.segmentation.lines_per_page,
            ),
            metadata: SegmentMetadata {
                line_start: raw.start_line,
                line_end: raw.end_line,
                word_count: raw.content.split_whitespace().count(),
                character_count: raw.content.chars().count(),
            },
            id,
            document_type: raw.document_type,
            content: raw.content.clone(),
            confidence: refined.confidence,
            extracted_fields,
        }
    }
}

impl Default for DocumentSegmenter {
    fn default() -> Self {
        Self::new(TfdocConfig::default())
    }
}

fn notify(observer: &dyn ProgressObserver, stage: ProgressStage, fraction: f32, message: &str) {
    observer.on_progress(ProgressUpdate {
        stage,
        fraction,
        message: message.to_string(),
    });
}

/// Segment raw OCR text with the default configuration.
pub fn segment_and_extract(text: &str) -> Vec<Segment> {
    DocumentSegmenter::default()
        .process_text(text, "document")
        .segments
}
