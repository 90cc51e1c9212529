//! Core library for trade-finance document segmentation.
//!
//! This crate provides:
//! - A registry of document signatures (letters of credit, invoices, bills of lading, ...)
//! - Boundary detection that splits concatenated OCR text into per-document segments
//! - Confidence refinement of detected segments
//! - Type-specific field extraction with typed amounts, dates and quantities
//! - Optional OCR error correction and text formatting for export

pub mod correction;
pub mod error;
pub mod extract;
pub mod format;
pub mod models;
pub mod pipeline;
pub mod segment;
pub mod signatures;

pub use correction::{correct_ocr_errors, Correction};
pub use error::{Result, TfdocError};
pub use extract::FieldExtractor;
pub use format::{clean_ocr_text, reflow_paragraphs, render_markdown, render_text};
pub use models::config::TfdocConfig;
pub use models::document::{
    DocumentType, ExtractedField, FieldKind, PageRange, Segment, SegmentMetadata, TypedValue,
};
pub use models::ocr::{OcrDocument, OcrWord};
pub use pipeline::{
    segment_and_extract, DocumentSegmenter, ProgressObserver, ProgressStage, ProgressUpdate,
    SegmentationReport,
};
pub use segment::{
    classify_text, BoundaryDetector, Classification, RawSegment, RefinedSegment, SegmentRefiner,
};
pub use signatures::{all_signatures, lookup_signature, DocumentSignature};
