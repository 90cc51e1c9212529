//! Splitting OCR text into per-document segments.

mod boundary;
mod classify;
mod normalize;
mod refine;

pub use boundary::{BoundaryDetector, RawSegment, SegmentOrigin};
pub use classify::{classify_text, Classification, TypeScore};
pub use normalize::normalize_lines;
pub use refine::{structural_score, RefinedSegment, SegmentRefiner};
