//! Data models for segmentation output, OCR input and configuration.

pub mod config;
pub mod document;
pub mod ocr;
