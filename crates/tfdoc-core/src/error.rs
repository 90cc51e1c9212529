//! Error types for the tfdoc-core library.
//!
//! Segmentation and extraction never fail; these errors only come from the
//! edges of the library (configuration files and OCR input documents).

use thiserror::Error;

/// Main error type for the tfdoc library.
#[derive(Error, Debug)]
pub enum TfdocError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input rejected at the library boundary.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for the tfdoc library.
pub type Result<T> = std::result::Result<T, TfdocError>;
