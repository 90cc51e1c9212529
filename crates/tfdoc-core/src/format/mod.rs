//! Text cleanup and human-readable export.

mod clean;
mod export;

pub use clean::{clean_ocr_text, reflow_paragraphs};
pub use export::{render_markdown, render_text};
