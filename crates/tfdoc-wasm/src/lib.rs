//! WASM bindings for trade-finance document segmentation.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use tfdoc_core::segment::normalize_lines;
use tfdoc_core::{
    classify_text, clean_ocr_text, correct_ocr_errors, render_markdown, DocumentSegmenter,
    OcrDocument, ProgressUpdate, TfdocConfig,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Segment OCR text and extract fields with the default configuration.
///
/// Returns an array of segments.
#[wasm_bindgen(js_name = segmentAndExtract)]
pub fn segment_and_extract(text: &str) -> Result<JsValue, JsValue> {
    to_js(&tfdoc_core::segment_and_extract(text))
}

/// Score a text against every document signature.
#[wasm_bindgen(js_name = classifyText)]
pub fn classify(text: &str) -> Result<JsValue, JsValue> {
    let min_score = TfdocConfig::default().segmentation.fallback_min_score;
    let normalized = normalize_lines(text).join("\n");
    to_js(&classify_text(&normalized, min_score))
}

/// Fix O/0 and I/1 OCR confusions. Returns `{ text, replacements }`.
#[wasm_bindgen(js_name = correctOcrErrors)]
pub fn correct_ocr(text: &str) -> Result<JsValue, JsValue> {
    to_js(&correct_ocr_errors(text))
}

/// Clean OCR artifacts from text.
#[wasm_bindgen(js_name = cleanText)]
pub fn clean_text(text: &str) -> String {
    clean_ocr_text(text)
}

/// Segment text and render the result as Markdown.
#[wasm_bindgen(js_name = renderMarkdown)]
pub fn markdown(text: &str) -> String {
    let report = DocumentSegmenter::default().process_text(text, "document");
    render_markdown(&report)
}

/// Segmenter class holding a configuration.
#[wasm_bindgen]
pub struct Segmenter {
    inner: DocumentSegmenter,
}

impl Segmenter {
    fn with_config(config: TfdocConfig) -> Result<Segmenter, JsValue> {
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            inner: DocumentSegmenter::new(config),
        })
    }
}

#[wasm_bindgen]
impl Segmenter {
    /// Create a segmenter. `config` may be `undefined` or a (partial)
    /// configuration object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Segmenter, JsValue> {
        let config: TfdocConfig = if config.is_undefined() || config.is_null() {
            TfdocConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        Self::with_config(config)
    }

    /// Create a segmenter from a JSON configuration string.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<Segmenter, JsValue> {
        let config: TfdocConfig =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::with_config(config)
    }

    /// Current configuration as a JSON string.
    #[wasm_bindgen(js_name = configJson)]
    pub fn config_json(&self) -> Result<String, JsValue> {
        serde_json::to_string_pretty(self.inner.config())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Segment text and return the full report.
    #[wasm_bindgen]
    pub fn process(&self, text: &str, document_id: &str) -> Result<JsValue, JsValue> {
        to_js(&self.inner.process_text(text, document_id))
    }

    /// Segment text, calling `callback` with each progress update.
    #[wasm_bindgen(js_name = processWithProgress)]
    pub fn process_with_progress(
        &self,
        text: &str,
        document_id: &str,
        callback: &js_sys::Function,
    ) -> Result<JsValue, JsValue> {
        let observer = |update: ProgressUpdate| {
            if let Ok(value) = serde_wasm_bindgen::to_value(&update) {
                // A throwing callback must not abort segmentation.
                let _ = callback.call1(&JsValue::NULL, &value);
            }
        };

        let report = self.inner.process_with_progress(
            &OcrDocument::from_text(text),
            document_id,
            &observer,
        );
        to_js(&report)
    }
}
