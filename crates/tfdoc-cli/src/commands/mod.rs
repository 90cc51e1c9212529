//! Subcommands and the helpers they share.

pub mod batch;
pub mod classify;
pub mod clean;
pub mod config;
pub mod process;
pub mod signatures;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use tfdoc_core::models::config::TfdocConfig;
use tfdoc_core::{render_markdown, render_text, OcrDocument, SegmentationReport};

/// Output format for segmentation reports.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per field
    Csv,
    /// Plain text summary
    Text,
    /// Markdown report
    Markdown,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
            OutputFormat::Markdown => "md",
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tfdoc")
        .join("config.json")
}

/// Load the configuration from `-c`, the default location, or built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TfdocConfig> {
    if let Some(path) = config_path {
        return Ok(TfdocConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(TfdocConfig::from_file(&default_path)?)
    } else {
        Ok(TfdocConfig::default())
    }
}

/// Whether `path` looks like an input the CLI can read.
pub fn is_supported_input(path: &Path) -> bool {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    matches!(extension.as_str(), "txt" | "text" | "json")
}

/// Read a plain text file or a JSON OCR dump.
pub fn read_document(path: &Path) -> anyhow::Result<OcrDocument> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let content = fs::read_to_string(path)?;
    match extension.as_str() {
        "json" => Ok(OcrDocument::from_json(&content)?),
        "txt" | "text" | "" => Ok(OcrDocument::from_text(content)),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

/// Document id derived from a file name.
pub fn document_id_for(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string()
}

pub fn format_report(report: &SegmentationReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Markdown => Ok(render_markdown(report)),
    }
}

fn format_csv(report: &SegmentationReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "document_id",
        "segment_id",
        "document_type",
        "page_start",
        "page_end",
        "segment_confidence",
        "field_name",
        "field_value",
        "field_confidence",
        "kind",
        "typed_value",
    ])?;

    for segment in &report.segments {
        let prefix = [
            report.document_id.clone(),
            segment.id.clone(),
            segment.document_type.to_string(),
            segment.page_range.start.to_string(),
            segment.page_range.end.to_string(),
            format!("{:.2}", segment.confidence),
        ];

        if segment.extracted_fields.is_empty() {
            let mut record = prefix.to_vec();
            record.extend(std::iter::repeat_n(String::new(), 5));
            wtr.write_record(&record)?;
            continue;
        }

        for field in &segment.extracted_fields {
            let typed = match &field.typed_value {
                Some(value) => serde_json::to_string(value)?,
                None => String::new(),
            };
            let kind = serde_json::to_value(field.kind)?
                .as_str()
                .unwrap_or_default()
                .to_string();

            let mut record = prefix.to_vec();
            record.extend([
                field.field_name.clone(),
                field.field_value.clone(),
                format!("{:.2}", field.confidence),
                kind,
                typed,
            ]);
            wtr.write_record(&record)?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
