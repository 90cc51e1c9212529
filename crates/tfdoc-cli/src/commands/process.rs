//! Process command - segment a single OCR text file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use tfdoc_core::{DocumentSegmenter, ProgressUpdate};

use super::{document_id_for, format_report, load_config, read_document, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (.txt or JSON OCR dump)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Document identifier (default: input file name)
    #[arg(long)]
    document_id: Option<String>,

    /// Override the minimum segment confidence
    #[arg(long)]
    min_confidence: Option<f32>,

    /// Correct O/0 and I/1 OCR confusions before segmenting
    #[arg(long)]
    correct_ocr: bool,

    /// Show segment confidence scores
    #[arg(long)]
    show_confidence: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(min_confidence) = args.min_confidence {
        config.segmentation.min_confidence = min_confidence;
    }
    if args.correct_ocr {
        config.correction.enabled = true;
    }
    config.validate()?;

    let document = read_document(&args.input)?;
    let document_id = args
        .document_id
        .clone()
        .unwrap_or_else(|| document_id_for(&args.input));

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    let segmenter = DocumentSegmenter::new(config);
    let observer = |update: ProgressUpdate| {
        pb.set_position((update.fraction * 100.0) as u64);
        pb.set_message(update.message);
    };
    let report = segmenter.process_with_progress(&document, &document_id, &observer);

    pb.finish_and_clear();

    for warning in &report.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        eprintln!();
        for segment in &report.segments {
            eprintln!(
                "{} {} {}: {:.1}%",
                style("ℹ").blue(),
                segment.id,
                segment.document_type,
                segment.confidence * 100.0
            );
        }
        if let Some(ocr) = report.ocr_confidence {
            eprintln!("{} OCR confidence: {:.1}%", style("ℹ").blue(), ocr * 100.0);
        }
        eprintln!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            report.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
