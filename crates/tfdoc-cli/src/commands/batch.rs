//! Batch processing command for multiple OCR text files.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use tfdoc_core::{DocumentSegmenter, SegmentationReport};

use super::{
    document_id_for, format_report, is_supported_input, load_config, read_document, OutputFormat,
};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching input files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short = 'd', long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of files processed concurrently
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct BatchResult {
    path: PathBuf,
    report: Option<SegmentationReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported_input(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let segmenter = Arc::new(DocumentSegmenter::new(config));
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let segmenter = Arc::clone(&segmenter);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let result =
                tokio::task::spawn_blocking(move || process_single_file(path, &segmenter)).await?;
            anyhow::Ok((index, result))
        });
    }

    let mut results = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined??;

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                tasks.abort_all();
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }

        results.push((index, result));
        overall_pb.inc(1);
    }

    overall_pb.finish_and_clear();

    results.sort_by_key(|(index, _)| *index);
    let results: Vec<BatchResult> = results.into_iter().map(|(_, r)| r).collect();

    if let Some(output_dir) = &args.output_dir {
        let outputs = plan_outputs(&results, output_dir, args.format.extension())?;
        for (result, output_path) in results.iter().zip(outputs) {
            if let (Some(report), Some(output_path)) = (&result.report, output_path) {
                fs::write(&output_path, format_report(report, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful = results.iter().filter(|r| r.report.is_some()).count();
    let failed: Vec<&BatchResult> = results.iter().filter(|r| r.error.is_some()).collect();

    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(path: PathBuf, segmenter: &DocumentSegmenter) -> BatchResult {
    let file_start = Instant::now();

    let outcome = read_document(&path)
        .map(|document| segmenter.process(&document, &document_id_for(&path)));
    let processing_time_ms = file_start.elapsed().as_millis() as u64;

    match outcome {
        Ok(report) => BatchResult {
            path,
            report: Some(report),
            error: None,
            processing_time_ms,
        },
        Err(e) => BatchResult {
            path,
            report: None,
            error: Some(e.to_string()),
            processing_time_ms,
        },
    }
}

/// Output path for each successful result.
///
/// Files are named `<stem>.<ext>`. When two inputs share a stem, or that name
/// is one of the inputs, the full input file name is kept (`scan.json.json`).
/// Fails before anything is written if an output would still land on an
/// input or on another output.
fn plan_outputs(
    results: &[BatchResult],
    output_dir: &Path,
    extension: &str,
) -> anyhow::Result<Vec<Option<PathBuf>>> {
    let dir = fs::canonicalize(output_dir)?;
    let inputs: HashSet<PathBuf> = results
        .iter()
        .filter_map(|r| fs::canonicalize(&r.path).ok())
        .collect();

    let mut stems: HashMap<String, usize> = HashMap::new();
    for result in results {
        *stems.entry(document_id_for(&result.path)).or_default() += 1;
    }

    let mut taken = HashSet::new();
    results
        .iter()
        .map(|result| {
            if result.report.is_none() {
                return Ok(None);
            }

            let stem = document_id_for(&result.path);
            let mut output_path = dir.join(format!("{}.{}", stem, extension));
            if stems[&stem] > 1 || inputs.contains(&output_path) {
                let file_name = result
                    .path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("document");
                output_path = dir.join(format!("{}.{}", file_name, extension));
            }

            if inputs.contains(&output_path) || !taken.insert(output_path.clone()) {
                anyhow::bail!(
                    "Output {} would overwrite an input or another output",
                    output_path.display()
                );
            }
            Ok(Some(output_path))
        })
        .collect()
}

fn write_summary(path: &Path, results: &[BatchResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "document_id",
        "segments",
        "dropped_segments",
        "document_types",
        "fields",
        "warnings",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(report) = &result.report {
            let types: Vec<String> = report
                .segments
                .iter()
                .map(|s| s.document_type.to_string())
                .collect();

            wtr.write_record([
                filename,
                "success",
                &report.document_id,
                &report.segments.len().to_string(),
                &report.dropped_segment_count.to_string(),
                &types.join("; "),
                &report.field_count().to_string(),
                &report.warnings.join("; "),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
