//! Classify command - score a text against every document signature.

use std::path::PathBuf;

use clap::Args;
use console::style;

use tfdoc_core::segment::normalize_lines;
use tfdoc_core::classify_text;

use super::{load_config, read_document};

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// Input file (.txt or JSON OCR dump)
    #[arg(required = true)]
    input: PathBuf,

    /// Print the scores as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: ClassifyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let document = read_document(&args.input)?;

    let text = normalize_lines(&document.text).join("\n");
    let classification = classify_text(&text, config.segmentation.fallback_min_score);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
        return Ok(());
    }

    println!(
        "{:<24} {:>9} {:>9} {:>7}",
        "Document type", "Keywords", "Patterns", "Score"
    );
    for score in &classification.scores {
        let line = format!(
            "{:<24} {:>8.0}% {:>8.0}% {:>7.2}",
            score.document_type.name(),
            score.keyword_ratio * 100.0,
            score.pattern_ratio * 100.0,
            score.score
        );
        if score.document_type == classification.document_type {
            println!("{}", style(line).green());
        } else {
            println!("{}", line);
        }
    }

    println!();
    println!(
        "Best match: {} (score {:.2})",
        style(classification.document_type).bold(),
        classification.score
    );

    Ok(())
}
