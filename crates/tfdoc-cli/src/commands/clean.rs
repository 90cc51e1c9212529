//! Clean command - strip OCR artifacts from a text file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use tfdoc_core::{clean_ocr_text, correct_ocr_errors, reflow_paragraphs};

use super::read_document;

/// Arguments for the clean command.
#[derive(Args)]
pub struct CleanArgs {
    /// Input file (.txt or JSON OCR dump)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Join wrapped lines into paragraphs
    #[arg(long)]
    reflow: bool,

    /// Also correct O/0 and I/1 OCR confusions
    #[arg(long)]
    correct_ocr: bool,
}

pub async fn run(args: CleanArgs) -> anyhow::Result<()> {
    let document = read_document(&args.input)?;

    let mut text = clean_ocr_text(&document.text);
    if args.correct_ocr {
        text = correct_ocr_errors(&text).text;
    }
    if args.reflow {
        text = reflow_paragraphs(&text);
    }

    if let Some(output_path) = &args.output {
        fs::write(output_path, &text)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", text);
    }

    Ok(())
}
