//! CLI application for trade-finance document segmentation.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{batch, classify, clean, config, process, signatures};

/// Trade-finance document splitter - segment OCR text into typed documents
#[derive(Parser)]
#[command(name = "tfdoc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment a single OCR text file
    Process(process::ProcessArgs),

    /// Segment multiple files
    Batch(batch::BatchArgs),

    /// Score a text against every document signature
    Classify(classify::ClassifyArgs),

    /// List the registered document signatures
    Signatures(signatures::SignaturesArgs),

    /// Clean OCR artifacts from a text file
    Clean(clean::CleanArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over -v
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Process(args) => process::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Classify(args) => classify::run(args, config_path).await,
        Commands::Signatures(args) => signatures::run(args).await,
        Commands::Clean(args) => clean::run(args).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
