use std::process::ExitCode;
use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use image_splitter_lib::commands::{split_images, OutputMode, SplitArgs};
use image_splitter_lib::{RunOutcome, SplitterError};

/// Resize images and split them into equal grid tiles.
#[derive(Parser, Debug)]
#[command(name = "image-splitter", version, about)]
struct Cli {
    #[command(flatten)]
    split: SplitArgs,

    /// Print engine events as JSON lines instead of progress text
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("=== Image Splitter Starting ===");

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            eprintln!("✗ {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let mode = if cli.json { OutputMode::Json } else { OutputMode::Human };

    match runtime.block_on(split_images(&cli.split, mode)) {
        Ok(report) => Ok(match report.outcome {
            RunOutcome::Completed => ExitCode::SUCCESS,
            RunOutcome::Failed => ExitCode::from(1),
            RunOutcome::Cancelled => ExitCode::from(130),
        }),
        Err(e @ SplitterError::Validation(_)) => {
            eprintln!("✗ {e}");
            Ok(ExitCode::from(2))
        }
        Err(e) => Err(e).context("Batch run failed"),
    }
}
