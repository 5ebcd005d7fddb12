//! Votdub - Automated YouTube Voice-over Translation Workflow
//!
//! This is the main entry point for the votdub application, which downloads
//! a YouTube video, fetches a machine-translated audio track for it, and
//! muxes the two into a single output file using yt-dlp, vot-cli, and ffmpeg.

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use votdub::cli::Args;
use votdub::config::Config;
use votdub::error::VotdubError;
use votdub::pipeline::Pipeline;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load config.toml from current directory first
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    // Take the URL from the command line, or prompt for it
    let url = match args.url {
        Some(url) => url,
        None => match prompt_for_url().await? {
            Some(url) => url,
            None => return Ok(()),
        },
    };

    if url.trim().is_empty() {
        println!("No link was entered. Exiting.");
        return Ok(());
    }

    let pipeline = Pipeline::new(config);

    // Check dependencies
    if let Err(e) = pipeline.check_availability().await {
        error!("{}", e);
        return Ok(());
    }

    match pipeline.process(url.trim()).await {
        Ok(output_path) => {
            info!("Finished: {}", output_path.display());
        }
        Err(VotdubError::InvalidUrl(url)) => {
            error!("Invalid YouTube link entered: {}", url);
        }
        Err(e) => {
            // Step failures were already logged with context; the run ends
            // with temporary state cleaned up and no output file.
            error!("Processing failed: {}", e);
        }
    }

    Ok(())
}

/// Read one URL from standard input. Returns `None` on EOF or interrupt.
async fn prompt_for_url() -> Result<Option<String>> {
    print!("Enter a YouTube video link: ");
    use std::io::Write;
    std::io::stdout().flush()?;

    let mut line = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());

    tokio::select! {
        read = reader.read_line(&mut line) => {
            if read? == 0 {
                println!("\nNo link was entered. Exiting.");
                return Ok(None);
            }
            Ok(Some(line))
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nInterrupted by user. Exiting.");
            Ok(None)
        }
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let votdub_dir = std::env::current_dir()?.join(".votdub");
    let log_dir = votdub_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "votdub.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Create console layer
    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    // Setup layered subscriber
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    // Initialize the subscriber
    subscriber
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
