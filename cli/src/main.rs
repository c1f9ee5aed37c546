//! # Zipx Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the zipx CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Running the compress command
//! - Reporting errors and setting the exit code
//!
//! ## Architecture
//!
//! - `commands`: the compress command (flags and handler)
//! - `common`: the archive core and filesystem helpers
//! - `core`: configuration loading and error types
//!
//! Errors propagate up to `main`, which logs the full chain, prints a one-line
//! message to stderr and exits with status 1.
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! zipx --help
//!
//! # Archive with debug logging
//! zipx -vv -t dist -o site
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (compress).
mod common; // Archive core and filesystem utilities.
mod core; // Configuration and error types.

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "zipx",
    about = "📦 zipx: archive one or more directories into a single zip file",
    long_about = "Compress the contents of one or more target directories into a zip archive.\n\
                  Settings come from command-line flags, zipx.toml and the user config file.",
    version
)]
struct Cli {
    #[command(flatten)]
    compress: commands::compress::CompressArgs,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = commands::compress::handle_compress(cli.compress).await {
        tracing::error!("Compression failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
