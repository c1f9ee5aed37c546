//! # Zipx Compress Command
//!
//! File: cli/src/commands/compress/mod.rs
//!
//! ## Overview
//!
//! The one command zipx has: archive the target directories into a zip file.
//! This module is the glue between the command line and the archive core.
//!
//! ## Architecture
//!
//! - `args.rs`: `CompressArgs`, the clap flags, and their conversion to a
//!   configuration layer.
//! - `handle_compress`: resolves the working directory, merges flags with
//!   configuration files (`core::config`), runs `common::archive::create_archive`
//!   and reports the written path.
//!
//! ## Examples
//!
//! ```bash
//! # Archive ./dist into ./archive.zip
//! zipx
//!
//! # Two targets, namespaced as dist/... and public/...
//! zipx -t dist public -o release/site
//!
//! # Flatten both targets into the archive root, store without compression
//! zipx -t dist public --no-namespace --level 0
//!
//! # Skip source maps and anything under node_modules
//! zipx -e "**/*.map" node_modules
//! ```
//!
use crate::common::archive;
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use std::env;
use tracing::info;

mod args;

pub use args::CompressArgs;

/// # Handle Compress Command (`handle_compress`)
///
/// 1. Resolves the working directory (`--cwd`, relative to the process directory).
/// 2. Loads configuration files and merges them under the command-line flags.
/// 3. Builds the archive.
/// 4. Prints the path of the written archive to stdout.
///
/// ## Errors
///
/// Propagates configuration errors and every archive error, with context.
pub async fn handle_compress(args: CompressArgs) -> Result<()> {
    info!("Handling compress command with args: {:?}", args);

    let process_dir = env::current_dir().context("Failed to get current working directory")?;
    let cwd = match &args.cwd {
        Some(dir) => archive::paths::resolve_path(&process_dir, dir),
        None => process_dir,
    };

    let request = config::load_request(&cwd, args.to_layer(), args.config.as_deref())
        .context("Failed to load zipx configuration")?;

    let written = archive::create_archive(&request).await?;
    println!("✅ Compression complete: {}", written.display());
    Ok(())
}
