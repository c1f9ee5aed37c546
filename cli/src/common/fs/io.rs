//! # Zipx Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the small filesystem helpers shared by the archive
//! core and the configuration layer:
//!
//! - **`ensure_dir_exists`**: Creates a directory (and its parents) if needed,
//!   and fails if the path exists but is not a directory. Returns a plain
//!   `std::io::Result` so the archive builder can wrap failures in its typed
//!   `ZipxError::Write`.
//! - **`read_file_to_string`**: Reads a whole text file, adding the file path as
//!   `anyhow` context. Used for configuration files.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//! use std::path::Path;
//!
//! io::ensure_dir_exists(Path::new("./release/out"))?;
//! let text = io::read_file_to_string(Path::new("./zipx.toml"))?;
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, it is created together with any missing parent
/// directories (similar to `mkdir -p`).
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
        debug!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        return Err(std::io::Error::other(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` with the file path as context if the file cannot be opened
/// or is not valid UTF-8.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}
