//! # Zipx Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout zipx. The archive core
//! returns the typed `ZipxError` so callers can tell a missing target apart from
//! a failed write, while the CLI layer works with `anyhow` and adds context as
//! errors travel up to `main`.
//!
//! ## Architecture
//!
//! - `ZipxError`: a `thiserror` enum covering every failure the archive pipeline
//!   can report, plus the configuration errors raised while building a request.
//! - `ArchiveResult<T>`: `Result<T, ZipxError>`, returned by the archive core.
//! - `Result<T>`: `anyhow::Result<T>`, used by command handlers and config loading.
//!
//! Error kinds map onto the pipeline stages:
//! - Target validation: `TargetNotFound`
//! - Enumeration: `InvalidPattern`, `Enumeration`
//! - Reading sources: `Read`
//! - Writing the container: `Write`, `Container`, `Task`
//!
//! Every kind is terminal for one invocation. Nothing is retried internally.
//!
//! ## Examples
//!
//! ```rust
//! match archive::create_archive(&request).await {
//!     Ok(path) => println!("wrote {}", path.display()),
//!     Err(ZipxError::TargetNotFound { path }) => {
//!         eprintln!("no such directory: {}", path.display());
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for zipx.
#[derive(Error, Debug)]
pub enum ZipxError {
    #[error("Target directory not found: {}", path.display())]
    TargetNotFound { path: PathBuf },

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to enumerate files in '{}': {source}", target.display())]
    Enumeration {
        target: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write archive '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize zip container '{}': {source}", path.display())]
    Container {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Archive worker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type returned by the archive core.
pub type ArchiveResult<T> = std::result::Result<T, ZipxError>;

/// Type alias for Result using anyhow::Error, used by the CLI layer.
pub type Result<T> = anyhow::Result<T>;
