//! # Zipx Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the command layer:
//!
//! - **`archive`**: The archive core. Resolves targets, enumerates files,
//!   assigns namespace prefixes and writes the zip container.
//! - **`fs`**: Small filesystem helpers (directory creation, text file reads).
//!
//! ```rust
//! use crate::common::{archive, fs};
//!
//! fs::io::ensure_dir_exists(Path::new("./release"))?;
//! let written = archive::create_archive(&request).await?;
//! ```
//!

/// The archive core: request types, path resolution, enumeration, namespacing, zip writing.
pub mod archive;
/// Filesystem helpers shared by the archive core and configuration loading.
pub mod fs;
