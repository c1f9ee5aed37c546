//! # Zipx Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers used across zipx. Currently a single submodule:
//!
//! - **`io`**: `ensure_dir_exists` (used before writing the archive) and
//!   `read_file_to_string` (used for configuration files).
//!
//! Import from the submodule directly, e.g. `crate::common::fs::io::ensure_dir_exists`.
//!

/// Basic file I/O operations (`ensure_dir_exists`, `read_file_to_string`).
pub mod io;
