//! # Zipx Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces used by the command layer and the archive core:
//!
//! - `config`: Loading `zipx.toml` / user configuration and merging it with
//!   command-line flags into an `ArchiveRequest`
//! - `error`: The typed `ZipxError` and the `Result` aliases
//!
//! ```rust
//! use crate::core::config; // For building the archive request
//! use crate::core::error::{Result, ZipxError}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
