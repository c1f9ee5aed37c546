//! # Zipx Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the commands of the zipx CLI. zipx has a single,
//! flat command (no subcommands): `compress`, whose flags are flattened into
//! the top-level `Cli` in `main.rs`.
//!
//! Each command defines its own arguments structure and a handler function
//! that receives those arguments and carries out the work.
//!

/// The compress command: flags, configuration merging and the archive run.
pub mod compress;
