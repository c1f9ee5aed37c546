//! # Compress Arguments (`commands::compress::args`)
//!
//! File: cli/src/commands/compress/args.rs
//!
//! ## Overview
//!
//! Command-line flags for `zipx`, and their conversion into the topmost
//! configuration layer. Flags that are not given stay unset so that
//! configuration files and defaults can fill them in.
//!
use crate::core::config::{OptionsLayer, TargetSpec};
use clap::Args;
use std::path::PathBuf;

/// # Compress Command Arguments (`CompressArgs`)
#[derive(Args, Debug, Default, Clone)]
pub struct CompressArgs {
    /// Target directory to compress. Repeat the flag, list several paths, or
    /// separate them with commas to archive multiple directories. Defaults to `dist`.
    #[arg(
        short = 't',
        long = "target",
        value_name = "PATH",
        num_args = 1..,
        value_delimiter = ','
    )]
    pub targets: Vec<String>,

    /// Output file path without extension (`.zip` is appended unless present).
    /// Defaults to `archive`.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Include only files matching these glob patterns (relative to each target).
    #[arg(short, long, value_name = "GLOB", num_args = 1..)]
    pub include: Vec<String>,

    /// Exclude files matching these glob patterns. Always wins over --include.
    #[arg(short, long, value_name = "GLOB", num_args = 1..)]
    pub exclude: Vec<String>,

    /// Store files from multiple targets at the archive root instead of under
    /// per-target prefixes. Files with the same path overwrite each other.
    #[arg(long)]
    pub no_namespace: bool,

    /// Compression level: 0 stores files uncompressed, 1-9 deflate. Defaults to 9.
    #[arg(short, long, value_name = "0-9", value_parser = clap::value_parser!(u8).range(0..=9))]
    pub level: Option<u8>,

    /// Working directory that relative paths are resolved against.
    #[arg(short = 'C', long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Configuration file to use instead of `zipx.toml` in the working directory.
    #[arg(short, long, value_name = "FILE", env = "ZIPX_CONFIG")]
    pub config: Option<PathBuf>,
}

impl CompressArgs {
    /// Converts the flags into the command-line configuration layer.
    pub fn to_layer(&self) -> OptionsLayer {
        OptionsLayer {
            target: (!self.targets.is_empty()).then(|| TargetSpec::Many(self.targets.clone())),
            output: self.output.clone(),
            include: (!self.include.is_empty()).then(|| self.include.clone()),
            exclude: (!self.exclude.is_empty()).then(|| self.exclude.clone()),
            namespace: self.no_namespace.then_some(false),
            compression_level: self.level,
        }
    }
}
