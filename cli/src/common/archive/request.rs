//! # Archive Request (`common::archive::request`)
//!
//! File: cli/src/common/archive/request.rs
//!
//! ## Overview
//!
//! The fully-resolved input to the archive core. The configuration layer
//! (`core::config`) merges defaults, config files and CLI flags and
//! produces exactly one `ArchiveRequest`; the core never looks at flags or files.
//!
use crate::core::error::ZipxError;
use std::fmt;
use std::path::PathBuf;

/// Extension of the produced container, without the leading dot.
pub const ZIP_EXTENSION: &str = "zip";

/// Include pattern used when the caller supplies none.
pub const DEFAULT_INCLUDE: &str = "**/*";

/// Compression effort for the whole archive.
///
/// `0` stores entries uncompressed; `1..=9` deflates at that level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompressionLevel(u8);

impl CompressionLevel {
    pub const STORE: CompressionLevel = CompressionLevel(0);
    pub const MAX: CompressionLevel = CompressionLevel(9);

    pub fn get(self) -> u8 {
        self.0
    }

    /// Whether entries are written with the `Stored` method.
    pub fn is_store(self) -> bool {
        self == Self::STORE
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<u8> for CompressionLevel {
    type Error = ZipxError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        if level > Self::MAX.0 {
            return Err(ZipxError::Config(format!(
                "compression_level must be between 0 and 9, got {}",
                level
            )));
        }
        Ok(Self(level))
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// # Archive Request (`ArchiveRequest`)
///
/// Everything the core needs for one archive-build pass. Paths in `targets` and
/// `output` may be relative; they are resolved against `cwd` by the path resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRequest {
    /// Absolute working directory that relative paths are resolved against.
    pub cwd: PathBuf,
    /// One or more target directories, in processing order.
    pub targets: Vec<String>,
    /// Output path, with or without the `.zip` extension.
    pub output: String,
    /// Include globs; empty means `**/*`.
    pub include: Vec<String>,
    /// Exclude globs, applied after include.
    pub exclude: Vec<String>,
    /// Prefix entries per target when more than one target is given.
    pub namespace: bool,
    pub compression_level: CompressionLevel,
}

impl ArchiveRequest {
    /// Include patterns with the match-everything default applied.
    pub fn effective_include(&self) -> Vec<String> {
        if self.include.is_empty() {
            vec![DEFAULT_INCLUDE.to_string()]
        } else {
            self.include.clone()
        }
    }
}
