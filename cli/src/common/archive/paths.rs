//! # Path Resolution (`common::archive::paths`)
//!
//! File: cli/src/common/archive/paths.rs
//!
//! ## Overview
//!
//! Turns the working directory plus the target and output strings of an
//! `ArchiveRequest` into absolute paths, and validates targets before any
//! enumeration starts.
//!
//! Paths are normalized lexically: `.` components are dropped and `..` pops the
//! previous component. Symbolic links are *not* resolved here, so a target's
//! position relative to the working directory (which drives namespacing) is
//! computed on the paths as the user wrote them.
//!
use super::request::ZIP_EXTENSION;
use crate::core::error::{ArchiveResult, ZipxError};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

/// Joins `input` onto `cwd` (unless already absolute) and normalizes the result.
pub fn resolve_path(cwd: &Path, input: impl AsRef<Path>) -> PathBuf {
    normalize_lexically(&cwd.join(input))
}

/// # Resolve Output Path (`resolve_output_path`)
///
/// Returns the absolute path of the archive to write. The `.zip` extension is
/// appended unless `output` already ends with it.
pub fn resolve_output_path(cwd: &Path, output: &str) -> PathBuf {
    let suffix = format!(".{}", ZIP_EXTENSION);
    let with_extension = if output.ends_with(&suffix) {
        output.to_string()
    } else {
        format!("{}{}", output, suffix)
    };
    let resolved = resolve_path(cwd, with_extension);
    debug!("Resolved output path: {}", resolved.display());
    resolved
}

/// # Resolve and Validate Targets (`resolve_targets`)
///
/// Resolves every target against `cwd` and checks that each exists and is a
/// directory (following symlinks). All targets are checked before returning, so
/// a request either validates completely or fails with the first offending
/// absolute path and nothing has been read or written yet.
///
/// ## Errors
///
/// `ZipxError::TargetNotFound` when a target is missing, is not a directory, or
/// its metadata cannot be read.
pub async fn resolve_targets(cwd: &Path, targets: &[String]) -> ArchiveResult<Vec<PathBuf>> {
    let mut resolved = Vec::with_capacity(targets.len());
    for target in targets {
        let abs = resolve_path(cwd, target);
        match tokio::fs::metadata(&abs).await {
            Ok(meta) if meta.is_dir() => {
                trace!("Target '{}' resolved to {}", target, abs.display());
                resolved.push(abs);
            }
            _ => return Err(ZipxError::TargetNotFound { path: abs }),
        }
    }
    Ok(resolved)
}

/// Normalizes `.` and `..` without touching the filesystem.
///
/// `..` at the root stays at the root, mirroring how the OS treats `/..`.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
