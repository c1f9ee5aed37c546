//! # File Enumeration (`common::archive::enumerate`)
//!
//! File: cli/src/common/archive/enumerate.rs
//!
//! ## Overview
//!
//! Produces the list of files under one target directory that belong in the
//! archive, given include and exclude glob patterns.
//!
//! ## Architecture
//!
//! - `FileFilter` compiles both pattern lists into `globset::GlobSet`s once per
//!   request. Patterns use `literal_separator`, so `*` stays inside one path
//!   segment while `**` crosses segments. Matching happens against the
//!   slash-separated path relative to the target root, on every platform.
//! - `enumerate_files` walks the target with `walkdir`, following symlinks and
//!   visiting entries sorted by file name so the result is deterministic.
//!   Directories whose relative path matches an exclude pattern are pruned
//!   without being descended into.
//!
//! Only regular files are returned. Dotfiles are treated like any other name.
//!
//! ## Usage
//!
//! ```rust
//! let filter = FileFilter::new(&["**/*".into()], &["**/*.map".into()])?;
//! let files = enumerate_files(Path::new("/work/dist"), &filter)?;
//! for file in &files {
//!     println!("{} <- {}", file.relative, file.path.display());
//! }
//! ```
//!
use crate::core::error::{ArchiveResult, ZipxError};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// A file selected for archiving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Slash-separated path relative to the target root.
    pub relative: String,
    /// Absolute path on disk (symlinks not resolved).
    pub path: PathBuf,
}

/// Compiled include/exclude patterns for one request.
#[derive(Debug, Clone)]
pub struct FileFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl FileFilter {
    /// Compiles the pattern lists.
    ///
    /// ## Errors
    ///
    /// `ZipxError::InvalidPattern` naming the first pattern that fails to parse.
    pub fn new(include: &[String], exclude: &[String]) -> ArchiveResult<Self> {
        Ok(Self {
            include: compile_patterns(include)?,
            exclude: compile_patterns(exclude)?,
        })
    }

    /// True when `relative` is matched by an include pattern and by no exclude pattern.
    pub fn matches(&self, relative: &str) -> bool {
        self.include.is_match(relative) && !self.exclude.is_match(relative)
    }

    pub fn is_excluded(&self, relative: &str) -> bool {
        self.exclude.is_match(relative)
    }
}

fn compile_patterns(patterns: &[String]) -> ArchiveResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        for expanded in expand_pattern(normalize_pattern(pattern)) {
            let glob = GlobBuilder::new(&expanded)
                .literal_separator(true)
                .backslash_escape(true)
                .build()
                .map_err(|source| ZipxError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            builder.add(glob);
        }
    }
    builder.build().map_err(|source| ZipxError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// A pattern that does not end in `*` may name a directory, so it also
/// matches everything below it (`assets` -> `assets`, `assets/**`).
fn expand_pattern(pattern: &str) -> Vec<String> {
    if pattern.ends_with('*') {
        vec![pattern.to_string()]
    } else {
        vec![pattern.to_string(), format!("{}/**", pattern)]
    }
}

/// Strips a leading `./` and a trailing `/`; both refer to the target root.
fn normalize_pattern(pattern: &str) -> &str {
    let trimmed = pattern.strip_prefix("./").unwrap_or(pattern);
    match trimmed.strip_suffix('/') {
        Some(dir) if !dir.is_empty() => dir,
        _ => trimmed,
    }
}

/// # Enumerate Files (`enumerate_files`)
///
/// Walks `target` and returns every regular file whose relative path passes
/// `filter`, in walk order (sorted by name within each directory).
///
/// Symlinks are followed and reported under the link's own path. A dangling
/// symlink is skipped rather than treated as a failure.
///
/// ## Errors
///
/// `ZipxError::Enumeration` when a directory under `target` cannot be read, or
/// when a symlink loop is detected.
pub fn enumerate_files(target: &Path, filter: &FileFilter) -> ArchiveResult<Vec<SourceFile>> {
    debug!("Enumerating files under {}", target.display());
    let walker = WalkDir::new(target)
        .follow_links(true)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            match relative_slash_path(target, entry.path()) {
                Some(relative) if filter.is_excluded(&relative) => {
                    trace!("Pruning excluded directory '{}'", relative);
                    false
                }
                _ => true,
            }
        });

    let mut files = Vec::new();
    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) if is_dangling_symlink(&err) => {
                debug!("Skipping dangling symlink: {}", err);
                continue;
            }
            Err(source) => {
                return Err(ZipxError::Enumeration {
                    target: target.to_path_buf(),
                    source,
                })
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(relative) = relative_slash_path(target, entry.path()) else {
            continue;
        };
        if filter.matches(&relative) {
            trace!("Selected '{}'", relative);
            files.push(SourceFile {
                relative,
                path: entry.into_path(),
            });
        }
    }
    debug!("Selected {} file(s) under {}", files.len(), target.display());
    Ok(files)
}

/// Path of `path` below `root`, joined with `/`. `None` for the root itself.
pub fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

fn is_dangling_symlink(err: &walkdir::Error) -> bool {
    let not_found = err
        .io_error()
        .is_some_and(|io| io.kind() == ErrorKind::NotFound);
    not_found
        && err.path().is_some_and(|p| {
            fs::symlink_metadata(p)
                .map(|meta| meta.file_type().is_symlink())
                .unwrap_or(false)
        })
}
