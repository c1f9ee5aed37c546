//! # Zipx Archive Core (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! This module turns a fully-resolved `ArchiveRequest` into one zip file. It
//! knows nothing about flags or configuration files; `commands::compress`
//! builds the request and hands it over.
//!
//! ## Architecture
//!
//! The pipeline runs in four stages, each in its own submodule:
//!
//! - **`paths`**: resolves the output path and every target against the working
//!   directory, and rejects missing targets before anything else happens.
//! - **`enumerate`**: compiles include/exclude globs and walks each target for
//!   matching regular files.
//! - **`namespace`**: decides the per-target prefix when several targets share
//!   one archive.
//! - **`builder`**: reads the selected files and writes the container through a
//!   staged temporary file.
//!
//! `request` holds the input type and its defaults.
//!
//! Targets are processed in the order given. Within a target, files are read
//! concurrently (at most `READ_CONCURRENCY` at a time) but consumed in
//! enumeration order, so when two files map to the same archive path the one
//! processed last wins, deterministically.
//!
//! Directory walks and zip serialization are blocking work and run on tokio's
//! blocking pool. Nothing is written to the output path until every file has
//! been read; any error before that point leaves the destination untouched.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{self, ArchiveRequest, CompressionLevel};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let request = ArchiveRequest {
//!     cwd: std::env::current_dir()?,
//!     targets: vec!["dist".into(), "public".into()],
//!     output: "release/site".into(),
//!     include: vec![],
//!     exclude: vec!["**/*.map".into()],
//!     namespace: true,
//!     compression_level: CompressionLevel::MAX,
//! };
//! let written = archive::create_archive(&request).await?;
//! println!("{}", written.display()); // .../release/site.zip
//! # Ok(())
//! # }
//! ```
//!

pub mod builder;
pub mod enumerate;
pub mod namespace;
pub mod paths;
pub mod request;

pub use builder::{ArchiveBuilder, ArchiveEntry};
pub use request::{ArchiveRequest, CompressionLevel};

use crate::core::error::ArchiveResult;
use enumerate::FileFilter;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use std::path::PathBuf;
use tracing::debug;

/// Maximum number of source files read at the same time.
pub const READ_CONCURRENCY: usize = 16;

/// # Create Archive (`create_archive`)
///
/// Builds the archive described by `request` and returns the absolute path of
/// the written file.
///
/// ## Errors
///
/// - `TargetNotFound` if any target is missing or not a directory (checked for
///   all targets before any enumeration).
/// - `InvalidPattern` / `Enumeration` if a glob is malformed or a target cannot
///   be walked.
/// - `Read` if a selected file cannot be read.
/// - `Write` / `Container` / `Task` if the container cannot be produced.
///
/// On error no file is created at the output path, and an existing file there is
/// left as it was.
pub async fn create_archive(request: &ArchiveRequest) -> ArchiveResult<PathBuf> {
    let output = paths::resolve_output_path(&request.cwd, &request.output);
    let targets = paths::resolve_targets(&request.cwd, &request.targets).await?;
    let filter = FileFilter::new(&request.effective_include(), &request.exclude)?;
    let namespaces = namespace::assign_namespaces(&request.cwd, &targets, request.namespace);

    let mut builder = ArchiveBuilder::new();
    for (index, target) in targets.iter().enumerate() {
        let files = {
            let target = target.clone();
            let filter = filter.clone();
            tokio::task::spawn_blocking(move || enumerate::enumerate_files(&target, &filter))
                .await??
        };

        let loaded: Vec<Option<ArchiveEntry>> = stream::iter(files)
            .map(|file| {
                let archive_path = namespaces.archive_path(index, &file.relative);
                ArchiveEntry::load(archive_path, file.path)
            })
            .buffered(READ_CONCURRENCY)
            .try_collect()
            .await?;

        for entry in loaded.into_iter().flatten() {
            let archive_path = entry.archive_path.clone();
            if let Some(replaced) = builder.add(entry) {
                debug!(
                    "'{}' from {} replaces the copy from {}",
                    archive_path,
                    target.display(),
                    replaced.display()
                );
            }
        }
    }

    if builder.is_empty() {
        debug!("No files matched; writing an empty archive");
    } else {
        debug!(
            "Collected {} entries from {} target(s)",
            builder.len(),
            targets.len()
        );
    }
    let level = request.compression_level;
    let destination = output.clone();
    tokio::task::spawn_blocking(move || builder.write_to(&destination, level)).await??;
    Ok(output)
}
