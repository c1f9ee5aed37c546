//! # Zip Archive Builder (`common::archive::builder`)
//!
//! File: cli/src/common/archive/builder.rs
//!
//! ## Overview
//!
//! Collects archive entries in memory and serializes them into a zip container.
//!
//! ## Architecture
//!
//! - `ArchiveEntry::load` reads one source file fully into memory together with
//!   its modification time.
//! - `ArchiveBuilder::add` keeps archive paths unique. Adding a path that is
//!   already present replaces the earlier entry in place (last writer wins).
//! - `ArchiveBuilder::write_to` writes the container with the `zip` crate into a
//!   `tempfile::NamedTempFile` next to the destination and renames it over the
//!   destination only after the central directory has been written. A failure at
//!   any point drops the temporary file, so the destination is either the
//!   complete new archive or whatever was there before.
//!
//! Entry timestamps are stored as UTC calendar fields. Compression is `Stored` at
//! level 0 and `Deflated` at levels 1-9 for every entry.
//!
use super::request::CompressionLevel;
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::{ArchiveResult, ZipxError};
use chrono::{Datelike, Timelike, Utc};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::NamedTempFile;
use tracing::{debug, trace};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Entries at or above this size need zip64 headers.
const ZIP64_THRESHOLD: usize = u32::MAX as usize;

/// One file destined for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Slash-separated path inside the container.
    pub archive_path: String,
    /// Where the bytes came from.
    pub source: PathBuf,
    pub modified: SystemTime,
    pub data: Vec<u8>,
}

impl ArchiveEntry {
    /// # Load Entry (`ArchiveEntry::load`)
    ///
    /// Reads `source` (following symlinks) into memory. Returns `Ok(None)` when the
    /// path no longer refers to a regular file.
    ///
    /// ## Errors
    ///
    /// `ZipxError::Read` if the metadata or contents cannot be read.
    pub async fn load(archive_path: String, source: PathBuf) -> ArchiveResult<Option<Self>> {
        let metadata = tokio::fs::metadata(&source)
            .await
            .map_err(read_err(&source))?;
        if !metadata.is_file() {
            debug!("Skipping '{}': not a regular file", source.display());
            return Ok(None);
        }
        let modified = metadata.modified().map_err(read_err(&source))?;
        let data = tokio::fs::read(&source).await.map_err(read_err(&source))?;
        trace!("Read {} byte(s) from {}", data.len(), source.display());
        Ok(Some(Self {
            archive_path,
            source,
            modified,
            data,
        }))
    }
}

/// In-memory set of entries with unique archive paths.
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    entries: Vec<ArchiveEntry>,
    positions: HashMap<String, usize>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`. If its archive path is already taken, the earlier entry is
    /// replaced in place and its source path is returned.
    pub fn add(&mut self, entry: ArchiveEntry) -> Option<PathBuf> {
        match self.positions.get(&entry.archive_path) {
            Some(&position) => {
                let replaced = std::mem::replace(&mut self.entries[position], entry);
                Some(replaced.source)
            }
            None => {
                self.positions
                    .insert(entry.archive_path.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// # Write Archive (`write_to`)
    ///
    /// Serializes all entries into a zip container at `output`, creating missing
    /// parent directories. The write is staged through a temporary file in the
    /// same directory and renamed into place at the end.
    ///
    /// ## Errors
    ///
    /// - `ZipxError::Write` if directories, the staged file or the final rename fail.
    /// - `ZipxError::Container` if the zip writer rejects an entry or cannot finish.
    pub fn write_to(&self, output: &Path, level: CompressionLevel) -> ArchiveResult<()> {
        let write_err = |source| ZipxError::Write {
            path: output.to_path_buf(),
            source,
        };
        let container_err = |source| ZipxError::Container {
            path: output.to_path_buf(),
            source,
        };

        let parent = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        ensure_dir_exists(parent).map_err(write_err)?;

        let mut staged = NamedTempFile::new_in(parent).map_err(write_err)?;
        debug!(
            "Writing {} entries to staging file {}",
            self.entries.len(),
            staged.path().display()
        );
        {
            let mut writer = ZipWriter::new(staged.as_file_mut());
            for entry in &self.entries {
                writer
                    .start_file(entry.archive_path.as_str(), entry_options(level, entry))
                    .map_err(container_err)?;
                writer.write_all(&entry.data).map_err(write_err)?;
            }
            writer.finish().map_err(container_err)?;
        }
        staged.as_file().sync_all().map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            staged
                .as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(write_err)?;
        }

        staged
            .persist(output)
            .map_err(|persist| write_err(persist.error))?;
        debug!("Archive written to {}", output.display());
        Ok(())
    }
}

fn read_err(path: &Path) -> impl FnOnce(std::io::Error) -> ZipxError + '_ {
    move |source| ZipxError::Read {
        path: path.to_path_buf(),
        source,
    }
}

fn entry_options(level: CompressionLevel, entry: &ArchiveEntry) -> SimpleFileOptions {
    let options = SimpleFileOptions::default()
        .last_modified_time(zip_timestamp(entry.modified))
        .large_file(entry.data.len() >= ZIP64_THRESHOLD);
    if level.is_store() {
        options.compression_method(CompressionMethod::Stored)
    } else {
        options
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(level.get())))
    }
}

/// Converts a modification time to zip's calendar timestamp (UTC). Times the
/// format cannot represent (before 1980 or after 2107) become 1980-01-01 00:00.
fn zip_timestamp(modified: SystemTime) -> zip::DateTime {
    let utc: chrono::DateTime<Utc> = modified.into();
    let Ok(year) = u16::try_from(utc.year()) else {
        return zip::DateTime::default();
    };
    zip::DateTime::from_date_and_time(
        year,
        utc.month() as u8,
        utc.day() as u8,
        utc.hour() as u8,
        utc.minute() as u8,
        utc.second() as u8,
    )
    .unwrap_or_default()
}
