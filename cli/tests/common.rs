//! # Zipx CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`: building the
//! `zipx` command with an isolated environment, laying out source trees and
//! reading back the produced archives.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::io::Read;
use std::path::Path;

/// # Get Zipx Command (`zipx_cmd`)
///
/// `assert_cmd::Command` for the compiled `zipx` binary.
///
/// ## Panics
/// Panics if the `zipx` binary cannot be found via `Command::cargo_bin`.
pub fn zipx_cmd() -> Command {
    Command::cargo_bin("zipx").expect("Failed to find zipx binary for testing")
}

/// `zipx` running in `dir`, with the user configuration directory pointed at
/// an empty location inside `dir` and `ZIPX_CONFIG` cleared, so only files the
/// test creates can influence the run.
pub fn zipx_in(dir: &Path) -> Command {
    let mut cmd = zipx_cmd();
    cmd.current_dir(dir)
        .env_remove("ZIPX_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir.join(".test-config-home"))
        .env("HOME", dir.join(".test-home"));
    cmd
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    fs::write(&path, content).expect("Failed to write test file");
}

/// Sorted entry names of the zip archive at `path`.
pub fn archive_entries(path: &Path) -> Vec<String> {
    let file = fs::File::open(path).expect("Archive should exist");
    let archive = zip::ZipArchive::new(file).expect("Archive should be a valid zip");
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

/// Content of entry `name` in the zip archive at `path`.
pub fn archive_entry_content(path: &Path, name: &str) -> String {
    let file = fs::File::open(path).expect("Archive should exist");
    let mut archive = zip::ZipArchive::new(file).expect("Archive should be a valid zip");
    let mut content = String::new();
    archive
        .by_name(name)
        .expect("Entry should exist")
        .read_to_string(&mut content)
        .expect("Entry should be UTF-8");
    content
}
