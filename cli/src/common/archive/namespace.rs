//! # Namespace Prefixes (`common::archive::namespace`)
//!
//! File: cli/src/common/archive/namespace.rs
//!
//! ## Overview
//!
//! When several targets go into one archive, each target's files are stored
//! under a prefix so `dist/index.html` and `public/index.html` do not collide.
//!
//! - One target, or namespacing disabled: every prefix is empty.
//! - Target inside the working directory: its relative path (`builds/dist`).
//! - Target outside the working directory, or the working directory itself: its
//!   directory name.
//!
//! Two out-of-tree targets with the same directory name get the same prefix.
//! That collision is not detected here; the builder resolves it by letting the
//! later entry replace the earlier one.
//!
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Prefix per target index. Empty strings mean "no prefix".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceAssignment {
    prefixes: Vec<String>,
}

impl NamespaceAssignment {
    pub fn prefix(&self, index: usize) -> &str {
        self.prefixes.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Joins a target-relative path onto the prefix for `index` with `/`.
    pub fn archive_path(&self, index: usize, relative: &str) -> String {
        match self.prefix(index) {
            "" => relative.to_string(),
            prefix => format!("{}/{}", prefix, relative),
        }
    }
}

/// # Assign Namespaces (`assign_namespaces`)
///
/// Computes the prefix for each of `targets` (absolute, normalized paths).
pub fn assign_namespaces(cwd: &Path, targets: &[PathBuf], namespace: bool) -> NamespaceAssignment {
    let active = namespace && targets.len() > 1;
    let assignment = NamespaceAssignment {
        prefixes: targets
            .iter()
            .map(|target| if active { prefix_for(cwd, target) } else { String::new() })
            .collect(),
    };
    if active {
        debug!("Namespace prefixes: {:?}", assignment.prefixes());
    }
    assignment
}

fn prefix_for(cwd: &Path, target: &Path) -> String {
    let inside = pathdiff::diff_paths(target, cwd).and_then(|relative| {
        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(name) => segments.push(name.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => return None,
            }
        }
        (!segments.is_empty()).then(|| segments.join("/"))
    });
    inside.unwrap_or_else(|| {
        target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    })
}
