//! # Zipx Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module turns configuration files and command-line values into the one
//! immutable `ArchiveRequest` the archive core consumes. All defaulting and
//! merging happens here.
//!
//! ## Architecture
//!
//! Every source is read into the same shape, an `OptionsLayer`, in which each
//! setting is optional. Layers are stacked and, per setting, the highest layer
//! that sets it wins (values replace, lists are not concatenated):
//!
//! 1. Command-line flags
//! 2. Project configuration: `zipx.toml` in the working directory, or the file
//!    given with `--config` / `ZIPX_CONFIG`
//! 3. User configuration: `<config dir>/zipx/config.toml`
//! 4. Built-in defaults (`target = "dist"`, `output = "archive"`, level 9,
//!    namespacing on)
//!
//! After merging, `~` is expanded in target and output paths, empty target
//! strings are dropped, and the compression level is validated.
//!
//! ## Examples
//!
//! A `zipx.toml`:
//!
//! ```toml
//! target = ["dist", "public"]
//! output = "release/site"
//! exclude = ["**/*.map"]
//! namespace = true
//! compression_level = 6
//! ```
//!
//! `target` may be a single string or an array of strings.
//!
use crate::common::archive::{ArchiveRequest, CompressionLevel};
use crate::common::fs::io::read_file_to_string;
use crate::core::error::{Result, ZipxError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File looked up in the working directory when no explicit config is given.
pub const PROJECT_CONFIG_FILENAME: &str = "zipx.toml";
/// File name inside the per-user configuration directory.
const USER_CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_TARGET: &str = "dist";
pub const DEFAULT_OUTPUT: &str = "archive";

/// A target setting: one directory or a list of them.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TargetSpec {
    One(String),
    Many(Vec<String>),
}

impl TargetSpec {
    /// Flattens into an ordered list, dropping empty entries.
    pub fn into_list(self) -> Vec<String> {
        let items = match self {
            TargetSpec::One(target) => vec![target],
            TargetSpec::Many(targets) => targets,
        };
        items
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .collect()
    }
}

/// One source of settings. `None` means "not set here".
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OptionsLayer {
    pub target: Option<TargetSpec>,
    pub output: Option<String>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub namespace: Option<bool>,
    pub compression_level: Option<u8>,
}

impl OptionsLayer {
    /// Returns a layer where settings from `self` take precedence over `lower`.
    pub fn overlay(self, lower: OptionsLayer) -> OptionsLayer {
        OptionsLayer {
            target: self.target.or(lower.target),
            output: self.output.or(lower.output),
            include: self.include.or(lower.include),
            exclude: self.exclude.or(lower.exclude),
            namespace: self.namespace.or(lower.namespace),
            compression_level: self.compression_level.or(lower.compression_level),
        }
    }
}

/// # Load Request (`load_request`)
///
/// Reads the user and project configuration files, stacks the command-line
/// layer on top and builds the final request for `cwd`.
///
/// ## Errors
///
/// Returns an error if a configuration file exists but cannot be read or parsed,
/// if an explicit `config_path` does not exist, or if the merged settings are
/// invalid (see `build_request`).
pub fn load_request(
    cwd: &Path,
    cli: OptionsLayer,
    config_path: Option<&Path>,
) -> Result<ArchiveRequest> {
    let user = load_user_config()?;
    let project = load_project_config(cwd, config_path)?;
    build_request(cwd, cli, project, user)
}

/// Merges the layers (CLI > project > user > defaults) and validates the result.
pub fn build_request(
    cwd: &Path,
    cli: OptionsLayer,
    project: Option<OptionsLayer>,
    user: Option<OptionsLayer>,
) -> Result<ArchiveRequest> {
    let merged = cli
        .overlay(project.unwrap_or_default())
        .overlay(user.unwrap_or_default());
    debug!("Merged options: {:?}", merged);

    let targets: Vec<String> = merged
        .target
        .unwrap_or_else(|| TargetSpec::One(DEFAULT_TARGET.to_string()))
        .into_list()
        .iter()
        .map(|t| expand_path(t))
        .collect();
    if targets.is_empty() {
        return Err(anyhow!(ZipxError::Config(
            "at least one target directory is required".to_string()
        )));
    }

    let output = expand_path(merged.output.as_deref().unwrap_or(DEFAULT_OUTPUT));
    let compression_level = match merged.compression_level {
        Some(level) => CompressionLevel::try_from(level)?,
        None => CompressionLevel::default(),
    };

    let request = ArchiveRequest {
        cwd: cwd.to_path_buf(),
        targets,
        output,
        include: merged.include.unwrap_or_default(),
        exclude: merged.exclude.unwrap_or_default(),
        namespace: merged.namespace.unwrap_or(true),
        compression_level,
    };
    info!("Effective archive request: {:?}", request);
    Ok(request)
}

fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}

fn load_user_config() -> Result<Option<OptionsLayer>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "Zipx", "zipx") else {
        warn!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join(USER_CONFIG_FILENAME);
    if config_path.is_file() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

/// Loads the project layer: the explicit file if given (it must exist), otherwise
/// `zipx.toml` in `cwd` if present.
pub fn load_project_config(cwd: &Path, explicit: Option<&Path>) -> Result<Option<OptionsLayer>> {
    if let Some(path) = explicit {
        let path: PathBuf = cwd.join(path);
        if !path.is_file() {
            return Err(anyhow!(ZipxError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            ))));
        }
        info!("Loading configuration from: {}", path.display());
        return load_config_from_path(&path).map(Some);
    }

    let candidate = cwd.join(PROJECT_CONFIG_FILENAME);
    if candidate.is_file() {
        info!("Loading project configuration from: {}", candidate.display());
        load_config_from_path(&candidate).map(Some)
    } else {
        debug!("No {} found in {}", PROJECT_CONFIG_FILENAME, cwd.display());
        Ok(None)
    }
}

fn load_config_from_path(path: &Path) -> Result<OptionsLayer> {
    let content = read_file_to_string(path)?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_full_toml() {
        let toml_content = r#"
            target = ["dist", "public"]
            output = "release/site"
            include = ["**/*"]
            exclude = ["**/*.map"]
            namespace = false
            compression_level = 6
        "#;
        let layer: OptionsLayer = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(
            layer.target,
            Some(TargetSpec::Many(vec!["dist".into(), "public".into()]))
        );
        assert_eq!(layer.output.as_deref(), Some("release/site"));
        assert_eq!(layer.exclude, Some(vec!["**/*.map".to_string()]));
        assert_eq!(layer.namespace, Some(false));
        assert_eq!(layer.compression_level, Some(6));
    }

    #[test]
    fn test_deserialize_single_target_string() {
        let layer: OptionsLayer = toml::from_str(r#"target = "build""#).unwrap();
        assert_eq!(layer.target, Some(TargetSpec::One("build".into())));
        assert_eq!(layer.output, None);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: std::result::Result<OptionsLayer, _> = toml::from_str(r#"outptu = "x""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let cwd = Path::new("/work");
        let request = build_request(cwd, OptionsLayer::default(), None, None).unwrap();
        assert_eq!(request.cwd, PathBuf::from("/work"));
        assert_eq!(request.targets, vec!["dist".to_string()]);
        assert_eq!(request.output, "archive");
        assert!(request.include.is_empty());
        assert!(request.exclude.is_empty());
        assert!(request.namespace);
        assert_eq!(request.compression_level, CompressionLevel::MAX);
    }

    #[test]
    fn test_layer_precedence() {
        let cwd = Path::new("/work");
        let user = OptionsLayer {
            output: Some("user-out".into()),
            compression_level: Some(1),
            exclude: Some(vec!["*.log".into()]),
            ..Default::default()
        };
        let project = OptionsLayer {
            target: Some(TargetSpec::Many(vec!["dist".into(), "public".into()])),
            output: Some("project-out".into()),
            namespace: Some(false),
            ..Default::default()
        };
        let cli = OptionsLayer {
            output: Some("cli-out".into()),
            ..Default::default()
        };

        let request = build_request(cwd, cli, Some(project), Some(user)).unwrap();
        assert_eq!(request.output, "cli-out");
        assert_eq!(request.targets, vec!["dist".to_string(), "public".to_string()]);
        assert!(!request.namespace);
        assert_eq!(request.compression_level.get(), 1);
        assert_eq!(request.exclude, vec!["*.log".to_string()]);
    }

    #[test]
    fn test_lists_replace_rather_than_concatenate() {
        let cwd = Path::new("/work");
        let project = OptionsLayer {
            include: Some(vec!["**/*.html".into()]),
            ..Default::default()
        };
        let cli = OptionsLayer {
            include: Some(vec!["**/*.js".into()]),
            ..Default::default()
        };
        let request = build_request(cwd, cli, Some(project), None).unwrap();
        assert_eq!(request.include, vec!["**/*.js".to_string()]);
    }

    #[test]
    fn test_invalid_level_rejected() {
        let cli = OptionsLayer {
            compression_level: Some(12),
            ..Default::default()
        };
        let err = build_request(Path::new("/work"), cli, None, None).unwrap_err();
        assert!(err.to_string().contains("between 0 and 9"));
    }

    #[test]
    fn test_empty_target_list_rejected() {
        let project = OptionsLayer {
            target: Some(TargetSpec::Many(vec!["".into(), "  ".into()])),
            ..Default::default()
        };
        let err = build_request(Path::new("/work"), OptionsLayer::default(), Some(project), None)
            .unwrap_err();
        assert!(err.to_string().contains("at least one target"));
    }

    #[test]
    fn test_tilde_expansion() {
        let cli = OptionsLayer {
            target: Some(TargetSpec::One("~/site".into())),
            output: Some("~/out/site".into()),
            ..Default::default()
        };
        let request = build_request(Path::new("/work"), cli, None, None).unwrap();
        assert!(!request.targets[0].starts_with('~'));
        assert!(request.targets[0].ends_with("site"));
        assert!(!request.output.starts_with('~'));
    }

    #[test]
    fn test_project_config_discovered_in_cwd() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG_FILENAME),
            "target = \"build\"\ncompression_level = 0\n",
        )
        .unwrap();

        let layer = load_project_config(temp.path(), None).unwrap().unwrap();
        assert_eq!(layer.target, Some(TargetSpec::One("build".into())));
        assert_eq!(layer.compression_level, Some(0));
    }

    #[test]
    fn test_project_config_absent() {
        let temp = tempdir().unwrap();
        assert!(load_project_config(temp.path(), None).unwrap().is_none());
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let temp = tempdir().unwrap();
        let err = load_project_config(temp.path(), Some(Path::new("custom.toml"))).unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));

        fs::write(temp.path().join("custom.toml"), "output = \"x\"\n").unwrap();
        let layer = load_project_config(temp.path(), Some(Path::new("custom.toml")))
            .unwrap()
            .unwrap();
        assert_eq!(layer.output.as_deref(), Some("x"));
    }

    #[test]
    fn test_malformed_config_reports_file() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILENAME), "target = [1, 2").unwrap();
        let err = load_project_config(temp.path(), None).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }
}
