//! Configuration file discovery and loading.

use crate::config::merger::merge_layers;
use crate::config::schema::FoodtruckConfig;
use crate::config::validator::validate;
use crate::error::{FoodtruckError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding config files, both in `$HOME` and in a project.
pub const CONFIG_DIR: &str = ".foodtruck";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yml";

/// Config files in merge order (later overrides earlier).
///
/// 1. User global config (`~/.foodtruck/config.yml`)
/// 2. Project config (`<project>/.foodtruck/config.yml`)
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub user_global: Option<PathBuf>,
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover existing config files for `project_root`.
    pub fn discover(home: Option<&Path>, project_root: &Path) -> Self {
        let existing = |path: PathBuf| path.is_file().then_some(path);
        Self {
            user_global: home.and_then(|h| existing(h.join(CONFIG_DIR).join(CONFIG_FILE))),
            project: existing(project_root.join(CONFIG_DIR).join(CONFIG_FILE)),
        }
    }

    /// Existing paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.user_global.iter().chain(self.project.iter()).collect()
    }
}

/// Read one file as a raw YAML value.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| FoodtruckError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| FoodtruckError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the effective configuration.
///
/// With `explicit`, only that file is read and it must exist. Otherwise the
/// user and project files are merged; both are optional.
pub fn load_config(
    home: Option<&Path>,
    project_root: &Path,
    explicit: Option<&Path>,
) -> Result<FoodtruckConfig> {
    let paths: Vec<PathBuf> = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => ConfigPaths::discover(home, project_root)
            .all_existing()
            .into_iter()
            .cloned()
            .collect(),
    };

    if paths.is_empty() {
        tracing::debug!("No config files found, using defaults");
        return Ok(FoodtruckConfig::default());
    }

    let mut layers = Vec::with_capacity(paths.len());
    for path in &paths {
        tracing::debug!("Loading config from {}", path.display());
        layers.push(load_config_value(path)?);
    }

    let merged = merge_layers(&layers);
    // Blame the highest-priority file: that's where an override most likely went wrong.
    let blamed = paths.last().cloned().unwrap_or_default();
    let config: FoodtruckConfig =
        serde_yaml::from_value(merged).map_err(|e| FoodtruckError::ConfigParseError {
            path: blamed,
            message: e.to_string(),
        })?;
    validate(&config)?;
    Ok(config)
}
