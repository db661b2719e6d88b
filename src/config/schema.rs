//! Configuration schema.
//!
//! Every section and field is optional; an empty file yields
//! [`FoodtruckConfig::default`]. Unknown keys are rejected so typos are
//! reported instead of silently ignored.

use crate::requirements::DependencySpec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Repository cloned by `setup api`.
pub const DEFAULT_API_REPO: &str = "https://github.com/foodtruck-project/foodtruck-api.git";

/// Repository cloned by `setup website`.
pub const DEFAULT_WEBSITE_REPO: &str =
    "https://github.com/foodtruck-project/foodtruck-website.git";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FoodtruckConfig {
    pub check: CheckConfig,
    pub install: InstallConfig,
    pub setup: SetupConfig,
    pub api: ApiConfig,
}

/// `check` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Per-probe deadline.
    pub timeout_secs: u64,

    /// Extra specs probed after the built-in ones.
    pub dependencies: Vec<DependencySpec>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            dependencies: Vec::new(),
        }
    }
}

impl CheckConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `install` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallConfig {
    /// Command the wrapper forwards to. `{project}` expands to the project root.
    pub entry_command: Vec<String>,

    /// Editable install, run in the project root.
    pub package_command: Vec<String>,

    /// Deadline for the package install.
    pub timeout_secs: u64,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            entry_command: ["uv", "run", "--project", "{project}", "foodtruck"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            package_command: ["uv", "pip", "install", "-e", "."]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeout_secs: 300,
        }
    }
}

impl InstallConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `setup` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetupConfig {
    pub api_repo: String,
    pub website_repo: String,

    /// Where projects are cloned. Relative paths resolve against the project root.
    pub target_dir: PathBuf,

    /// Deadline for each `git clone` and `uv sync`.
    pub timeout_secs: u64,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            api_repo: DEFAULT_API_REPO.to_string(),
            website_repo: DEFAULT_WEBSITE_REPO.to_string(),
            target_dir: PathBuf::from("foodtruck-projects"),
            timeout_secs: 300,
        }
    }
}

impl SetupConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `api` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Deadline for `uv` and non-streaming `docker compose` calls.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { timeout_secs: 300 }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
