//! Dependency specifications.
//!
//! A [`DependencySpec`] names one external tool and how to ask it for its
//! version. The built-in list covers the Food Truck toolchain; projects
//! can append more through `check.dependencies` in their config.

use crate::shell::Platform;
use serde::{Deserialize, Serialize};

fn default_args() -> Vec<String> {
    vec!["--version".to_string()]
}

fn default_required() -> bool {
    true
}

/// One tool the `check` command looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencySpec {
    /// Display name ("Python", "Docker Daemon").
    pub name: String,

    /// Executable to run.
    pub command: String,

    /// Arguments that make the tool print its version.
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Whether a missing tool fails the check.
    #[serde(default = "default_required")]
    pub required: bool,

    /// Lowest acceptable version, compared numerically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,

    /// Where to get the tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_hint: Option<String>,
}

impl DependencySpec {
    /// A required tool probed with `--version`.
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            args: default_args(),
            required: true,
            min_version: None,
            install_hint: None,
        }
    }

    /// Replace the version arguments.
    pub fn with_args(mut self, args: &[&str]) -> Self {
        self.args = args.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Mark as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Require at least `version`.
    pub fn with_min_version(mut self, version: &str) -> Self {
        self.min_version = Some(version.to_string());
        self
    }

    /// Attach an install hint.
    pub fn with_install_hint(mut self, hint: &str) -> Self {
        self.install_hint = Some(hint.to_string());
        self
    }
}

/// The Food Truck toolchain, in check order.
pub fn builtin_specs(platform: Platform) -> Vec<DependencySpec> {
    let python = if platform.is_windows() {
        "python"
    } else {
        "python3"
    };

    vec![
        DependencySpec::new("Python", python)
            .with_min_version("3.13")
            .with_install_hint("https://www.python.org/downloads/"),
        DependencySpec::new("UV", "uv")
            .with_install_hint("https://docs.astral.sh/uv/getting-started/installation/"),
        DependencySpec::new("Git", "git").with_install_hint("https://git-scm.com/downloads"),
        DependencySpec::new("Docker", "docker")
            .with_install_hint("https://docs.docker.com/get-docker/"),
        DependencySpec::new("Docker Daemon", "docker")
            .with_args(&["info", "--format", "{{.ServerVersion}}"])
            .optional()
            .with_install_hint("Start Docker Desktop or run 'sudo systemctl start docker'"),
    ]
}
