//! Error types for foodtruck operations.
//!
//! This module defines [`FoodtruckError`], the error type shared by the
//! probe, installer and command layers, and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - Probe failures never escape as errors; they become report entries
//! - Installer steps wrap their failures with the step that produced them
//! - Use `anyhow::Error` (via `FoodtruckError::Other`) for unexpected errors

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Core error type for foodtruck operations.
#[derive(Debug, Error)]
pub enum FoodtruckError {
    /// Executable is not on PATH.
    #[error("'{tool}' not found on PATH")]
    ToolNotFound { tool: String },

    /// Subprocess did not finish before its deadline and was killed.
    #[error("'{tool}' timed out after {}s", .timeout.as_secs())]
    ToolTimedOut { tool: String, timeout: Duration },

    /// The active shell has no known profile file.
    #[error("Unsupported shell: {shell}")]
    UnsupportedShell { shell: String },

    /// Reading or writing the shell profile failed.
    #[error("Failed to update shell profile {path}: {message}")]
    ProfileWriteFailed { path: PathBuf, message: String },

    /// Writing the wrapper script failed.
    #[error("Failed to write wrapper script {path}: {message}")]
    WrapperWriteFailed { path: PathBuf, message: String },

    /// The editable package install did not succeed.
    #[error("Package install failed ({command}): {message}")]
    PackageInstallFailed { command: String, message: String },

    /// Command ran but exited unsuccessfully or was killed by a signal.
    #[error("'{program}' {reason}")]
    CommandFailed {
        program: String,
        code: Option<i32>,
        reason: String,
    },

    /// A project directory the command depends on could not be located.
    #[error("{project} project not found (searched from {searched})")]
    ProjectNotFound { project: String, searched: PathBuf },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Config parsed but broke a validation rule.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for foodtruck operations.
pub type Result<T> = std::result::Result<T, FoodtruckError>;
