//! Self-install onto the user's PATH.
//!
//! Installation runs three steps in order:
//!
//! 1. Write the wrapper script into the target directory. Failure aborts.
//! 2. Make sure the shell profile puts the target directory on PATH.
//!    Failure is reported together with the line to add by hand.
//! 3. Run the editable package install in the project root. Failure is
//!    reported together with the command to retry.
//!
//! Nothing is persisted besides the files these steps write.

pub mod wrapper;

pub use wrapper::{WrapperOutcome, WrapperScript, PROJECT_PLACEHOLDER};

use crate::config::InstallConfig;
use crate::error::{FoodtruckError, Result};
use crate::shell::{
    display_command, export_line, CommandOptions, CommandRunner, EnvProvider, ShellProfileEditor,
    ShellTarget, ShellType,
};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Installer steps, for messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStep {
    Wrapper,
    Profile,
    Package,
}

impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstallStep::Wrapper => "wrapper script",
            InstallStep::Profile => "shell profile",
            InstallStep::Package => "package install",
        };
        f.write_str(name)
    }
}

/// Inputs for one install run.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Directory that receives the wrapper and goes on PATH.
    pub target_dir: PathBuf,
    /// Project whose entry point the wrapper runs.
    pub project_root: PathBuf,
    pub entry_command: Vec<String>,
    pub package_command: Vec<String>,
    /// Deadline for the package install.
    pub timeout: Duration,
    pub skip_package: bool,
}

impl InstallOptions {
    /// Options from config, installing into the project root.
    pub fn from_config(project_root: &Path, config: &InstallConfig) -> Self {
        Self {
            target_dir: project_root.to_path_buf(),
            project_root: project_root.to_path_buf(),
            entry_command: config.entry_command.clone(),
            package_command: config.package_command.clone(),
            timeout: config.timeout(),
            skip_package: false,
        }
    }

    /// Install the wrapper somewhere else.
    pub fn with_target_dir(mut self, dir: PathBuf) -> Self {
        self.target_dir = dir;
        self
    }

    /// Skip the package install step.
    pub fn skip_package(mut self, skip: bool) -> Self {
        self.skip_package = skip;
        self
    }
}

/// Result of the profile step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileOutcome {
    /// An export line was appended.
    Added { profile: PathBuf, reload_hint: String },
    /// The directory was already on PATH in the profile.
    AlreadyPresent { profile: PathBuf },
    /// The profile could not be updated.
    Failed { error: String, manual_line: String },
}

/// Result of the package step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageOutcome {
    Installed,
    Skipped,
    Failed { error: String, manual_command: String },
}

/// What an install run did.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub wrapper_path: PathBuf,
    pub wrapper: WrapperOutcome,
    pub profile: ProfileOutcome,
    pub package: PackageOutcome,
}

impl InstallReport {
    /// Whether any non-fatal step needs the user's attention.
    pub fn has_warnings(&self) -> bool {
        matches!(self.profile, ProfileOutcome::Failed { .. })
            || matches!(self.package, PackageOutcome::Failed { .. })
    }
}

/// Runs the install pipeline.
pub struct Installer<'a> {
    runner: &'a dyn CommandRunner,
    env: &'a dyn EnvProvider,
    options: InstallOptions,
}

impl<'a> Installer<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        env: &'a dyn EnvProvider,
        options: InstallOptions,
    ) -> Self {
        Self {
            runner,
            env,
            options,
        }
    }

    pub fn options(&self) -> &InstallOptions {
        &self.options
    }

    /// Run all steps.
    ///
    /// Returns `Err` only when the wrapper cannot be written; the other
    /// steps record their failures in the report.
    pub fn install(&self) -> Result<InstallReport> {
        let script = WrapperScript::new(
            &self.options.target_dir,
            &self.options.project_root,
            &self.options.entry_command,
            self.env.platform(),
        );
        let wrapper = script.write()?;
        tracing::info!("{} {:?}: {}", InstallStep::Wrapper, wrapper, script.path().display());

        let profile = self.update_profile();
        let package = self.install_package();

        Ok(InstallReport {
            wrapper_path: script.path().to_path_buf(),
            wrapper,
            profile,
            package,
        })
    }

    fn update_profile(&self) -> ProfileOutcome {
        let dir = &self.options.target_dir;

        let result = ShellTarget::detect(self.env).and_then(|target| {
            let editor = ShellProfileEditor::new(target.clone());
            editor.ensure_path_entry(dir).map(|added| (target, added))
        });

        match result {
            Ok((target, true)) => ProfileOutcome::Added {
                reload_hint: target.reload_hint(),
                profile: target.profile,
            },
            Ok((target, false)) => ProfileOutcome::AlreadyPresent {
                profile: target.profile,
            },
            Err(e) => {
                tracing::warn!("{} step failed: {}", InstallStep::Profile, e);
                let shell = if self.env.platform().is_windows() {
                    ShellType::PowerShell
                } else {
                    ShellType::Bash
                };
                ProfileOutcome::Failed {
                    error: e.to_string(),
                    manual_line: export_line(shell, dir),
                }
            }
        }
    }

    fn install_package(&self) -> PackageOutcome {
        let Some((program, args)) = self.options.package_command.split_first() else {
            return PackageOutcome::Skipped;
        };
        if self.options.skip_package {
            return PackageOutcome::Skipped;
        }

        let command = display_command(program, args);
        let options =
            CommandOptions::captured(self.options.timeout).in_dir(&self.options.project_root);

        let error = match self.runner.run(program, args, &options) {
            Ok(result) if result.success => {
                tracing::info!("{} succeeded: {}", InstallStep::Package, command);
                return PackageOutcome::Installed;
            }
            Ok(result) => FoodtruckError::PackageInstallFailed {
                command: command.clone(),
                message: result.failure_reason(),
            },
            Err(e) => FoodtruckError::PackageInstallFailed {
                command: command.clone(),
                message: e.to_string(),
            },
        };

        tracing::warn!("{} step failed: {}", InstallStep::Package, error);
        PackageOutcome::Failed {
            error: error.to_string(),
            manual_command: format!(
                "cd {} && {}",
                self.options.project_root.display(),
                command
            ),
        }
    }
}
