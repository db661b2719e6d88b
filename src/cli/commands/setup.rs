//! `foodtruck setup` command.
//!
//! Clones the API and website repositories side by side and installs the
//! API's Python dependencies. A project whose directory already exists is
//! left alone.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::SetupArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::step::ToolStep;

pub const API_PROJECT: &str = "foodtruck-api";
pub const WEBSITE_PROJECT: &str = "foodtruck-website";

/// What happened to one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectOutcome {
    Skipped,
    AlreadyPresent(PathBuf),
    Ready(PathBuf),
    Failed(String),
}

/// The setup command implementation.
pub struct SetupCommand<'a> {
    ctx: &'a CommandContext<'a>,
    args: SetupArgs,
}

impl<'a> SetupCommand<'a> {
    pub fn new(ctx: &'a CommandContext<'a>, args: SetupArgs) -> Self {
        Self { ctx, args }
    }

    /// Where projects are cloned.
    pub fn target_dir(&self) -> PathBuf {
        let dir = self
            .args
            .target_dir
            .as_deref()
            .unwrap_or(&self.ctx.config.setup.target_dir);
        self.ctx.resolve(dir)
    }

    fn api_repo(&self) -> &str {
        self.args
            .api_repo
            .as_deref()
            .unwrap_or(&self.ctx.config.setup.api_repo)
    }

    fn website_repo(&self) -> &str {
        self.args
            .website_repo
            .as_deref()
            .unwrap_or(&self.ctx.config.setup.website_repo)
    }

    fn setup_project(
        &self,
        ui: &mut dyn UserInterface,
        target: &Path,
        name: &str,
        repo: &str,
        wanted: bool,
    ) -> ProjectOutcome {
        if !wanted {
            ui.message(&format!("Skipping {} setup", name));
            return ProjectOutcome::Skipped;
        }

        let path = target.join(name);
        if path.exists() {
            ui.message(&format!("{} directory already exists, skipping clone", name));
            return ProjectOutcome::AlreadyPresent(path);
        }

        let timeout = self.ctx.config.setup.timeout();
        let dest = path.to_string_lossy().to_string();
        let label = format!("Cloning {}", name);
        let clone = ToolStep::new(&label, "git", &["clone", repo, dest.as_str()], timeout);
        if let Err(e) = clone.run(ui, self.ctx.runner) {
            return ProjectOutcome::Failed(format!("Failed to clone {}: {}", name, e));
        }

        if name == API_PROJECT {
            let label = format!("Installing {} dependencies", name);
            let sync = ToolStep::new(&label, "uv", &["sync"], timeout).in_dir(&path);
            if let Err(e) = sync.run(ui, self.ctx.runner) {
                return ProjectOutcome::Failed(format!(
                    "Failed to install {} dependencies: {}",
                    name, e
                ));
            }
        }

        ProjectOutcome::Ready(path)
    }

    /// Set up each requested project, in order.
    pub fn run_projects(
        &self,
        ui: &mut dyn UserInterface,
    ) -> Result<Vec<(&'static str, ProjectOutcome)>> {
        let target = self.target_dir();
        fs::create_dir_all(&target)?;
        ui.message(&format!("Target directory: {}", target.display()));

        let api = self.setup_project(
            ui,
            &target,
            API_PROJECT,
            self.api_repo(),
            self.args.wants_api(),
        );
        let website = self.setup_project(
            ui,
            &target,
            WEBSITE_PROJECT,
            self.website_repo(),
            self.args.wants_website(),
        );
        Ok(vec![(API_PROJECT, api), (WEBSITE_PROJECT, website)])
    }
}

impl Command for SetupCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header("Food Truck Development Environment Setup");

        let outcomes = self.run_projects(ui)?;
        let failed: Vec<&String> = outcomes
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                ProjectOutcome::Failed(msg) => Some(msg),
                _ => None,
            })
            .collect();

        ui.message("");
        if !failed.is_empty() {
            ui.error("Setup failed. Check the errors above and try again.");
            for msg in failed {
                ui.error(msg);
            }
            return Ok(CommandResult::failure(1));
        }

        ui.success("Setup completed successfully!");
        ui.message(&format!("Projects created in: {}", self.target_dir().display()));
        ui.message("Next steps:");
        for (name, outcome) in &outcomes {
            if matches!(outcome, ProjectOutcome::Skipped) {
                continue;
            }
            if *name == API_PROJECT {
                ui.show_command(&format!(
                    "cd {} && uv run python -m foodtruck_api.cli.app database init",
                    API_PROJECT
                ));
            } else {
                ui.show_command(&format!("cd {} && open index.html", WEBSITE_PROJECT));
            }
        }
        Ok(CommandResult::success())
    }
}
