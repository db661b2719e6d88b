//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for what every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, FoodtruckConfig};
use crate::error::Result;
use crate::shell::{CommandRunner, EnvProvider, SystemEnv, SystemRunner};
use crate::ui::UserInterface;

use super::api::ApiCommand;
use super::check::CheckCommand;
use super::completion::CompletionCommand;
use super::install::InstallCommand;
use super::setup::SetupCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Success or exit code 1.
    pub fn from_bool(ok: bool) -> Self {
        if ok {
            Self::success()
        } else {
            Self::failure(1)
        }
    }
}

/// Everything a command needs from its surroundings.
pub struct CommandContext<'a> {
    pub project_root: PathBuf,
    pub config: FoodtruckConfig,
    pub runner: &'a dyn CommandRunner,
    pub env: &'a dyn EnvProvider,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        project_root: PathBuf,
        config: FoodtruckConfig,
        runner: &'a dyn CommandRunner,
        env: &'a dyn EnvProvider,
    ) -> Self {
        Self {
            project_root,
            config,
            runner,
            env,
        }
    }

    /// Resolve `path` against the project root unless it is absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Create a dispatcher rooted at `project`, or at the current directory
    /// when none is given. The root is always absolute, since it ends up in
    /// the wrapper script and the shell profile.
    pub fn for_project(project: Option<&Path>) -> Result<Self> {
        let root = match project {
            Some(path) => std::path::absolute(path)?,
            None => std::env::current_dir()?,
        };
        Ok(Self::new(root))
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load configuration and run the selected subcommand against the
    /// real system.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let env = SystemEnv;
        let runner = SystemRunner::new();
        let config = load_config(
            env.home_dir().as_deref(),
            &self.project_root,
            cli.config.as_deref(),
        )?;

        let ctx = CommandContext::new(self.project_root.clone(), config, &runner, &env);
        Self::run(&ctx, &cli.command, ui)
    }

    /// Run a subcommand with an explicit context.
    pub fn run(
        ctx: &CommandContext<'_>,
        command: &Commands,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        match command {
            Commands::Check(args) => CheckCommand::new(ctx, args.clone()).execute(ui),
            Commands::Install(args) => InstallCommand::new(ctx, args.clone()).execute(ui),
            Commands::Setup(args) => SetupCommand::new(ctx, args.clone()).execute(ui),
            Commands::Api(args) => ApiCommand::new(ctx, args.clone()).execute(ui),
            Commands::Completion(args) => CompletionCommand::new(ctx, args.clone()).execute(ui),
        }
    }
}
