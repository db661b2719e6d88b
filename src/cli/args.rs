//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Food Truck development CLI.
#[derive(Debug, Parser)]
#[command(name = "foodtruck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (replaces ~/.foodtruck/config.yml and .foodtruck/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that required development tools are installed
    Check(CheckArgs),

    /// Install the foodtruck command onto your PATH
    Install(InstallArgs),

    /// Clone and prepare the Food Truck projects
    Setup(SetupArgs),

    /// Manage the Food Truck API project
    Api(ApiArgs),

    /// Generate and install shell completions
    Completion(CompletionArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Directory for the wrapper script (defaults to the project root)
    #[arg(long)]
    pub target_dir: Option<PathBuf>,

    /// Skip the editable package install
    #[arg(long)]
    pub skip_package: bool,
}

/// Which projects `setup` handles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SetupTarget {
    #[default]
    All,
    Api,
    Website,
}

/// Arguments for the `setup` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SetupArgs {
    /// Projects to set up
    #[arg(value_enum, default_value_t = SetupTarget::All)]
    pub target: SetupTarget,

    /// API repository URL
    #[arg(long)]
    pub api_repo: Option<String>,

    /// Website repository URL
    #[arg(long)]
    pub website_repo: Option<String>,

    /// Directory to clone into
    #[arg(long)]
    pub target_dir: Option<PathBuf>,

    /// Skip the API project
    #[arg(long)]
    pub skip_api: bool,

    /// Skip the website project
    #[arg(long)]
    pub skip_website: bool,
}

impl SetupArgs {
    pub fn wants_api(&self) -> bool {
        !self.skip_api && matches!(self.target, SetupTarget::All | SetupTarget::Api)
    }

    pub fn wants_website(&self) -> bool {
        !self.skip_website && matches!(self.target, SetupTarget::All | SetupTarget::Website)
    }
}

/// `api` actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ApiAction {
    /// Create the virtual environment and install dependencies
    Setup,
    /// Install dependencies
    Install,
    /// Start services with Docker Compose
    Start,
    /// Stop services
    Stop,
    /// Restart services
    Restart,
    /// Show service status
    Status,
    /// Show service logs
    Logs,
}

impl ApiAction {
    /// The action as typed on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ApiAction::Setup => "setup",
            ApiAction::Install => "install",
            ApiAction::Start => "start",
            ApiAction::Stop => "stop",
            ApiAction::Restart => "restart",
            ApiAction::Status => "status",
            ApiAction::Logs => "logs",
        }
    }
}

/// Arguments for the `api` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ApiArgs {
    #[arg(value_enum)]
    pub action: ApiAction,

    /// Rebuild images before starting
    #[arg(long)]
    pub build: bool,

    /// Follow log output
    #[arg(short, long)]
    pub follow: bool,

    /// Number of log lines to show
    #[arg(short = 'n', long, default_value_t = 50)]
    pub lines: usize,
}

/// `completion` actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompletionAction {
    /// Print the bash completion script
    Bash,
    /// Print the zsh completion script
    Zsh,
    /// Print the PowerShell completion script
    Powershell,
    /// Print the fish completion script
    Fish,
    /// Install completion for your shell
    Install,
    /// Remove and reinstall completion
    Refresh,
    /// Show the lines to add to your shell profile
    Manual,
}

/// Shells that completion scripts can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Powershell,
    Fish,
}

impl CompletionShell {
    pub fn name(self) -> &'static str {
        match self {
            CompletionShell::Bash => "bash",
            CompletionShell::Zsh => "zsh",
            CompletionShell::Powershell => "powershell",
            CompletionShell::Fish => "fish",
        }
    }
}

/// Arguments for the `completion` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionArgs {
    #[arg(value_enum)]
    pub action: CompletionAction,

    /// Shell to target (detected from $SHELL by default)
    #[arg(long, value_enum)]
    pub shell: Option<CompletionShell>,

    /// Write the script or instructions to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
