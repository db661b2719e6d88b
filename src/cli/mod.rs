//! Command-line interface for foodtruck.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    ApiAction, ApiArgs, CheckArgs, Cli, Commands, CompletionAction, CompletionArgs,
    CompletionShell, InstallArgs, SetupArgs, SetupTarget,
};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
