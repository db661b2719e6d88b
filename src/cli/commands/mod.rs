//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! configuration once and hands every command a [`CommandContext`] holding
//! the project root, the config, the subprocess runner and the environment.
//! Tests build the context by hand with `MockRunner` and `FixedEnv`.

pub mod api;
pub mod check;
pub mod completion;
pub mod dispatcher;
pub mod install;
pub mod setup;
pub mod step;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
