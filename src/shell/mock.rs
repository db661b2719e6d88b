//! Scripted [`CommandRunner`] for tests.

use super::command::{display_command, CommandOptions, CommandResult, CommandRunner};
use crate::error::{FoodtruckError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

/// A canned response for one command.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// The program ran and exited with `exit_code`.
    Output {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
    /// The program is not on PATH.
    NotFound,
    /// The program hung past its deadline.
    TimedOut,
}

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<std::path::PathBuf>,
    /// Deadline the caller asked for.
    pub timeout: Option<Duration>,
}

impl RecordedCall {
    /// The invocation as `program arg1 arg2`.
    pub fn command_line(&self) -> String {
        display_command(&self.program, &self.args)
    }
}

/// Runner that returns scripted responses and records every call.
///
/// Responses are matched on the full command line first, then on the
/// program name alone. Anything unscripted behaves as not installed.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: HashMap<String, MockResponse>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl MockRunner {
    /// Create a runner where every tool is missing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful run printing `stdout`.
    pub fn with_stdout(self, command: &str, stdout: &str) -> Self {
        self.with_response(
            command,
            MockResponse::Output {
                exit_code: 0,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        )
    }

    /// Script a successful run printing `stderr` only.
    pub fn with_stderr(self, command: &str, stderr: &str) -> Self {
        self.with_response(
            command,
            MockResponse::Output {
                exit_code: 0,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        )
    }

    /// Script a non-zero exit.
    pub fn with_failure(self, command: &str, exit_code: i32, stderr: &str) -> Self {
        self.with_response(
            command,
            MockResponse::Output {
                exit_code,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        )
    }

    /// Script an arbitrary response.
    pub fn with_response(mut self, command: &str, response: MockResponse) -> Self {
        self.responses.insert(command.to_string(), response);
        self
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Command lines of all calls made so far.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.command_line()).collect()
    }

    /// Whether `command` was run.
    pub fn was_called(&self, command: &str) -> bool {
        self.command_lines().iter().any(|c| c == command)
    }
}

impl CommandRunner for MockRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult> {
        let line = display_command(program, args);
        self.calls.borrow_mut().push(RecordedCall {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: options.cwd.clone(),
            timeout: options.timeout,
        });

        let response = self
            .responses
            .get(&line)
            .or_else(|| self.responses.get(program))
            .cloned()
            .unwrap_or(MockResponse::NotFound);

        match response {
            MockResponse::Output {
                exit_code: 0,
                stdout,
                stderr,
            } => Ok(CommandResult::success(stdout, stderr, Duration::ZERO)),
            MockResponse::Output {
                exit_code,
                stdout,
                stderr,
            } => Ok(CommandResult::failure(
                Some(exit_code),
                stdout,
                stderr,
                Duration::ZERO,
            )),
            MockResponse::NotFound => Err(FoodtruckError::ToolNotFound {
                tool: program.to_string(),
            }),
            MockResponse::TimedOut => Err(FoodtruckError::ToolTimedOut {
                tool: program.to_string(),
                timeout: options.timeout.unwrap_or_default(),
            }),
        }
    }
}
