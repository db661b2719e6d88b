//! Running one external tool behind a spinner.

use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::shell::{display_command, CommandOptions, CommandResult, CommandRunner};
use crate::ui::UserInterface;

/// One tool invocation shown to the user as a single progress line.
pub struct ToolStep<'a> {
    pub label: &'a str,
    pub program: &'a str,
    pub args: Vec<String>,
    pub cwd: Option<&'a Path>,
    pub timeout: Duration,
}

impl<'a> ToolStep<'a> {
    pub fn new(label: &'a str, program: &'a str, args: &[&str], timeout: Duration) -> Self {
        Self {
            label,
            program,
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: None,
            timeout,
        }
    }

    pub fn in_dir(mut self, cwd: &'a Path) -> Self {
        self.cwd = Some(cwd);
        self
    }

    pub fn command_line(&self) -> String {
        display_command(self.program, &self.args)
    }

    /// Run the tool, finishing the spinner with the outcome.
    ///
    /// In verbose mode the tool writes straight to the terminal. A non-zero
    /// exit is `CommandFailed`; a missing tool or a timeout comes back from
    /// the runner as is.
    pub fn run(
        &self,
        ui: &mut dyn UserInterface,
        runner: &dyn CommandRunner,
    ) -> Result<CommandResult> {
        let mut options = CommandOptions::captured(self.timeout);
        if ui.output_mode().shows_command_output() {
            options.capture_stdout = false;
            options.capture_stderr = false;
        }
        if let Some(cwd) = self.cwd {
            options = options.in_dir(cwd);
        }

        let mut spinner = ui.start_spinner(&format!("{}...", self.label));

        let outcome = runner
            .run(self.program, &self.args, &options)
            .and_then(|result| result.into_checked(self.program));

        match &outcome {
            Ok(_) => spinner.finish_success(self.label),
            Err(e) => {
                tracing::warn!("{} failed: {}", self.command_line(), e);
                spinner.finish_error(&format!("{}: {}", self.label, e));
            }
        }
        outcome
    }
}
