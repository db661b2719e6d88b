//! Plain-text UI for CI and piped output.

use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI without styling or animation.
///
/// Success and status lines go to stdout; warnings and errors go to stderr
/// so that `foodtruck check --json | jq` stays parseable.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_details() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_details() {
            println!("  {}", message);
        }
        Box::new(LineSpinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_details() {
            println!("\n{}\n", title);
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_details() {
            println!("  {}", hint);
        }
    }

    fn show_command(&mut self, command: &str) {
        println!("    {}", command);
    }
}

/// Prints each spinner outcome as a single line.
struct LineSpinner;

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }
}
