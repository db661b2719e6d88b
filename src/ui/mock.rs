//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use foodtruck::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.success("Git 2.43.0");
//! ui.error("UV: not found on PATH");
//!
//! assert!(ui.has_success("Git"));
//! assert!(ui.has_error("UV"));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Captures UI interactions.
///
/// Like the real UIs, a quiet `MockUI` drops plain messages, headers and
/// hints.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    hints: Vec<String>,
    commands: Vec<String>,
    spinners: Vec<String>,
    spinner_outcomes: Rc<RefCell<Vec<SpinnerOutcome>>>,
}

/// How a mock spinner was finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinnerOutcome {
    Success(String),
    Error(String),
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Messages spinners were started with.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// How each spinner finished, in order.
    pub fn spinner_outcomes(&self) -> Vec<SpinnerOutcome> {
        self.spinner_outcomes.borrow().clone()
    }

    pub fn has_success(&self, needle: &str) -> bool {
        self.successes.iter().any(|m| m.contains(needle))
    }

    pub fn has_warning(&self, needle: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(needle))
    }

    pub fn has_error(&self, needle: &str) -> bool {
        self.errors.iter().any(|m| m.contains(needle))
    }

    pub fn has_message(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_details() {
            self.messages.push(msg.to_string());
        }
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            outcomes: Rc::clone(&self.spinner_outcomes),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_details() {
            self.headers.push(title.to_string());
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_details() {
            self.hints.push(hint.to_string());
        }
    }

    fn show_command(&mut self, command: &str) {
        self.commands.push(command.to_string());
    }
}

/// Spinner that records how it finished into its parent [`MockUI`].
#[derive(Debug)]
pub struct MockSpinner {
    outcomes: Rc<RefCell<Vec<SpinnerOutcome>>>,
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.outcomes
            .borrow_mut()
            .push(SpinnerOutcome::Success(msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.outcomes
            .borrow_mut()
            .push(SpinnerOutcome::Error(msg.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_each_channel() {
        let mut ui = MockUI::new();
        ui.message("plain");
        ui.success("ok");
        ui.warning("careful");
        ui.error("broken");
        ui.show_header("Checking Dependencies");
        ui.show_hint("source ~/.zshrc");
        ui.show_command("uv pip install -e .");

        assert_eq!(ui.messages(), ["plain"]);
        assert_eq!(ui.successes(), ["ok"]);
        assert_eq!(ui.warnings(), ["careful"]);
        assert_eq!(ui.errors(), ["broken"]);
        assert_eq!(ui.headers(), ["Checking Dependencies"]);
        assert_eq!(ui.hints(), ["source ~/.zshrc"]);
        assert_eq!(ui.commands(), ["uv pip install -e ."]);
    }

    #[test]
    fn quiet_mode_keeps_only_outcomes() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        ui.show_header("Checking Dependencies");
        ui.message("Target directory: /work");
        ui.show_hint("Git: https://git-scm.com/downloads");
        ui.success("Git 2.43.0");
        ui.warning("Docker Daemon: not running (optional)");
        ui.error("Missing required dependencies: UV");
        ui.show_command("export PATH=\"/opt/foodtruck:$PATH\"");

        assert!(ui.headers().is_empty());
        assert!(ui.messages().is_empty());
        assert!(ui.hints().is_empty());
        assert_eq!(ui.successes(), ["Git 2.43.0"]);
        assert_eq!(ui.warnings().len(), 1);
        assert_eq!(ui.errors().len(), 1);
        assert_eq!(ui.commands().len(), 1);
    }

    #[test]
    fn spinner_outcomes_are_recorded() {
        let mut ui = MockUI::new();
        let mut first = ui.start_spinner("Cloning foodtruck-api...");
        first.finish_success("Cloned foodtruck-api");
        let mut second = ui.start_spinner("Cloning foodtruck-website...");
        second.finish_error("git clone failed");

        assert_eq!(ui.spinners().len(), 2);
        assert_eq!(
            ui.spinner_outcomes(),
            [
                SpinnerOutcome::Success("Cloned foodtruck-api".into()),
                SpinnerOutcome::Error("git clone failed".into()),
            ]
        );
    }
}
