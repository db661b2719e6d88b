//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI and piped output
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use foodtruck::ui::{NonInteractiveUI, OutputMode, UserInterface};
//!
//! let mut ui = NonInteractiveUI::new(OutputMode::Quiet);
//! ui.show_header("Checking Dependencies");
//! ui.success("Git 2.43.0");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerOutcome};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, FoodtruckTheme};

/// Trait for user interface interactions.
///
/// Commands only talk to the user through this trait so tests can swap in
/// [`MockUI`].
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a plain message. Hidden in quiet mode.
    fn message(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every output mode.
    fn error(&mut self, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner. Hidden in quiet mode.
    fn show_header(&mut self, title: &str);

    /// Show a follow-up hint such as a reload command. Hidden in quiet mode.
    fn show_hint(&mut self, hint: &str);

    /// Show a command the user may run by hand.
    fn show_command(&mut self, command: &str);
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    fn finish_success(&mut self, msg: &str);

    fn finish_error(&mut self, msg: &str);
}
