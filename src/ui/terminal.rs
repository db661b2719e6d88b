//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use super::{
    should_use_colors, FoodtruckTheme, NonInteractiveUI, OutputMode, ProgressSpinner,
    SpinnerHandle, UserInterface,
};

/// Styled output for a real terminal.
///
/// Status goes to stdout; warnings and errors go to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: FoodtruckTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            FoodtruckTheme::new()
        } else {
            FoodtruckTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_details() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::new(message))
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_details() {
            writeln!(self.out, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_details() {
            writeln!(self.out, "  {}", self.theme.hint.apply_to(hint)).ok();
        }
    }

    fn show_command(&mut self, command: &str) {
        writeln!(self.out, "    {}", self.theme.command.apply_to(command)).ok();
    }
}

/// Create the appropriate UI for the current process.
///
/// Falls back to [`NonInteractiveUI`] when stdout is not a terminal or a CI
/// environment is detected.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    if Term::stdout().is_term() && !crate::shell::is_ci() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
