//! Visual theme and styling.

use console::Style;

/// Colors and icons for terminal output.
#[derive(Debug, Clone)]
pub struct FoodtruckTheme {
    /// Green.
    pub success: Style,
    /// Orange.
    pub warning: Style,
    /// Red bold.
    pub error: Style,
    pub highlight: Style,
    pub header: Style,
    /// Commands the user may copy (dim italic).
    pub command: Style,
    pub hint: Style,
}

impl Default for FoodtruckTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl FoodtruckTheme {
    /// The colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            command: Style::new().dim().italic(),
            hint: Style::new().cyan().dim(),
        }
    }

    /// A theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            command: Style::new(),
            hint: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Header banner with the truck icon.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("🚚"),
            self.highlight.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
