//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Everything, including streamed tool output.
    Verbose,
    /// Progress and status.
    #[default]
    Normal,
    /// Outcome lines, warnings and errors. No headers, notes or hints.
    Quiet,
}

impl OutputMode {
    /// Pick the mode from the global `--verbose`/`--quiet` flags.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// Whether subprocess output is shown as it happens.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether headers, plain messages, hints and spinner start lines are
    /// shown.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}
