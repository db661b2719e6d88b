//! Subprocess execution, platform detection and shell profile editing.

pub mod command;
pub mod mock;
pub mod platform;
pub mod profile;

pub use command::{display_command, CommandOptions, CommandResult, CommandRunner, SystemRunner};
pub use mock::{MockResponse, MockRunner, RecordedCall};
pub use platform::{
    export_line, is_ci, EnvProvider, FixedEnv, Platform, ShellTarget, ShellType, SystemEnv,
};
pub use profile::{exports_path_dir, ShellProfileEditor, PATH_MARKER};
