//! Wrapper script generation.
//!
//! The wrapper is a tiny executable placed on PATH that forwards every
//! argument to the real entry command.

use crate::error::{FoodtruckError, Result};
use crate::shell::Platform;
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder in the entry command replaced by the project root.
pub const PROJECT_PLACEHOLDER: &str = "{project}";

/// Comment line identifying generated wrappers.
const WRAPPER_NOTE: &str = "Food Truck CLI wrapper, generated by 'foodtruck install'";

/// What writing the wrapper did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperOutcome {
    Created,
    Updated,
    Unchanged,
}

/// A wrapper script ready to be written.
#[derive(Debug, Clone)]
pub struct WrapperScript {
    path: PathBuf,
    content: String,
}

impl WrapperScript {
    /// Render the wrapper for `entry_command` into `target_dir`.
    pub fn new(
        target_dir: &Path,
        project_root: &Path,
        entry_command: &[String],
        platform: Platform,
    ) -> Self {
        let project = project_root.to_string_lossy();
        let args: Vec<String> = entry_command
            .iter()
            .map(|arg| arg.replace(PROJECT_PLACEHOLDER, &project))
            .collect();

        if platform.is_windows() {
            let command: Vec<String> = args.iter().map(|a| batch_quote(a)).collect();
            Self {
                path: target_dir.join("foodtruck.bat"),
                content: format!(
                    "@echo off\r\nrem {}\r\n{} %*\r\n",
                    WRAPPER_NOTE,
                    command.join(" ")
                ),
            }
        } else {
            let command: Vec<String> = args.iter().map(|a| sh_quote(a)).collect();
            Self {
                path: target_dir.join("foodtruck"),
                content: format!(
                    "#!/bin/sh\n# {}\nexec {} \"$@\"\n",
                    WRAPPER_NOTE,
                    command.join(" ")
                ),
            }
        }
    }

    /// Where the wrapper goes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Script text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the wrapper, leaving an identical existing file untouched.
    pub fn write(&self) -> Result<WrapperOutcome> {
        let outcome = match fs::read(&self.path) {
            Ok(existing) if existing == self.content.as_bytes() => WrapperOutcome::Unchanged,
            Ok(_) => WrapperOutcome::Updated,
            Err(_) => WrapperOutcome::Created,
        };

        if outcome != WrapperOutcome::Unchanged {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
            }
            fs::write(&self.path, &self.content).map_err(|e| self.write_error(e))?;
        }

        self.make_executable()?;
        tracing::debug!("Wrapper {}: {:?}", self.path.display(), outcome);
        Ok(outcome)
    }

    #[cfg(unix)]
    fn make_executable(&self) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&self.path, fs::Permissions::from_mode(0o755))
            .map_err(|e| self.write_error(e))
    }

    #[cfg(not(unix))]
    fn make_executable(&self) -> Result<()> {
        Ok(())
    }

    fn write_error(&self, err: std::io::Error) -> FoodtruckError {
        FoodtruckError::WrapperWriteFailed {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}

fn sh_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:=@+,".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}

fn batch_quote(arg: &str) -> String {
    if arg.is_empty() || arg.contains([' ', '&', '(', ')', '^', '|', '<', '>']) {
        format!("\"{}\"", arg)
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry() -> Vec<String> {
        ["uv", "run", "--project", "{project}", "foodtruck"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn unix_wrapper_forwards_arguments() {
        let script = WrapperScript::new(
            Path::new("/opt/bin"),
            Path::new("/home/dev/foodtruck"),
            &entry(),
            Platform::Linux,
        );
        assert_eq!(script.path(), Path::new("/opt/bin/foodtruck"));
        assert_eq!(
            script.content(),
            "#!/bin/sh\n\
             # Food Truck CLI wrapper, generated by 'foodtruck install'\n\
             exec uv run --project /home/dev/foodtruck foodtruck \"$@\"\n"
        );
    }

    #[test]
    fn paths_with_spaces_are_quoted() {
        let script = WrapperScript::new(
            Path::new("/opt/bin"),
            Path::new("/home/dev/my projects/ft"),
            &entry(),
            Platform::MacOS,
        );
        assert!(script.content().contains("'/home/dev/my projects/ft'"));
    }

    #[test]
    fn windows_wrapper_is_batch_file() {
        let script = WrapperScript::new(
            Path::new("C:\\tools"),
            Path::new("C:\\Users\\dev\\ft"),
            &entry(),
            Platform::Windows,
        );
        assert!(script.path().ends_with("foodtruck.bat"));
        assert!(script.content().starts_with(
            "@echo off\r\nrem Food Truck CLI wrapper, generated by 'foodtruck install'\r\n"
        ));
        assert!(script.content().ends_with("foodtruck %*\r\n"));
    }

    #[test]
    fn write_reports_created_unchanged_updated() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("project");
        let bin = temp.path().join("bin");

        let script = WrapperScript::new(&bin, &project, &entry(), Platform::Linux);
        assert_eq!(script.write().unwrap(), WrapperOutcome::Created);
        assert_eq!(script.write().unwrap(), WrapperOutcome::Unchanged);

        fs::write(script.path(), "#!/bin/sh\necho stale\n").unwrap();
        assert_eq!(script.write().unwrap(), WrapperOutcome::Updated);
        assert_eq!(fs::read_to_string(script.path()).unwrap(), script.content());
    }

    #[cfg(unix)]
    #[test]
    fn written_wrapper_is_executable() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let script = WrapperScript::new(temp.path(), temp.path(), &entry(), Platform::Linux);
        script.write().unwrap();
        let mode = fs::metadata(script.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn unwritable_target_is_wrapper_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let script =
            WrapperScript::new(&blocker.join("bin"), temp.path(), &entry(), Platform::Linux);
        let err = script.write().unwrap_err();
        assert!(matches!(err, FoodtruckError::WrapperWriteFailed { .. }));
    }

    #[test]
    fn quoting_rules() {
        assert_eq!(sh_quote("plain-arg"), "plain-arg");
        assert_eq!(sh_quote("it's"), "'it'\\''s'");
        assert_eq!(sh_quote(""), "''");
        assert_eq!(batch_quote("C:\\Program Files\\uv"), "\"C:\\Program Files\\uv\"");
    }
}
