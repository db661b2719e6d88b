//! Shell profile editing.
//!
//! Profiles are edited by appending small marked blocks:
//!
//! ```text
//! # Food Truck CLI
//! export PATH="/home/dev/foodtruck:$PATH"
//! ```
//!
//! Every operation re-reads the file, so running the installer twice never
//! duplicates a block.

use crate::error::{FoodtruckError, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::platform::ShellTarget;

/// Comment line that introduces the PATH block.
pub const PATH_MARKER: &str = "Food Truck CLI";

/// Edits one shell profile file.
#[derive(Debug, Clone)]
pub struct ShellProfileEditor {
    target: ShellTarget,
}

impl ShellProfileEditor {
    /// Create an editor for the given shell target.
    pub fn new(target: ShellTarget) -> Self {
        Self { target }
    }

    /// The shell target being edited.
    pub fn target(&self) -> &ShellTarget {
        &self.target
    }

    /// Path of the profile file.
    pub fn path(&self) -> &Path {
        &self.target.profile
    }

    /// Whether some line already puts `dir` on PATH.
    pub fn has_path_entry(&self, dir: &Path) -> Result<bool> {
        let content = self.read()?;
        let wanted = dir.to_string_lossy();
        Ok(content.lines().any(|line| exports_path_dir(line, &wanted)))
    }

    /// Append a PATH export for `dir` unless one is already present.
    ///
    /// Returns `true` if the profile was changed.
    pub fn ensure_path_entry(&self, dir: &Path) -> Result<bool> {
        let content = self.read()?;
        let wanted = dir.to_string_lossy();
        if content.lines().any(|line| exports_path_dir(line, &wanted)) {
            tracing::debug!(
                "{} already exports {}",
                self.path().display(),
                dir.display()
            );
            return Ok(false);
        }

        self.append_block(&content, PATH_MARKER, &[self.target.export_line(dir)])?;
        Ok(true)
    }

    /// Append `# <marker>` followed by `lines` unless the marker is present.
    ///
    /// Returns `true` if the profile was changed.
    pub fn ensure_block(&self, marker: &str, lines: &[String]) -> Result<bool> {
        let content = self.read()?;
        if has_marker(&content, marker) {
            return Ok(false);
        }
        self.append_block(&content, marker, lines)?;
        Ok(true)
    }

    /// Remove a block previously added with [`ensure_block`](Self::ensure_block).
    ///
    /// The marker line, the non-blank lines right after it, and one blank
    /// separator line before it are removed. Returns `true` if anything was
    /// removed.
    pub fn remove_block(&self, marker: &str) -> Result<bool> {
        let content = self.read()?;
        if !has_marker(&content, marker) {
            return Ok(false);
        }

        let marker_line = format!("# {}", marker);
        let mut kept: Vec<&str> = Vec::new();
        let mut skipping = false;

        for line in content.lines() {
            if line.trim() == marker_line {
                if kept.last().is_some_and(|l| l.trim().is_empty()) {
                    kept.pop();
                }
                skipping = true;
                continue;
            }
            if skipping {
                if line.trim().is_empty() {
                    skipping = false;
                } else {
                    continue;
                }
            }
            kept.push(line);
        }

        let mut updated = kept.join("\n");
        if !updated.is_empty() && content.ends_with('\n') {
            updated.push('\n');
        }

        fs::write(self.path(), updated).map_err(|e| self.write_error(e))?;
        Ok(true)
    }

    /// Read the profile. A missing file reads as empty; invalid UTF-8 is
    /// decoded lossily.
    fn read(&self) -> Result<String> {
        match fs::read(self.path()) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(self.write_error(e)),
        }
    }

    fn append_block(&self, existing: &str, marker: &str, lines: &[String]) -> Result<()> {
        let separator = if existing.is_empty() {
            ""
        } else if existing.ends_with('\n') {
            "\n"
        } else {
            "\n\n"
        };

        let mut block = format!("{}# {}\n", separator, marker);
        for line in lines {
            block.push_str(line);
            block.push('\n');
        }

        if let Some(parent) = self.path().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path())
            .map_err(|e| self.write_error(e))?;
        file.write_all(block.as_bytes())
            .map_err(|e| self.write_error(e))?;

        tracing::info!("Added '{}' block to {}", marker, self.path().display());
        Ok(())
    }

    fn write_error(&self, err: std::io::Error) -> FoodtruckError {
        FoodtruckError::ProfileWriteFailed {
            path: self.path().to_path_buf(),
            message: err.to_string(),
        }
    }
}

fn has_marker(content: &str, marker: &str) -> bool {
    let marker_line = format!("# {}", marker);
    content.lines().any(|line| line.trim() == marker_line)
}

/// Whether `line` is an uncommented PATH assignment that includes `dir`.
///
/// `dir` must appear as a whole segment: `/opt/ft` does not match
/// `/opt/ft2:$PATH`. A trailing separator on either side is ignored.
pub fn exports_path_dir(line: &str, dir: &str) -> bool {
    let line = line.trim();
    if line.starts_with('#') {
        return false;
    }

    let assigns_path = ["export PATH=", "PATH=", "$env:PATH", "set PATH=", "fish_add_path"]
        .iter()
        .any(|prefix| line.starts_with(prefix))
        || line.starts_with("set -gx PATH");
    if !assigns_path {
        return false;
    }

    let dir = dir.trim_end_matches(['/', '\\']);
    if dir.is_empty() {
        return false;
    }

    let is_boundary =
        |c: Option<char>| c.map_or(true, |c| matches!(c, '"' | '\'' | ' ' | '=' | ':' | ';'));

    line.match_indices(dir).any(|(idx, _)| {
        let before = line[..idx].chars().next_back();
        let mut after = line[idx + dir.len()..].chars();
        let mut next = after.next();
        if matches!(next, Some('/') | Some('\\')) {
            next = after.next();
        }
        is_boundary(before) && is_boundary(next)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::platform::ShellType;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn editor_in(temp: &TempDir, shell: ShellType, file: &str) -> ShellProfileEditor {
        ShellProfileEditor::new(ShellTarget {
            shell,
            profile: temp.path().join(file),
        })
    }

    fn export_count(content: &str, dir: &str) -> usize {
        content
            .lines()
            .filter(|line| exports_path_dir(line, dir))
            .count()
    }

    #[test]
    fn ensure_path_entry_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let editor = editor_in(&temp, ShellType::Zsh, ".zshrc");
        let dir = PathBuf::from("/home/dev/foodtruck");

        assert!(editor.ensure_path_entry(&dir).unwrap());
        assert!(!editor.ensure_path_entry(&dir).unwrap());

        let content = fs::read_to_string(editor.path()).unwrap();
        assert_eq!(export_count(&content, "/home/dev/foodtruck"), 1);
        assert_eq!(content.matches("# Food Truck CLI").count(), 1);
    }

    #[test]
    fn empty_profile_gets_exactly_one_block() {
        let temp = TempDir::new().unwrap();
        let editor = editor_in(&temp, ShellType::Bash, ".bashrc");
        fs::write(editor.path(), "").unwrap();

        editor.ensure_path_entry(Path::new("/opt/ft")).unwrap();

        let content = fs::read_to_string(editor.path()).unwrap();
        assert_eq!(content, "# Food Truck CLI\nexport PATH=\"/opt/ft:$PATH\"\n");
    }

    #[test]
    fn missing_profile_is_created_with_parents() {
        let temp = TempDir::new().unwrap();
        let editor = editor_in(&temp, ShellType::PowerShell, "Documents/WindowsPowerShell/p.ps1");

        assert!(editor.ensure_path_entry(Path::new("C:\\tools\\ft")).unwrap());

        let content = fs::read_to_string(editor.path()).unwrap();
        assert!(content.contains("$env:PATH = \"C:\\tools\\ft;\" + $env:PATH"));
    }

    #[test]
    fn appends_after_existing_content_with_blank_separator() {
        let temp = TempDir::new().unwrap();
        let editor = editor_in(&temp, ShellType::Bash, ".bashrc");
        fs::write(editor.path(), "alias ll='ls -l'").unwrap();

        editor.ensure_path_entry(Path::new("/opt/ft")).unwrap();

        let content = fs::read_to_string(editor.path()).unwrap();
        assert!(content.starts_with("alias ll='ls -l'\n\n# Food Truck CLI\n"));
    }

    #[test]
    fn existing_manual_export_is_respected() {
        let temp = TempDir::new().unwrap();
        let editor = editor_in(&temp, ShellType::Bash, ".bashrc");
        fs::write(editor.path(), "export PATH=$PATH:/opt/ft/\n").unwrap();

        assert!(!editor.ensure_path_entry(Path::new("/opt/ft")).unwrap());
    }

    #[test]
    fn commented_export_does_not_count() {
        let temp = TempDir::new().unwrap();
        let editor = editor_in(&temp, ShellType::Bash, ".bashrc");
        fs::write(editor.path(), "# export PATH=\"/opt/ft:$PATH\"\n").unwrap();

        assert!(editor.ensure_path_entry(Path::new("/opt/ft")).unwrap());
    }

    #[test]
    fn non_utf8_profile_is_read_lossily() {
        let temp = TempDir::new().unwrap();
        let editor = editor_in(&temp, ShellType::Bash, ".bashrc");
        fs::write(editor.path(), b"# caf\xe9\nexport PATH=\"/opt/ft:$PATH\"\n").unwrap();

        assert!(!editor.ensure_path_entry(Path::new("/opt/ft")).unwrap());
    }

    #[test]
    fn prefix_directory_is_not_a_match() {
        assert!(!exports_path_dir("export PATH=\"/opt/ft2:$PATH\"", "/opt/ft"));
        assert!(exports_path_dir("export PATH=\"/opt/ft:$PATH\"", "/opt/ft"));
        assert!(exports_path_dir("PATH=/usr/bin:/opt/ft", "/opt/ft"));
        assert!(!exports_path_dir("echo /opt/ft", "/opt/ft"));
    }

    #[test]
    fn windows_path_entry_matches() {
        let line = "$env:PATH = \"C:\\Users\\dev\\ft;\" + $env:PATH";
        assert!(exports_path_dir(line, "C:\\Users\\dev\\ft"));
    }

    #[test]
    fn ensure_and_remove_block_round_trip() {
        let temp = TempDir::new().unwrap();
        let editor = editor_in(&temp, ShellType::Zsh, ".zshrc");
        fs::write(editor.path(), "setopt autocd\n").unwrap();

        let lines = vec!["source \"/data/foodtruck.zsh\"".to_string()];
        assert!(editor.ensure_block("Food Truck CLI completion", &lines).unwrap());
        assert!(!editor.ensure_block("Food Truck CLI completion", &lines).unwrap());

        assert!(editor.remove_block("Food Truck CLI completion").unwrap());
        let content = fs::read_to_string(editor.path()).unwrap();
        assert_eq!(content, "setopt autocd\n");
        assert!(!editor.remove_block("Food Truck CLI completion").unwrap());
    }

    #[test]
    fn remove_block_keeps_following_sections() {
        let temp = TempDir::new().unwrap();
        let editor = editor_in(&temp, ShellType::Bash, ".bashrc");
        fs::write(
            editor.path(),
            "a\n\n# Food Truck CLI completion\nsource x\n\n# other\nb\n",
        )
        .unwrap();

        editor.remove_block("Food Truck CLI completion").unwrap();
        let content = fs::read_to_string(editor.path()).unwrap();
        assert_eq!(content, "a\n\n# other\nb\n");
    }

    #[test]
    fn remove_block_leaves_path_block_alone() {
        let temp = TempDir::new().unwrap();
        let editor = editor_in(&temp, ShellType::Bash, ".bashrc");
        editor.ensure_path_entry(Path::new("/opt/ft")).unwrap();

        assert!(!editor.remove_block("Food Truck CLI completion").unwrap());
        assert!(editor.has_path_entry(Path::new("/opt/ft")).unwrap());
    }
}
