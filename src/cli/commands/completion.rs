//! `foodtruck completion` command.
//!
//! Scripts come from clap_complete. `install` writes the script to a
//! per-user data directory and sources it from the shell profile inside a
//! marked block, so `refresh` can find and replace it later. Fish loads
//! anything in its completions directory, so its profile is never touched.

use std::fs;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, CompletionAction, CompletionArgs, CompletionShell};
use crate::error::{FoodtruckError, Result};
use crate::shell::{EnvProvider, ShellProfileEditor, ShellTarget, ShellType};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// Marker of the profile block that sources the completion script.
pub const COMPLETION_MARKER: &str = "Food Truck CLI completion";

const BIN_NAME: &str = "foodtruck";

const ALREADY_INSTALLED: &str =
    "completion is already installed; use 'foodtruck completion refresh' to reinstall";

/// Render the completion script for `shell`.
pub fn generate_script(shell: CompletionShell) -> String {
    let generator = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Powershell => Shell::PowerShell,
        CompletionShell::Fish => Shell::Fish,
    };
    let mut buf = Vec::new();
    clap_complete::generate(generator, &mut Cli::command(), BIN_NAME, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Where `install` puts the script for `shell`.
pub fn default_script_path(shell: CompletionShell, env: &dyn EnvProvider) -> Result<PathBuf> {
    let missing = || FoodtruckError::Other(anyhow::anyhow!("Could not determine home directory"));

    if shell == CompletionShell::Fish {
        let home = env.home_dir().ok_or_else(missing)?;
        return Ok(home
            .join(".config")
            .join("fish")
            .join("completions")
            .join(format!("{}.fish", BIN_NAME)));
    }

    let ext = match shell {
        CompletionShell::Bash => "bash",
        CompletionShell::Zsh => "zsh",
        _ => "ps1",
    };
    let data = env.data_dir().ok_or_else(missing)?;
    Ok(data
        .join(BIN_NAME)
        .join("completions")
        .join(format!("{}.{}", BIN_NAME, ext)))
}

/// Profile lines that load the script at `path`. Empty for fish.
pub fn profile_lines(shell: CompletionShell, path: &Path) -> Vec<String> {
    match shell {
        CompletionShell::Bash | CompletionShell::Zsh => {
            vec![format!("source \"{}\"", path.display())]
        }
        CompletionShell::Powershell => vec![format!(". \"{}\"", path.display())],
        CompletionShell::Fish => Vec::new(),
    }
}

fn shell_type(shell: CompletionShell) -> ShellType {
    match shell {
        CompletionShell::Bash => ShellType::Bash,
        CompletionShell::Zsh => ShellType::Zsh,
        CompletionShell::Powershell => ShellType::PowerShell,
        CompletionShell::Fish => ShellType::Fish,
    }
}

/// The completion command implementation.
pub struct CompletionCommand<'a> {
    ctx: &'a CommandContext<'a>,
    args: CompletionArgs,
}

impl<'a> CompletionCommand<'a> {
    pub fn new(ctx: &'a CommandContext<'a>, args: CompletionArgs) -> Self {
        Self { ctx, args }
    }

    /// `--shell`, or the shell `SHELL` points at.
    pub fn resolve_shell(&self) -> Result<CompletionShell> {
        if let Some(shell) = self.args.shell {
            return Ok(shell);
        }
        match ShellType::detect(self.ctx.env) {
            ShellType::Bash => Ok(CompletionShell::Bash),
            ShellType::Zsh => Ok(CompletionShell::Zsh),
            ShellType::PowerShell => Ok(CompletionShell::Powershell),
            ShellType::Fish => Ok(CompletionShell::Fish),
            other => Err(FoodtruckError::UnsupportedShell {
                shell: other.name().to_string(),
            }),
        }
    }

    fn script_path(&self, shell: CompletionShell) -> Result<PathBuf> {
        match &self.args.output {
            Some(path) => Ok(self.ctx.resolve(path)),
            None => default_script_path(shell, self.ctx.env),
        }
    }

    fn print_script(&self, ui: &mut dyn UserInterface, shell: CompletionShell) -> Result<()> {
        let script = generate_script(shell);
        match &self.args.output {
            Some(path) => {
                let path = self.ctx.resolve(path);
                write_file(&path, &script)?;
                ui.success(&format!("Wrote {} completion to {}", shell.name(), path.display()));
            }
            None => print!("{}", script),
        }
        Ok(())
    }

    /// Write the script and hook it into the profile.
    pub fn install(
        &self,
        ui: &mut dyn UserInterface,
        shell: CompletionShell,
    ) -> Result<CommandResult> {
        let path = self.script_path(shell)?;
        let script = generate_script(shell);
        let unchanged = fs::read_to_string(&path).is_ok_and(|existing| existing == script);
        if !unchanged {
            write_file(&path, &script)?;
        }

        if shell == CompletionShell::Fish {
            if unchanged {
                ui.message(&format!("fish {}", ALREADY_INSTALLED));
            } else {
                ui.success(&format!("Installed fish completion to {}", path.display()));
            }
            return Ok(CommandResult::success());
        }

        let lines = profile_lines(shell, &path);
        let target = ShellTarget::for_shell(shell_type(shell), self.ctx.env)?;
        let editor = ShellProfileEditor::new(target.clone());
        let added = match editor.ensure_block(COMPLETION_MARKER, &lines) {
            Ok(added) => added,
            Err(e) => {
                ui.error(&e.to_string());
                ui.message("Add these lines to your shell profile:");
                for line in &lines {
                    ui.show_command(line);
                }
                return Ok(CommandResult::failure(1));
            }
        };

        if unchanged && !added {
            ui.message(&format!("{} {}", shell.name(), ALREADY_INSTALLED));
            return Ok(CommandResult::success());
        }

        ui.success(&format!(
            "Installed {} completion to {}",
            shell.name(),
            path.display()
        ));
        if added {
            ui.success(&format!("Configured {}", target.profile.display()));
        }
        ui.show_hint(&format!("Restart your shell or run: {}", target.reload_hint()));
        Ok(CommandResult::success())
    }

    fn refresh(&self, ui: &mut dyn UserInterface, shell: CompletionShell) -> Result<CommandResult> {
        if shell != CompletionShell::Fish {
            let target = ShellTarget::for_shell(shell_type(shell), self.ctx.env)?;
            if ShellProfileEditor::new(target).remove_block(COMPLETION_MARKER)? {
                tracing::debug!("Removed old completion block");
            }
        }

        let path = self.script_path(shell)?;
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        self.install(ui, shell)
    }

    fn manual(&self, ui: &mut dyn UserInterface, shell: CompletionShell) -> Result<CommandResult> {
        let path = default_script_path(shell, self.ctx.env)?;
        let mut instructions = vec![format!(
            "foodtruck completion {} > \"{}\"",
            shell.name(),
            path.display()
        )];
        instructions.extend(profile_lines(shell, &path));

        ui.message(&format!("To enable {} completion manually, run:", shell.name()));
        for line in &instructions {
            ui.show_command(line);
        }

        if let Some(output) = &self.args.output {
            let output = self.ctx.resolve(output);
            write_file(&output, &format!("{}\n", instructions.join("\n")))?;
            ui.success(&format!("Saved instructions to {}", output.display()));
        }
        Ok(CommandResult::success())
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

impl Command for CompletionCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let explicit = match self.args.action {
            CompletionAction::Bash => Some(CompletionShell::Bash),
            CompletionAction::Zsh => Some(CompletionShell::Zsh),
            CompletionAction::Powershell => Some(CompletionShell::Powershell),
            CompletionAction::Fish => Some(CompletionShell::Fish),
            _ => None,
        };
        if let Some(shell) = explicit {
            self.print_script(ui, shell)?;
            return Ok(CommandResult::success());
        }

        let shell = match self.resolve_shell() {
            Ok(shell) => shell,
            Err(e) => {
                ui.show_hint("Pass --shell bash|zsh|powershell|fish to choose one");
                return Err(e);
            }
        };

        match self.args.action {
            CompletionAction::Install => self.install(ui, shell),
            CompletionAction::Refresh => self.refresh(ui, shell),
            _ => self.manual(ui, shell),
        }
    }
}
