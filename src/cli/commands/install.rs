//! `foodtruck install` command.

use crate::cli::args::InstallArgs;
use crate::error::Result;
use crate::installer::{
    InstallOptions, InstallReport, Installer, PackageOutcome, ProfileOutcome, WrapperOutcome,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The install command implementation.
pub struct InstallCommand<'a> {
    ctx: &'a CommandContext<'a>,
    args: InstallArgs,
}

impl<'a> InstallCommand<'a> {
    pub fn new(ctx: &'a CommandContext<'a>, args: InstallArgs) -> Self {
        Self { ctx, args }
    }

    fn options(&self) -> InstallOptions {
        let config = &self.ctx.config.install;
        let mut options = InstallOptions::from_config(&self.ctx.project_root, config)
            .skip_package(self.args.skip_package);
        if let Some(dir) = &self.args.target_dir {
            options = options.with_target_dir(self.ctx.resolve(dir));
        }
        options
    }

    fn report(ui: &mut dyn UserInterface, report: &InstallReport) {
        let path = report.wrapper_path.display();
        match report.wrapper {
            WrapperOutcome::Created => ui.success(&format!("Created {}", path)),
            WrapperOutcome::Updated => ui.success(&format!("Updated {}", path)),
            WrapperOutcome::Unchanged => ui.message(&format!("{} is up to date", path)),
        }

        match &report.profile {
            ProfileOutcome::Added {
                profile,
                reload_hint,
            } => {
                ui.success(&format!("Added to PATH in {}", profile.display()));
                ui.show_hint(&format!("Restart your shell or run: {}", reload_hint));
            }
            ProfileOutcome::AlreadyPresent { profile } => {
                ui.message(&format!("Already on PATH in {}", profile.display()));
            }
            ProfileOutcome::Failed { error, manual_line } => {
                ui.warning(&format!("Could not update your shell profile: {}", error));
                ui.message("Add this line to your shell profile:");
                ui.show_command(manual_line);
            }
        }

        match &report.package {
            PackageOutcome::Installed => ui.success("Installed the foodtruck package"),
            PackageOutcome::Skipped => {}
            PackageOutcome::Failed {
                error,
                manual_command,
            } => {
                ui.warning(error);
                ui.message("Install it manually with:");
                ui.show_command(manual_command);
            }
        }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header("Installing foodtruck");

        let installer = Installer::new(self.ctx.runner, self.ctx.env, self.options());
        let mut spinner = ui.start_spinner("Installing...");
        let report = match installer.install() {
            Ok(report) => {
                spinner.finish_success("Install steps finished");
                report
            }
            Err(e) => {
                spinner.finish_error("Install failed");
                return Err(e);
            }
        };

        Self::report(ui, &report);

        ui.message("");
        if report.has_warnings() {
            ui.warning("Installed with warnings; see above for manual steps");
        } else {
            ui.success("foodtruck is installed");
        }
        Ok(CommandResult::success())
    }
}
