//! `foodtruck check` command.
//!
//! Probes the toolchain and prints one line per dependency. Exits non-zero
//! when any required dependency is missing or too old.

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::requirements::{
    builtin_specs, CheckEntry, CheckReport, DependencyChecker, DependencyStatus,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The check command implementation.
pub struct CheckCommand<'a> {
    ctx: &'a CommandContext<'a>,
    args: CheckArgs,
}

impl<'a> CheckCommand<'a> {
    pub fn new(ctx: &'a CommandContext<'a>, args: CheckArgs) -> Self {
        Self { ctx, args }
    }

    /// Built-in specs followed by the configured extras.
    fn checker(&self) -> DependencyChecker {
        let mut specs = builtin_specs(self.ctx.env.platform());
        specs.extend(self.ctx.config.check.dependencies.iter().cloned());
        DependencyChecker::new(specs).with_timeout(self.ctx.config.check.timeout())
    }

    fn report_entry(ui: &mut dyn UserInterface, entry: &CheckEntry) {
        let name = &entry.spec.name;
        let optional = if entry.spec.required { "" } else { " (optional)" };

        match &entry.status {
            DependencyStatus::Found {
                version: Some(version),
            } => ui.success(&format!("{} {}", name, version)),
            DependencyStatus::Found { version: None } => {
                let raw = entry.result.raw_output().unwrap_or_default();
                ui.success(&format!("{} ({})", name, raw.lines().next().unwrap_or("").trim()))
            }
            DependencyStatus::Outdated { version, minimum } => {
                let msg = format!("{} {} is older than {}{}", name, version, minimum, optional);
                if entry.spec.required {
                    ui.error(&msg);
                } else {
                    ui.warning(&msg);
                }
            }
            DependencyStatus::Missing { reason } => {
                let msg = format!("{}: {}{}", name, reason, optional);
                if entry.spec.required {
                    ui.error(&msg);
                } else {
                    ui.warning(&msg);
                }
            }
        }
    }

    fn report_summary(ui: &mut dyn UserInterface, report: &CheckReport) {
        ui.message("");
        if report.passed() {
            ui.success("All required dependencies are installed and working!");
        } else {
            let missing = report.missing_required();
            let names: Vec<&str> = missing.iter().map(|e| e.spec.name.as_str()).collect();
            ui.error(&format!("Missing required dependencies: {}", names.join(", ")));
            for entry in missing {
                if let Some(hint) = &entry.spec.install_hint {
                    ui.show_hint(&format!("{}: {}", entry.spec.name, hint));
                }
            }
        }

        for entry in report.missing_optional() {
            if let Some(hint) = &entry.spec.install_hint {
                ui.show_hint(&format!("{}: {}", entry.spec.name, hint));
            }
        }
    }

    /// Run the probes and render the report to `ui`.
    pub fn run_report(&self, ui: &mut dyn UserInterface) -> CheckReport {
        let checker = self.checker();

        if self.args.json {
            return checker.run(self.ctx.runner);
        }

        ui.show_header("Checking Dependencies");
        let spinner_msg = format!("Probing {} tools...", checker.specs().len());
        let mut spinner = ui.start_spinner(&spinner_msg);
        let report = checker.run(self.ctx.runner);
        spinner.finish_success("Probed dependencies");

        for entry in report.entries() {
            Self::report_entry(ui, entry);
        }
        Self::report_summary(ui, &report);
        report
    }
}

/// The report as pretty-printed JSON.
pub fn render_json(report: &CheckReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|e| anyhow::anyhow!(e).into())
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = self.run_report(ui);
        tracing::info!(
            "Dependency check {}",
            if report.passed() { "passed" } else { "failed" }
        );

        if self.args.json {
            println!("{}", render_json(&report)?);
        }

        Ok(CommandResult::from_bool(report.passed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FoodtruckConfig;
    use crate::requirements::DependencySpec;
    use crate::shell::{FixedEnv, MockRunner};
    use crate::ui::{MockUI, OutputMode};
    use std::path::PathBuf;

    fn all_present() -> MockRunner {
        MockRunner::new()
            .with_stdout("python3 --version", "Python 3.13.1")
            .with_stdout("uv --version", "uv 0.5.11 (c4d0caaee 2024-12-19)")
            .with_stdout("git --version", "git version 2.43.0")
            .with_stdout("docker --version", "Docker version 27.4.0, build bde2b89")
            .with_stdout("docker info --format {{.ServerVersion}}", "27.4.0")
    }

    fn ctx<'a>(runner: &'a MockRunner, env: &'a FixedEnv) -> CommandContext<'a> {
        CommandContext::new(PathBuf::from("/work"), FoodtruckConfig::default(), runner, env)
    }

    #[test]
    fn all_tools_present_passes() {
        let runner = all_present();
        let env = FixedEnv::new("/home/dev");
        let ctx = ctx(&runner, &env);
        let mut ui = MockUI::new();

        let result = CheckCommand::new(&ctx, CheckArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_success("Python 3.13.1"));
        assert!(ui.has_success("Git 2.43.0"));
        assert!(ui.has_success("All required dependencies are installed and working!"));
        assert!(ui.errors().is_empty());
    }

    #[test]
    fn missing_required_tool_fails_with_hint() {
        let runner = MockRunner::new()
            .with_stdout("python3 --version", "Python 3.13.1")
            .with_stdout("uv --version", "uv 0.5.11")
            .with_stdout("docker --version", "Docker version 27.4.0")
            .with_stdout("docker info --format {{.ServerVersion}}", "27.4.0");
        let env = FixedEnv::new("/home/dev");
        let ctx = ctx(&runner, &env);
        let mut ui = MockUI::new();

        let result = CheckCommand::new(&ctx, CheckArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Git: not found on PATH"));
        assert!(ui.has_error("Missing required dependencies: Git"));
        assert!(ui.hints().iter().any(|h| h.starts_with("Git: https://")));
    }

    #[test]
    fn quiet_check_keeps_outcomes_only() {
        let runner = MockRunner::new().with_stdout("python3 --version", "Python 3.13.1");
        let env = FixedEnv::new("/home/dev");
        let ctx = ctx(&runner, &env);
        let mut quiet = MockUI::with_mode(OutputMode::Quiet);
        let mut normal = MockUI::new();

        CheckCommand::new(&ctx, CheckArgs::default())
            .execute(&mut quiet)
            .unwrap();
        CheckCommand::new(&ctx, CheckArgs::default())
            .execute(&mut normal)
            .unwrap();

        assert_eq!(normal.headers(), ["Checking Dependencies"]);
        assert!(!normal.hints().is_empty());
        assert!(quiet.headers().is_empty());
        assert!(quiet.hints().is_empty());
        assert!(quiet.messages().is_empty());
        assert_eq!(quiet.successes(), normal.successes());
        assert_eq!(quiet.errors(), normal.errors());
    }

    #[test]
    fn stopped_daemon_is_only_a_warning() {
        let runner = all_present().with_failure(
            "docker info --format {{.ServerVersion}}",
            1,
            "Cannot connect to the Docker daemon",
        );
        let env = FixedEnv::new("/home/dev");
        let ctx = ctx(&runner, &env);
        let mut ui = MockUI::new();

        let result = CheckCommand::new(&ctx, CheckArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_warning("Docker Daemon"));
        assert!(ui.has_warning("(optional)"));
    }

    #[test]
    fn old_python_is_reported_as_outdated() {
        let runner = all_present().with_stdout("python3 --version", "Python 3.11.4");
        let env = FixedEnv::new("/home/dev");
        let ctx = ctx(&runner, &env);
        let mut ui = MockUI::new();

        let result = CheckCommand::new(&ctx, CheckArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(!result.success);
        assert!(ui.has_error("Python 3.11.4 is older than 3.13"));
    }

    #[test]
    fn configured_dependencies_are_probed_last() {
        let runner = all_present().with_stdout("node --version", "v20.11.0");
        let env = FixedEnv::new("/home/dev");
        let mut config = FoodtruckConfig::default();
        config
            .check
            .dependencies
            .push(DependencySpec::new("Node", "node").optional());
        let ctx = CommandContext::new(PathBuf::from("/work"), config, &runner, &env);
        let mut ui = MockUI::new();

        let report = CheckCommand::new(&ctx, CheckArgs::default()).run_report(&mut ui);

        let last = report.entries().last().unwrap();
        assert_eq!(last.spec.name, "Node");
        assert!(last.is_satisfied());
        assert_eq!(runner.command_lines().last().unwrap(), "node --version");
    }

    #[test]
    fn json_report_has_status_per_dependency() {
        let runner = all_present();
        let env = FixedEnv::new("/home/dev");
        let ctx = ctx(&runner, &env);
        let mut ui = MockUI::new();

        let report = CheckCommand::new(&ctx, CheckArgs { json: true }).run_report(&mut ui);
        let json: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();

        assert_eq!(json["passed"], true);
        assert_eq!(json["dependencies"][2]["name"], "Git");
        assert_eq!(json["dependencies"][2]["status"], "found");
        assert_eq!(json["dependencies"][2]["version"], "2.43.0");
        assert!(ui.headers().is_empty());
    }
}
