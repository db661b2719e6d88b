//! `foodtruck api` command.
//!
//! Manages a checked-out API project: its Python environment through `uv`
//! and its services through `docker compose`.

use std::path::{Path, PathBuf};

use crate::cli::args::{ApiAction, ApiArgs};
use crate::error::{FoodtruckError, Result};
use crate::shell::{CommandOptions, CommandRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::setup::API_PROJECT;
use super::step::ToolStep;

const PYPROJECT: &str = "pyproject.toml";
const COMPOSE_FILE: &str = "docker-compose.yaml";

const SERVICE_URLS: &[(&str, &str)] = &[
    ("API Documentation", "http://localhost:8000/docs"),
    ("API ReDoc", "http://localhost:8000/redoc"),
    ("Traefik Dashboard", "http://localhost:8080"),
    ("API (via Traefik)", "http://foodtruck.docker.localhost"),
    ("PostgreSQL", "localhost:5432"),
    ("Redis", "localhost:6379"),
];

/// Locate the API project from `start`.
///
/// `start` itself qualifies when it has both `pyproject.toml` and
/// `docker-compose.yaml`. Otherwise the first `foodtruck-api` directory with
/// a `pyproject.toml` under `start`, `start/foodtruck`, the parent, or
/// `parent/foodtruck` wins.
pub fn find_api_project(start: &Path) -> Option<PathBuf> {
    if start.join(PYPROJECT).is_file() && start.join(COMPOSE_FILE).is_file() {
        return Some(start.to_path_buf());
    }

    let mut candidates = vec![
        start.join(API_PROJECT),
        start.join("foodtruck").join(API_PROJECT),
    ];
    if let Some(parent) = start.parent() {
        candidates.push(parent.join(API_PROJECT));
        candidates.push(parent.join("foodtruck").join(API_PROJECT));
    }

    candidates
        .into_iter()
        .find(|path| path.join(PYPROJECT).is_file())
}

/// The api command implementation.
pub struct ApiCommand<'a> {
    ctx: &'a CommandContext<'a>,
    args: ApiArgs,
}

impl<'a> ApiCommand<'a> {
    pub fn new(ctx: &'a CommandContext<'a>, args: ApiArgs) -> Self {
        Self { ctx, args }
    }

    fn runner(&self) -> &dyn CommandRunner {
        self.ctx.runner
    }

    fn project(&self, ui: &mut dyn UserInterface) -> Result<PathBuf> {
        match find_api_project(&self.ctx.project_root) {
            Some(path) => {
                ui.message(&format!("Found API project at: {}", path.display()));
                Ok(path)
            }
            None => {
                ui.message(
                    "Run this command from the API project directory or a parent directory.",
                );
                ui.message("Expected locations:");
                for location in [
                    "./foodtruck-api/",
                    "./foodtruck/foodtruck-api/",
                    "../foodtruck-api/",
                ] {
                    ui.show_hint(location);
                }
                Err(FoodtruckError::ProjectNotFound {
                    project: "API".to_string(),
                    searched: self.ctx.project_root.clone(),
                })
            }
        }
    }

    fn install(&self, ui: &mut dyn UserInterface, api: &Path) -> bool {
        let timeout = self.ctx.config.api.timeout();

        if api.join(".venv").exists() {
            ui.warning("Virtual environment already exists. Skipping creation.");
        } else if ToolStep::new("Creating virtual environment", "uv", &["venv"], timeout)
            .in_dir(api)
            .run(ui, self.runner())
            .is_err()
        {
            return false;
        }

        ToolStep::new("Installing dependencies", "uv", &["sync"], timeout)
            .in_dir(api)
            .run(ui, self.runner())
            .is_ok()
    }

    fn compose(&self, ui: &mut dyn UserInterface, api: &Path, label: &str, args: &[&str]) -> bool {
        let mut full = vec!["compose"];
        full.extend_from_slice(args);
        ToolStep::new(label, "docker", &full, self.ctx.config.api.timeout())
            .in_dir(api)
            .run(ui, self.runner())
            .is_ok()
    }

    fn start(&self, ui: &mut dyn UserInterface, api: &Path) -> bool {
        if !api.join(COMPOSE_FILE).is_file() {
            ui.error(&format!("{} not found in API project.", COMPOSE_FILE));
            return false;
        }

        let mut args = vec!["up", "-d"];
        if self.args.build {
            args.push("--build");
        }
        if !self.compose(ui, api, "Starting Docker Compose services", &args) {
            return false;
        }

        ui.message("");
        ui.success("API services started!");
        ui.message("Expected service URLs:");
        for (name, url) in SERVICE_URLS {
            ui.show_hint(&format!("{}: {}", name, url));
        }
        ui.message("Services may take a moment to fully start up.");
        ui.show_command("foodtruck api status");
        true
    }

    fn status(&self, ui: &mut dyn UserInterface, api: &Path) -> bool {
        match ToolStep::new(
            "Checking service status",
            "docker",
            &["compose", "ps"],
            self.ctx.config.api.timeout(),
        )
        .in_dir(api)
        .run(ui, self.runner())
        {
            Ok(result) => {
                ui.message("Service Status:");
                ui.message(result.stdout.trim_end());
                true
            }
            Err(_) => false,
        }
    }

    /// Stream logs straight to the terminal. A one-off dump runs under the
    /// api timeout; `--follow` runs until the user interrupts.
    fn logs(&self, ui: &mut dyn UserInterface, api: &Path) -> bool {
        let mut args = vec![
            "compose".to_string(),
            "logs".to_string(),
            "--tail".to_string(),
            self.args.lines.to_string(),
        ];
        if self.args.follow {
            args.push("-f".to_string());
        }

        let mut options = CommandOptions::inherited().in_dir(api);
        if !self.args.follow {
            options.timeout = Some(self.ctx.config.api.timeout());
        }
        let outcome = self
            .runner()
            .run("docker", &args, &options)
            .and_then(|result| result.into_checked("docker"));
        if let Err(e) = outcome {
            ui.error(&format!("docker compose logs failed: {}", e));
            return false;
        }
        true
    }
}

impl Command for ApiCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header("Food Truck API Management");
        let api = self.project(ui)?;

        let ok = match self.args.action {
            ApiAction::Setup | ApiAction::Install => {
                let ok = self.install(ui, &api);
                if ok && self.args.action == ApiAction::Setup {
                    ui.success("API project setup completed!");
                    ui.message("Next steps:");
                    ui.show_command("foodtruck api start --build");
                    ui.show_command("foodtruck api status");
                } else if ok {
                    ui.success("Dependencies installed successfully!");
                }
                ok
            }
            ApiAction::Start => self.start(ui, &api),
            ApiAction::Stop => {
                self.compose(ui, &api, "Stopping Docker Compose services", &["down"])
            }
            ApiAction::Restart => {
                self.compose(ui, &api, "Restarting Docker Compose services", &["restart"])
            }
            ApiAction::Status => self.status(ui, &api),
            ApiAction::Logs => self.logs(ui, &api),
        };

        if !ok {
            ui.error(&format!(
                "API {} failed. Check the errors above.",
                self.args.action.name()
            ));
        }
        Ok(CommandResult::from_bool(ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FoodtruckConfig;
    use crate::shell::{FixedEnv, MockRunner};
    use crate::ui::{MockUI, SpinnerOutcome};
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn api_args(action: ApiAction) -> ApiArgs {
        ApiArgs {
            action,
            build: false,
            follow: false,
            lines: 50,
        }
    }

    fn make_api(root: &Path) -> PathBuf {
        let api = root.join(API_PROJECT);
        fs::create_dir_all(&api).unwrap();
        fs::write(api.join(PYPROJECT), "[project]\nname = \"foodtruck-api\"\n").unwrap();
        fs::write(api.join(COMPOSE_FILE), "services: {}\n").unwrap();
        api
    }

    #[test]
    fn finds_project_in_current_directory() {
        let temp = TempDir::new().unwrap();
        let api = make_api(temp.path());
        assert_eq!(find_api_project(&api), Some(api.clone()));
    }

    #[test]
    fn finds_sibling_and_nested_projects() {
        let temp = TempDir::new().unwrap();
        let api = make_api(temp.path());
        let website = temp.path().join("foodtruck-website");
        fs::create_dir_all(&website).unwrap();

        assert_eq!(find_api_project(temp.path()), Some(api.clone()));
        assert_eq!(find_api_project(&website), Some(api));
    }

    #[test]
    fn finds_project_under_foodtruck_dir() {
        let temp = TempDir::new().unwrap();
        let api = make_api(&temp.path().join("foodtruck"));
        assert_eq!(find_api_project(temp.path()), Some(api));
    }

    #[test]
    fn missing_project_is_an_error() {
        let temp = TempDir::new().unwrap();
        let runner = MockRunner::new();
        let env = FixedEnv::new("/home/dev");
        let ctx = CommandContext::new(
            temp.path().to_path_buf(),
            FoodtruckConfig::default(),
            &runner,
            &env,
        );
        let mut ui = MockUI::new();

        let err = ApiCommand::new(&ctx, api_args(ApiAction::Status))
            .execute(&mut ui)
            .unwrap_err();

        assert!(matches!(err, FoodtruckError::ProjectNotFound { .. }));
        assert!(ui.hints().iter().any(|h| h == "./foodtruck-api/"));
    }

    #[test]
    fn setup_creates_venv_then_syncs() {
        let temp = TempDir::new().unwrap();
        let api = make_api(temp.path());
        let runner = MockRunner::new()
            .with_stdout("uv venv", "")
            .with_stdout("uv sync", "");
        let env = FixedEnv::new("/home/dev");
        let ctx = CommandContext::new(
            temp.path().to_path_buf(),
            FoodtruckConfig::default(),
            &runner,
            &env,
        );
        let mut ui = MockUI::new();

        let result = ApiCommand::new(&ctx, api_args(ApiAction::Setup))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(runner.command_lines(), ["uv venv", "uv sync"]);
        assert!(runner.calls().iter().all(|c| c.cwd.as_deref() == Some(api.as_path())));
        assert!(ui.has_success("API project setup completed!"));
    }

    #[test]
    fn existing_venv_is_kept() {
        let temp = TempDir::new().unwrap();
        let api = make_api(temp.path());
        fs::create_dir_all(api.join(".venv")).unwrap();
        let runner = MockRunner::new().with_stdout("uv sync", "");
        let env = FixedEnv::new("/home/dev");
        let ctx = CommandContext::new(
            temp.path().to_path_buf(),
            FoodtruckConfig::default(),
            &runner,
            &env,
        );
        let mut ui = MockUI::new();

        let result = ApiCommand::new(&ctx, api_args(ApiAction::Install))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(runner.command_lines(), ["uv sync"]);
        assert!(ui.has_warning("already exists"));
    }

    #[test]
    fn start_with_build_lists_urls() {
        let temp = TempDir::new().unwrap();
        make_api(temp.path());
        let runner = MockRunner::new().with_stdout("docker compose up -d --build", "");
        let env = FixedEnv::new("/home/dev");
        let ctx = CommandContext::new(
            temp.path().to_path_buf(),
            FoodtruckConfig::default(),
            &runner,
            &env,
        );
        let mut ui = MockUI::new();
        let args = ApiArgs {
            build: true,
            ..api_args(ApiAction::Start)
        };

        let result = ApiCommand::new(&ctx, args).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.hints().iter().any(|h| h.contains("http://localhost:8000/docs")));
    }

    #[test]
    fn start_without_compose_file_fails() {
        let temp = TempDir::new().unwrap();
        let api = temp.path().join(API_PROJECT);
        fs::create_dir_all(&api).unwrap();
        fs::write(api.join(PYPROJECT), "").unwrap();
        let runner = MockRunner::new();
        let env = FixedEnv::new("/home/dev");
        let ctx = CommandContext::new(
            temp.path().to_path_buf(),
            FoodtruckConfig::default(),
            &runner,
            &env,
        );
        let mut ui = MockUI::new();

        let result = ApiCommand::new(&ctx, api_args(ApiAction::Start))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("docker-compose.yaml not found"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn stop_failure_exits_non_zero() {
        let temp = TempDir::new().unwrap();
        make_api(temp.path());
        let runner = MockRunner::new().with_failure("docker compose down", 1, "daemon not running");
        let env = FixedEnv::new("/home/dev");
        let ctx = CommandContext::new(
            temp.path().to_path_buf(),
            FoodtruckConfig::default(),
            &runner,
            &env,
        );
        let mut ui = MockUI::new();

        let result = ApiCommand::new(&ctx, api_args(ApiAction::Stop))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert_eq!(
            ui.spinner_outcomes(),
            [SpinnerOutcome::Error(
                "Stopping Docker Compose services: 'docker' exited with code 1: daemon not running"
                    .into()
            )]
        );
        assert_eq!(ui.errors(), ["API stop failed. Check the errors above."]);
    }

    #[test]
    fn status_prints_compose_output() {
        let temp = TempDir::new().unwrap();
        make_api(temp.path());
        let runner =
            MockRunner::new().with_stdout("docker compose ps", "NAME   STATUS\napi    Up\n");
        let env = FixedEnv::new("/home/dev");
        let ctx = CommandContext::new(
            temp.path().to_path_buf(),
            FoodtruckConfig::default(),
            &runner,
            &env,
        );
        let mut ui = MockUI::new();

        ApiCommand::new(&ctx, api_args(ApiAction::Status))
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_message("api    Up"));
    }

    #[test]
    fn logs_pass_tail_and_follow() {
        let temp = TempDir::new().unwrap();
        make_api(temp.path());
        let runner = MockRunner::new().with_stdout("docker", "");
        let env = FixedEnv::new("/home/dev");
        let ctx = CommandContext::new(
            temp.path().to_path_buf(),
            FoodtruckConfig::default(),
            &runner,
            &env,
        );
        let mut ui = MockUI::new();
        let args = ApiArgs {
            follow: true,
            lines: 10,
            ..api_args(ApiAction::Logs)
        };

        ApiCommand::new(&ctx, args).execute(&mut ui).unwrap();

        assert_eq!(runner.command_lines(), ["docker compose logs --tail 10 -f"]);
        assert_eq!(runner.calls()[0].timeout, None);
    }

    #[test]
    fn one_off_logs_run_under_the_api_timeout() {
        let temp = TempDir::new().unwrap();
        make_api(temp.path());
        let runner = MockRunner::new().with_stdout("docker", "");
        let env = FixedEnv::new("/home/dev");
        let mut config = FoodtruckConfig::default();
        config.api.timeout_secs = 45;
        let ctx = CommandContext::new(temp.path().to_path_buf(), config, &runner, &env);
        let mut ui = MockUI::new();

        let result = ApiCommand::new(&ctx, api_args(ApiAction::Logs))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(runner.command_lines(), ["docker compose logs --tail 50"]);
        assert_eq!(runner.calls()[0].timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn failed_start_names_the_action() {
        let temp = TempDir::new().unwrap();
        make_api(temp.path());
        let runner = MockRunner::new().with_failure("docker compose up -d", 1, "port in use");
        let env = FixedEnv::new("/home/dev");
        let ctx = CommandContext::new(
            temp.path().to_path_buf(),
            FoodtruckConfig::default(),
            &runner,
            &env,
        );
        let mut ui = MockUI::new();

        let result = ApiCommand::new(&ctx, api_args(ApiAction::Start))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("API start failed."));
        assert!(!ui.has_error("Start"));
    }
}
