//! Library integration tests.

use foodtruck::config::{load_config, FoodtruckConfig};
use foodtruck::installer::{InstallOptions, Installer, ProfileOutcome};
use foodtruck::requirements::{builtin_specs, DependencyChecker, DependencyStatus};
use foodtruck::shell::{FixedEnv, MockRunner, Platform, ShellProfileEditor, ShellTarget};
use foodtruck::FoodtruckError;
use std::fs;
use tempfile::TempDir;

#[test]
fn error_types_are_public() {
    let err = FoodtruckError::ToolNotFound { tool: "uv".into() };
    assert!(err.to_string().contains("uv"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> foodtruck::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use foodtruck::cli::{Cli, Commands};

    let cli = Cli::parse_from(["foodtruck", "check", "--json"]);
    match cli.command {
        Commands::Check(args) => assert!(args.json),
        other => panic!("Expected Check command, got {other:?}"),
    }
}

#[test]
fn checker_names_exactly_the_missing_tool() {
    let runner = MockRunner::new()
        .with_stdout("python3 --version", "Python 3.13.0")
        .with_stdout("git --version", "git version 2.39.5")
        .with_stdout("docker", "Docker version 26.1.1");

    let report = DependencyChecker::new(builtin_specs(Platform::Linux)).run(&runner);

    assert!(!report.passed());
    let missing: Vec<_> = report
        .missing_required()
        .iter()
        .map(|e| e.spec.name.clone())
        .collect();
    assert_eq!(missing, ["UV"]);
    assert!(matches!(
        report.entries()[1].status,
        DependencyStatus::Missing { .. }
    ));
}

#[test]
fn install_then_profile_has_one_entry() {
    let temp = TempDir::new().unwrap();
    let env = FixedEnv::new(temp.path().join("home")).with_var("SHELL", "/bin/zsh");
    let runner = MockRunner::new();
    let options = InstallOptions::from_config(&temp.path().join("project"), &Default::default())
        .with_target_dir(temp.path().join("bin"))
        .skip_package(true);
    let installer = Installer::new(&runner, &env, options);

    let first = installer.install().unwrap();
    let second = installer.install().unwrap();

    assert!(matches!(first.profile, ProfileOutcome::Added { .. }));
    assert!(matches!(second.profile, ProfileOutcome::AlreadyPresent { .. }));

    let editor = ShellProfileEditor::new(ShellTarget::detect(&env).unwrap());
    assert!(editor.has_path_entry(&temp.path().join("bin")).unwrap());
}

#[test]
fn project_config_overrides_user_config() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    let project = temp.path().join("project");
    fs::create_dir_all(home.join(".foodtruck")).unwrap();
    fs::create_dir_all(project.join(".foodtruck")).unwrap();
    fs::write(
        home.join(".foodtruck/config.yml"),
        "check:\n  timeout_secs: 10\napi:\n  timeout_secs: 60\n",
    )
    .unwrap();
    fs::write(
        project.join(".foodtruck/config.yml"),
        "check:\n  timeout_secs: 5\n",
    )
    .unwrap();

    let config = load_config(Some(home.as_path()), &project, None).unwrap();

    assert_eq!(config.check.timeout_secs, 5);
    assert_eq!(config.api.timeout_secs, 60);
    assert_eq!(config.install, FoodtruckConfig::default().install);
}
