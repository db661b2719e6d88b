//! Version probing.
//!
//! A probe runs `<command> <args>` with a deadline and looks for a version
//! token in what the tool prints. Every way the run can go wrong (missing
//! executable, non-zero exit, timeout, spawn error) becomes
//! [`ProbeOutcome::NotFound`] with a readable reason; nothing escapes as an
//! error.
//!
//! # Example
//!
//! ```
//! use foodtruck::requirements::probe::{ProbeOutcome, VersionProbe};
//! use foodtruck::shell::MockRunner;
//! use std::time::Duration;
//!
//! let runner = MockRunner::new().with_stdout("uv --version", "uv 0.8.8\n");
//! let probe = VersionProbe::new(&runner, Duration::from_secs(30));
//! let result = probe.probe("uv", &["--version".to_string()]);
//! assert_eq!(result.version(), Some("0.8.8"));
//! ```

use super::spec::DependencySpec;
use crate::error::FoodtruckError;
use crate::shell::{CommandOptions, CommandRunner};
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::LazyLock;
use std::time::Duration;

/// `MAJOR.MINOR[.PATCH][-prerelease]`, optionally prefixed with `v`.
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[vV]?(\d+\.\d+(?:\.\d+)?(?:-[0-9A-Za-z.]+)?)")
        .expect("VERSION_PATTERN must compile")
});

/// What a probe found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// Ran successfully and printed a version.
    Found { version: String, raw: String },
    /// Ran successfully but no version token was recognised.
    FoundUnparsed { raw: String },
    /// Could not be run, or exited unsuccessfully.
    NotFound { reason: String },
}

/// Outcome of probing one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    /// Tool name the probe ran for.
    pub tool: String,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
}

impl ProbeResult {
    /// Whether the tool ran successfully.
    pub fn found(&self) -> bool {
        !matches!(self.outcome, ProbeOutcome::NotFound { .. })
    }

    /// The parsed version, if any.
    pub fn version(&self) -> Option<&str> {
        match &self.outcome {
            ProbeOutcome::Found { version, .. } => Some(version),
            _ => None,
        }
    }

    /// Raw tool output, when the tool ran.
    pub fn raw_output(&self) -> Option<&str> {
        match &self.outcome {
            ProbeOutcome::Found { raw, .. } | ProbeOutcome::FoundUnparsed { raw } => Some(raw),
            ProbeOutcome::NotFound { .. } => None,
        }
    }

    /// Why the tool was not found.
    pub fn reason(&self) -> Option<&str> {
        match &self.outcome {
            ProbeOutcome::NotFound { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Runs version commands through a [`CommandRunner`].
pub struct VersionProbe<'a> {
    runner: &'a dyn CommandRunner,
    timeout: Duration,
}

impl<'a> VersionProbe<'a> {
    /// Create a probe with a per-invocation deadline.
    pub fn new(runner: &'a dyn CommandRunner, timeout: Duration) -> Self {
        Self { runner, timeout }
    }

    /// Probe the tool a spec describes.
    pub fn probe_spec(&self, spec: &DependencySpec) -> ProbeResult {
        let mut result = self.probe(&spec.command, &spec.args);
        result.tool = spec.name.clone();
        result
    }

    /// Run `command args` and classify the result.
    pub fn probe(&self, command: &str, args: &[String]) -> ProbeResult {
        let options = CommandOptions::captured(self.timeout);
        let outcome = match self.runner.run(command, args, &options) {
            Ok(result) if result.success => {
                let version = extract_version(&result.stdout)
                    .or_else(|| extract_version(&result.stderr));
                let raw = result.combined_output();
                match version {
                    Some(version) => ProbeOutcome::Found { version, raw },
                    None => ProbeOutcome::FoundUnparsed { raw },
                }
            }
            Ok(result) => ProbeOutcome::NotFound {
                reason: result.failure_reason(),
            },
            Err(FoodtruckError::ToolNotFound { .. }) => ProbeOutcome::NotFound {
                reason: "not found on PATH".to_string(),
            },
            Err(FoodtruckError::ToolTimedOut { timeout, .. }) => ProbeOutcome::NotFound {
                reason: format!("timed out after {}s", timeout.as_secs()),
            },
            Err(e) => ProbeOutcome::NotFound {
                reason: e.to_string(),
            },
        };

        tracing::debug!("Probe {}: {:?}", command, outcome);

        ProbeResult {
            tool: command.to_string(),
            outcome,
        }
    }
}

/// Extract the first version token from tool output.
pub fn extract_version(output: &str) -> Option<String> {
    VERSION_PATTERN
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Compare two versions by their numeric dot-separated components.
///
/// Prerelease suffixes are ignored and missing components count as zero,
/// so `3.13` equals `3.13.0`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.trim_start_matches(['v', 'V'])
            .split('-')
            .next()
            .unwrap_or("")
            .split('.')
            .map(|part| part.parse().unwrap_or(0))
            .collect()
    };

    let (a, b) = (parse(a), parse(b));
    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Whether `found` is at least `minimum`.
pub fn version_at_least(found: &str, minimum: &str) -> bool {
    compare_versions(found, minimum) != Ordering::Less
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{MockResponse, MockRunner};

    fn version_args() -> Vec<String> {
        vec!["--version".to_string()]
    }

    #[test]
    fn extracts_common_tool_versions() {
        assert_eq!(extract_version("uv 0.8.8").as_deref(), Some("0.8.8"));
        assert_eq!(
            extract_version("Docker version 24.0.7, build afdd53b").as_deref(),
            Some("24.0.7")
        );
        assert_eq!(extract_version("git version 2.43.0").as_deref(), Some("2.43.0"));
        assert_eq!(extract_version("Python 3.13.6").as_deref(), Some("3.13.6"));
        assert_eq!(extract_version("node v20.11.1").as_deref(), Some("20.11.1"));
        assert_eq!(extract_version("tool 1.2.0-rc.1").as_deref(), Some("1.2.0-rc.1"));
    }

    #[test]
    fn no_token_in_garbage() {
        assert_eq!(extract_version("command not understood"), None);
        assert_eq!(extract_version(""), None);
        assert_eq!(extract_version("build 42"), None);
    }

    #[test]
    fn found_with_version() {
        let runner = MockRunner::new().with_stdout("uv --version", "uv 0.8.8\n");
        let probe = VersionProbe::new(&runner, Duration::from_secs(30));
        let result = probe.probe("uv", &version_args());
        assert!(result.found());
        assert_eq!(result.version(), Some("0.8.8"));
        assert_eq!(result.raw_output(), Some("uv 0.8.8"));
    }

    #[test]
    fn version_on_stderr_is_found() {
        let runner = MockRunner::new().with_stderr("python3 --version", "Python 3.13.6\n");
        let probe = VersionProbe::new(&runner, Duration::from_secs(30));
        let result = probe.probe("python3", &version_args());
        assert_eq!(result.version(), Some("3.13.6"));
    }

    #[test]
    fn malformed_output_is_found_unparsed() {
        let runner = MockRunner::new().with_stdout("weird --version", "weird tool, no numbers");
        let probe = VersionProbe::new(&runner, Duration::from_secs(30));
        let result = probe.probe("weird", &version_args());
        assert!(result.found());
        assert_eq!(result.version(), None);
        assert!(matches!(result.outcome, ProbeOutcome::FoundUnparsed { .. }));
    }

    #[test]
    fn missing_tool_is_not_found() {
        let runner = MockRunner::new();
        let probe = VersionProbe::new(&runner, Duration::from_secs(30));
        let result = probe.probe("git", &version_args());
        assert!(!result.found());
        assert_eq!(result.reason(), Some("not found on PATH"));
    }

    #[test]
    fn nonzero_exit_is_not_found() {
        let runner = MockRunner::new().with_failure(
            "docker info --format {{.ServerVersion}}",
            1,
            "Cannot connect to the Docker daemon",
        );
        let probe = VersionProbe::new(&runner, Duration::from_secs(30));
        let args: Vec<String> = ["info", "--format", "{{.ServerVersion}}"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let result = probe.probe("docker", &args);
        assert!(!result.found());
        assert!(result.reason().unwrap().contains("Cannot connect"));
    }

    #[test]
    fn timeout_is_not_found() {
        let runner = MockRunner::new().with_response("docker", MockResponse::TimedOut);
        let probe = VersionProbe::new(&runner, Duration::from_secs(30));
        let result = probe.probe("docker", &version_args());
        assert_eq!(result.reason(), Some("timed out after 30s"));
    }

    #[test]
    fn probe_spec_reports_spec_name() {
        let runner = MockRunner::new().with_stdout("git --version", "git version 2.43.0");
        let probe = VersionProbe::new(&runner, Duration::from_secs(30));
        let result = probe.probe_spec(&DependencySpec::new("Git", "git"));
        assert_eq!(result.tool, "Git");
    }

    #[test]
    fn version_comparison() {
        assert!(version_at_least("3.13.6", "3.13"));
        assert!(version_at_least("3.13", "3.13.0"));
        assert!(version_at_least("3.14.0-rc.1", "3.13"));
        assert!(!version_at_least("3.12.9", "3.13"));
        assert!(!version_at_least("2.99", "3"));
        assert_eq!(compare_versions("10.0", "9.9"), Ordering::Greater);
    }
}
