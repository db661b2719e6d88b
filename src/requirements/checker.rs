//! Dependency checking.
//!
//! The `DependencyChecker` probes every spec in order and aggregates the
//! outcomes into a [`CheckReport`]. It only reads from the system.

use super::probe::{version_at_least, ProbeOutcome, ProbeResult, VersionProbe};
use super::spec::DependencySpec;
use crate::shell::CommandRunner;
use serde::Serialize;
use std::time::Duration;

/// Default deadline for a single version probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Status of one dependency after applying its spec to the probe result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DependencyStatus {
    /// Tool ran. `version` is `None` when its output had no version token.
    Found { version: Option<String> },

    /// Tool ran but is older than the spec's `min_version`.
    Outdated { version: String, minimum: String },

    /// Tool could not be run.
    Missing { reason: String },
}

impl DependencyStatus {
    /// Derive the status of `spec` from its probe result.
    ///
    /// Unparsed output cannot be compared, so it satisfies any minimum.
    pub fn evaluate(spec: &DependencySpec, result: &ProbeResult) -> Self {
        match &result.outcome {
            ProbeOutcome::NotFound { reason } => DependencyStatus::Missing {
                reason: reason.clone(),
            },
            ProbeOutcome::FoundUnparsed { .. } => DependencyStatus::Found { version: None },
            ProbeOutcome::Found { version, .. } => match &spec.min_version {
                Some(minimum) if !version_at_least(version, minimum) => {
                    DependencyStatus::Outdated {
                        version: version.clone(),
                        minimum: minimum.clone(),
                    }
                }
                _ => DependencyStatus::Found {
                    version: Some(version.clone()),
                },
            },
        }
    }

    /// Whether the dependency is usable.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, DependencyStatus::Found { .. })
    }
}

/// One line of the report.
#[derive(Debug, Clone, Serialize)]
pub struct CheckEntry {
    #[serde(flatten)]
    pub spec: DependencySpec,

    #[serde(flatten)]
    pub status: DependencyStatus,

    #[serde(skip)]
    pub result: ProbeResult,
}

impl CheckEntry {
    /// Whether the dependency is usable.
    pub fn is_satisfied(&self) -> bool {
        self.status.is_satisfied()
    }

    /// Whether this entry fails the whole check.
    pub fn is_blocking(&self) -> bool {
        self.spec.required && !self.is_satisfied()
    }
}

/// Aggregated outcome of a check run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    passed: bool,
    dependencies: Vec<CheckEntry>,
}

impl CheckReport {
    /// Build a report from entries in check order.
    pub fn new(dependencies: Vec<CheckEntry>) -> Self {
        let passed = !dependencies.iter().any(CheckEntry::is_blocking);
        Self {
            passed,
            dependencies,
        }
    }

    /// True iff every required dependency is satisfied.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// All entries in check order.
    pub fn entries(&self) -> &[CheckEntry] {
        &self.dependencies
    }

    /// Required dependencies that are missing or outdated.
    pub fn missing_required(&self) -> Vec<&CheckEntry> {
        self.dependencies.iter().filter(|e| e.is_blocking()).collect()
    }

    /// Optional dependencies that are missing or outdated.
    pub fn missing_optional(&self) -> Vec<&CheckEntry> {
        self.dependencies
            .iter()
            .filter(|e| !e.spec.required && !e.is_satisfied())
            .collect()
    }
}

/// Probes an ordered list of dependency specs.
#[derive(Debug, Clone)]
pub struct DependencyChecker {
    specs: Vec<DependencySpec>,
    timeout: Duration,
}

impl DependencyChecker {
    /// Create a checker for `specs`, probed in the given order.
    pub fn new(specs: Vec<DependencySpec>) -> Self {
        Self {
            specs,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Override the per-probe deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The specs this checker will probe.
    pub fn specs(&self) -> &[DependencySpec] {
        &self.specs
    }

    /// Probe every spec and build the report.
    pub fn run(&self, runner: &dyn CommandRunner) -> CheckReport {
        let probe = VersionProbe::new(runner, self.timeout);

        let entries = self
            .specs
            .iter()
            .map(|spec| {
                let result = probe.probe_spec(spec);
                let status = DependencyStatus::evaluate(spec, &result);
                tracing::debug!("{}: {:?}", spec.name, status);
                CheckEntry {
                    spec: spec.clone(),
                    status,
                    result,
                }
            })
            .collect();

        let report = CheckReport::new(entries);
        tracing::info!(
            "Dependency check {} ({} missing required, {} missing optional)",
            if report.passed() { "passed" } else { "failed" },
            report.missing_required().len(),
            report.missing_optional().len()
        );
        report
    }
}
