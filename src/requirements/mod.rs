//! Dependency specs, version probing and checking.
//!
//! # Modules
//!
//! - [`spec`] - Dependency specifications and the built-in toolchain list
//! - [`probe`] - Version probe over a [`CommandRunner`](crate::shell::CommandRunner)
//! - [`checker`] - Aggregates probe results into a pass/fail report

pub mod checker;
pub mod probe;
pub mod spec;

pub use checker::{
    CheckEntry, CheckReport, DependencyChecker, DependencyStatus, DEFAULT_PROBE_TIMEOUT,
};
pub use probe::{extract_version, version_at_least, ProbeOutcome, ProbeResult, VersionProbe};
pub use spec::{builtin_specs, DependencySpec};
