//! foodtruck - development environment helper for the Food Truck project.
//!
//! Checks the local toolchain, installs itself onto PATH, clones the
//! project repositories, and drives the API project's `uv` and
//! `docker compose` workflows.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Layered YAML configuration
//! - [`error`] - Error types and result aliases
//! - [`installer`] - Wrapper script, shell profile and package install
//! - [`requirements`] - Dependency specs, version probes and the checker
//! - [`shell`] - Subprocess execution, platform and shell profile handling
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use foodtruck::requirements::{builtin_specs, DependencyChecker};
//! use foodtruck::shell::{MockRunner, Platform};
//!
//! let runner = MockRunner::new()
//!     .with_stdout("python3 --version", "Python 3.13.1")
//!     .with_stdout("uv --version", "uv 0.8.8")
//!     .with_stdout("git --version", "git version 2.43.0")
//!     .with_stdout("docker", "Docker version 27.4.0");
//!
//! let report = DependencyChecker::new(builtin_specs(Platform::Linux)).run(&runner);
//! assert!(report.passed());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod requirements;
pub mod shell;
pub mod ui;

pub use error::{FoodtruckError, Result};
