//! Configuration loading for foodtruck.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layered merging in [`merger`]
//! - Rules serde cannot express in [`validator`]
//!
//! # Example
//!
//! ```
//! use foodtruck::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let project = TempDir::new().unwrap();
//! fs::create_dir_all(project.path().join(".foodtruck")).unwrap();
//! fs::write(
//!     project.path().join(".foodtruck/config.yml"),
//!     "check:\n  timeout_secs: 10\n",
//! )
//! .unwrap();
//!
//! let config = load_config(None, project.path(), None).unwrap();
//! assert_eq!(config.check.timeout_secs, 10);
//! ```

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{load_config, load_config_value, ConfigPaths, CONFIG_DIR, CONFIG_FILE};
pub use merger::{deep_merge, merge_layers};
pub use schema::{
    ApiConfig, CheckConfig, FoodtruckConfig, InstallConfig, SetupConfig, DEFAULT_API_REPO,
    DEFAULT_WEBSITE_REPO,
};
pub use validator::{validate, validate_config, ValidationError};
