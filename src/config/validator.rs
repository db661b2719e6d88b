//! Configuration validation rules.
//!
//! Checks that serde cannot express:
//! - Every `timeout_secs` is at least one second
//! - Configured dependencies name a tool to run

use crate::config::schema::FoodtruckConfig;
use crate::error::{FoodtruckError, Result};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending key.
    pub key: String,
    /// Human-readable error message
    pub message: String,
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &FoodtruckConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (section, secs) in [
        ("check", config.check.timeout_secs),
        ("install", config.install.timeout_secs),
        ("setup", config.setup.timeout_secs),
        ("api", config.api.timeout_secs),
    ] {
        if secs == 0 {
            errors.push(ValidationError {
                key: format!("{}.timeout_secs", section),
                message: format!("{}.timeout_secs must be at least 1", section),
            });
        }
    }

    for (i, spec) in config.check.dependencies.iter().enumerate() {
        if spec.name.trim().is_empty() {
            errors.push(ValidationError {
                key: format!("check.dependencies[{}].name", i),
                message: format!("check.dependencies[{}] has an empty name", i),
            });
        }
        if spec.command.trim().is_empty() {
            errors.push(ValidationError {
                key: format!("check.dependencies[{}].command", i),
                message: format!("check.dependencies[{}] has an empty command", i),
            });
        }
    }

    errors
}

/// Validate and return Result.
///
/// # Errors
///
/// Returns `ConfigValidationError` listing every broken rule.
pub fn validate(config: &FoodtruckConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(FoodtruckError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
