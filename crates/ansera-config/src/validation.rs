// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Collects every failure instead of stopping at the first.

use crate::diagnostic::ConfigError;
use crate::model::AnseraConfig;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &AnseraConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !VALID_LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` is not one of {VALID_LOG_LEVELS:?}",
                config.agent.log_level
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // A kb_uid set to whitespace would silently disable the knowledge base.
    if let Some(kb_uid) = &config.robot.kb_uid {
        if kb_uid.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "robot.kb_uid must not be blank; omit it to detach the knowledge base"
                    .to_string(),
            });
        }
    }

    if config.faq.max_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "faq.max_attempts must be at least 1".to_string(),
        });
    }

    if config.server.bind_address.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.bind_address must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&AnseraConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors_without_failing_fast() {
        let mut config = AnseraConfig::default();
        config.agent.log_level = "loud".into();
        config.storage.database_path = "  ".into();
        config.faq.max_attempts = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn blank_kb_uid_is_rejected() {
        let mut config = AnseraConfig::default();
        config.robot.kb_uid = Some("   ".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("kb_uid"));
    }
}
