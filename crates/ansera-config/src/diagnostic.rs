// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge.
//!
//! Converts Figment deserialization errors and semantic validation failures
//! into miette diagnostics so the binary can render readable startup errors.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error with diagnostic rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown or malformed key/value was found in the configuration.
    #[error("invalid configuration: {message}")]
    #[diagnostic(
        code(ansera::config::invalid),
        help("check ansera.toml against the documented sections: agent, robot, storage, openai, faq, server")
    )]
    Invalid {
        /// Figment's description of the failure, including the key path.
        message: String,
    },

    /// A value parsed but failed semantic validation.
    #[error("validation error: {message}")]
    #[diagnostic(code(ansera::config::validation))]
    Validation { message: String },
}

/// Converts a figment extraction error into config diagnostics.
///
/// Figment accumulates every failure in one error value; each becomes its own
/// diagnostic so a single run reports all problems.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::Invalid {
            message: e.to_string(),
        })
        .collect()
}

/// Renders config errors to stderr via miette's report formatting.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("{:?}", miette::Report::msg(error.to_string()));
    }
}
