// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./ansera.toml` > `~/.config/ansera/ansera.toml` >
//! `/etc/ansera/ansera.toml` with environment variable overrides via the
//! `ANSERA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::AnseraConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/ansera/ansera.toml` (system-wide)
/// 3. `~/.config/ansera/ansera.toml` (user XDG config)
/// 4. `./ansera.toml` (local directory)
/// 5. `ANSERA_*` environment variables
pub fn load_config() -> Result<AnseraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AnseraConfig::default()))
        .merge(Toml::file("/etc/ansera/ansera.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("ansera/ansera.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("ansera.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<AnseraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AnseraConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AnseraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AnseraConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `ANSERA_OPENAI_API_KEY` must map to
/// `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("ANSERA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("robot_", "robot.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("faq_", "faq.", 1)
            .replacen("server_", "server.", 1);
        mapped.into()
    })
}
