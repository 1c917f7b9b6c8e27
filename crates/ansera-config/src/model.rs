// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Ansera answer engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use ansera_core::{RobotConfig, DEFAULT_SYSTEM_PROMPT};
use serde::{Deserialize, Serialize};

/// Top-level Ansera configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnseraConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Robot answering behavior settings.
    #[serde(default)]
    pub robot: RobotSettings,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// OpenAI-compatible provider settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// FAQ batch generation settings.
    #[serde(default)]
    pub faq: FaqConfig,

    /// HTTP server settings for the SSE endpoint.
    #[serde(default)]
    pub server: ServerConfig,
}

impl AnseraConfig {
    /// Resolves the robot answering configuration used by the pipeline.
    pub fn robot_config(&self) -> RobotConfig {
        RobotConfig {
            llm_enabled: self.robot.llm_enabled,
            kb_uid: self.robot.kb_uid.clone(),
            kb_enabled: self.robot.kb_enabled,
            system_prompt: self
                .robot
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the robot.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

/// Robot answering behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RobotSettings {
    /// Whether the language-model path is enabled.
    #[serde(default = "default_true")]
    pub llm_enabled: bool,

    /// Attached knowledge base uid, if any.
    #[serde(default)]
    pub kb_uid: Option<String>,

    /// Whether the attached knowledge base may be searched.
    #[serde(default = "default_true")]
    pub kb_enabled: bool,

    /// Inline system prompt. Falls back to the built-in prompt when unset.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Default for RobotSettings {
    fn default() -> Self {
        Self {
            llm_enabled: true,
            kb_uid: None,
            kb_enabled: true,
            system_prompt: None,
        }
    }
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// OpenAI-compatible provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. Usually supplied via `ANSERA_OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the chat-completions endpoint.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Model identifier.
    #[serde(default = "default_openai_model")]
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_openai_base_url(),
            model: default_openai_model(),
        }
    }
}

/// FAQ batch generation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FaqConfig {
    /// Maximum generation attempts before surfacing a terminal error.
    #[serde(default = "default_faq_max_attempts")]
    pub max_attempts: u32,

    /// Base backoff delay in milliseconds; doubles per failed attempt.
    #[serde(default = "default_faq_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_faq_max_attempts(),
            base_delay_ms: default_faq_base_delay_ms(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address for the SSE answer endpoint.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_agent_name() -> String {
    "ansera".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_database_path() -> String {
    "ansera.db".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_faq_max_attempts() -> u32 {
    3
}

fn default_faq_base_delay_ms() -> u64 {
    1000
}

fn default_bind_address() -> String {
    "127.0.0.1:8642".to_string()
}
