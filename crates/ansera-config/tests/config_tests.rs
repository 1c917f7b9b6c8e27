// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for configuration loading, overrides, and validation.

use ansera_config::{load_and_validate_str, load_config_from_str, AnseraConfig};

#[test]
fn defaults_load_without_any_file() {
    let config = AnseraConfig::default();
    assert_eq!(config.agent.name, "ansera");
    assert_eq!(config.agent.log_level, "info");
    assert!(config.robot.llm_enabled);
    assert!(config.robot.kb_enabled);
    assert!(config.robot.kb_uid.is_none());
    assert_eq!(config.storage.database_path, "ansera.db");
    assert_eq!(config.faq.max_attempts, 3);
    assert_eq!(config.faq.base_delay_ms, 1000);
    assert_eq!(config.server.bind_address, "127.0.0.1:8642");
}

#[test]
fn toml_overrides_defaults() {
    let config = load_config_from_str(
        r#"
        [agent]
        name = "helpdesk"
        log_level = "debug"

        [robot]
        llm_enabled = false
        kb_uid = "kb-main"

        [faq]
        max_attempts = 5
        base_delay_ms = 250
        "#,
    )
    .unwrap();

    assert_eq!(config.agent.name, "helpdesk");
    assert_eq!(config.agent.log_level, "debug");
    assert!(!config.robot.llm_enabled);
    assert_eq!(config.robot.kb_uid.as_deref(), Some("kb-main"));
    // Untouched sections keep their defaults.
    assert!(config.robot.kb_enabled);
    assert_eq!(config.faq.max_attempts, 5);
    assert_eq!(config.faq.base_delay_ms, 250);
}

#[test]
fn unknown_keys_are_rejected() {
    let result = load_config_from_str(
        r#"
        [agent]
        naem = "typo"
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn unknown_sections_are_rejected() {
    let result = load_config_from_str(
        r#"
        [telemetry]
        enabled = true
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn validation_failures_surface_as_diagnostics() {
    let errors = load_and_validate_str(
        r#"
        [agent]
        log_level = "shout"
        "#,
    )
    .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("log_level"));
}

#[test]
fn robot_config_falls_back_to_builtin_prompt() {
    let config = load_config_from_str(
        r#"
        [robot]
        kb_uid = "kb-main"
        "#,
    )
    .unwrap();

    let robot = config.robot_config();
    assert!(robot.llm_enabled);
    assert!(robot.kb_active());
    assert_eq!(robot.system_prompt, ansera_core::DEFAULT_SYSTEM_PROMPT);

    let config = load_config_from_str(
        r#"
        [robot]
        system_prompt = "You are a pirate."
        "#,
    )
    .unwrap();
    assert_eq!(config.robot_config().system_prompt, "You are a pirate.");
}
