// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ansera faq` command implementation.
//!
//! Generates FAQ question/answer pairs from a document chunk and prints them
//! as JSON. Ctrl-C during a backoff sleep aborts cleanly instead of waiting
//! out the remaining attempts.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;
use tracing::info;

use ansera_config::AnseraConfig;
use ansera_core::AnseraError;
use ansera_faq::FaqGenerator;
use ansera_openai::OpenAiClient;

/// Runs the `ansera faq` command.
///
/// Reads the chunk from `input`, or from stdin when no path is given.
pub async fn run_faq(config: AnseraConfig, input: Option<PathBuf>) -> Result<(), AnseraError> {
    crate::serve::init_tracing(&config.agent.log_level);

    let chunk = match input {
        Some(path) => tokio::fs::read_to_string(&path).await.map_err(|e| {
            AnseraError::InvalidInput(format!("cannot read {}: {e}", path.display()))
        })?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .map_err(|e| AnseraError::InvalidInput(format!("cannot read stdin: {e}")))?;
            buf
        }
    };

    let provider = Arc::new(OpenAiClient::new(
        &config.openai.base_url,
        &config.openai.api_key,
        &config.openai.model,
    )?);
    let generator = FaqGenerator::new(
        provider,
        config.faq.max_attempts,
        Duration::from_millis(config.faq.base_delay_ms),
    );

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let pairs = generator.generate_sync(&chunk, &cancel).await?;
    info!(pairs = pairs.len(), "faq generation complete");

    let rendered = serde_json::to_string_pretty(&pairs)
        .map_err(|e| AnseraError::Internal(format!("failed to render pairs: {e}")))?;
    println!("{rendered}");
    Ok(())
}
