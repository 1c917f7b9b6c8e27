// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! FAQ pair generation from document chunks.
//!
//! The [`FaqGenerator`] runs off the answering hot path (batch knowledge-base
//! ingestion), so unlike live answering it retries transient provider
//! failures: up to a bounded number of attempts with exponential backoff.
//! The backoff sleep suspends only the calling task and honors cancellation.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use ansera_core::{AnseraError, CompletionProvider, PromptMessage};

/// Prompt template for FAQ extraction. `{chunk}` is replaced with the
/// document chunk.
pub const FAQ_TEMPLATE: &str = r#"Extract frequently-asked question and answer pairs from the content below.
Rules:
1. Each question must be answerable from the content alone.
2. Keep answers concise and factual; do not invent content.
3. Respond with a JSON array only, no surrounding prose:
[{"question": "...", "answer": "...", "tags": ["..."]}]

Content:
{chunk}"#;

/// One generated question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqPair {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Batch FAQ generator with bounded retry.
pub struct FaqGenerator {
    provider: Arc<dyn CompletionProvider>,
    max_attempts: u32,
    base_delay: Duration,
}

impl FaqGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            provider,
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Generates FAQ pairs from `chunk`, retrying transient provider
    /// failures.
    ///
    /// Attempt `n` (1-based) is followed, on failure, by a sleep of
    /// `base_delay * 2^(n-1)` before the next attempt; the final attempt's
    /// failure is returned as-is. Cancelling `cancel` during a backoff sleep
    /// aborts with [`AnseraError::Cancelled`].
    ///
    /// # Errors
    ///
    /// [`AnseraError::InvalidInput`] for a blank chunk; the last provider
    /// error once attempts are exhausted; [`AnseraError::Cancelled`] on
    /// cancellation; [`AnseraError::Provider`] when the provider output is
    /// not a JSON pair array.
    pub async fn generate_sync(
        &self,
        chunk: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<FaqPair>, AnseraError> {
        if chunk.trim().is_empty() {
            return Err(AnseraError::InvalidInput(
                "document chunk must not be empty".to_string(),
            ));
        }

        let messages = [PromptMessage::user(FAQ_TEMPLATE.replace("{chunk}", chunk))];

        for attempt in 1..=self.max_attempts {
            match self.provider.complete(&messages).await {
                Ok(text) => {
                    debug!(attempt, "faq generation succeeded");
                    return parse_pairs(&text);
                }
                Err(e) if attempt == self.max_attempts => {
                    warn!(attempt, error = %e, "faq generation exhausted retries");
                    return Err(e);
                }
                Err(e) => {
                    let delay = self.base_delay * (1 << (attempt - 1));
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "faq generation attempt failed, backing off"
                    );
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => {}
                        _ = cancel.cancelled() => return Err(AnseraError::Cancelled),
                    }
                }
            }
        }
        unreachable!("loop returns on the final attempt");
    }

    /// Single-attempt variant returning the raw provider text.
    ///
    /// An empty chunk yields an empty string rather than an error, matching
    /// fire-and-forget batch callers that skip blank chunks silently.
    pub async fn generate_async(&self, chunk: &str) -> Result<String, AnseraError> {
        if chunk.trim().is_empty() {
            return Ok(String::new());
        }
        let messages = [PromptMessage::user(FAQ_TEMPLATE.replace("{chunk}", chunk))];
        self.provider.complete(&messages).await
    }
}

/// Parses provider output into FAQ pairs, tolerating markdown code fences.
fn parse_pairs(text: &str) -> Result<Vec<FaqPair>, AnseraError> {
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    serde_json::from_str(trimmed).map_err(|e| AnseraError::Provider {
        message: format!("unparseable FAQ output: {e}"),
        source: None,
    })
}
