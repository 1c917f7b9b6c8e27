// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockCompletion` implements `CompletionProvider` with scripted outcomes,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream;
use tokio::sync::Mutex;

use ansera_core::traits::provider::CompletionStream;
use ansera_core::{AnseraError, CompletionProvider, PromptMessage};

/// One scripted provider outcome: generated text or a failure message.
pub type ScriptedOutcome = Result<String, String>;

/// A mock completion provider driven by a FIFO script of outcomes.
///
/// When the script runs out, a default "mock completion" text is returned.
/// Calls are counted, and the prompt of the most recent call is kept for
/// assertions.
pub struct MockCompletion {
    script: Arc<Mutex<VecDeque<ScriptedOutcome>>>,
    calls: AtomicU32,
    last_prompt: Arc<Mutex<Option<Vec<PromptMessage>>>>,
}

impl MockCompletion {
    /// Create a mock with an empty script (always succeeds with the default text).
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            calls: AtomicU32::new(0),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a mock pre-loaded with the given outcomes.
    pub fn with_script(script: Vec<ScriptedOutcome>) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::from(script))),
            ..Self::new()
        }
    }

    /// Convenience: a mock that always answers with `text`.
    pub fn answering(text: &str) -> Self {
        Self::with_script(vec![Ok(text.to_string())])
    }

    /// Number of completion calls made so far (complete and stream).
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// The prompt messages of the most recent call.
    pub async fn last_prompt(&self) -> Option<Vec<PromptMessage>> {
        self.last_prompt.lock().await.clone()
    }

    async fn next_outcome(&self, messages: &[PromptMessage]) -> Result<String, AnseraError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().await = Some(messages.to_vec());
        match self.script.lock().await.pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(AnseraError::Provider {
                message,
                source: None,
            }),
            None => Ok("mock completion".to_string()),
        }
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletion {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, AnseraError> {
        self.next_outcome(messages).await
    }

    async fn stream(&self, messages: &[PromptMessage]) -> Result<CompletionStream, AnseraError> {
        let text = self.next_outcome(messages).await?;
        Ok(Box::pin(stream::iter(vec![Ok(text)])))
    }
}
