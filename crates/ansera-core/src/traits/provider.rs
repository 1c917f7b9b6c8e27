// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider capability for LLM integrations.

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::error::AnseraError;
use crate::types::PromptMessage;

/// A stream of incremental completion text chunks.
pub type CompletionStream =
    Pin<Box<dyn Stream<Item = Result<String, AnseraError>> + Send>>;

/// Capability seam for language-model providers.
///
/// The pipeline builds the full prompt message sequence; providers only run
/// it. Both calls must be cancel-safe: dropping the returned future must not
/// leave partial state behind, since the caller's request deadline may fire
/// mid-generation.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Runs the prompt and returns the complete generated text.
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, AnseraError>;

    /// Runs the prompt and returns incremental text chunks as they are generated.
    async fn stream(&self, messages: &[PromptMessage]) -> Result<CompletionStream, AnseraError>;
}
