// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible chat-completions endpoints.
//!
//! Implements [`CompletionProvider`] over POST /chat/completions with bearer
//! authentication, in both non-streaming and SSE-streaming form. The client
//! makes exactly one attempt per call: live answering does not retry inline,
//! and batch callers retry at their own layer with backoff.

use std::time::Duration;

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use ansera_core::traits::provider::CompletionStream;
use ansera_core::{AnseraError, CompletionProvider, PromptMessage};

use crate::types::{ApiErrorResponse, ChatChunk, ChatRequest, ChatRequestMessage, ChatResponse};

/// Request timeout; generous because completions are slow.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Client for one OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// Creates a client for `base_url` (e.g. `https://api.openai.com/v1`).
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Result<Self, AnseraError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| AnseraError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AnseraError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, messages: &[PromptMessage], stream: bool) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: messages
                .iter()
                .map(|m| ChatRequestMessage {
                    role: m.role.to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            stream,
        }
    }

    async fn post(&self, body: &ChatRequest) -> Result<reqwest::Response, AnseraError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| AnseraError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "completion response received");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
            format!("API error ({}): {}", api_err.error.type_, api_err.error.message)
        } else {
            format!("API returned {status}: {body}")
        };
        Err(AnseraError::Provider {
            message,
            source: None,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, AnseraError> {
        let response = self.post(&self.request_body(messages, false)).await?;
        let parsed: ChatResponse = response.json().await.map_err(|e| AnseraError::Provider {
            message: format!("failed to parse completion response: {e}"),
            source: Some(Box::new(e)),
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AnseraError::Provider {
                message: "completion response carried no content".to_string(),
                source: None,
            })
    }

    async fn stream(&self, messages: &[PromptMessage]) -> Result<CompletionStream, AnseraError> {
        let response = self.post(&self.request_body(messages, true)).await?;

        let chunks = response
            .bytes_stream()
            .eventsource()
            .filter_map(|result| async move {
                match result {
                    // The terminal marker carries no chunk payload.
                    Ok(event) if event.data == "[DONE]" => None,
                    Ok(event) => match serde_json::from_str::<ChatChunk>(&event.data) {
                        Ok(chunk) => chunk
                            .choices
                            .into_iter()
                            .next()
                            .and_then(|choice| choice.delta.content)
                            .filter(|text| !text.is_empty())
                            .map(Ok),
                        Err(e) => Some(Err(AnseraError::Provider {
                            message: format!("failed to parse stream chunk: {e}"),
                            source: Some(Box::new(e)),
                        })),
                    },
                    Err(e) => Some(Err(AnseraError::Provider {
                        message: format!("SSE stream error: {e}"),
                        source: None,
                    })),
                }
            });

        Ok(Box::pin(chunks))
    }
}
