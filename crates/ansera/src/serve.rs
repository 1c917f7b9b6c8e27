// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ansera serve` command implementation.
//!
//! Wires the answer engine against SQLite-backed sinks and keyword search,
//! the configured OpenAI-compatible provider, and an SSE answer endpoint:
//!
//! ```text
//! POST /v1/answer          JSON query in, text/event-stream out
//! ```
//!
//! Each request gets its own channel; the engine task owns the writer half
//! and the HTTP response drains the reader half.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use ansera_agent::AnswerEngine;
use ansera_config::AnseraConfig;
use ansera_core::{
    Actor, AnseraError, ChatMessage, MessageKind, SenderKind, ThreadInfo, UidGenerator,
    UuidGenerator,
};
use ansera_openai::OpenAiClient;
use ansera_storage::{Database, QaKeywordSearch, QueueSinks};
use ansera_stream::sse::DEFAULT_BUFFER;

/// Shared state behind the answer endpoint.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<AnswerEngine>,
    config: Arc<AnseraConfig>,
}

impl AppState {
    pub fn new(engine: Arc<AnswerEngine>, config: Arc<AnseraConfig>) -> Self {
        Self { engine, config }
    }
}

/// Inbound answer request.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// The visitor's query text.
    pub content: String,
    #[serde(default)]
    pub thread_uid: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub visitor_uid: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub org_uid: Option<String>,
    /// Rendered conversation history for prompt grounding.
    #[serde(default)]
    pub history: String,
}

/// Runs the `ansera serve` command.
pub async fn run_serve(config: AnseraConfig) -> Result<(), AnseraError> {
    init_tracing(&config.agent.log_level);
    info!(agent_name = %config.agent.name, "starting ansera serve");

    let db = Database::open(&config.storage.database_path).await?;
    let engine = Arc::new(build_engine(&config, db)?);
    let state = AppState::new(engine, Arc::new(config.clone()));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .map_err(|e| {
            AnseraError::Internal(format!(
                "failed to bind {}: {e}",
                config.server.bind_address
            ))
        })?;
    info!(addr = %config.server.bind_address, "answer endpoint listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AnseraError::Internal(format!("server error: {e}")))
}

/// Assembles the engine from its SQLite-backed collaborators.
fn build_engine(config: &AnseraConfig, db: Database) -> Result<AnswerEngine, AnseraError> {
    let sinks = Arc::new(QueueSinks::new(db.clone()));
    let search = Arc::new(QaKeywordSearch::new(db));
    let provider = Arc::new(OpenAiClient::new(
        &config.openai.base_url,
        &config.openai.api_key,
        &config.openai.model,
    )?);

    Ok(AnswerEngine::new(
        search,
        provider,
        Arc::new(UuidGenerator),
        sinks.clone(),
        sinks,
        Actor {
            uid: format!("robot-{}", config.agent.name),
            nickname: config.agent.name.clone(),
        },
    ))
}

/// Builds the HTTP router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/answer", post(answer))
        .with_state(state)
}

async fn answer(
    State(state): State<AppState>,
    Json(body): Json<AnswerRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if body.content.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "content must not be empty".to_string(),
        ));
    }

    let uids = UuidGenerator;
    let query = ChatMessage {
        uid: uids.get_uid(),
        kind: MessageKind::Text,
        content: body.content,
        sender: SenderKind::Visitor,
        thread: ThreadInfo {
            uid: body.thread_uid.unwrap_or_else(|| uids.get_uid()),
            topic: body.topic.unwrap_or_default(),
        },
        actor: Actor {
            uid: body.visitor_uid.unwrap_or_else(|| "anonymous".to_string()),
            nickname: body.nickname.unwrap_or_else(|| "Visitor".to_string()),
        },
        org_uid: body.org_uid.unwrap_or_default(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    let (mut channel, events) = ansera_stream::channel(DEFAULT_BUFFER);
    let engine = state.engine.clone();
    let robot_config = state.config.robot_config();
    let history = body.history;

    tokio::spawn(async move {
        if let Err(e) = engine
            .answer(&query, &history, &robot_config, &mut channel)
            .await
        {
            error!(query_uid = %query.uid, error = %e, "answer task failed");
        }
    });

    Ok(ansera_stream::response(events))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install shutdown signal handler");
    }
}

/// Initializes the tracing subscriber with the given log level.
pub(crate) fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ansera={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
