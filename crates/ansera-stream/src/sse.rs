// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-Sent Events channel implementation.
//!
//! An [`SseChannel`] is the writer half of a bounded in-process pipe; the
//! reader half feeds an axum [`Sse`] response. The channel owns the pipe's
//! lifecycle: dropping the writer (or terminating it via `fail`) ends the
//! event stream, which closes the client's HTTP response.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_core::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::debug;

use ansera_core::{AnseraError, StreamChannel, StreamEvent};

/// Wire name of the terminal error event.
pub const ERROR_EVENT: &str = "error";

/// Default event buffer for one channel.
pub const DEFAULT_BUFFER: usize = 16;

/// Writer half of an SSE pipe.
pub struct SseChannel {
    tx: Option<mpsc::Sender<StreamEvent>>,
}

/// Reader half of an SSE pipe; yields the events a channel emitted.
pub type SseEvents = ReceiverStream<StreamEvent>;

/// Creates a bounded SSE pipe.
///
/// The writer backpressures once `buffer` events are in flight and the
/// client has not drained them.
pub fn channel(buffer: usize) -> (SseChannel, SseEvents) {
    let (tx, rx) = mpsc::channel(buffer);
    (SseChannel { tx: Some(tx) }, ReceiverStream::new(rx))
}

/// Wraps the reader half into an axum SSE response with keep-alive pings.
pub fn response(events: SseEvents) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = events.map(|event| {
        Ok(Event::default()
            .id(event.id)
            .event(event.name)
            .data(event.data))
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[async_trait]
impl StreamChannel for SseChannel {
    async fn emit(&mut self, event: StreamEvent) -> Result<(), AnseraError> {
        let Some(tx) = &self.tx else {
            return Err(AnseraError::Channel {
                message: "channel already terminated".to_string(),
                source: None,
            });
        };
        tx.send(event).await.map_err(|_| AnseraError::Channel {
            message: "client disconnected".to_string(),
            source: None,
        })
    }

    async fn fail(&mut self, error: &AnseraError) {
        if let Some(tx) = self.tx.take() {
            let payload = serde_json::json!({ "error": error.to_string() });
            // Best effort: the client may already be gone.
            let _ = tx
                .send(StreamEvent {
                    id: String::new(),
                    name: ERROR_EVENT,
                    data: payload.to_string(),
                })
                .await;
            debug!(error = %error, "sse channel terminated");
        }
    }
}
