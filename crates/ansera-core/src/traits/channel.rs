// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Live delivery channel capability.

use async_trait::async_trait;

use crate::error::AnseraError;

/// One named event on a live channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEvent {
    /// Event id; for answer events this is the answer message uid.
    pub id: String,
    /// Event name on the wire.
    pub name: &'static str,
    /// Serialized payload.
    pub data: String,
}

/// A live client channel with single-writer discipline.
///
/// Both methods take `&mut self`: a channel has exactly one writer at a time,
/// and callers must not share one channel across concurrent dispatches.
/// Channels for different visitors/threads are fully independent.
#[async_trait]
pub trait StreamChannel: Send {
    /// Emits one event. An error means the transport is gone; the caller
    /// must not attempt further events on this channel.
    async fn emit(&mut self, event: StreamEvent) -> Result<(), AnseraError>;

    /// Terminates the channel with an error signal. Best effort: the client
    /// may already be gone.
    async fn fail(&mut self, error: &AnseraError);
}
