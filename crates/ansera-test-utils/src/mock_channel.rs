// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collecting stream channel for dispatch assertions.

use async_trait::async_trait;

use ansera_core::{AnseraError, StreamChannel, StreamEvent};

/// A channel that records emitted events in memory.
///
/// Can be scripted to fail on a given emit call to exercise the dispatch
/// error path. After a failure (or an explicit `fail`) the channel counts as
/// terminated and rejects further events.
pub struct CollectingChannel {
    pub events: Vec<StreamEvent>,
    pub failures: Vec<String>,
    fail_on_emit: Option<u32>,
    emits: u32,
    terminated: bool,
}

impl CollectingChannel {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            failures: Vec::new(),
            fail_on_emit: None,
            emits: 0,
            terminated: false,
        }
    }

    /// Fail the n-th emit call (1-based) with a transport error.
    pub fn failing_on_emit(n: u32) -> Self {
        Self {
            fail_on_emit: Some(n),
            ..Self::new()
        }
    }

    /// Whether the channel was terminated via `fail`.
    pub fn terminated(&self) -> bool {
        self.terminated
    }
}

impl Default for CollectingChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamChannel for CollectingChannel {
    async fn emit(&mut self, event: StreamEvent) -> Result<(), AnseraError> {
        self.emits += 1;
        if self.terminated {
            return Err(AnseraError::Channel {
                message: "channel already terminated".to_string(),
                source: None,
            });
        }
        if self.fail_on_emit == Some(self.emits) {
            return Err(AnseraError::Channel {
                message: "simulated transport failure".to_string(),
                source: None,
            });
        }
        self.events.push(event);
        Ok(())
    }

    async fn fail(&mut self, error: &AnseraError) {
        self.terminated = true;
        self.failures.push(error.to_string());
    }
}
