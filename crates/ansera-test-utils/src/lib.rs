// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic mocks for testing the Ansera answer pipeline.
//!
//! Provides scripted implementations of the core capability traits so
//! pipeline behavior (branching, dispatch, retry, recording) can be asserted
//! without external services.

pub mod mock_channel;
pub mod mock_provider;
pub mod mock_search;

pub use mock_channel::CollectingChannel;
pub use mock_provider::MockCompletion;
pub use mock_search::MockSearch;

/// Builds a visitor query message with fixed thread/org linkage for tests.
pub fn sample_query(content: &str) -> ansera_core::ChatMessage {
    ansera_core::ChatMessage {
        uid: "msg-q-1".to_string(),
        kind: ansera_core::MessageKind::Text,
        content: content.to_string(),
        sender: ansera_core::SenderKind::Visitor,
        thread: ansera_core::ThreadInfo {
            uid: "thread-1".to_string(),
            topic: "org/1/visitor/2".to_string(),
        },
        actor: ansera_core::Actor {
            uid: "visitor-1".to_string(),
            nickname: "Alice".to_string(),
        },
        org_uid: "org-1".to_string(),
        created_at: "2026-01-01T00:00:00Z".to_string(),
    }
}
