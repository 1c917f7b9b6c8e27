// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability trait definitions for external collaborators.
//!
//! The answer pipeline consumes its providers (knowledge-base search, LLM
//! completion, uid generation, durable sinks) through these narrow seams,
//! all `#[async_trait]` for dynamic dispatch.

pub mod channel;
pub mod provider;
pub mod search;
pub mod sink;
pub mod uid;

pub use channel::{StreamChannel, StreamEvent};
pub use provider::CompletionProvider;
pub use search::SearchProvider;
pub use sink::{MessageSink, RobotRecordSink};
pub use uid::{UidGenerator, UuidGenerator};
