// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Ansera answer engine.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Ansera workspace. The answer pipeline,
//! storage layer, and provider integrations all build on the seams defined
//! here.

pub mod consts;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use consts::{DEFAULT_SYSTEM_PROMPT, UNMATCHED_ANSWER};
pub use error::AnseraError;
pub use types::{
    Actor, ChatMessage, MessageKind, PromptMessage, PromptRole, RobotConfig,
    RobotMessageRecord, SenderKind, ThreadInfo,
};

// Re-export all capability traits at crate root.
pub use traits::{
    CompletionProvider, MessageSink, RobotRecordSink, SearchProvider, StreamChannel,
    StreamEvent, UidGenerator, UuidGenerator,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_traits_are_object_safe() {
        // The pipeline holds every collaborator as a trait object; if any of
        // these stops being object-safe this test won't compile.
        fn _assert_search(_: &dyn SearchProvider) {}
        fn _assert_provider(_: &dyn CompletionProvider) {}
        fn _assert_uid(_: &dyn UidGenerator) {}
        fn _assert_channel(_: &mut dyn StreamChannel) {}
        fn _assert_message_sink(_: &dyn MessageSink) {}
        fn _assert_record_sink(_: &dyn RobotRecordSink) {}
    }

    #[test]
    fn sender_kind_round_trips_through_strings() {
        use std::str::FromStr;

        for kind in [
            SenderKind::System,
            SenderKind::Robot,
            SenderKind::Agent,
            SenderKind::Visitor,
        ] {
            let s = kind.to_string();
            assert_eq!(SenderKind::from_str(&s).unwrap(), kind);
        }
    }
}
