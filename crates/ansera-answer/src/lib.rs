// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answer-pipeline building blocks: routing policy, prompt composition, and
//! dual-sink recording.
//!
//! These pieces are deliberately free of orchestration; the `ansera-agent`
//! crate wires them into the full query-to-dispatch pipeline.

pub mod policy;
pub mod prompt;
pub mod recorder;

pub use policy::{decide, AnswerDecision};
pub use prompt::{build_kb_prompt, join_context, to_prompt_messages, MAX_CONTEXT_CHARS};
pub use recorder::PersistenceRecorder;
