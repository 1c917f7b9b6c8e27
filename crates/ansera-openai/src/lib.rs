// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible completion provider.
//!
//! Works against any endpoint speaking the chat-completions protocol; the
//! base URL is configuration, not a constant.

pub mod client;
pub mod types;

pub use client::OpenAiClient;
