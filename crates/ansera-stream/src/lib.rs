// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Live answer delivery.
//!
//! The dispatcher turns one reply message into one `"message"` event on a
//! [`StreamChannel`](ansera_core::StreamChannel); the `sse` module provides
//! the HTTP-facing channel implementation.

pub mod dispatcher;
pub mod sse;

pub use dispatcher::{dispatch, MESSAGE_EVENT};
pub use sse::{channel, response, SseChannel, SseEvents};
