// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answer dispatch onto a live channel.
//!
//! One answered query produces exactly one `"message"` event whose event id
//! is the reply message uid; clients de-duplicate on it. On any failure the
//! channel is terminated through its error path and the error propagates, so
//! a channel never carries a partial answer followed by silence.

use tracing::debug;

use ansera_core::{AnseraError, ChatMessage, StreamChannel, StreamEvent};

/// Wire name of the answer event.
pub const MESSAGE_EVENT: &str = "message";

/// Delivers `reply` over `channel` as a single terminal event.
///
/// # Errors
///
/// Serialization and transport failures terminate the channel via
/// [`StreamChannel::fail`] and are returned to the caller. The channel must
/// not be used again after an error.
pub async fn dispatch(
    reply: &ChatMessage,
    channel: &mut dyn StreamChannel,
) -> Result<(), AnseraError> {
    let data = match reply.to_json() {
        Ok(data) => data,
        Err(e) => {
            channel.fail(&e).await;
            return Err(e);
        }
    };

    let event = StreamEvent {
        id: reply.uid.clone(),
        name: MESSAGE_EVENT,
        data,
    };

    if let Err(e) = channel.emit(event).await {
        channel.fail(&e).await;
        return Err(e);
    }

    debug!(uid = %reply.uid, "answer dispatched");
    Ok(())
}
