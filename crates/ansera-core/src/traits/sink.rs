// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable write-queue sinks consumed by the persistence recorder.
//!
//! Both sinks are at-least-once: a push only guarantees the entry reached the
//! queue, not that a consumer has stored it. Consumers must de-duplicate by
//! message/record uid. The two sinks are deliberately independent -- there is
//! no transaction spanning them.

use async_trait::async_trait;

use crate::error::AnseraError;
use crate::types::RobotMessageRecord;

/// Producer side of the durable message-persist queue.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Queues a serialized chat message for durable storage.
    async fn push_for_persist(&self, message_json: &str) -> Result<(), AnseraError>;
}

/// Producer side of the robot-message analytics queue.
#[async_trait]
pub trait RobotRecordSink: Send + Sync {
    /// Queues a denormalized robot-message record for the analytics store.
    async fn push_record(&self, record: &RobotMessageRecord) -> Result<(), AnseraError>;
}

#[async_trait]
impl<T: MessageSink + ?Sized> MessageSink for std::sync::Arc<T> {
    async fn push_for_persist(&self, message_json: &str) -> Result<(), AnseraError> {
        (**self).push_for_persist(message_json).await
    }
}

#[async_trait]
impl<T: RobotRecordSink + ?Sized> RobotRecordSink for std::sync::Arc<T> {
    async fn push_record(&self, record: &RobotMessageRecord) -> Result<(), AnseraError> {
        (**self).push_record(record).await
    }
}
