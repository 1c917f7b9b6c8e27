// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queue-backed implementations of the persistence sink traits.
//!
//! Both sinks write to the same `queue` table under different queue names,
//! so "independent" here means independent delivery and failure, not
//! independent storage. Swapping either for a remote queue only means
//! re-implementing the trait.

use async_trait::async_trait;

use ansera_core::{AnseraError, MessageSink, RobotMessageRecord, RobotRecordSink};

use crate::database::Database;
use crate::queries::queue::{self, MESSAGE_PERSIST_QUEUE, ROBOT_RECORD_QUEUE};

/// Producer handle for the two durable persistence queues.
#[derive(Clone)]
pub struct QueueSinks {
    db: Database,
}

impl QueueSinks {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessageSink for QueueSinks {
    async fn push_for_persist(&self, message_json: &str) -> Result<(), AnseraError> {
        queue::enqueue(&self.db, MESSAGE_PERSIST_QUEUE, message_json).await?;
        Ok(())
    }
}

#[async_trait]
impl RobotRecordSink for QueueSinks {
    async fn push_record(&self, record: &RobotMessageRecord) -> Result<(), AnseraError> {
        let payload = serde_json::to_string(record).map_err(|e| {
            AnseraError::Internal(format!("failed to serialize robot record {}: {e}", record.uid))
        })?;
        queue::enqueue(&self.db, ROBOT_RECORD_QUEUE, &payload).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ansera_core::{Actor, MessageKind};

    fn record() -> RobotMessageRecord {
        RobotMessageRecord {
            uid: "msg-r-1".into(),
            kind: MessageKind::Text,
            topic: "org/1/visitor/2".into(),
            thread_uid: "thread-1".into(),
            content: "refund policy".into(),
            answer: "Refunds within 30 days".into(),
            user: Actor {
                uid: "visitor-1".into(),
                nickname: "Alice".into(),
            },
            robot: Actor {
                uid: "robot-1".into(),
                nickname: "Helper".into(),
            },
            unanswered: false,
            org_uid: "org-1".into(),
        }
    }

    #[tokio::test]
    async fn sinks_land_in_their_own_queues() {
        let db = Database::open_in_memory().await.unwrap();
        let sinks = QueueSinks::new(db.clone());

        sinks.push_for_persist(r#"{"uid":"msg-r-1"}"#).await.unwrap();
        sinks.push_record(&record()).await.unwrap();

        let msg = queue::dequeue(&db, MESSAGE_PERSIST_QUEUE)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(msg.payload, r#"{"uid":"msg-r-1"}"#);

        let rec = queue::dequeue(&db, ROBOT_RECORD_QUEUE)
            .await
            .unwrap()
            .unwrap();
        let parsed: RobotMessageRecord = serde_json::from_str(&rec.payload).unwrap();
        assert_eq!(parsed, record());
    }
}
