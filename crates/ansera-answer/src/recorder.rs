// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dual-sink persistence recording.
//!
//! Every answered query is recorded twice: the reply message itself goes to
//! the message-persist queue, and a denormalized robot-message record goes to
//! the analytics queue. The two pushes are independent at-least-once writes
//! with no transaction spanning them; a failure in either is logged and the
//! other push still happens. Delivery to the visitor is never rolled back
//! over a recording failure.

use tracing::error;

use ansera_core::{ChatMessage, MessageSink, RobotMessageRecord, RobotRecordSink};

/// Records answered queries against the two durable queues.
pub struct PersistenceRecorder<P, R> {
    persist: P,
    records: R,
}

impl<P: MessageSink, R: RobotRecordSink> PersistenceRecorder<P, R> {
    pub fn new(persist: P, records: R) -> Self {
        Self { persist, records }
    }

    /// Pushes the reply to the message-persist sink and the derived record to
    /// the robot-record sink.
    ///
    /// Infallible from the caller's perspective: both pushes are attempted
    /// regardless of individual failures, and failures surface only in logs.
    pub async fn record(&self, query: &ChatMessage, reply: &ChatMessage) {
        match reply.to_json() {
            Ok(json) => {
                if let Err(e) = self.persist.push_for_persist(&json).await {
                    error!(uid = %reply.uid, error = %e, "message-persist push failed");
                }
            }
            Err(e) => {
                error!(uid = %reply.uid, error = %e, "reply serialization failed");
            }
        }

        let record = RobotMessageRecord::derive(query, reply);
        if let Err(e) = self.records.push_record(&record).await {
            error!(uid = %record.uid, error = %e, "robot-record push failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use ansera_core::{
        Actor, AnseraError, ChatMessage, SenderKind, UNMATCHED_ANSWER,
    };
    use ansera_test_utils::sample_query;

    use super::*;

    #[derive(Default)]
    struct RecordingSinks {
        fail_persist: bool,
        fail_records: bool,
        persisted: Mutex<Vec<String>>,
        records: Mutex<Vec<RobotMessageRecord>>,
    }

    #[async_trait]
    impl MessageSink for &RecordingSinks {
        async fn push_for_persist(&self, message_json: &str) -> Result<(), AnseraError> {
            if self.fail_persist {
                return Err(AnseraError::Internal("persist queue down".to_string()));
            }
            self.persisted.lock().unwrap().push(message_json.to_string());
            Ok(())
        }
    }

    #[async_trait]
    impl RobotRecordSink for &RecordingSinks {
        async fn push_record(&self, record: &RobotMessageRecord) -> Result<(), AnseraError> {
            if self.fail_records {
                return Err(AnseraError::Internal("record queue down".to_string()));
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn robot_reply(content: &str) -> ChatMessage {
        ChatMessage {
            uid: "msg-r-1".to_string(),
            sender: SenderKind::Robot,
            actor: Actor {
                uid: "robot-1".to_string(),
                nickname: "Helper".to_string(),
            },
            ..sample_query(content)
        }
    }

    #[tokio::test]
    async fn both_sinks_receive_exactly_one_entry() {
        let sinks = RecordingSinks::default();
        let recorder = PersistenceRecorder::new(&sinks, &sinks);

        let query = sample_query("refund policy");
        let reply = robot_reply("Refunds within 30 days");
        recorder.record(&query, &reply).await;

        let persisted = sinks.persisted.lock().unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0], reply.to_json().unwrap());

        let records = sinks.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].uid, "msg-r-1");
        assert_eq!(records[0].content, "refund policy");
        assert!(!records[0].unanswered);
    }

    #[tokio::test]
    async fn sentinel_reply_is_recorded_as_unanswered() {
        let sinks = RecordingSinks::default();
        let recorder = PersistenceRecorder::new(&sinks, &sinks);

        recorder
            .record(&sample_query("asdkfj"), &robot_reply(UNMATCHED_ANSWER))
            .await;

        let records = sinks.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].unanswered);
        assert_eq!(sinks.persisted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn persist_failure_does_not_block_the_record_push() {
        let sinks = RecordingSinks {
            fail_persist: true,
            ..Default::default()
        };
        let recorder = PersistenceRecorder::new(&sinks, &sinks);

        recorder
            .record(&sample_query("q"), &robot_reply("answer"))
            .await;

        assert!(sinks.persisted.lock().unwrap().is_empty());
        assert_eq!(sinks.records.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn record_failure_does_not_undo_the_persist_push() {
        let sinks = RecordingSinks {
            fail_records: true,
            ..Default::default()
        };
        let recorder = PersistenceRecorder::new(&sinks, &sinks);

        recorder
            .record(&sample_query("q"), &robot_reply("answer"))
            .await;

        assert_eq!(sinks.persisted.lock().unwrap().len(), 1);
        assert!(sinks.records.lock().unwrap().is_empty());
    }
}
