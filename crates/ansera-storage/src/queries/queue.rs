// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable queue operations backing the two at-least-once persistence sinks.
//!
//! The answer pipeline only enqueues; dequeue/ack/fail exist for the persist
//! workers that drain the queues into their stores. Entries are keyed by the
//! payload's message/record uid downstream, so redelivery is harmless.

use ansera_core::AnseraError;
use rusqlite::params;

use crate::database::Database;
use crate::models::QueueEntry;

/// Queue receiving serialized chat messages bound for the message store.
pub const MESSAGE_PERSIST_QUEUE: &str = "message-persist";

/// Queue receiving denormalized robot-message records for the analytics store.
pub const ROBOT_RECORD_QUEUE: &str = "robot-record";

/// Enqueue a new item. Returns the auto-generated queue entry ID.
pub async fn enqueue(
    db: &Database,
    queue_name: &str,
    payload: &str,
) -> Result<i64, AnseraError> {
    let queue_name = queue_name.to_string();
    let payload = payload.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO queue (queue_name, payload) VALUES (?1, ?2)",
                params![queue_name, payload],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Dequeue the next pending entry from the named queue.
///
/// Atomically selects the oldest pending entry and marks it as "processing"
/// with a 5-minute lock timeout. Returns `None` if the queue is empty.
pub async fn dequeue(db: &Database, queue_name: &str) -> Result<Option<QueueEntry>, AnseraError> {
    let queue_name = queue_name.to_string();
    db.connection()
        .call(move |conn| {
            // Transaction so find + lock is atomic against other consumers.
            let tx = conn.transaction()?;

            let result = {
                let mut stmt = tx.prepare(
                    "SELECT id, queue_name, payload, status, attempts, max_attempts,
                            created_at, updated_at, locked_until
                     FROM queue
                     WHERE queue_name = ?1 AND status = 'pending'
                     ORDER BY id ASC
                     LIMIT 1",
                )?;
                stmt.query_row(params![queue_name], |row| {
                    Ok(QueueEntry {
                        id: row.get(0)?,
                        queue_name: row.get(1)?,
                        payload: row.get(2)?,
                        status: row.get(3)?,
                        attempts: row.get(4)?,
                        max_attempts: row.get(5)?,
                        created_at: row.get(6)?,
                        updated_at: row.get(7)?,
                        locked_until: row.get(8)?,
                    })
                })
            };

            match result {
                Ok(entry) => {
                    tx.execute(
                        "UPDATE queue SET status = 'processing',
                         locked_until = strftime('%Y-%m-%dT%H:%M:%fZ', 'now', '+5 minutes'),
                         updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                         WHERE id = ?1",
                        params![entry.id],
                    )?;
                    tx.commit()?;

                    Ok(Some(QueueEntry {
                        status: "processing".to_string(),
                        ..entry
                    }))
                }
                Err(rusqlite::Error::QueryReturnedNoRows) => {
                    tx.commit()?;
                    Ok(None)
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Acknowledge successful processing of a queue entry.
pub async fn ack(db: &Database, id: i64) -> Result<(), AnseraError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE queue SET status = 'completed',
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?1",
                params![id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Mark a queue entry as failed.
///
/// Increments attempts. If attempts >= max_attempts, sets status to "failed".
/// Otherwise resets to "pending" for redelivery and clears the lock.
pub async fn fail(db: &Database, id: i64) -> Result<(), AnseraError> {
    db.connection()
        .call(move |conn| {
            let (attempts, max_attempts): (i32, i32) = conn.query_row(
                "SELECT attempts, max_attempts FROM queue WHERE id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;

            let new_attempts = attempts + 1;
            let status = if new_attempts >= max_attempts {
                "failed"
            } else {
                "pending"
            };
            conn.execute(
                "UPDATE queue SET status = ?1, attempts = ?2,
                 locked_until = NULL,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?3",
                params![status, new_attempts, id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    async fn status_of(db: &Database, id: i64) -> (String, i32) {
        db.connection()
            .call(move |conn| {
                let row = conn.query_row(
                    "SELECT status, attempts FROM queue WHERE id = ?1",
                    params![id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )?;
                Ok(row)
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn enqueue_and_dequeue_lifecycle() {
        let db = setup_db().await;

        let id = enqueue(&db, MESSAGE_PERSIST_QUEUE, r#"{"uid":"m1"}"#)
            .await
            .unwrap();
        assert!(id > 0);

        let entry = dequeue(&db, MESSAGE_PERSIST_QUEUE).await.unwrap().unwrap();
        assert_eq!(entry.id, id);
        assert_eq!(entry.status, "processing");
        assert_eq!(entry.payload, r#"{"uid":"m1"}"#);

        // Queue is now empty (no more pending).
        assert!(dequeue(&db, MESSAGE_PERSIST_QUEUE).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn queues_are_independent() {
        let db = setup_db().await;

        enqueue(&db, MESSAGE_PERSIST_QUEUE, "msg").await.unwrap();
        enqueue(&db, ROBOT_RECORD_QUEUE, "record").await.unwrap();

        let entry = dequeue(&db, ROBOT_RECORD_QUEUE).await.unwrap().unwrap();
        assert_eq!(entry.payload, "record");

        // Draining one queue leaves the other untouched.
        assert!(dequeue(&db, ROBOT_RECORD_QUEUE).await.unwrap().is_none());
        let entry = dequeue(&db, MESSAGE_PERSIST_QUEUE).await.unwrap().unwrap();
        assert_eq!(entry.payload, "msg");
    }

    #[tokio::test]
    async fn ack_marks_completed() {
        let db = setup_db().await;

        let id = enqueue(&db, "test", "payload").await.unwrap();
        dequeue(&db, "test").await.unwrap().unwrap();
        ack(&db, id).await.unwrap();

        let (status, _) = status_of(&db, id).await;
        assert_eq!(status, "completed");
    }

    #[tokio::test]
    async fn fail_increments_attempts_then_gives_up() {
        let db = setup_db().await;

        let id = enqueue(&db, "test", "payload").await.unwrap();

        // Default max_attempts is 3. First two failures retry.
        for expected in 1..=2 {
            dequeue(&db, "test").await.unwrap().unwrap();
            fail(&db, id).await.unwrap();
            let (status, attempts) = status_of(&db, id).await;
            assert_eq!(status, "pending");
            assert_eq!(attempts, expected);
        }

        // Third failure is terminal.
        dequeue(&db, "test").await.unwrap().unwrap();
        fail(&db, id).await.unwrap();
        let (status, attempts) = status_of(&db, id).await;
        assert_eq!(status, "failed");
        assert_eq!(attempts, 3);
        assert!(dequeue(&db, "test").await.unwrap().is_none());
    }
}
