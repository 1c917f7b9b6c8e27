// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread: the [`Database`] struct IS the single writer. Query modules accept
//! `&Database` and call through `connection().call()`. Do NOT create
//! additional `Connection` instances for writes.

use ansera_core::AnseraError;
use tokio_rusqlite::Connection;
use tracing::debug;

/// Embedded schema, applied idempotently on open.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS queue (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    queue_name   TEXT NOT NULL,
    payload      TEXT NOT NULL,
    status       TEXT NOT NULL DEFAULT 'pending',
    attempts     INTEGER NOT NULL DEFAULT 0,
    max_attempts INTEGER NOT NULL DEFAULT 3,
    created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    locked_until TEXT
);

CREATE INDEX IF NOT EXISTS idx_queue_pending ON queue (queue_name, status, id);

CREATE TABLE IF NOT EXISTS qa_pairs (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    uid          TEXT NOT NULL UNIQUE,
    question     TEXT NOT NULL,
    answer       TEXT NOT NULL,
    kb_uid       TEXT,
    category_uid TEXT,
    enabled      INTEGER NOT NULL DEFAULT 1,
    deleted      INTEGER NOT NULL DEFAULT 0,
    version      INTEGER NOT NULL DEFAULT 0,
    click_count  INTEGER NOT NULL DEFAULT 0,
    up_count     INTEGER NOT NULL DEFAULT 0,
    down_count   INTEGER NOT NULL DEFAULT 0,
    created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_qa_kb ON qa_pairs (kb_uid, enabled, deleted);
";

/// Handle to the single-writer SQLite database.
///
/// Cloning is cheap; all clones feed the same background writer thread.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path`, applies PRAGMAs and schema.
    pub async fn open(path: &str) -> Result<Self, AnseraError> {
        let conn = Connection::open(path).await.map_err(map_tr_err)?;
        let db = Self { conn };
        db.initialize().await?;
        debug!(path, "database opened");
        Ok(db)
    }

    /// Opens an in-memory database. Used by tests and ephemeral deployments.
    pub async fn open_in_memory() -> Result<Self, AnseraError> {
        let conn = Connection::open_in_memory().await.map_err(map_tr_err)?;
        let db = Self { conn };
        db.initialize().await?;
        Ok(db)
    }

    async fn initialize(&self) -> Result<(), AnseraError> {
        self.conn
            .call(|conn| {
                // WAL keeps readers unblocked while the writer thread works.
                conn.pragma_update(None, "journal_mode", "WAL")?;
                conn.pragma_update(None, "synchronous", "NORMAL")?;
                conn.pragma_update(None, "foreign_keys", "ON")?;
                conn.pragma_update(None, "busy_timeout", 5000)?;
                conn.execute_batch(SCHEMA)?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    /// The underlying tokio-rusqlite connection handle.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the database, flushing pending writes.
    pub async fn close(self) -> Result<(), AnseraError> {
        self.conn.close().await.map_err(map_tr_err)
    }
}

/// Maps a tokio-rusqlite error into the workspace error type.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> AnseraError {
    AnseraError::Storage {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_applies_schema_idempotently() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let path_str = path.to_str().unwrap();

        let db = Database::open(path_str).await.unwrap();
        db.close().await.unwrap();

        // Re-opening an existing file must not fail on CREATE statements.
        let db = Database::open(path_str).await.unwrap();
        let tables: i64 = db
            .connection()
            .call(|conn| {
                let n = conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                     AND name IN ('queue', 'qa_pairs')",
                    [],
                    |row| row.get(0),
                )?;
                Ok(n)
            })
            .await
            .unwrap();
        assert_eq!(tables, 2);
        db.close().await.unwrap();
    }
}
