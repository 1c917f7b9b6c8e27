// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! QA-pair entity operations.
//!
//! Updates are version-guarded: `try_update` bumps the optimistic-lock token
//! and reports a conflict by returning `None` instead of touching the row.
//! The reconciliation policy on conflict lives in [`crate::writer`], not here.

use ansera_core::AnseraError;
use rusqlite::params;

use crate::database::Database;
use crate::models::QaPair;

fn row_to_qa(row: &rusqlite::Row<'_>) -> Result<QaPair, rusqlite::Error> {
    Ok(QaPair {
        uid: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        kb_uid: row.get(3)?,
        category_uid: row.get(4)?,
        enabled: row.get(5)?,
        deleted: row.get(6)?,
        version: row.get(7)?,
        click_count: row.get(8)?,
        up_count: row.get(9)?,
        down_count: row.get(10)?,
    })
}

const QA_COLUMNS: &str = "uid, question, answer, kb_uid, category_uid, enabled, deleted,
                          version, click_count, up_count, down_count";

/// Insert a new QA pair. Idempotent on uid: if a row with the same uid
/// already exists, the existing row is returned untouched.
pub async fn create(db: &Database, pair: &QaPair) -> Result<QaPair, AnseraError> {
    let pair = pair.clone();
    db.connection()
        .call(move |conn| {
            let existing = conn
                .query_row(
                    &format!("SELECT {QA_COLUMNS} FROM qa_pairs WHERE uid = ?1"),
                    params![pair.uid],
                    row_to_qa,
                )
                .map(Some)
                .or_else(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => Ok(None),
                    other => Err(other),
                })?;
            if let Some(existing) = existing {
                return Ok(existing);
            }

            conn.execute(
                "INSERT INTO qa_pairs (uid, question, answer, kb_uid, category_uid,
                                       enabled, deleted, version)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0)",
                params![
                    pair.uid,
                    pair.question,
                    pair.answer,
                    pair.kb_uid,
                    pair.category_uid,
                    pair.enabled,
                    pair.deleted,
                ],
            )?;
            // Counters start at the column defaults; zero them in the echo so
            // the returned entity matches the stored row.
            Ok(QaPair {
                version: 0,
                click_count: 0,
                up_count: 0,
                down_count: 0,
                ..pair
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch a QA pair by uid. Soft-deleted rows are still returned; callers that
/// care filter on the flag.
pub async fn find_by_uid(db: &Database, uid: &str) -> Result<Option<QaPair>, AnseraError> {
    let uid = uid.to_string();
    db.connection()
        .call(move |conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {QA_COLUMNS} FROM qa_pairs WHERE uid = ?1"),
                    params![uid],
                    row_to_qa,
                )
                .map(Some)
                .or_else(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => Ok(None),
                    other => Err(other),
                })?;
            Ok(row)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Keyword search over enabled, non-deleted pairs in one knowledge base.
///
/// This is the search-only fallback path; best matches are simply the most
/// recently updated rows containing the query substring.
pub async fn find_by_question_contains(
    db: &Database,
    query: &str,
    kb_uid: &str,
    limit: i64,
) -> Result<Vec<QaPair>, AnseraError> {
    // Escape the escape character itself before the LIKE wildcards.
    let pattern = format!(
        "%{}%",
        query
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    );
    let kb_uid = kb_uid.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {QA_COLUMNS} FROM qa_pairs
                 WHERE kb_uid = ?1 AND enabled = 1 AND deleted = 0
                   AND question LIKE ?2 ESCAPE '\\'
                 ORDER BY updated_at DESC
                 LIMIT ?3"
            ))?;
            let rows = stmt.query_map(params![kb_uid, pattern, limit], row_to_qa)?;
            let mut pairs = Vec::new();
            for row in rows {
                pairs.push(row?);
            }
            Ok(pairs)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Version-guarded full-field update.
///
/// Returns the saved row with its bumped version on success, or `None` when
/// the entity's version token is stale (an optimistic-lock conflict).
pub async fn try_update(db: &Database, pair: &QaPair) -> Result<Option<QaPair>, AnseraError> {
    let pair = pair.clone();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE qa_pairs
                 SET question = ?1, answer = ?2, kb_uid = ?3, category_uid = ?4,
                     enabled = ?5, deleted = ?6, click_count = ?7, up_count = ?8,
                     down_count = ?9, version = version + 1,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE uid = ?10 AND version = ?11",
                params![
                    pair.question,
                    pair.answer,
                    pair.kb_uid,
                    pair.category_uid,
                    pair.enabled,
                    pair.deleted,
                    pair.click_count,
                    pair.up_count,
                    pair.down_count,
                    pair.uid,
                    pair.version,
                ],
            )?;
            if changed == 0 {
                Ok(None)
            } else {
                Ok(Some(QaPair {
                    version: pair.version + 1,
                    ..pair
                }))
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Flip the soft-delete flag through the version-guarded path.
///
/// Missing rows are a no-op, matching the original delete semantics.
pub async fn soft_delete(db: &Database, uid: &str) -> Result<(), AnseraError> {
    if let Some(pair) = find_by_uid(db, uid).await? {
        let deleted = QaPair {
            deleted: true,
            ..pair
        };
        crate::writer::save_with_reconcile(&crate::writer::QaStore::new(db), deleted).await?;
    }
    Ok(())
}

/// Enable or disable a pair through the version-guarded path.
pub async fn set_enabled(db: &Database, uid: &str, enabled: bool) -> Result<(), AnseraError> {
    if let Some(pair) = find_by_uid(db, uid).await? {
        let toggled = QaPair { enabled, ..pair };
        crate::writer::save_with_reconcile(&crate::writer::QaStore::new(db), toggled).await?;
    }
    Ok(())
}

/// Visitor-feedback counters on a QA pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingCounter {
    Click,
    Up,
    Down,
}

impl RatingCounter {
    fn column(self) -> &'static str {
        match self {
            RatingCounter::Click => "click_count",
            RatingCounter::Up => "up_count",
            RatingCounter::Down => "down_count",
        }
    }
}

/// Bump a rating counter by one.
///
/// Increments are commutative, so this is an atomic in-place add rather than
/// a version-guarded replacement; the reconciliation merge in
/// [`crate::writer::QaStore`] leaves counters alone for the same reason.
pub async fn bump_counter(
    db: &Database,
    uid: &str,
    counter: RatingCounter,
) -> Result<(), AnseraError> {
    let uid = uid.to_string();
    let column = counter.column();
    db.connection()
        .call(move |conn| {
            conn.execute(
                &format!(
                    "UPDATE qa_pairs
                     SET {column} = {column} + 1,
                         updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                     WHERE uid = ?1"
                ),
                params![uid],
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

    fn kb_pair(uid: &str, question: &str) -> QaPair {
        QaPair {
            kb_uid: Some("kb-1".into()),
            ..QaPair::new(uid, question, "an answer")
        }
    }

    #[tokio::test]
    async fn create_is_idempotent_on_uid() {
        let db = setup_db().await;

        let first = create(&db, &kb_pair("qa-1", "How do refunds work?"))
            .await
            .unwrap();
        assert_eq!(first.version, 0);

        // Second create with the same uid returns the stored row, not an error.
        let second = create(&db, &kb_pair("qa-1", "different question"))
            .await
            .unwrap();
        assert_eq!(second.question, "How do refunds work?");
    }

    #[tokio::test]
    async fn create_echoes_the_stored_counters() {
        let db = setup_db().await;
        let mut pair = kb_pair("qa-1", "How do refunds work?");
        pair.click_count = 7;
        pair.up_count = 3;

        let created = create(&db, &pair).await.unwrap();
        assert_eq!(created.click_count, 0);
        assert_eq!(created.up_count, 0);
        assert_eq!(created.down_count, 0);

        let stored = find_by_uid(&db, "qa-1").await.unwrap().unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn try_update_bumps_version_and_detects_staleness() {
        let db = setup_db().await;
        let pair = create(&db, &kb_pair("qa-1", "How do refunds work?"))
            .await
            .unwrap();

        let mut edit = pair.clone();
        edit.answer = "Within 30 days".into();
        let saved = try_update(&db, &edit).await.unwrap().unwrap();
        assert_eq!(saved.version, 1);
        assert_eq!(saved.answer, "Within 30 days");

        // The original version-0 token is now stale.
        let stale = try_update(&db, &edit).await.unwrap();
        assert!(stale.is_none());

        let stored = find_by_uid(&db, "qa-1").await.unwrap().unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(stored.answer, "Within 30 days");
    }

    #[tokio::test]
    async fn keyword_search_filters_kb_enabled_and_deleted() {
        let db = setup_db().await;
        create(&db, &kb_pair("qa-1", "How do refunds work?"))
            .await
            .unwrap();
        create(&db, &kb_pair("qa-2", "refund deadlines explained"))
            .await
            .unwrap();
        let mut disabled = kb_pair("qa-3", "refund for enterprise plans");
        disabled.enabled = false;
        create(&db, &disabled).await.unwrap();
        let mut other_kb = kb_pair("qa-4", "refund policy");
        other_kb.kb_uid = Some("kb-2".into());
        create(&db, &other_kb).await.unwrap();

        let hits = find_by_question_contains(&db, "refund", "kb-1", 10)
            .await
            .unwrap();
        let uids: Vec<&str> = hits.iter().map(|p| p.uid.as_str()).collect();
        assert_eq!(hits.len(), 2);
        assert!(uids.contains(&"qa-1") && uids.contains(&"qa-2"));

        assert!(find_by_question_contains(&db, "shipping", "kb-1", 10)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn keyword_search_treats_wildcards_and_backslashes_literally() {
        let db = setup_db().await;
        create(&db, &kb_pair("qa-1", "Is the discount 100% off?"))
            .await
            .unwrap();
        create(&db, &kb_pair("qa-2", r"Where does C:\temp get cleaned up?"))
            .await
            .unwrap();
        create(&db, &kb_pair("qa-3", "totally unrelated"))
            .await
            .unwrap();

        let hits = find_by_question_contains(&db, "100%", "kb-1", 10)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].uid, "qa-1");

        let hits = find_by_question_contains(&db, r"C:\temp", "kb-1", 10)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].uid, "qa-2");

        // A bare `%` query must not degenerate into match-everything.
        let hits = find_by_question_contains(&db, "%", "kb-1", 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].uid, "qa-1");
    }

    #[tokio::test]
    async fn soft_delete_keeps_the_row() {
        let db = setup_db().await;
        create(&db, &kb_pair("qa-1", "How do refunds work?"))
            .await
            .unwrap();

        soft_delete(&db, "qa-1").await.unwrap();

        let stored = find_by_uid(&db, "qa-1").await.unwrap().unwrap();
        assert!(stored.deleted);

        // Deleted rows no longer surface in search.
        assert!(find_by_question_contains(&db, "refund", "kb-1", 10)
            .await
            .unwrap()
            .is_empty());

        // Deleting a missing uid is a no-op.
        soft_delete(&db, "qa-404").await.unwrap();
    }

    #[tokio::test]
    async fn enable_toggle_controls_search_visibility() {
        let db = setup_db().await;
        create(&db, &kb_pair("qa-1", "How do refunds work?"))
            .await
            .unwrap();

        set_enabled(&db, "qa-1", false).await.unwrap();
        assert!(find_by_question_contains(&db, "refund", "kb-1", 10)
            .await
            .unwrap()
            .is_empty());

        set_enabled(&db, "qa-1", true).await.unwrap();
        assert_eq!(
            find_by_question_contains(&db, "refund", "kb-1", 10)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn counter_bumps_accumulate_without_touching_the_version() {
        let db = setup_db().await;
        create(&db, &kb_pair("qa-1", "How do refunds work?"))
            .await
            .unwrap();

        bump_counter(&db, "qa-1", RatingCounter::Click).await.unwrap();
        bump_counter(&db, "qa-1", RatingCounter::Click).await.unwrap();
        bump_counter(&db, "qa-1", RatingCounter::Up).await.unwrap();
        bump_counter(&db, "qa-1", RatingCounter::Down).await.unwrap();

        let stored = find_by_uid(&db, "qa-1").await.unwrap().unwrap();
        assert_eq!(stored.click_count, 2);
        assert_eq!(stored.up_count, 1);
        assert_eq!(stored.down_count, 1);
        assert_eq!(stored.version, 0);
    }
}
