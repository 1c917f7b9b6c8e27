// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for storage entities.

use serde::{Deserialize, Serialize};

/// One entry in the durable queue table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: i64,
    pub queue_name: String,
    pub payload: String,
    /// pending | processing | completed | failed
    pub status: String,
    pub attempts: i32,
    pub max_attempts: i32,
    pub created_at: String,
    pub updated_at: String,
    pub locked_until: Option<String>,
}

/// A question/answer pair entity.
///
/// `version` is the optimistic-lock token: every successful update bumps it,
/// and a stale token makes the guarded UPDATE match zero rows. Deletion only
/// flips `deleted`; rows are never physically removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    pub uid: String,
    pub question: String,
    pub answer: String,
    pub kb_uid: Option<String>,
    pub category_uid: Option<String>,
    pub enabled: bool,
    pub deleted: bool,
    pub version: i64,
    pub click_count: i64,
    pub up_count: i64,
    pub down_count: i64,
}

impl QaPair {
    /// A fresh pair with zeroed counters and version, ready for insert.
    pub fn new(uid: impl Into<String>, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            question: question.into(),
            answer: answer.into(),
            kb_uid: None,
            category_uid: None,
            enabled: true,
            deleted: false,
            version: 0,
            click_count: 0,
            up_count: 0,
            down_count: 0,
        }
    }
}
