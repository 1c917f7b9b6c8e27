// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword search over stored QA pairs as a [`SearchProvider`].
//!
//! This backs the search-only branch (and deployments without a vector
//! store): snippets are the answers of enabled pairs whose question contains
//! the query text. A vector-search provider plugs into the same trait.

use async_trait::async_trait;

use ansera_core::{AnseraError, SearchProvider};

use crate::database::Database;
use crate::queries::qa;

/// Cap on snippets returned per query.
const MAX_SNIPPETS: i64 = 5;

/// QA-table-backed keyword search.
#[derive(Clone)]
pub struct QaKeywordSearch {
    db: Database,
}

impl QaKeywordSearch {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SearchProvider for QaKeywordSearch {
    async fn search_text(&self, query: &str, kb_uid: &str) -> Result<Vec<String>, AnseraError> {
        let pairs = qa::find_by_question_contains(&self.db, query, kb_uid, MAX_SNIPPETS).await?;
        Ok(pairs.into_iter().map(|p| p.answer).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QaPair;

    #[tokio::test]
    async fn returns_answers_as_snippets() {
        let db = Database::open_in_memory().await.unwrap();
        qa::create(
            &db,
            &QaPair {
                kb_uid: Some("kb-1".into()),
                ..QaPair::new("qa-1", "What is the refund policy?", "Refunds within 30 days")
            },
        )
        .await
        .unwrap();

        let search = QaKeywordSearch::new(db);
        let snippets = search.search_text("refund", "kb-1").await.unwrap();
        assert_eq!(snippets, vec!["Refunds within 30 days".to_string()]);

        // No hits is an empty vec, not an error.
        assert!(search.search_text("shipping", "kb-1").await.unwrap().is_empty());
    }
}
