// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge-base search capability.

use async_trait::async_trait;

use crate::error::AnseraError;

/// Searches a named knowledge base for snippets relevant to a query.
///
/// An empty result is a valid, meaningful outcome: it routes the pipeline
/// onto the sentinel fallback. Implementations wrap whatever index backs the
/// knowledge base (vector store, keyword table); the pipeline never sees the
/// difference.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns relevant text snippets, best match first.
    async fn search_text(&self, query: &str, kb_uid: &str) -> Result<Vec<String>, AnseraError>;
}
