// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock knowledge-base search for deterministic testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ansera_core::{AnseraError, SearchProvider};

/// A mock search provider that returns pre-configured snippet lists.
///
/// Result sets are popped from a FIFO queue; when the queue is empty, an
/// empty result (the "no matching content" case) is returned. Every call is
/// counted and its arguments recorded.
pub struct MockSearch {
    results: Arc<Mutex<VecDeque<Vec<String>>>>,
    calls: AtomicU32,
    last_query: Arc<Mutex<Option<(String, String)>>>,
}

impl MockSearch {
    /// Create a mock that always returns empty results.
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(VecDeque::new())),
            calls: AtomicU32::new(0),
            last_query: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a mock pre-loaded with the given result sets.
    pub fn with_results(results: Vec<Vec<String>>) -> Self {
        Self {
            results: Arc::new(Mutex::new(VecDeque::from(results))),
            ..Self::new()
        }
    }

    /// Number of `search_text` calls made so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// The `(query, kb_uid)` of the most recent call.
    pub async fn last_query(&self) -> Option<(String, String)> {
        self.last_query.lock().await.clone()
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search_text(&self, query: &str, kb_uid: &str) -> Result<Vec<String>, AnseraError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().await = Some((query.to_string(), kb_uid.to_string()));
        Ok(self.results.lock().await.pop_front().unwrap_or_default())
    }
}
