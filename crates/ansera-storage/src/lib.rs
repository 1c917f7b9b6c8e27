// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Ansera answer engine.
//!
//! Provides WAL-mode SQLite storage with a single-writer concurrency model
//! via `tokio-rusqlite`, the durable queue backing the two persistence
//! sinks, the QA-pair entity store with optimistic versioning and soft
//! delete, and the generic conflict-safe writer.

pub mod database;
pub mod models;
pub mod queries;
pub mod search;
pub mod sink;
pub mod writer;

pub use database::Database;
pub use models::{QaPair, QueueEntry};
pub use search::QaKeywordSearch;
pub use sink::QueueSinks;
pub use writer::{save_with_reconcile, EntityStore, QaStore, SaveOutcome};
