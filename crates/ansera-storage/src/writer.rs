// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic optimistic-lock save with a single reconciliation pass.
//!
//! Every mutable entity kind shares the same conflict shape: attempt an
//! optimistic save; on a stale version token, reload the latest row, reapply
//! only the caller-intended fields onto it, and save exactly once more. A
//! second conflict is fatal. No lock is held across the reload, so a writer
//! racing into that window surfaces as the fatal case.

use async_trait::async_trait;
use tracing::warn;

use ansera_core::AnseraError;

use crate::database::Database;
use crate::models::QaPair;
use crate::queries::qa;

/// Result of one optimistic save attempt.
#[derive(Debug)]
pub enum SaveOutcome<E> {
    /// The row was saved; carries the stored entity with its new version.
    Saved(E),
    /// The entity's version token was stale.
    Conflict,
}

/// Per-entity-kind persistence capability consumed by [`save_with_reconcile`].
///
/// Implementations supply the optimistic save, the reload, and the
/// field-merge policy; the reconciliation sequencing lives in one place.
#[async_trait]
pub trait EntityStore: Send + Sync {
    type Entity: Send + Sync + Clone;

    /// The entity's unique external identifier.
    fn uid(entity: &Self::Entity) -> &str;

    /// One optimistic save attempt (version-guarded write, no lock held).
    async fn try_save(&self, entity: &Self::Entity)
        -> Result<SaveOutcome<Self::Entity>, AnseraError>;

    /// Fetch the currently stored row.
    async fn reload(&self, uid: &str) -> Result<Option<Self::Entity>, AnseraError>;

    /// Reapply the caller-intended fields onto the freshly reloaded row.
    ///
    /// This must NOT blindly overwrite `latest`: only fields the caller set
    /// out to change move over, so concurrent changes to other fields
    /// survive the merge.
    fn reapply(&self, latest: &mut Self::Entity, intended: &Self::Entity);
}

/// Save an entity, reconciling at most one optimistic-lock conflict.
///
/// A second conflict during the reconciliation window is treated as fatal
/// and surfaces as [`AnseraError::Conflict`] naming the entity -- callers
/// must re-read and retry at their own level if they want to go again.
pub async fn save_with_reconcile<S: EntityStore>(
    store: &S,
    entity: S::Entity,
) -> Result<S::Entity, AnseraError> {
    match store.try_save(&entity).await? {
        SaveOutcome::Saved(saved) => Ok(saved),
        SaveOutcome::Conflict => {
            let uid = S::uid(&entity).to_string();
            warn!(uid = uid.as_str(), "optimistic lock conflict, reconciling once");

            let mut latest = store
                .reload(&uid)
                .await?
                .ok_or_else(|| AnseraError::Conflict { uid: uid.clone() })?;
            store.reapply(&mut latest, &entity);

            match store.try_save(&latest).await? {
                SaveOutcome::Saved(saved) => Ok(saved),
                SaveOutcome::Conflict => Err(AnseraError::Conflict { uid }),
            }
        }
    }
}

/// [`EntityStore`] implementation for QA pairs.
pub struct QaStore<'a> {
    db: &'a Database,
}

impl<'a> QaStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EntityStore for QaStore<'_> {
    type Entity = QaPair;

    fn uid(entity: &QaPair) -> &str {
        &entity.uid
    }

    async fn try_save(&self, entity: &QaPair) -> Result<SaveOutcome<QaPair>, AnseraError> {
        match qa::try_update(self.db, entity).await? {
            Some(saved) => Ok(SaveOutcome::Saved(saved)),
            None => Ok(SaveOutcome::Conflict),
        }
    }

    async fn reload(&self, uid: &str) -> Result<Option<QaPair>, AnseraError> {
        qa::find_by_uid(self.db, uid).await
    }

    fn reapply(&self, latest: &mut QaPair, intended: &QaPair) {
        latest.question = intended.question.clone();
        latest.answer = intended.answer.clone();
        latest.kb_uid = intended.kb_uid.clone();
        latest.category_uid = intended.category_uid.clone();
        latest.enabled = intended.enabled;
        latest.deleted = intended.deleted;
        // Counters and version stay from the reloaded row: a concurrent
        // rating or click is not something this caller set out to change.
    }
}
