// BookmarkStore owns the active and completed collections and mirrors them to a KeyValueStore.
//
// Responsibilities
// - Publish in memory only what has been persisted.
// - Queue every mutation behind one write gate so calls never interleave.
// - Remember a storage failure (dirty) and reload before the next mutation.
// - Keep the write-ahead marker of a half finished transition and finish it first.
// - Reconcile interrupted transitions and invariant breaks when loading.
//
// The operations themselves live in use_cases; this file only holds state and plumbing.

use crate::modules::bookmarks::core::bookmarked_job::BookmarkedJob;
use crate::modules::bookmarks::core::collections::{BookmarkCollections, Residency};
use crate::modules::bookmarks::core::errors::{BookmarkError, Operation};
use crate::modules::bookmarks::core::transitions::{
    TransitionKind, TransitionMarker, TransitionStep,
};
use crate::shared::core::clock::Clock;
use crate::shared::infrastructure::key_value_store::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::{debug, info, warn};

pub const ACTIVE_KEY: &str = "bookmarkedJobs";
pub const COMPLETED_KEY: &str = "completedApplications";
pub const PENDING_TRANSITION_KEY: &str = "pendingTransition";

pub fn collection_key(residency: Residency) -> &'static str {
    match residency {
        Residency::Completed => COMPLETED_KEY,
        Residency::Active | Residency::NotTracked => ACTIVE_KEY,
    }
}

/// A transition whose marker is still live, and the write it still owes.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTransition {
    pub marker: TransitionMarker,
    pub missing: TransitionStep,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreStatus {
    pub is_loading: bool,
    pub is_dirty: bool,
    pub pending_job_id: Option<String>,
    pub pending_kind: Option<TransitionKind>,
    pub pending_missing: Option<TransitionStep>,
}

pub struct BookmarkStore<TStorage>
where
    TStorage: KeyValueStore + ?Sized,
{
    storage: Arc<TStorage>,
    clock: Arc<dyn Clock>,
    state: RwLock<BookmarkCollections>,
    pending: RwLock<Option<PendingTransition>>,
    write_gate: Mutex<()>,
    is_loading: AtomicBool,
    is_dirty: AtomicBool,
}

impl<TStorage> BookmarkStore<TStorage>
where
    TStorage: KeyValueStore + ?Sized,
{
    /// Starts empty, loading and dirty: the first mutation or refresh loads from storage.
    pub fn new(storage: Arc<TStorage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            state: RwLock::new(BookmarkCollections::default()),
            pending: RwLock::new(None),
            write_gate: Mutex::new(()),
            is_loading: AtomicBool::new(true),
            is_dirty: AtomicBool::new(true),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::SeqCst)
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty.load(Ordering::SeqCst)
    }

    pub async fn active(&self) -> Vec<BookmarkedJob> {
        self.state.read().await.active.clone()
    }

    pub async fn completed(&self) -> Vec<BookmarkedJob> {
        self.state.read().await.completed.clone()
    }

    pub async fn snapshot(&self) -> BookmarkCollections {
        self.state.read().await.clone()
    }

    pub async fn pending_transition(&self) -> Option<PendingTransition> {
        self.pending.read().await.clone()
    }

    pub async fn status(&self) -> StoreStatus {
        let pending = self.pending_transition().await;
        StoreStatus {
            is_loading: self.is_loading(),
            is_dirty: self.is_dirty(),
            pending_job_id: pending.as_ref().map(|p| p.marker.job_id.clone()),
            pending_kind: pending.as_ref().map(|p| p.marker.kind),
            pending_missing: pending.as_ref().map(|p| p.missing),
        }
    }

    /// Reload both collections from storage and replace the in memory state.
    pub async fn refresh(&self) -> Result<(), BookmarkError> {
        let _gate = self.write_gate.lock().await;
        self.reload_locked().await
    }

    /// Take the write gate, reloading if dirty and finishing any pending transition first.
    pub(crate) async fn begin(&self) -> Result<MutexGuard<'_, ()>, BookmarkError> {
        let (gate, _) = self.begin_resuming().await?;
        Ok(gate)
    }

    /// Like `begin`, also handing back the pending transition finished under the gate.
    pub(crate) async fn begin_resuming(
        &self,
    ) -> Result<(MutexGuard<'_, ()>, Option<PendingTransition>), BookmarkError> {
        let gate = self.write_gate.lock().await;
        if self.is_dirty() {
            self.reload_locked().await?;
        }
        let resumed = self.resume_locked().await?;
        Ok((gate, resumed))
    }

    pub(crate) async fn publish(&self, collections: BookmarkCollections) {
        *self.state.write().await = collections;
    }

    pub(crate) async fn publish_active(&self, active: Vec<BookmarkedJob>) {
        self.state.write().await.active = active;
    }

    pub(crate) async fn set_pending(&self, pending: Option<PendingTransition>) {
        *self.pending.write().await = pending;
    }

    pub(crate) fn mark_dirty(&self) {
        self.is_dirty.store(true, Ordering::SeqCst);
    }

    pub(crate) async fn write<T>(
        &self,
        operation: Operation,
        key: &str,
        value: &T,
    ) -> Result<(), BookmarkError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let encoded = serde_json::to_string(value).map_err(|source| BookmarkError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.storage
            .set(key, &encoded)
            .await
            .map_err(|source| BookmarkError::Persistence { operation, source })
    }

    /// Single write used by plain mutations. A failure leaves the durable value unknown.
    pub(crate) async fn write_or_mark_dirty<T>(
        &self,
        operation: Operation,
        key: &str,
        value: &T,
    ) -> Result<(), BookmarkError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let result = self.write(operation, key, value).await;
        if let Err(err) = &result {
            self.mark_dirty();
            warn!(key, error = %err, cause = ?err, "persisting bookmarks failed, store marked dirty");
        }
        result
    }

    pub(crate) async fn clear_marker(&self, operation: Operation) -> Result<(), BookmarkError> {
        self.storage
            .remove(PENDING_TRANSITION_KEY)
            .await
            .map_err(|source| BookmarkError::Persistence { operation, source })
    }

    /// Write whatever a pending transition still owes, from the in memory state.
    async fn resume_locked(&self) -> Result<Option<PendingTransition>, BookmarkError> {
        let Some(pending) = self.pending_transition().await else {
            return Ok(None);
        };
        let kind = pending.marker.kind;
        let job_id = pending.marker.job_id.clone();

        if pending.missing == TransitionStep::RemoveFromSource {
            let snapshot = self.snapshot().await;
            let source = match kind.source() {
                Residency::Completed => &snapshot.completed,
                _ => &snapshot.active,
            };
            if let Err(err) = self
                .write(Operation::ResumeTransition, collection_key(kind.source()), source)
                .await
            {
                warn!(job_id = %job_id, %kind, error = %err, "resuming transition failed");
                return Err(BookmarkError::PartialTransition {
                    job_id,
                    kind,
                    missing: TransitionStep::RemoveFromSource,
                });
            }
        }

        match self.clear_marker(Operation::ResumeTransition).await {
            Ok(()) => {
                self.set_pending(None).await;
                info!(job_id = %job_id, %kind, "pending transition finished");
            }
            Err(err) => {
                self.set_pending(Some(PendingTransition {
                    missing: TransitionStep::ClearMarker,
                    ..pending.clone()
                }))
                .await;
                warn!(job_id = %job_id, %kind, error = %err, "transition marker left in storage");
            }
        }
        Ok(Some(pending))
    }

    async fn reload_locked(&self) -> Result<(), BookmarkError> {
        self.is_loading.store(true, Ordering::SeqCst);
        let result = self.load_and_reconcile().await;
        match &result {
            Ok(collections) => {
                debug!(
                    active = collections.active.len(),
                    completed = collections.completed.len(),
                    "bookmarks loaded"
                );
                self.publish(collections.clone()).await;
                self.set_pending(None).await;
                self.is_dirty.store(false, Ordering::SeqCst);
            }
            Err(err) => {
                self.mark_dirty();
                warn!(error = %err, cause = ?err, "loading bookmarks failed");
            }
        }
        self.is_loading.store(false, Ordering::SeqCst);
        result.map(|_| ())
    }

    async fn load_and_reconcile(&self) -> Result<BookmarkCollections, BookmarkError> {
        let mut active: Vec<BookmarkedJob> = self.read(ACTIVE_KEY).await?.unwrap_or_default();
        let mut completed: Vec<BookmarkedJob> =
            self.read(COMPLETED_KEY).await?.unwrap_or_default();
        let marker: Option<TransitionMarker> = self.read(PENDING_TRANSITION_KEY).await?;

        let mut active_changed = false;
        let mut completed_changed = false;

        if let Some(marker) = &marker {
            let (source, target, source_changed, target_changed) = match marker.kind {
                TransitionKind::Complete => (
                    &mut active,
                    &mut completed,
                    &mut active_changed,
                    &mut completed_changed,
                ),
                TransitionKind::Reactivate => (
                    &mut completed,
                    &mut active,
                    &mut completed_changed,
                    &mut active_changed,
                ),
            };
            let landed = target.iter().any(|job| job.job_id == marker.job_id);
            let in_source = source.iter().any(|job| job.job_id == marker.job_id);

            if landed || !in_source {
                if !landed {
                    target.push(marker.record.clone());
                    *target_changed = true;
                }
                if in_source {
                    source.retain(|job| job.job_id != marker.job_id);
                    *source_changed = true;
                }
                info!(job_id = %marker.job_id, kind = %marker.kind, "interrupted transition rolled forward");
            } else {
                info!(job_id = %marker.job_id, kind = %marker.kind, "interrupted transition rolled back");
            }
        }

        let (collections, repairs) = BookmarkCollections::new(active, completed).normalize();
        for repair in &repairs {
            warn!(job_id = repair.job_id(), repair = ?repair, "stored bookmark repaired");
            active_changed |= repair.touches_active();
            completed_changed |= repair.touches_completed();
        }

        if completed_changed {
            self.write(Operation::Load, COMPLETED_KEY, &collections.completed)
                .await?;
        }
        if active_changed {
            self.write(Operation::Load, ACTIVE_KEY, &collections.active)
                .await?;
        }
        if marker.is_some() {
            self.clear_marker(Operation::Load).await?;
        }

        Ok(collections)
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, BookmarkError> {
        let raw = self
            .storage
            .get(key)
            .await
            .map_err(|source| BookmarkError::Persistence {
                operation: Operation::Load,
                source,
            })?;
        match raw {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => serde_json::from_str::<Option<T>>(&raw).map_err(|source| {
                BookmarkError::Decode {
                    key: key.to_string(),
                    source,
                }
            }),
        }
    }
}
