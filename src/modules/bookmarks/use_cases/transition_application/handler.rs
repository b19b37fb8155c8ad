// Move an application between the active and completed collections.
//
// Write order per transition
// 1. pendingTransition marker (write-ahead)
// 2. target collection with the record appended
// 3. source collection with the record removed
// 4. marker removed
//
// A failure at 1 or 2 leaves nothing moved. A failure at 3 is reported as a
// PartialTransition and the store finishes it before the next mutation, or on
// resume_pending_transition. A failure at 4 is only logged.

use crate::modules::bookmarks::core::bookmarked_job::BookmarkedJob;
use crate::modules::bookmarks::core::collections::BookmarkCollections;
use crate::modules::bookmarks::core::errors::{BookmarkError, Operation};
use crate::modules::bookmarks::core::transitions::{
    TransitionKind, TransitionMarker, TransitionStep, completed_variant, reactivated_variant,
};
use crate::modules::bookmarks::store::{
    BookmarkStore, PENDING_TRANSITION_KEY, PendingTransition, collection_key,
};
use crate::shared::infrastructure::key_value_store::KeyValueStore;
use tracing::{error, info, warn};

impl<TStorage> BookmarkStore<TStorage>
where
    TStorage: KeyValueStore + ?Sized,
{
    pub async fn mark_as_completed(&self, job_id: &str) -> Result<BookmarkedJob, BookmarkError> {
        let _gate = self.begin().await?;
        let snapshot = self.snapshot().await;
        let Some(job) = snapshot.find_active(job_id) else {
            return Err(BookmarkError::NotFound {
                job_id: job_id.to_string(),
            });
        };
        let record = completed_variant(job, self.now());
        self.run_transition(TransitionKind::Complete, record, snapshot)
            .await
    }

    pub async fn move_to_active(&self, job_id: &str) -> Result<BookmarkedJob, BookmarkError> {
        let _gate = self.begin().await?;
        let snapshot = self.snapshot().await;
        let Some(job) = snapshot.find_completed(job_id) else {
            return Err(BookmarkError::NotFound {
                job_id: job_id.to_string(),
            });
        };
        let record = reactivated_variant(job);
        self.run_transition(TransitionKind::Reactivate, record, snapshot)
            .await
    }

    /// Finish the missing half of an interrupted transition, if there is one.
    pub async fn resume_pending_transition(&self) -> Result<Option<BookmarkedJob>, BookmarkError> {
        let (_gate, resumed) = self.begin_resuming().await?;
        Ok(resumed.map(|p| p.marker.record))
    }

    async fn run_transition(
        &self,
        kind: TransitionKind,
        record: BookmarkedJob,
        snapshot: BookmarkCollections,
    ) -> Result<BookmarkedJob, BookmarkError> {
        let operation = Operation::for_transition(kind);
        let job_id = record.job_id.clone();
        let marker = TransitionMarker::new(kind, record.clone(), self.now());

        self.write_or_mark_dirty(operation, PENDING_TRANSITION_KEY, &marker)
            .await?;

        let (target, source) = match kind {
            TransitionKind::Complete => (
                snapshot.completed_with(record.clone()),
                snapshot.active_without(&job_id),
            ),
            TransitionKind::Reactivate => (
                snapshot.active_with(record.clone()),
                snapshot.completed_without(&job_id),
            ),
        };

        if let Err(err) = self
            .write(operation, collection_key(kind.target()), &target)
            .await
        {
            self.mark_dirty();
            if let Err(clear_err) = self.clear_marker(operation).await {
                warn!(job_id = %job_id, error = %clear_err, "transition marker left behind after failed write");
            }
            warn!(job_id = %job_id, %kind, error = %err, "transition failed before anything moved");
            return Err(err);
        }

        let next = match kind {
            TransitionKind::Complete => BookmarkCollections::new(source.clone(), target),
            TransitionKind::Reactivate => BookmarkCollections::new(target, source.clone()),
        };
        self.publish(next).await;

        if let Err(err) = self
            .write(operation, collection_key(kind.source()), &source)
            .await
        {
            self.set_pending(Some(PendingTransition {
                marker,
                missing: TransitionStep::RemoveFromSource,
            }))
            .await;
            error!(
                job_id = %job_id,
                %kind,
                error = %err,
                "transition half written: record saved to {} but not removed from {}",
                collection_key(kind.target()),
                collection_key(kind.source()),
            );
            return Err(BookmarkError::PartialTransition {
                job_id,
                kind,
                missing: TransitionStep::RemoveFromSource,
            });
        }

        if let Err(err) = self.clear_marker(operation).await {
            self.set_pending(Some(PendingTransition {
                marker,
                missing: TransitionStep::ClearMarker,
            }))
            .await;
            warn!(job_id = %job_id, %kind, error = %err, "transition marker left in storage");
        }

        info!(
            job_id = %job_id,
            %kind,
            now_in = ?kind.target(),
            "application transitioned"
        );
        Ok(record)
    }
}
