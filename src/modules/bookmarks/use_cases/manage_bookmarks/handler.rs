// Add, update and remove active bookmarks, plus the lookups the UI uses.
//
// Flow for every mutation
// - Take the write gate (reloads a dirty store, finishes a pending transition).
// - Decide against the current snapshot.
// - Persist the next active collection, then publish it.

use crate::modules::bookmarks::core::bookmarked_job::{
    ApplicationStatus, BookmarkPatch, BookmarkedJob, JobPosting,
};
use crate::modules::bookmarks::core::collections::Residency;
use crate::modules::bookmarks::core::errors::{BookmarkError, Operation};
use crate::modules::bookmarks::store::{ACTIVE_KEY, BookmarkStore};
use crate::shared::infrastructure::key_value_store::KeyValueStore;
use chrono::{DateTime, Utc};
use tracing::info;

impl<TStorage> BookmarkStore<TStorage>
where
    TStorage: KeyValueStore + ?Sized,
{
    pub async fn add_bookmark(
        &self,
        job: JobPosting,
        deadline: Option<DateTime<Utc>>,
        notes: Option<String>,
    ) -> Result<BookmarkedJob, BookmarkError> {
        let _gate = self.begin().await?;
        let snapshot = self.snapshot().await;

        if snapshot.residency(&job.job_id) != Residency::NotTracked {
            return Err(BookmarkError::Duplicate { job_id: job.job_id });
        }

        let record = BookmarkedJob::from_posting(job, self.now(), deadline, notes);
        let next = snapshot.active_with(record.clone());
        self.write_or_mark_dirty(Operation::Add, ACTIVE_KEY, &next)
            .await?;
        self.publish_active(next).await;

        info!(job_id = %record.job_id, "bookmark added");
        Ok(record)
    }

    pub async fn remove_bookmark(&self, job_id: &str) -> Result<(), BookmarkError> {
        let _gate = self.begin().await?;
        let snapshot = self.snapshot().await;

        if snapshot.find_active(job_id).is_none() {
            return Err(BookmarkError::NotFound {
                job_id: job_id.to_string(),
            });
        }

        let next = snapshot.active_without(job_id);
        self.write_or_mark_dirty(Operation::Remove, ACTIVE_KEY, &next)
            .await?;
        self.publish_active(next).await;

        info!(job_id, "bookmark removed");
        Ok(())
    }

    pub async fn update_bookmark(
        &self,
        job_id: &str,
        patch: BookmarkPatch,
    ) -> Result<BookmarkedJob, BookmarkError> {
        if let Some(status @ ApplicationStatus::Completed) = patch.application_status {
            return Err(BookmarkError::InvalidStatus { status });
        }

        let _gate = self.begin().await?;
        let snapshot = self.snapshot().await;

        let Some(position) = snapshot.active.iter().position(|job| job.job_id == job_id) else {
            return Err(BookmarkError::NotFound {
                job_id: job_id.to_string(),
            });
        };

        let mut next = snapshot.active;
        patch.apply_to(&mut next[position]);
        let updated = next[position].clone();
        self.write_or_mark_dirty(Operation::Update, ACTIVE_KEY, &next)
            .await?;
        self.publish_active(next).await;

        info!(job_id, status = %updated.application_status, "bookmark updated");
        Ok(updated)
    }

    /// True only for active bookmarks; completed applications do not count.
    pub async fn is_bookmarked(&self, job_id: &str) -> bool {
        self.snapshot().await.find_active(job_id).is_some()
    }

    pub async fn get_bookmark(&self, job_id: &str) -> Option<BookmarkedJob> {
        self.snapshot().await.find_active(job_id).cloned()
    }

    pub async fn get_completed_application(&self, job_id: &str) -> Option<BookmarkedJob> {
        self.snapshot().await.find_completed(job_id).cloned()
    }
}
