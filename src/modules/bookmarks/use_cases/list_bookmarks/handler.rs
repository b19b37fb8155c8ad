// Read side: sorted listings with deadline urgency, computed from the current snapshot.
//
// Nothing here takes the write gate or touches storage.

use crate::modules::bookmarks::core::bookmarked_job::{BookmarkedJob, drop_reserved_fields};
use crate::modules::bookmarks::core::sorting::{sort_by_deadline, sort_by_saved_date};
use crate::modules::bookmarks::core::urgency::{
    DeadlineUrgency, classify, days_remaining, deadline_label,
};
use crate::modules::bookmarks::store::BookmarkStore;
use crate::shared::infrastructure::key_value_store::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveSort {
    #[default]
    Deadline,
    #[serde(rename = "saved", alias = "saved_date")]
    SavedDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookmarkView {
    #[serde(flatten)]
    pub job: BookmarkedJob,
    pub days_remaining: Option<i64>,
    pub urgency: Option<DeadlineUrgency>,
    pub deadline_label: Option<String>,
}

impl BookmarkView {
    /// Urgency is only meaningful for active records.
    pub fn active(mut job: BookmarkedJob, now: DateTime<Utc>) -> Self {
        drop_reserved_fields(&mut job.extra);
        let deadline = job.deadline;
        Self {
            days_remaining: deadline.map(|d| days_remaining(d, now)),
            urgency: deadline.map(|d| classify(d, now)),
            deadline_label: deadline.map(|d| deadline_label(d, now)),
            job,
        }
    }

    pub fn completed(mut job: BookmarkedJob) -> Self {
        drop_reserved_fields(&mut job.extra);
        Self {
            job,
            days_remaining: None,
            urgency: None,
            deadline_label: None,
        }
    }
}

impl<TStorage> BookmarkStore<TStorage>
where
    TStorage: KeyValueStore + ?Sized,
{
    pub async fn sorted_by_deadline(&self) -> Vec<BookmarkedJob> {
        sort_by_deadline(&self.active().await)
    }

    pub async fn sorted_by_saved_date(&self) -> Vec<BookmarkedJob> {
        sort_by_saved_date(&self.active().await)
    }

    pub async fn list_active(&self, sort: ActiveSort) -> Vec<BookmarkView> {
        let jobs = match sort {
            ActiveSort::Deadline => self.sorted_by_deadline().await,
            ActiveSort::SavedDate => self.sorted_by_saved_date().await,
        };
        let now = self.now();
        jobs.into_iter()
            .map(|job| BookmarkView::active(job, now))
            .collect()
    }

    pub async fn list_completed(&self) -> Vec<BookmarkView> {
        self.completed()
            .await
            .into_iter()
            .map(BookmarkView::completed)
            .collect()
    }
}
