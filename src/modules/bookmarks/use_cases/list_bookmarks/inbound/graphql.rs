use async_graphql::{Context, Enum, Object, Result as GqlResult, SimpleObject};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::modules::bookmarks::core::errors::BookmarkError;
use crate::modules::bookmarks::core::outcome::MutationOutcome;
use crate::modules::bookmarks::store::StoreStatus;
use crate::modules::bookmarks::use_cases::list_bookmarks::handler::{ActiveSort, BookmarkView};
use crate::shell::state::AppState;

#[derive(Enum, Clone, Copy, PartialEq, Eq, Default)]
pub enum GqlActiveSort {
    #[default]
    Deadline,
    SavedDate,
}

impl From<GqlActiveSort> for ActiveSort {
    fn from(sort: GqlActiveSort) -> Self {
        match sort {
            GqlActiveSort::Deadline => ActiveSort::Deadline,
            GqlActiveSort::SavedDate => ActiveSort::SavedDate,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlBookmark {
    pub job_id: String,
    pub job_title: String,
    pub employer_name: String,
    pub employer_logo: Option<String>,
    pub job_country: Option<String>,
    pub bookmarked_at: String,
    pub deadline: Option<String>,
    pub notes: Option<String>,
    pub application_status: String,
    pub completed_at: Option<String>,
    pub days_remaining: Option<i64>,
    pub urgency: Option<String>,
    pub deadline_label: Option<String>,
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

/// The snake_case name a unit enum has in JSON responses.
fn wire_name<T: Serialize>(value: T) -> Option<String> {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
}

impl From<BookmarkView> for GqlBookmark {
    fn from(v: BookmarkView) -> Self {
        Self {
            job_id: v.job.job_id,
            job_title: v.job.job_title,
            employer_name: v.job.employer_name,
            employer_logo: v.job.employer_logo,
            job_country: v.job.job_country,
            bookmarked_at: timestamp(v.job.bookmarked_at),
            deadline: v.job.deadline.map(timestamp),
            notes: v.job.notes,
            application_status: v.job.application_status.to_string(),
            completed_at: v.job.completed_at.map(timestamp),
            days_remaining: v.days_remaining,
            urgency: v.urgency.map(|u| u.as_str().to_string()),
            deadline_label: v.deadline_label,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlMutationOutcome {
    pub success: bool,
    pub error: Option<String>,
    pub kind: Option<String>,
    pub bookmark: Option<GqlBookmark>,
}

impl GqlMutationOutcome {
    pub fn from_result<T>(
        result: Result<T, BookmarkError>,
        to_view: impl FnOnce(T) -> Option<BookmarkView>,
    ) -> Self {
        let outcome = MutationOutcome::from(&result);
        Self {
            success: outcome.success,
            error: outcome.error,
            kind: outcome.kind.and_then(wire_name),
            bookmark: result.ok().and_then(to_view).map(GqlBookmark::from),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlStoreStatus {
    pub is_loading: bool,
    pub is_dirty: bool,
    pub pending_job_id: Option<String>,
    pub pending_kind: Option<String>,
    pub pending_missing: Option<String>,
}

impl From<StoreStatus> for GqlStoreStatus {
    fn from(s: StoreStatus) -> Self {
        Self {
            is_loading: s.is_loading,
            is_dirty: s.is_dirty,
            pending_job_id: s.pending_job_id,
            pending_kind: s.pending_kind.and_then(wire_name),
            pending_missing: s.pending_missing.and_then(wire_name),
        }
    }
}

#[derive(Default)]
pub struct ListBookmarksQuery;

#[Object]
impl ListBookmarksQuery {
    async fn bookmarks(
        &self,
        context: &Context<'_>,
        #[graphql(default)] sort: GqlActiveSort,
    ) -> GqlResult<Vec<GqlBookmark>> {
        let state = context.data_unchecked::<AppState>();
        let list = state.store.list_active(sort.into()).await;
        Ok(list.into_iter().map(GqlBookmark::from).collect())
    }

    async fn completed_applications(&self, context: &Context<'_>) -> GqlResult<Vec<GqlBookmark>> {
        let state = context.data_unchecked::<AppState>();
        let list = state.store.list_completed().await;
        Ok(list.into_iter().map(GqlBookmark::from).collect())
    }

    async fn status(&self, context: &Context<'_>) -> GqlResult<GqlStoreStatus> {
        let state = context.data_unchecked::<AppState>();
        Ok(state.store.status().await.into())
    }
}

#[derive(Default)]
pub struct ListBookmarksMutation;

#[Object]
impl ListBookmarksMutation {
    /// Reload both collections from storage.
    async fn refresh(&self, context: &Context<'_>) -> GqlResult<GqlMutationOutcome> {
        let state = context.data_unchecked::<AppState>();
        let result = state.store.refresh().await;
        Ok(GqlMutationOutcome::from_result(result, |_| None))
    }
}
