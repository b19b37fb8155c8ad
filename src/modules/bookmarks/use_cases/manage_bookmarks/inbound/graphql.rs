use async_graphql::{
    Context, Error as GqlError, InputObject, Json, MaybeUndefined, Object, Result as GqlResult,
};
use serde_json::{Map, Value};

use crate::modules::bookmarks::core::bookmarked_job::{
    ApplicationStatus, BookmarkPatch, JobPosting, parse_deadline,
};
use crate::modules::bookmarks::use_cases::list_bookmarks::handler::BookmarkView;
use crate::modules::bookmarks::use_cases::list_bookmarks::inbound::graphql::{
    GqlBookmark, GqlMutationOutcome,
};
use crate::shell::state::AppState;

#[derive(InputObject)]
pub struct AddBookmarkInput {
    pub job_id: String,
    #[graphql(default)]
    pub job_title: String,
    #[graphql(default)]
    pub employer_name: String,
    pub employer_logo: Option<String>,
    pub job_country: Option<String>,
    /// Remaining job source fields, stored untouched.
    pub extra: Option<Json<Map<String, Value>>>,
    pub deadline: Option<String>,
    pub notes: Option<String>,
}

fn deadline_arg(raw: Option<&str>) -> GqlResult<Option<chrono::DateTime<chrono::Utc>>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_deadline(raw)
            .map(Some)
            .ok_or_else(|| GqlError::new(format!("Invalid deadline: {raw}"))),
    }
}

fn patch_field<T>(value: MaybeUndefined<T>) -> Option<Option<T>> {
    match value {
        MaybeUndefined::Undefined => None,
        MaybeUndefined::Null => Some(None),
        MaybeUndefined::Value(v) => Some(Some(v)),
    }
}

#[derive(Default)]
pub struct ManageBookmarksQuery;

#[Object]
impl ManageBookmarksQuery {
    async fn bookmark(
        &self,
        context: &Context<'_>,
        job_id: String,
    ) -> GqlResult<Option<GqlBookmark>> {
        let state = context.data_unchecked::<AppState>();
        let now = state.store.now();
        Ok(state
            .store
            .get_bookmark(&job_id)
            .await
            .map(|job| BookmarkView::active(job, now).into()))
    }

    async fn completed_application(
        &self,
        context: &Context<'_>,
        job_id: String,
    ) -> GqlResult<Option<GqlBookmark>> {
        let state = context.data_unchecked::<AppState>();
        Ok(state
            .store
            .get_completed_application(&job_id)
            .await
            .map(|job| BookmarkView::completed(job).into()))
    }

    async fn is_bookmarked(&self, context: &Context<'_>, job_id: String) -> GqlResult<bool> {
        let state = context.data_unchecked::<AppState>();
        Ok(state.store.is_bookmarked(&job_id).await)
    }
}

#[derive(Default)]
pub struct ManageBookmarksMutation;

#[Object]
impl ManageBookmarksMutation {
    async fn add_bookmark(
        &self,
        context: &Context<'_>,
        input: AddBookmarkInput,
    ) -> GqlResult<GqlMutationOutcome> {
        let state = context.data_unchecked::<AppState>();
        let deadline = deadline_arg(input.deadline.as_deref())?;
        let posting = JobPosting {
            job_id: input.job_id,
            job_title: input.job_title,
            employer_name: input.employer_name,
            employer_logo: input.employer_logo,
            job_country: input.job_country,
            extra: input.extra.map(|Json(extra)| extra).unwrap_or_default(),
        };

        let now = state.store.now();
        let result = state.store.add_bookmark(posting, deadline, input.notes).await;
        Ok(GqlMutationOutcome::from_result(result, |job| {
            Some(BookmarkView::active(job, now))
        }))
    }

    async fn update_bookmark(
        &self,
        context: &Context<'_>,
        job_id: String,
        deadline: MaybeUndefined<String>,
        notes: MaybeUndefined<String>,
        application_status: Option<String>,
    ) -> GqlResult<GqlMutationOutcome> {
        let state = context.data_unchecked::<AppState>();
        let mut patch = BookmarkPatch {
            notes: patch_field(notes),
            ..BookmarkPatch::default()
        };
        if let Some(deadline) = patch_field(deadline) {
            patch = patch.deadline(deadline_arg(deadline.as_deref())?);
        }
        if let Some(raw) = application_status {
            let status = ApplicationStatus::parse(&raw)
                .ok_or_else(|| GqlError::new(format!("Unknown application status: {raw}")))?;
            patch = patch.status(status);
        }

        let now = state.store.now();
        let result = state.store.update_bookmark(&job_id, patch).await;
        Ok(GqlMutationOutcome::from_result(result, |job| {
            Some(BookmarkView::active(job, now))
        }))
    }

    async fn remove_bookmark(
        &self,
        context: &Context<'_>,
        job_id: String,
    ) -> GqlResult<GqlMutationOutcome> {
        let state = context.data_unchecked::<AppState>();
        let result = state.store.remove_bookmark(&job_id).await;
        Ok(GqlMutationOutcome::from_result(result, |()| None))
    }
}
