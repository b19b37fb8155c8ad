use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::modules::bookmarks::adapters::inbound::http_responses::{
    mutation_response, status_for, unprocessable,
};
use crate::modules::bookmarks::core::bookmarked_job::{BookmarkPatch, JobPosting, parse_deadline};
use crate::modules::bookmarks::core::errors::BookmarkError;
use crate::modules::bookmarks::core::outcome::MutationOutcome;
use crate::modules::bookmarks::use_cases::list_bookmarks::handler::BookmarkView;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct AddBookmarkBody {
    pub job: JobPosting,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

pub async fn add(
    State(state): State<AppState>,
    body: Result<Json<AddBookmarkBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return unprocessable(rejection.body_text()),
    };

    let deadline = match body.deadline.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match parse_deadline(raw) {
            Some(deadline) => Some(deadline),
            None => return unprocessable(format!("Invalid deadline: {raw}")),
        },
    };

    let result = state
        .store
        .add_bookmark(body.job, deadline, body.notes)
        .await;
    mutation_response(result, StatusCode::CREATED)
}

pub async fn get(State(state): State<AppState>, Path(job_id): Path<String>) -> Response {
    match state.store.get_bookmark(&job_id).await {
        Some(job) => Json(BookmarkView::active(job, state.store.now())).into_response(),
        None => {
            let err = BookmarkError::NotFound { job_id };
            (status_for(&err), Json(MutationOutcome::failed(&err))).into_response()
        }
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    body: Result<Json<BookmarkPatch>, JsonRejection>,
) -> Response {
    let Json(patch) = match body {
        Ok(b) => b,
        Err(rejection) => return unprocessable(rejection.body_text()),
    };

    let result = state.store.update_bookmark(&job_id, patch).await;
    mutation_response(result, StatusCode::OK)
}

pub async fn remove(State(state): State<AppState>, Path(job_id): Path<String>) -> Response {
    let result = state.store.remove_bookmark(&job_id).await;
    let status = match &result {
        Ok(()) => StatusCode::OK,
        Err(err) => status_for(err),
    };
    (status, Json(MutationOutcome::from(&result))).into_response()
}
