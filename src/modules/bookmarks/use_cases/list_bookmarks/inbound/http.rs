use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::modules::bookmarks::adapters::inbound::http_responses::status_for;
use crate::modules::bookmarks::core::errors::BookmarkError;
use crate::modules::bookmarks::core::outcome::MutationOutcome;
use crate::modules::bookmarks::use_cases::list_bookmarks::handler::{ActiveSort, BookmarkView};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListBookmarksParams {
    #[serde(default)]
    pub sort: ActiveSort,
}

pub async fn list_active(
    State(state): State<AppState>,
    Query(params): Query<ListBookmarksParams>,
) -> impl IntoResponse {
    Json(state.store.list_active(params.sort).await)
}

pub async fn list_completed(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.list_completed().await)
}

pub async fn get_completed(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    match state.store.get_completed_application(&job_id).await {
        Some(job) => Json(BookmarkView::completed(job)).into_response(),
        None => {
            let err = BookmarkError::NotFound { job_id };
            (status_for(&err), Json(MutationOutcome::failed(&err))).into_response()
        }
    }
}

pub async fn refresh(State(state): State<AppState>) -> Response {
    let result = state.store.refresh().await;
    let status = match &result {
        Ok(()) => StatusCode::OK,
        Err(err) => status_for(err),
    };
    (status, Json(MutationOutcome::from(&result))).into_response()
}

pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.status().await)
}
