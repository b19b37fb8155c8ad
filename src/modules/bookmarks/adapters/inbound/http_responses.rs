// Shared axum response shapes for the bookmark routes.
//
// Mutators answer with MutationOutcome plus the affected record when there is one.
// The status code follows the error kind so plain HTTP clients can branch on it.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::Serialize;

use crate::modules::bookmarks::core::errors::{BookmarkError, ErrorKind};
use crate::modules::bookmarks::core::outcome::MutationOutcome;

#[derive(Serialize)]
pub struct MutationResponse<T: Serialize> {
    #[serde(flatten)]
    pub outcome: MutationOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<T>,
}

pub fn status_for(error: &BookmarkError) -> StatusCode {
    match error.kind() {
        ErrorKind::Duplicate => StatusCode::CONFLICT,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidStatus => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Persistence
        | ErrorKind::PartialTransition
        | ErrorKind::Encode
        | ErrorKind::Decode => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn mutation_response<T: Serialize>(
    result: Result<T, BookmarkError>,
    success: StatusCode,
) -> Response {
    match result {
        Ok(value) => (
            success,
            Json(MutationResponse {
                outcome: MutationOutcome::ok(),
                bookmark: Some(value),
            }),
        )
            .into_response(),
        Err(err) => (
            status_for(&err),
            Json(MutationResponse::<T> {
                outcome: MutationOutcome::failed(&err),
                bookmark: None,
            }),
        )
            .into_response(),
    }
}

/// Malformed request bodies and parameters, in the same envelope as store failures.
pub fn unprocessable(message: impl Into<String>) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(MutationOutcome {
            success: false,
            error: Some(message.into()),
            kind: None,
        }),
    )
        .into_response()
}
