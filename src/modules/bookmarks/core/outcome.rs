// UI facing result of a mutation: `{ success, error, kind }`.
//
// Store methods return Result; inbound adapters fold them into this shape so the
// caller always has a message to show, success or not.

use crate::modules::bookmarks::core::errors::{BookmarkError, ErrorKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationOutcome {
    pub success: bool,
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl MutationOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            kind: None,
        }
    }

    pub fn failed(error: &BookmarkError) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            kind: Some(error.kind()),
        }
    }

    pub fn is_partial(&self) -> bool {
        self.kind == Some(ErrorKind::PartialTransition)
    }
}

impl<T> From<&Result<T, BookmarkError>> for MutationOutcome {
    fn from(result: &Result<T, BookmarkError>) -> Self {
        match result {
            Ok(_) => MutationOutcome::ok(),
            Err(err) => MutationOutcome::failed(err),
        }
    }
}
