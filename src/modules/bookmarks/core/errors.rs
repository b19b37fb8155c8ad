// Error taxonomy of the bookmark store.
//
// Each variant renders as the short message the UI shows verbatim.

use crate::modules::bookmarks::core::bookmarked_job::ApplicationStatus;
use crate::modules::bookmarks::core::transitions::{TransitionKind, TransitionStep};
use crate::shared::infrastructure::key_value_store::StorageError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    Update,
    MarkAsCompleted,
    MoveToActive,
    Load,
    ResumeTransition,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Add => "Failed to save bookmark",
            Operation::Remove => "Failed to remove bookmark",
            Operation::Update => "Failed to update bookmark",
            Operation::MarkAsCompleted => "Failed to mark as completed",
            Operation::MoveToActive => "Failed to move to active",
            Operation::Load => "Failed to load bookmarks",
            Operation::ResumeTransition => "Failed to finish pending transition",
        }
    }

    pub fn for_transition(kind: TransitionKind) -> Self {
        match kind {
            TransitionKind::Complete => Operation::MarkAsCompleted,
            TransitionKind::Reactivate => Operation::MoveToActive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Duplicate,
    NotFound,
    InvalidStatus,
    Persistence,
    PartialTransition,
    Encode,
    Decode,
}

#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("Job already bookmarked")]
    Duplicate { job_id: String },

    #[error("Job not found")]
    NotFound { job_id: String },

    #[error("Status {status} is set by marking the application as completed")]
    InvalidStatus { status: ApplicationStatus },

    #[error("{}", .operation.failure_message())]
    Persistence {
        operation: Operation,
        #[source]
        source: StorageError,
    },

    #[error("{}", partial_message(.kind, .missing))]
    PartialTransition {
        job_id: String,
        kind: TransitionKind,
        missing: TransitionStep,
    },

    #[error("Bookmarks could not be encoded for storage")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Stored bookmarks could not be read")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BookmarkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookmarkError::Duplicate { .. } => ErrorKind::Duplicate,
            BookmarkError::NotFound { .. } => ErrorKind::NotFound,
            BookmarkError::InvalidStatus { .. } => ErrorKind::InvalidStatus,
            BookmarkError::Persistence { .. } => ErrorKind::Persistence,
            BookmarkError::PartialTransition { .. } => ErrorKind::PartialTransition,
            BookmarkError::Encode { .. } => ErrorKind::Encode,
            BookmarkError::Decode { .. } => ErrorKind::Decode,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, BookmarkError::PartialTransition { .. })
    }
}

fn partial_message(kind: &TransitionKind, missing: &TransitionStep) -> &'static str {
    match (kind, missing) {
        (TransitionKind::Complete, TransitionStep::RemoveFromSource) => {
            "Application saved as completed but not removed from active bookmarks; retry to finish"
        }
        (TransitionKind::Reactivate, TransitionStep::RemoveFromSource) => {
            "Application moved to active but not removed from completed applications; retry to finish"
        }
        (_, TransitionStep::AppendToTarget) => {
            "Application transition was interrupted before it was saved; retry to finish"
        }
        (_, TransitionStep::ClearMarker) => {
            "Application transition finished but could not be confirmed; retry to finish"
        }
    }
}
