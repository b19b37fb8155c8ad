// Lifecycle transitions between the active and completed collections.
//
// Purpose
// - Build the record a job carries after a transition (pure, no input or output).
// - Describe each two-write transition and the write-ahead marker that guards it.
//
// Ordering
// - A transition first appends to its target collection, then removes from its source.
// - The marker is written before the first write and removed after the second.

use crate::modules::bookmarks::core::bookmarked_job::{ApplicationStatus, BookmarkedJob};
use crate::modules::bookmarks::core::collections::Residency;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Complete,
    Reactivate,
}

impl TransitionKind {
    pub fn source(&self) -> Residency {
        match self {
            TransitionKind::Complete => Residency::Active,
            TransitionKind::Reactivate => Residency::Completed,
        }
    }

    pub fn target(&self) -> Residency {
        match self {
            TransitionKind::Complete => Residency::Completed,
            TransitionKind::Reactivate => Residency::Active,
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionKind::Complete => f.write_str("complete"),
            TransitionKind::Reactivate => f.write_str("reactivate"),
        }
    }
}

/// The write a partial transition still owes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStep {
    AppendToTarget,
    RemoveFromSource,
    ClearMarker,
}

impl fmt::Display for TransitionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionStep::AppendToTarget => f.write_str("append to target"),
            TransitionStep::RemoveFromSource => f.write_str("remove from source"),
            TransitionStep::ClearMarker => f.write_str("clear marker"),
        }
    }
}

/// Persisted before a transition starts so an interrupted one can be finished or dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionMarker {
    pub id: Uuid,
    pub kind: TransitionKind,
    pub job_id: String,
    pub record: BookmarkedJob,
    pub started_at: DateTime<Utc>,
}

impl TransitionMarker {
    pub fn new(kind: TransitionKind, record: BookmarkedJob, started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            kind,
            job_id: record.job_id.clone(),
            record,
            started_at,
        }
    }
}

pub fn completed_variant(job: &BookmarkedJob, now: DateTime<Utc>) -> BookmarkedJob {
    BookmarkedJob {
        completed_at: Some(now),
        application_status: ApplicationStatus::Completed,
        ..job.clone()
    }
}

pub fn reactivated_variant(job: &BookmarkedJob) -> BookmarkedJob {
    BookmarkedJob {
        completed_at: None,
        application_status: ApplicationStatus::InProgress,
        ..job.clone()
    }
}
