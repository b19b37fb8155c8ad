// The two residency collections owned by the store.
//
// Purpose
// - Hold `active` and `completed` side by side and answer residency questions.
// - Repair snapshots loaded from storage so the invariants hold before they are published.
//
// Invariants
// - A job_id appears at most once across both collections.
// - Every completed record has status Completed and a completed_at.
// - No active record has completed_at or status Completed.

use crate::modules::bookmarks::core::bookmarked_job::{ApplicationStatus, BookmarkedJob};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Residency {
    NotTracked,
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repair {
    DuplicateActive { job_id: String },
    DuplicateCompleted { job_id: String },
    ResidentInBoth { job_id: String },
    ActiveMarkedCompleted { job_id: String },
    CompletedMissingCompletion { job_id: String },
}

impl Repair {
    pub fn job_id(&self) -> &str {
        match self {
            Repair::DuplicateActive { job_id }
            | Repair::DuplicateCompleted { job_id }
            | Repair::ResidentInBoth { job_id }
            | Repair::ActiveMarkedCompleted { job_id }
            | Repair::CompletedMissingCompletion { job_id } => job_id,
        }
    }

    pub fn touches_active(&self) -> bool {
        matches!(
            self,
            Repair::DuplicateActive { .. }
                | Repair::ResidentInBoth { .. }
                | Repair::ActiveMarkedCompleted { .. }
        )
    }

    pub fn touches_completed(&self) -> bool {
        matches!(
            self,
            Repair::DuplicateCompleted { .. } | Repair::CompletedMissingCompletion { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("job {0} appears more than once")]
    Duplicate(String),
    #[error("job {0} is resident in both collections")]
    ResidentInBoth(String),
    #[error("completed job {0} lacks completed status or completed_at")]
    IncompleteCompletion(String),
    #[error("active job {0} carries completion data")]
    ActiveCompletion(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkCollections {
    pub active: Vec<BookmarkedJob>,
    pub completed: Vec<BookmarkedJob>,
}

impl BookmarkCollections {
    pub fn new(active: Vec<BookmarkedJob>, completed: Vec<BookmarkedJob>) -> Self {
        Self { active, completed }
    }

    pub fn residency(&self, job_id: &str) -> Residency {
        if self.find_active(job_id).is_some() {
            Residency::Active
        } else if self.find_completed(job_id).is_some() {
            Residency::Completed
        } else {
            Residency::NotTracked
        }
    }

    pub fn find_active(&self, job_id: &str) -> Option<&BookmarkedJob> {
        self.active.iter().find(|job| job.job_id == job_id)
    }

    pub fn find_completed(&self, job_id: &str) -> Option<&BookmarkedJob> {
        self.completed.iter().find(|job| job.job_id == job_id)
    }

    /// Active collection with `job` appended.
    pub fn active_with(&self, job: BookmarkedJob) -> Vec<BookmarkedJob> {
        let mut next = self.active.clone();
        next.push(job);
        next
    }

    /// Completed collection with `job` appended.
    pub fn completed_with(&self, job: BookmarkedJob) -> Vec<BookmarkedJob> {
        let mut next = self.completed.clone();
        next.push(job);
        next
    }

    pub fn active_without(&self, job_id: &str) -> Vec<BookmarkedJob> {
        self.active
            .iter()
            .filter(|job| job.job_id != job_id)
            .cloned()
            .collect()
    }

    pub fn completed_without(&self, job_id: &str) -> Vec<BookmarkedJob> {
        self.completed
            .iter()
            .filter(|job| job.job_id != job_id)
            .cloned()
            .collect()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen_active = HashSet::new();
        for job in &self.active {
            if !seen_active.insert(job.job_id.as_str()) {
                return Err(InvariantViolation::Duplicate(job.job_id.clone()));
            }
            if job.completed_at.is_some() || job.is_completed() {
                return Err(InvariantViolation::ActiveCompletion(job.job_id.clone()));
            }
        }
        let mut seen_completed = HashSet::new();
        for job in &self.completed {
            if !seen_completed.insert(job.job_id.as_str()) {
                return Err(InvariantViolation::Duplicate(job.job_id.clone()));
            }
            if seen_active.contains(job.job_id.as_str()) {
                return Err(InvariantViolation::ResidentInBoth(job.job_id.clone()));
            }
            if job.completed_at.is_none() || !job.is_completed() {
                return Err(InvariantViolation::IncompleteCompletion(job.job_id.clone()));
            }
        }
        Ok(())
    }

    /// Bring a loaded snapshot back in line with the invariants.
    ///
    /// First occurrence wins inside a collection. A job found in both keeps its
    /// completed copy. Active records lose completion data. Completed records
    /// without completed_at get their bookmarked_at.
    pub fn normalize(self) -> (Self, Vec<Repair>) {
        let mut repairs = Vec::new();

        let mut completed = Vec::with_capacity(self.completed.len());
        let mut completed_ids = HashSet::new();
        for mut job in self.completed {
            if !completed_ids.insert(job.job_id.clone()) {
                repairs.push(Repair::DuplicateCompleted { job_id: job.job_id });
                continue;
            }
            if job.completed_at.is_none() || !job.is_completed() {
                repairs.push(Repair::CompletedMissingCompletion {
                    job_id: job.job_id.clone(),
                });
                job.completed_at.get_or_insert(job.bookmarked_at);
                job.application_status = ApplicationStatus::Completed;
            }
            completed.push(job);
        }

        let mut active = Vec::with_capacity(self.active.len());
        let mut active_ids = HashSet::new();
        for mut job in self.active {
            if completed_ids.contains(&job.job_id) {
                repairs.push(Repair::ResidentInBoth { job_id: job.job_id });
                continue;
            }
            if !active_ids.insert(job.job_id.clone()) {
                repairs.push(Repair::DuplicateActive { job_id: job.job_id });
                continue;
            }
            if job.completed_at.is_some() || job.is_completed() {
                repairs.push(Repair::ActiveMarkedCompleted {
                    job_id: job.job_id.clone(),
                });
                job.completed_at = None;
                job.application_status = ApplicationStatus::InProgress;
            }
            active.push(job);
        }

        (Self { active, completed }, repairs)
    }
}
