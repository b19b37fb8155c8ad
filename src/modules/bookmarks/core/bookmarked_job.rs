// Tracked job record and the payload it is created from.
//
// Purpose
// - JobPosting is what the job source hands over. Only job_id carries meaning here.
// - BookmarkedJob is the persisted record. Display fields and unknown fields are kept as is.
//
// Invariants
// - bookmarked_at is set once in from_posting and never changed afterwards.
// - completed_at is Some only while the record lives in the completed collection.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Saved,
    Applied,
    Interviewing,
    Offer,
    Rejected,
    Completed,
    #[serde(rename = "In Progress", alias = "InProgress")]
    InProgress,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Saved => "Saved",
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interviewing => "Interviewing",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Completed => "Completed",
            ApplicationStatus::InProgress => "In Progress",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Saved" => Some(ApplicationStatus::Saved),
            "Applied" => Some(ApplicationStatus::Applied),
            "Interviewing" => Some(ApplicationStatus::Interviewing),
            "Offer" => Some(ApplicationStatus::Offer),
            "Rejected" => Some(ApplicationStatus::Rejected),
            "Completed" => Some(ApplicationStatus::Completed),
            "In Progress" | "InProgress" => Some(ApplicationStatus::InProgress),
            _ => None,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys the store or its listings write themselves. A job payload carrying any of
/// them in `extra` would serialize the key twice.
pub const RESERVED_FIELDS: &[&str] = &[
    "job_id",
    "job_title",
    "employer_name",
    "employer_logo",
    "job_country",
    "bookmarked_at",
    "deadline",
    "notes",
    "application_status",
    "completed_at",
    "days_remaining",
    "urgency",
    "deadline_label",
];

pub fn drop_reserved_fields(extra: &mut Map<String, Value>) {
    extra.retain(|key, _| !RESERVED_FIELDS.contains(&key.as_str()));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub job_id: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub employer_name: String,
    #[serde(default)]
    pub employer_logo: Option<String>,
    #[serde(default)]
    pub job_country: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkedJob {
    pub job_id: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub employer_name: String,
    #[serde(default)]
    pub employer_logo: Option<String>,
    #[serde(default)]
    pub job_country: Option<String>,
    pub bookmarked_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_deadline")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    pub application_status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BookmarkedJob {
    pub fn from_posting(
        posting: JobPosting,
        bookmarked_at: DateTime<Utc>,
        deadline: Option<DateTime<Utc>>,
        notes: Option<String>,
    ) -> Self {
        let mut extra = posting.extra;
        drop_reserved_fields(&mut extra);
        Self {
            job_id: posting.job_id,
            job_title: posting.job_title,
            employer_name: posting.employer_name,
            employer_logo: posting.employer_logo,
            job_country: posting.job_country,
            bookmarked_at,
            deadline,
            notes: notes.filter(|n| !n.is_empty()),
            application_status: ApplicationStatus::Saved,
            completed_at: None,
            extra,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.application_status == ApplicationStatus::Completed
    }
}

/// Field level update for an active record. `None` leaves a field untouched,
/// `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookmarkPatch {
    #[serde(default, deserialize_with = "deserialize_some_deadline")]
    pub deadline: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
    #[serde(default)]
    pub application_status: Option<ApplicationStatus>,
}

impl BookmarkPatch {
    pub fn deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn status(mut self, status: ApplicationStatus) -> Self {
        self.application_status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.deadline.is_none() && self.notes.is_none() && self.application_status.is_none()
    }

    /// Merge into `job`. Leaves bookmarked_at and completed_at alone.
    pub fn apply_to(self, job: &mut BookmarkedJob) {
        if let Some(deadline) = self.deadline {
            job.deadline = deadline;
        }
        if let Some(notes) = self.notes {
            job.notes = notes;
        }
        if let Some(status) = self.application_status {
            job.application_status = status;
        }
    }
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (read as midnight UTC).
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn deserialize_deadline<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_deadline(value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid deadline: {value}"))),
    }
}

fn deserialize_some_deadline<'de, D>(
    deserializer: D,
) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_deadline(deserializer).map(Some)
}

fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
