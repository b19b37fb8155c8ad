// Deadline urgency buckets used for emphasis in listings.
//
// Rules
// - days_remaining = ceil((deadline - now) / 1 day).
// - overdue when the deadline instant has passed, even if the ceiling rounds to 0.
// - urgent for 0 to 2 days, soon for 3 to 7, comfortable beyond 7.

use chrono::{DateTime, Utc};
use serde::Serialize;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineUrgency {
    Overdue,
    Urgent,
    Soon,
    Comfortable,
}

impl DeadlineUrgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeadlineUrgency::Overdue => "overdue",
            DeadlineUrgency::Urgent => "urgent",
            DeadlineUrgency::Soon => "soon",
            DeadlineUrgency::Comfortable => "comfortable",
        }
    }
}

pub fn days_remaining(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff = (deadline - now).num_milliseconds();
    let days = diff.div_euclid(MILLIS_PER_DAY);
    if diff.rem_euclid(MILLIS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

pub fn classify(deadline: DateTime<Utc>, now: DateTime<Utc>) -> DeadlineUrgency {
    if deadline < now {
        return DeadlineUrgency::Overdue;
    }
    match days_remaining(deadline, now) {
        0..=2 => DeadlineUrgency::Urgent,
        3..=7 => DeadlineUrgency::Soon,
        _ => DeadlineUrgency::Comfortable,
    }
}

/// Short text shown next to a deadline: `Today`, `Tomorrow`, `5d left`, `2d overdue`.
pub fn deadline_label(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = days_remaining(deadline, now);
    if deadline < now {
        return format!("{}d overdue", days.abs().max(1));
    }
    match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        n => format!("{n}d left"),
    }
}
