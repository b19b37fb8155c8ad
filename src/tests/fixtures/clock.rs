use crate::shared::core::clock::{Clock, FixedClock};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap()
}

pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(fixed_now()))
}
