//! Shared test fixtures for the inkweek test suite.
//!
//! One canonical sample week exercises every eligibility path at once:
//!
//! - `Standup` — 60 min in business hours: daily only (60 is not > 60)
//! - `Morning run` — 08:00: daily only regardless of anything else
//! - `Sprint planning` — 120 min at 14:00: derived high priority, weekly
//! - `Groceries` — 45 min saturday: normal, daily only
//!
//! Unit tests across modules assert against these known shapes.

use crate::config::BusinessHours;
use crate::ingest;
use crate::schedule::WeekSchedule;
use crate::types::{RawEvent, WeekData};

/// The canonical four-event sample week.
pub fn sample_week_data() -> WeekData {
    let mut data = WeekData::default();
    data.events.insert(
        "monday".to_string(),
        vec![
            RawEvent::timed("Standup", "09:00", 60),
            RawEvent::timed("Morning run", "08:00", 30),
        ],
    );
    data.events.insert(
        "wednesday".to_string(),
        vec![RawEvent::timed("Sprint planning", "14:00", 120)],
    );
    data.events.insert(
        "saturday".to_string(),
        vec![RawEvent::timed("Groceries", "10:00", 45)],
    );
    data.priority_tasks = vec!["Ship the release".to_string()];
    data.weekly_goals = vec!["Inbox zero".to_string()];
    data
}

/// The sample week run through ingestion with default business hours.
pub fn sample_schedule() -> WeekSchedule {
    ingest::ingest(&sample_week_data(), BusinessHours::default(), false)
        .expect("sample week data must ingest cleanly")
        .schedule
}

/// Build a schedule directly from `(day_key, event)` pairs.
pub fn schedule_with(entries: &[(&str, RawEvent)]) -> WeekSchedule {
    let mut schedule = WeekSchedule::new(BusinessHours::default());
    for (day, raw) in entries {
        schedule
            .add_event(raw.clone(), day)
            .unwrap_or_else(|e| panic!("fixture event under {day:?} rejected: {e}"));
    }
    schedule
}
