//! Week-data ingestion.
//!
//! Stage 1 of the inkweek build pipeline. Reads the week.json document,
//! feeds every event through the indexer ([`crate::schedule::WeekSchedule`]),
//! and resolves the concrete dates the week covers.
//!
//! ## Ingestion Order
//!
//! The events map is walked in fixed week order (monday → sunday), events in
//! array order within each day, so assigned ids are deterministic for
//! identical input regardless of JSON key order. Keys that name no weekday
//! are reported after all valid days are ingested.
//!
//! ## Invalid Events
//!
//! Each event stands alone: a bad day key or malformed time rejects that
//! event only. In strict mode (the default for `build`) the first rejection
//! aborts with context; with `--skip-invalid` rejected events are collected
//! into the report and the build continues without them.

use crate::config::BusinessHours;
use crate::schedule::{ScheduleError, WeekSchedule};
use crate::types::{DayKey, WeekData};
use chrono::{Datelike, Duration, NaiveDate};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("event {position} under {day_key:?}: {source}")]
    Event {
        day_key: String,
        position: usize,
        source: ScheduleError,
    },
}

/// One event rejected during lenient ingestion.
#[derive(Debug)]
pub struct SkippedEvent {
    pub day_key: String,
    /// 1-based position within the day's event array.
    pub position: usize,
    pub error: ScheduleError,
}

/// Ingestion result: the populated index plus any events skipped in
/// lenient mode (always empty in strict mode).
#[derive(Debug)]
pub struct IngestReport {
    pub schedule: WeekSchedule,
    pub skipped: Vec<SkippedEvent>,
}

/// Read and parse a week.json file.
pub fn load_week_data(path: &Path) -> Result<WeekData, IngestError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Build a fresh index from week data.
///
/// `skip_invalid` selects lenient mode: rejected events are recorded in the
/// report instead of aborting the run.
pub fn ingest(
    data: &WeekData,
    business_hours: BusinessHours,
    skip_invalid: bool,
) -> Result<IngestReport, IngestError> {
    let mut schedule = WeekSchedule::new(business_hours);
    let mut skipped = Vec::new();

    // Valid weekdays first, in week order; then whatever keys remain.
    let known: Vec<&str> = DayKey::ALL.iter().map(|d| d.key()).collect();
    let unknown_keys = data.events.keys().filter(|k| !known.contains(&k.as_str()));

    for day in DayKey::ALL {
        let Some(events) = data.events.get(day.key()) else {
            continue;
        };
        for (i, raw) in events.iter().enumerate() {
            match schedule.add_event(raw.clone(), day.key()) {
                Ok(_) => {}
                Err(source) if skip_invalid => skipped.push(SkippedEvent {
                    day_key: day.key().to_string(),
                    position: i + 1,
                    error: source,
                }),
                Err(source) => {
                    return Err(IngestError::Event {
                        day_key: day.key().to_string(),
                        position: i + 1,
                        source,
                    });
                }
            }
        }
    }

    for key in unknown_keys {
        if skip_invalid {
            // Every event under a bad key is lost; report the bucket once
            // per event so counts stay honest.
            for (i, _) in data.events[key].iter().enumerate() {
                skipped.push(SkippedEvent {
                    day_key: key.clone(),
                    position: i + 1,
                    error: ScheduleError::InvalidDay { key: key.clone() },
                });
            }
        } else {
            return Err(IngestError::Event {
                day_key: key.clone(),
                position: 1,
                source: ScheduleError::InvalidDay { key: key.clone() },
            });
        }
    }

    Ok(IngestReport { schedule, skipped })
}

// =============================================================================
// Week date math
// =============================================================================

/// Monday of the week containing `date`.
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Concrete date of a weekday within the week starting at `monday`.
pub fn date_for(day: DayKey, monday: NaiveDate) -> NaiveDate {
    monday + Duration::days(day.offset() as i64)
}

/// All seven dates of the week starting at `monday`, monday first.
pub fn week_dates(monday: NaiveDate) -> [NaiveDate; 7] {
    DayKey::ALL.map(|day| date_for(day, monday))
}
