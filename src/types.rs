//! Shared types for the week-data input shape.
//!
//! These types mirror the JSON document the planner consumes:
//!
//! ```json
//! {
//!   "events": {
//!     "monday": [
//!       { "time": "09:00", "duration": 60, "title": "Standup" },
//!       { "time": "14:00", "duration": 120, "title": "Planning", "priority": "high" }
//!     ]
//!   },
//!   "priorityTasks": ["Ship release"],
//!   "weeklyGoals": ["Inbox zero"]
//! }
//! ```
//!
//! Day keys arrive as plain strings and are validated by the indexer
//! ([`crate::schedule::WeekSchedule::add_event`]), so a typo like `"mondy"`
//! is rejected per event rather than failing the whole parse.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The seven weekday identifiers used as day-bucket keys.
///
/// Wire form is the lowercase English name (`"monday"` … `"sunday"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayKey {
    /// All days in week order, monday first. Ingestion and rendering both
    /// iterate this so output order never depends on JSON map order.
    pub const ALL: [DayKey; 7] = [
        DayKey::Monday,
        DayKey::Tuesday,
        DayKey::Wednesday,
        DayKey::Thursday,
        DayKey::Friday,
        DayKey::Saturday,
        DayKey::Sunday,
    ];

    /// Zero-based offset from monday.
    pub fn offset(self) -> usize {
        self as usize
    }

    /// Lowercase wire/key form: `"monday"`.
    pub fn key(self) -> &'static str {
        match self {
            DayKey::Monday => "monday",
            DayKey::Tuesday => "tuesday",
            DayKey::Wednesday => "wednesday",
            DayKey::Thursday => "thursday",
            DayKey::Friday => "friday",
            DayKey::Saturday => "saturday",
            DayKey::Sunday => "sunday",
        }
    }

    /// Capitalized display form: `"Monday"`.
    pub fn label(self) -> &'static str {
        match self {
            DayKey::Monday => "Monday",
            DayKey::Tuesday => "Tuesday",
            DayKey::Wednesday => "Wednesday",
            DayKey::Thursday => "Thursday",
            DayKey::Friday => "Friday",
            DayKey::Saturday => "Saturday",
            DayKey::Sunday => "Sunday",
        }
    }

    /// Filename of the generated day page: `"monday.html"`.
    pub fn page_name(self) -> String {
        format!("{}.html", self.key())
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DayKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayKey::ALL.into_iter().find(|d| d.key() == s).ok_or(())
    }
}

/// Event priority. Derived from duration at ingestion when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    High,
}

impl Priority {
    pub fn is_high(self) -> bool {
        self == Priority::High
    }
}

/// One event as supplied in the week data, before id assignment and
/// derivation. Every field except the title is optional: missing `time`
/// and `duration` resolve to defaults at query time, missing `priority`
/// and `showInWeekly` are derived at ingestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEvent {
    pub title: String,
    /// Start-of-event time as `"HH:MM"` (24h). Validated at ingestion.
    pub time: Option<String>,
    /// Length in minutes.
    pub duration: Option<u32>,
    pub priority: Option<Priority>,
    #[serde(rename = "showInWeekly")]
    pub show_in_weekly: Option<bool>,
    pub description: Option<String>,
}

impl RawEvent {
    /// Convenience constructor for a timed event; used heavily in tests.
    pub fn timed(title: &str, time: &str, duration: u32) -> Self {
        Self {
            title: title.to_string(),
            time: Some(time.to_string()),
            duration: Some(duration),
            ..Self::default()
        }
    }
}

/// The full week-data document.
///
/// `events` keeps its keys as raw strings: day-key validation belongs to
/// the indexer so one bad key rejects that key's events, not the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekData {
    pub events: BTreeMap<String, Vec<RawEvent>>,
    #[serde(rename = "priorityTasks")]
    pub priority_tasks: Vec<String>,
    #[serde(rename = "weeklyGoals")]
    pub weekly_goals: Vec<String>,
}
