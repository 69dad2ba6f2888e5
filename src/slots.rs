//! Time-slot generation for the planner grids.
//!
//! A slot is a fixed-width time interval used as a grid row: a `"HH:MM"`
//! label plus the half-open `[start, start + interval)` range in
//! minutes-since-midnight. Both the weekly overview and the day pages
//! iterate the same slot sequence, so the two grids always line up.
//!
//! Generation covers `[start_hour, end_hour]` inclusive: every hour before
//! the last emits one slot per interval step, and the end hour contributes
//! only its `:00` boundary slot — the grid ends at `22:00`, not `22:30`.
//! Pure and deterministic; identical inputs produce identical sequences.

use crate::config::SlotsConfig;

/// One grid row: label plus implicit `[start, start + duration)` range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    /// Display label, e.g. `"09:30"`.
    pub label: String,
    /// Minutes since midnight at which the slot begins.
    pub start_minutes: u32,
    /// Slot width in minutes.
    pub duration_minutes: u32,
}

impl TimeSlot {
    /// Exclusive end of the slot in minutes since midnight.
    pub fn end_minutes(&self) -> u32 {
        self.start_minutes + self.duration_minutes
    }
}

/// Format minutes-since-midnight as a 24h `"HH:MM"` label.
pub fn minutes_label(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Generate the ordered slot sequence for an hour range and interval.
///
/// One slot per interval step within each hour of `start_hour..end_hour`,
/// plus a single boundary slot at `end_hour:00`. For intervals that do not
/// divide 60, steps simply stop before the next hour. Always non-empty when
/// `start_hour <= end_hour` (enforced by config validation).
pub fn time_slots(config: &SlotsConfig) -> Vec<TimeSlot> {
    let interval = config.interval_minutes;
    let mut slots = Vec::new();
    for hour in config.start_hour..=config.end_hour {
        if hour == config.end_hour {
            // Inclusive boundary slot only; no trailing partial hour.
            slots.push(slot_at(u32::from(hour) * 60, interval));
            break;
        }
        let mut minute = 0;
        while minute < 60 {
            slots.push(slot_at(u32::from(hour) * 60 + minute, interval));
            minute += interval;
        }
    }
    slots
}

/// Just the labels, for callers that don't need the ranges.
pub fn slot_labels(config: &SlotsConfig) -> Vec<String> {
    time_slots(config).into_iter().map(|s| s.label).collect()
}

fn slot_at(start_minutes: u32, duration_minutes: u32) -> TimeSlot {
    TimeSlot {
        label: minutes_label(start_minutes),
        start_minutes,
        duration_minutes,
    }
}
