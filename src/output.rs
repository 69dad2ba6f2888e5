//! CLI output formatting for the pipeline stages.
//!
//! Output is information-centric: every day leads with its name and event
//! count, events lead with their time and title, and generated filenames
//! appear as `→ file` suffixes. Days without events are still listed so a
//! week always reads as seven lines — an empty thursday is information.
//!
//! ```text
//! Week
//! 001 Monday (2 events)
//!     001 09:00–10:00 Standup
//!     002 08:00–08:30 Morning run
//! 002 Tuesday (0 events)
//! ...
//!
//! Weekly overview
//!     001 Wednesday 14:00 Sprint planning [high]
//!
//! 4 events, 1 on the weekly overview
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::ingest::SkippedEvent;
use crate::schedule::{Event, WeekSchedule};
use crate::types::DayKey;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// One event line: index, time range, title, markers.
fn event_line(index: usize, event: &Event) -> String {
    let mut line = format!(
        "{} {}–{} {}",
        format_index(index),
        event.start_label(),
        event.end_label(),
        event.title
    );
    if event.priority.is_high() {
        line.push_str(" [high]");
    }
    if event.show_in_weekly {
        line.push_str(" [weekly]");
    }
    line
}

/// Format the week inventory: per-day buckets, the weekly set, skipped
/// events (lenient ingestion), and totals.
pub fn format_week_output(schedule: &WeekSchedule, skipped: &[SkippedEvent]) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Week".to_string());
    for (i, day) in DayKey::ALL.iter().enumerate() {
        let events = schedule.daily_events(*day);
        let noun = if events.len() == 1 { "event" } else { "events" };
        lines.push(format!(
            "{} {} ({} {})",
            format_index(i + 1),
            day.label(),
            events.len(),
            noun
        ));
        for (j, event) in events.iter().enumerate() {
            lines.push(format!("    {}", event_line(j + 1, event)));
        }
    }

    lines.push(String::new());
    lines.push("Weekly overview".to_string());
    let weekly = schedule.weekly_events();
    if weekly.is_empty() {
        lines.push("    (empty)".to_string());
    }
    for (i, event) in weekly.iter().enumerate() {
        lines.push(format!(
            "    {} {} {} {}",
            format_index(i + 1),
            event.day.label(),
            event.start_label(),
            event.title
        ));
    }

    if !skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for skip in skipped {
            lines.push(format!(
                "    {} #{}: {}",
                skip.day_key, skip.position, skip.error
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} events, {} on the weekly overview",
        schedule.total_events(),
        weekly.len()
    ));
    lines
}

/// Format the generate-stage summary: pages written per day.
pub fn format_render_output(schedule: &WeekSchedule, pages: &[String]) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Weekly overview → index.html".to_string());
    for (i, day) in DayKey::ALL.iter().enumerate() {
        let count = schedule.day_count(*day);
        let noun = if count == 1 { "event" } else { "events" };
        lines.push(format!(
            "{} {} ({} {}) → {}",
            format_index(i + 1),
            day.label(),
            count,
            noun,
            day.page_name()
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages, {} events, {} on the weekly overview",
        pages.len(),
        schedule.total_events(),
        schedule.weekly_events().len()
    ));
    lines
}

pub fn print_week_output(schedule: &WeekSchedule, skipped: &[SkippedEvent]) {
    for line in format_week_output(schedule, skipped) {
        println!("{line}");
    }
}

pub fn print_render_output(schedule: &WeekSchedule, pages: &[String]) {
    for line in format_render_output(schedule, pages) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest;
    use crate::config::BusinessHours;
    use crate::test_helpers::sample_schedule;
    use crate::types::{RawEvent, WeekData};

    #[test]
    fn week_output_lists_all_seven_days() {
        let lines = format_week_output(&sample_schedule(), &[]);
        for day in DayKey::ALL {
            assert!(
                lines.iter().any(|l| l.contains(day.label())),
                "missing {day}"
            );
        }
        assert!(lines.contains(&"001 Monday (2 events)".to_string()));
        assert!(lines.contains(&"005 Friday (0 events)".to_string()));
    }

    #[test]
    fn week_output_marks_priority_and_weekly() {
        let lines = format_week_output(&sample_schedule(), &[]);
        let planning = lines
            .iter()
            .find(|l| l.contains("Sprint planning") && l.contains("–"))
            .unwrap();
        assert!(planning.contains("[high]"));
        assert!(planning.contains("[weekly]"));
    }

    #[test]
    fn week_output_totals_line() {
        let lines = format_week_output(&sample_schedule(), &[]);
        assert_eq!(
            lines.last().unwrap(),
            "4 events, 1 on the weekly overview"
        );
    }

    #[test]
    fn week_output_reports_skipped_events() {
        let mut data = WeekData::default();
        data.events.insert(
            "monday".into(),
            vec![RawEvent::timed("Bad", "noonish", 30)],
        );
        let report = ingest::ingest(&data, BusinessHours::default(), true).unwrap();
        let lines = format_week_output(&report.schedule, &report.skipped);
        assert!(lines.contains(&"Skipped".to_string()));
        assert!(lines.iter().any(|l| l.contains("monday #1")));
    }

    #[test]
    fn empty_weekly_set_shows_placeholder() {
        let mut data = WeekData::default();
        data.events
            .insert("monday".into(), vec![RawEvent::timed("Run", "08:00", 30)]);
        let report = ingest::ingest(&data, BusinessHours::default(), false).unwrap();
        let lines = format_week_output(&report.schedule, &[]);
        assert!(lines.contains(&"    (empty)".to_string()));
    }

    #[test]
    fn render_output_maps_days_to_pages() {
        let pages: Vec<String> = std::iter::once("index.html".to_string())
            .chain(DayKey::ALL.iter().map(|d| d.page_name()))
            .collect();
        let lines = format_render_output(&sample_schedule(), &pages);
        assert!(lines.contains(&"Weekly overview → index.html".to_string()));
        assert!(lines.contains(&"003 Wednesday (1 event) → wednesday.html".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Generated 8 pages, 4 events, 1 on the weekly overview"
        );
    }
}
