//! Event indexing for one planner week.
//!
//! [`WeekSchedule`] ingests raw per-day event lists, assigns ids, buckets
//! events by weekday, derives weekly-overview eligibility, and answers the
//! slot-overlap queries the renderer needs. One instance is built fresh per
//! run and discarded afterward — nothing persists across builds.
//!
//! ## Derivation Rules
//!
//! Optional fields resolve once, at ingestion:
//!
//! - `priority` absent → `high` iff effective duration > 90, else `normal`
//! - `showInWeekly` absent → true iff effective duration > 60 or priority is high
//!
//! "Effective" means the supplied value or its query-time default (09:00
//! start, 60-minute duration). An event joins the weekly set only when its
//! resolved `showInWeekly` is true *and* its start hour falls inside the
//! configured business-hours window — an 08:00 event stays on its day page
//! no matter how long or high-priority it is.
//!
//! ## Slot Placement
//!
//! Slot queries use half-open interval overlap (`start < slot_end && end >
//! slot_start`), so back-to-back events never double-render in adjacent
//! slots, and a long event appears in every slot it occupies rather than
//! only its starting slot.

use crate::config::BusinessHours;
use crate::slots::{TimeSlot, minutes_label};
use crate::types::{DayKey, Priority, RawEvent};
use std::collections::BTreeMap;
use thiserror::Error;

/// Default start for events supplied without a time, minutes since midnight.
const DEFAULT_START_MINUTES: u32 = 9 * 60;
/// Default length for events supplied without a duration.
const DEFAULT_DURATION_MINUTES: u32 = 60;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("unknown day key {key:?}: expected one of monday..sunday (lowercase)")]
    InvalidDay { key: String },
    #[error("malformed time {time:?} for event {title:?}: expected HH:MM (24h)")]
    InvalidTime { title: String, time: String },
}

/// Unique per-run event identifier. Monotonic from 1, never reused.
pub type EventId = u32;

/// An ingested event with resolved priority and weekly eligibility.
///
/// `time` and `duration` stay as supplied (`None` when absent); the
/// `start_minutes`/`duration_minutes` accessors apply the query-time
/// defaults.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: EventId,
    pub day: DayKey,
    pub title: String,
    pub priority: Priority,
    pub show_in_weekly: bool,
    pub description: Option<String>,
    time: Option<u32>,
    duration: Option<u32>,
}

impl Event {
    /// Start in minutes since midnight; defaults to 09:00 when unspecified.
    pub fn start_minutes(&self) -> u32 {
        self.time.unwrap_or(DEFAULT_START_MINUTES)
    }

    /// Duration in minutes; defaults to 60 when unspecified.
    pub fn duration_minutes(&self) -> u32 {
        self.duration.unwrap_or(DEFAULT_DURATION_MINUTES)
    }

    /// Exclusive end in minutes since midnight. Durations come straight
    /// from user JSON, so the sum saturates rather than overflowing.
    pub fn end_minutes(&self) -> u32 {
        self.start_minutes().saturating_add(self.duration_minutes())
    }

    /// Clock hour the event starts in (for the business-hours gate).
    pub fn start_hour(&self) -> u8 {
        (self.start_minutes() / 60) as u8
    }

    /// `"HH:MM"` display label of the start.
    pub fn start_label(&self) -> String {
        minutes_label(self.start_minutes())
    }

    /// `"HH:MM"` display label of the end. Ends past midnight clamp to 23:59
    /// for display only; the overlap math uses the raw value.
    pub fn end_label(&self) -> String {
        minutes_label(self.end_minutes().min(23 * 60 + 59))
    }

    /// Half-open interval overlap against a slot range.
    pub fn overlaps(&self, slot_start: u32, slot_duration: u32) -> bool {
        let slot_end = slot_start + slot_duration;
        self.start_minutes() < slot_end && self.end_minutes() > slot_start
    }

    /// Whether the event begins within this slot (as opposed to continuing
    /// into it from an earlier one). Drives the "(cont.)" marker on day pages.
    pub fn starts_in(&self, slot: &TimeSlot) -> bool {
        self.start_minutes() >= slot.start_minutes && self.start_minutes() < slot.end_minutes()
    }
}

/// In-memory event index for one week.
///
/// Owns all events plus the day-bucket and weekly-set indices into them.
/// All queries return events in insertion order.
#[derive(Debug)]
pub struct WeekSchedule {
    business_hours: BusinessHours,
    events: Vec<Event>,
    day_buckets: BTreeMap<DayKey, Vec<usize>>,
    weekly: Vec<usize>,
    next_id: EventId,
}

impl WeekSchedule {
    pub fn new(business_hours: BusinessHours) -> Self {
        Self {
            business_hours,
            events: Vec::new(),
            day_buckets: BTreeMap::new(),
            weekly: Vec::new(),
            next_id: 1,
        }
    }

    /// Ingest one event under a day key, returning its assigned id.
    ///
    /// Rejects unknown day keys and present-but-malformed time strings
    /// without touching previously ingested events. A missing time or
    /// duration is not an error; it resolves via the defaults at query time.
    pub fn add_event(&mut self, raw: RawEvent, day_key: &str) -> Result<EventId, ScheduleError> {
        let day: DayKey = day_key.parse().map_err(|()| ScheduleError::InvalidDay {
            key: day_key.to_string(),
        })?;
        let time = match &raw.time {
            Some(s) => Some(parse_hhmm(s).ok_or_else(|| ScheduleError::InvalidTime {
                title: raw.title.clone(),
                time: s.clone(),
            })?),
            None => None,
        };

        let id = self.next_id;
        self.next_id += 1;

        let effective_duration = raw.duration.unwrap_or(DEFAULT_DURATION_MINUTES);
        let priority = raw.priority.unwrap_or(if effective_duration > 90 {
            Priority::High
        } else {
            Priority::Normal
        });
        let show_in_weekly = raw
            .show_in_weekly
            .unwrap_or(effective_duration > 60 || priority.is_high());

        let event = Event {
            id,
            day,
            title: raw.title,
            priority,
            show_in_weekly,
            description: raw.description,
            time,
            duration: raw.duration,
        };

        let in_business_hours = self.business_hours.contains(event.start_hour());
        let index = self.events.len();
        self.day_buckets.entry(day).or_default().push(index);
        if show_in_weekly && in_business_hours {
            self.weekly.push(index);
        }
        self.events.push(event);
        Ok(id)
    }

    /// Events bucketed under a day, in insertion order. Empty for days with
    /// no events.
    pub fn daily_events(&self, day: DayKey) -> Vec<&Event> {
        self.day_buckets
            .get(&day)
            .map(|bucket| bucket.iter().map(|&i| &self.events[i]).collect())
            .unwrap_or_default()
    }

    /// Weekly-set events, in the order they joined the set.
    pub fn weekly_events(&self) -> Vec<&Event> {
        self.weekly.iter().map(|&i| &self.events[i]).collect()
    }

    /// Every ingested event across all days, insertion order.
    pub fn all_events(&self) -> &[Event] {
        &self.events
    }

    /// Total ingested events (equals the sum of per-day bucket sizes).
    pub fn total_events(&self) -> usize {
        self.events.len()
    }

    /// Number of events bucketed under a day.
    pub fn day_count(&self, day: DayKey) -> usize {
        self.day_buckets.get(&day).map_or(0, Vec::len)
    }

    /// Day-bucket events overlapping a slot, in bucket insertion order.
    /// No secondary chronological sort is applied.
    pub fn events_in_slot(&self, day: DayKey, slot: &TimeSlot) -> Vec<&Event> {
        self.daily_events(day)
            .into_iter()
            .filter(|e| e.overlaps(slot.start_minutes, slot.duration_minutes))
            .collect()
    }
}

/// Parse a 24h `"HH:MM"` string into minutes since midnight.
///
/// Accepts one- or two-digit hours (`"9:00"` and `"09:00"` are the same
/// instant); anything else — missing colon, out-of-range parts, trailing
/// text — is `None`.
pub fn parse_hhmm(s: &str) -> Option<u32> {
    let (hour_part, minute_part) = s.split_once(':')?;
    if hour_part.is_empty() || hour_part.len() > 2 || minute_part.len() != 2 {
        return None;
    }
    // u32::from_str would accept a leading '+'; digits only.
    if !hour_part.bytes().all(|b| b.is_ascii_digit())
        || !minute_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let hour: u32 = hour_part.parse().ok()?;
    let minute: u32 = minute_part.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::schedule_with;
    use crate::types::RawEvent;

    fn schedule() -> WeekSchedule {
        WeekSchedule::new(BusinessHours::default())
    }

    // =========================================================================
    // Ingestion and ids
    // =========================================================================

    #[test]
    fn ids_are_monotonic_from_one() {
        let mut sched = schedule();
        let a = sched.add_event(RawEvent::timed("A", "09:00", 30), "monday").unwrap();
        let b = sched.add_event(RawEvent::timed("B", "10:00", 30), "friday").unwrap();
        let c = sched.add_event(RawEvent::timed("C", "11:00", 30), "monday").unwrap();
        assert_eq!((a, b, c), (1, 2, 3));
        assert_eq!(sched.total_events(), 3);
    }

    #[test]
    fn failed_ingestion_does_not_burn_state() {
        let mut sched = schedule();
        sched.add_event(RawEvent::timed("A", "09:00", 30), "monday").unwrap();
        assert!(sched.add_event(RawEvent::timed("B", "09:00", 30), "mondy").is_err());
        assert!(sched.add_event(RawEvent::timed("C", "9am", 30), "monday").is_err());

        // Prior state intact, and the rejected events left no trace.
        assert_eq!(sched.total_events(), 1);
        assert_eq!(sched.day_count(DayKey::Monday), 1);
        let d = sched.add_event(RawEvent::timed("D", "10:00", 30), "monday").unwrap();
        assert_eq!(d, 2);
    }

    #[test]
    fn unknown_day_key_is_invalid_input() {
        let mut sched = schedule();
        let err = sched
            .add_event(RawEvent::timed("X", "09:00", 30), "someday")
            .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidDay {
                key: "someday".into()
            }
        );
    }

    #[test]
    fn malformed_time_is_invalid_input_but_missing_time_is_not() {
        let mut sched = schedule();
        let err = sched
            .add_event(RawEvent::timed("X", "25:00", 30), "monday")
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTime { .. }));

        let untimed = RawEvent {
            title: "Untimed".into(),
            ..RawEvent::default()
        };
        sched.add_event(untimed, "monday").unwrap();
        let events = sched.daily_events(DayKey::Monday);
        assert_eq!(events[0].start_minutes(), 540);
        assert_eq!(events[0].duration_minutes(), 60);
    }

    // =========================================================================
    // Derivation table
    // =========================================================================

    #[test]
    fn priority_derives_from_duration_over_90() {
        let mut sched = schedule();
        sched.add_event(RawEvent::timed("Short", "10:00", 90), "monday").unwrap();
        sched.add_event(RawEvent::timed("Long", "10:00", 91), "monday").unwrap();
        let events = sched.daily_events(DayKey::Monday);
        // 90 is not > 90
        assert_eq!(events[0].priority, Priority::Normal);
        assert_eq!(events[1].priority, Priority::High);
    }

    #[test]
    fn explicit_priority_is_never_overridden() {
        let mut sched = schedule();
        let mut raw = RawEvent::timed("Marathon", "10:00", 180);
        raw.priority = Some(Priority::Normal);
        sched.add_event(raw, "monday").unwrap();
        assert_eq!(sched.daily_events(DayKey::Monday)[0].priority, Priority::Normal);
    }

    #[test]
    fn show_in_weekly_derives_from_duration_or_priority() {
        let mut sched = schedule();
        sched.add_event(RawEvent::timed("Hour", "10:00", 60), "monday").unwrap();
        sched.add_event(RawEvent::timed("Longer", "10:00", 61), "monday").unwrap();
        let mut high = RawEvent::timed("Urgent", "10:00", 15);
        high.priority = Some(Priority::High);
        sched.add_event(high, "monday").unwrap();

        let events = sched.daily_events(DayKey::Monday);
        assert!(!events[0].show_in_weekly); // 60 is not > 60
        assert!(events[1].show_in_weekly);
        assert!(events[2].show_in_weekly);
    }

    #[test]
    fn derivation_uses_default_duration_when_absent() {
        let mut sched = schedule();
        let raw = RawEvent {
            title: "Untimed".into(),
            time: Some("10:00".into()),
            ..RawEvent::default()
        };
        sched.add_event(raw, "monday").unwrap();
        let event = sched.daily_events(DayKey::Monday)[0];
        // Effective duration 60: normal priority, not weekly-eligible.
        assert_eq!(event.priority, Priority::Normal);
        assert!(!event.show_in_weekly);
    }

    // =========================================================================
    // Weekly set and business hours
    // =========================================================================

    #[test]
    fn weekly_set_requires_business_hours() {
        let mut sched = schedule();
        // Qualifies by duration but starts before the window.
        sched.add_event(RawEvent::timed("Early", "08:00", 120), "monday").unwrap();
        // Same event inside the window.
        sched.add_event(RawEvent::timed("Late morning", "10:00", 120), "monday").unwrap();
        // 17:xx is still inside the inclusive window.
        sched.add_event(RawEvent::timed("Wrap-up", "17:45", 120), "monday").unwrap();
        // 18:00 is out.
        sched.add_event(RawEvent::timed("Dinner", "18:00", 120), "monday").unwrap();

        let weekly: Vec<&str> = sched.weekly_events().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(weekly, ["Late morning", "Wrap-up"]);
        // All four still live in the day bucket.
        assert_eq!(sched.day_count(DayKey::Monday), 4);
    }

    #[test]
    fn explicit_weekly_flag_is_still_gated_by_business_hours() {
        let mut sched = schedule();
        let mut raw = RawEvent::timed("Red-eye", "05:00", 30);
        raw.show_in_weekly = Some(true);
        sched.add_event(raw, "tuesday").unwrap();
        assert!(sched.weekly_events().is_empty());
        assert_eq!(sched.day_count(DayKey::Tuesday), 1);
    }

    #[test]
    fn short_off_hours_event_stays_daily_only() {
        let mut sched = schedule();
        sched.add_event(RawEvent::timed("Run", "08:00", 30), "wednesday").unwrap();
        assert!(sched.weekly_events().is_empty());
        assert_eq!(sched.daily_events(DayKey::Wednesday).len(), 1);
    }

    #[test]
    fn ninety_minute_event_in_hours_is_weekly_eligible() {
        // duration=90: priority stays normal (not > 90) but showInWeekly
        // derives true (> 60), and 10:00 is inside business hours.
        let mut sched = schedule();
        sched.add_event(RawEvent::timed("Review", "10:00", 90), "thursday").unwrap();
        let weekly = sched.weekly_events();
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly[0].priority, Priority::Normal);
    }

    #[test]
    fn monday_scenario_only_planning_is_weekly() {
        // Standup: 60 min, normal, derived showInWeekly false.
        // Planning: 120 min, explicit high, in hours -> weekly.
        let sched = schedule_with(&[
            ("monday", RawEvent::timed("Standup", "09:00", 60)),
            ("monday", {
                let mut e = RawEvent::timed("Planning", "14:00", 120);
                e.priority = Some(Priority::High);
                e
            }),
        ]);
        assert_eq!(sched.daily_events(DayKey::Monday).len(), 2);
        let weekly: Vec<&str> = sched.weekly_events().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(weekly, ["Planning"]);
    }

    #[test]
    fn widened_window_admits_off_hours_events() {
        let mut sched = WeekSchedule::new(BusinessHours {
            start_hour: 0,
            end_hour: 23,
        });
        sched.add_event(RawEvent::timed("Red-eye", "05:00", 120), "monday").unwrap();
        assert_eq!(sched.weekly_events().len(), 1);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[test]
    fn daily_events_preserve_insertion_order() {
        let sched = schedule_with(&[
            ("friday", RawEvent::timed("Later", "15:00", 30)),
            ("friday", RawEvent::timed("Earlier", "09:00", 30)),
        ]);
        let titles: Vec<&str> = sched
            .daily_events(DayKey::Friday)
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        // Insertion order, not chronological.
        assert_eq!(titles, ["Later", "Earlier"]);
    }

    #[test]
    fn empty_day_queries_are_empty_not_errors() {
        let sched = schedule();
        assert!(sched.daily_events(DayKey::Sunday).is_empty());
        assert_eq!(sched.day_count(DayKey::Sunday), 0);
    }

    #[test]
    fn all_events_spans_days_in_insertion_order() {
        let sched = schedule_with(&[
            ("sunday", RawEvent::timed("A", "09:00", 30)),
            ("monday", RawEvent::timed("B", "09:00", 30)),
            ("sunday", RawEvent::timed("C", "09:00", 30)),
        ]);
        let ids: Vec<EventId> = sched.all_events().iter().map(|e| e.id).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert_eq!(
            sched.total_events(),
            DayKey::ALL.iter().map(|&d| sched.day_count(d)).sum::<usize>()
        );
    }

    // =========================================================================
    // Slot overlap
    // =========================================================================

    fn slot(start_minutes: u32, duration_minutes: u32) -> TimeSlot {
        TimeSlot {
            label: minutes_label(start_minutes),
            start_minutes,
            duration_minutes,
        }
    }

    #[test]
    fn event_at_slot_end_boundary_is_excluded() {
        let sched = schedule_with(&[("monday", RawEvent::timed("Ten", "10:00", 60))]);
        // 10:00 event vs the 09:00 slot: starts exactly at slot end.
        assert!(sched.events_in_slot(DayKey::Monday, &slot(540, 60)).is_empty());
        assert_eq!(sched.events_in_slot(DayKey::Monday, &slot(600, 60)).len(), 1);
    }

    #[test]
    fn event_ending_at_slot_start_is_excluded() {
        let sched = schedule_with(&[("monday", RawEvent::timed("Eight", "08:00", 60))]);
        // Ends at 09:00 exactly: not in the 09:00 slot.
        assert!(sched.events_in_slot(DayKey::Monday, &slot(540, 60)).is_empty());
    }

    #[test]
    fn spanning_event_appears_in_both_slots() {
        // [510, 555) vs [480, 540) and [540, 600): overlaps both.
        let sched = schedule_with(&[("monday", RawEvent::timed("Span", "08:30", 45))]);
        assert_eq!(sched.events_in_slot(DayKey::Monday, &slot(480, 60)).len(), 1);
        assert_eq!(sched.events_in_slot(DayKey::Monday, &slot(540, 60)).len(), 1);
        assert!(sched.events_in_slot(DayKey::Monday, &slot(600, 60)).is_empty());
    }

    #[test]
    fn untimed_event_defaults_into_the_nine_oclock_slot() {
        let raw = RawEvent {
            title: "Untimed".into(),
            ..RawEvent::default()
        };
        let mut sched = schedule();
        sched.add_event(raw, "monday").unwrap();
        assert_eq!(sched.events_in_slot(DayKey::Monday, &slot(540, 60)).len(), 1);
        assert!(sched.events_in_slot(DayKey::Monday, &slot(480, 60)).is_empty());
    }

    #[test]
    fn absurd_duration_saturates_instead_of_overflowing() {
        let sched = schedule_with(&[("monday", RawEvent::timed("Forever", "10:00", u32::MAX))]);
        assert_eq!(sched.events_in_slot(DayKey::Monday, &slot(600, 60)).len(), 1);
        let event = sched.daily_events(DayKey::Monday)[0];
        assert_eq!(event.end_minutes(), u32::MAX);
        assert_eq!(event.end_label(), "23:59");
    }

    #[test]
    fn slot_matches_keep_bucket_order() {
        let sched = schedule_with(&[
            ("monday", RawEvent::timed("Second by clock", "09:30", 30)),
            ("monday", RawEvent::timed("First by clock", "09:00", 30)),
        ]);
        let titles: Vec<&str> = sched
            .events_in_slot(DayKey::Monday, &slot(540, 60))
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, ["Second by clock", "First by clock"]);
    }

    #[test]
    fn starts_in_distinguishes_continuation_rows() {
        let sched = schedule_with(&[("monday", RawEvent::timed("Long", "09:00", 120))]);
        let event = sched.daily_events(DayKey::Monday)[0];
        assert!(event.starts_in(&slot(540, 30)));
        assert!(!event.starts_in(&slot(570, 30)));
        assert!(!event.starts_in(&slot(600, 30)));
    }

    // =========================================================================
    // Time parsing
    // =========================================================================

    #[test]
    fn parse_hhmm_accepts_24h_forms() {
        assert_eq!(parse_hhmm("09:00"), Some(540));
        assert_eq!(parse_hhmm("9:00"), Some(540));
        assert_eq!(parse_hhmm("00:00"), Some(0));
        assert_eq!(parse_hhmm("23:59"), Some(1439));
    }

    #[test]
    fn parse_hhmm_rejects_garbage() {
        for bad in [
            "", "9", "09:0", "09:000", "24:00", "12:60", "9am", "09-00", "aa:bb", " 09:00",
            "+9:30", "9:+0",
        ] {
            assert_eq!(parse_hhmm(bad), None, "accepted {bad:?}");
        }
    }

    #[test]
    fn event_labels_render_start_and_end() {
        let sched = schedule_with(&[("monday", RawEvent::timed("Call", "14:00", 45))]);
        let event = sched.daily_events(DayKey::Monday)[0];
        assert_eq!(event.start_label(), "14:00");
        assert_eq!(event.end_label(), "14:45");
    }
}
