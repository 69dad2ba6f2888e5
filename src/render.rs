//! HTML planner generation.
//!
//! Stage 2 of the inkweek build pipeline. Takes a populated
//! [`WeekSchedule`] and renders the linked page set the PDF converter (or a
//! tablet browser) consumes.
//!
//! ## Generated Pages
//!
//! - **Weekly overview** (`index.html`): landscape slot × day grid, weekly
//!   summary list, priority tasks and weekly goals checklists
//! - **Day pages** (`monday.html` … `sunday.html`): portrait slot grid for
//!   one day with full event detail
//!
//! ## Cross-Page Links
//!
//! Links are bidirectional: every day-column header on the weekly grid
//! links to its day page, and every day page links back to the overview
//! plus its previous/next day. This is what makes the exported PDF
//! navigable on an e-ink tablet.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping. The
//! stylesheet is embedded at compile time (`static/planner.css`) with page
//! geometry CSS prepended from config.

use crate::config::{self, PlannerConfig};
use crate::ingest::{date_for, week_dates};
use crate::schedule::{Event, WeekSchedule};
use crate::slots::{self, TimeSlot};
use crate::types::{DayKey, WeekData};
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/planner.css");

/// What got rendered, for CLI reporting.
pub struct RenderSummary {
    /// Generated page filenames in generation order.
    pub pages: Vec<String>,
}

/// Render the full page set into `output_dir`.
///
/// `monday` is the date the week starts on; day pages carry the concrete
/// dates derived from it.
pub fn render(
    schedule: &WeekSchedule,
    data: &WeekData,
    monday: NaiveDate,
    config: &PlannerConfig,
    output_dir: &Path,
) -> Result<RenderSummary, RenderError> {
    let css = format!(
        "{}\n\n{}",
        config::generate_geometry_css(&config.page),
        CSS_STATIC
    );
    let slots = slots::time_slots(&config.slots);

    fs::create_dir_all(output_dir)?;

    let mut pages = Vec::new();

    let weekly = render_weekly_page(schedule, data, monday, config, &slots, &css);
    fs::write(output_dir.join("index.html"), weekly.into_string())?;
    pages.push("index.html".to_string());

    for day in DayKey::ALL {
        let page = render_day_page(schedule, day, monday, config, &slots, &css);
        fs::write(output_dir.join(day.page_name()), page.into_string())?;
        pages.push(day.page_name());
    }

    Ok(RenderSummary { pages })
}

/// Truncate a title to a character budget, appending `…` if cut.
///
/// Counts chars, not bytes, so multibyte titles never split mid-scalar.
pub fn truncate_title(title: &str, budget: usize) -> String {
    match title.char_indices().nth(budget) {
        Some((byte_pos, _)) => format!("{}…", &title[..byte_pos]),
        None => title.to_string(),
    }
}

fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d").to_string()
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure.
fn base_document(title: &str, css: &str, body_class: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body class=(body_class) {
                (content)
            }
        }
    }
}

/// Renders a page header: title line plus the navigation strip.
fn page_header(title: &str, nav: Markup) -> Markup {
    html! {
        header.page-header {
            h1 { (title) }
            nav.page-nav { (nav) }
        }
    }
}

/// One event entry inside a weekly grid cell.
fn weekly_cell_entry(event: &Event, budget: usize) -> Markup {
    html! {
        span.event.high[event.priority.is_high()] {
            (truncate_title(&event.title, budget))
        }
    }
}

/// One event row on a day page: full detail on its starting slot,
/// a continuation marker on every later slot it overlaps.
fn day_cell_entry(event: &Event, slot: &TimeSlot, budget: usize) -> Markup {
    html! {
        @if event.starts_in(slot) {
            div.event.high[event.priority.is_high()] {
                span.event-time { (event.start_label()) "–" (event.end_label()) }
                " "
                span.event-title { (truncate_title(&event.title, budget)) }
                @if let Some(desc) = &event.description {
                    span.event-desc { " — " (desc) }
                }
            }
        } @else {
            div.event.cont {
                span.event-title { (truncate_title(&event.title, budget)) " (cont.)" }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the landscape weekly overview.
fn render_weekly_page(
    schedule: &WeekSchedule,
    data: &WeekData,
    monday: NaiveDate,
    config: &PlannerConfig,
    slots: &[TimeSlot],
    css: &str,
) -> Markup {
    let dates = week_dates(monday);
    let title = format!("Week of {}", long_date(monday));
    let budget = config.display.weekly_title_chars;

    let nav = html! {
        @for day in DayKey::ALL {
            a href=(day.page_name()) { (day.label()) }
        }
    };

    let content = html! {
        (page_header(&title, nav))
        main.weekly-page {
            table.week-grid {
                thead {
                    tr {
                        th.time-col {}
                        @for day in DayKey::ALL {
                            th.day-col {
                                a href=(day.page_name()) {
                                    span.day-name { (day.label()) }
                                    span.day-date { (short_date(dates[day.offset()])) }
                                }
                            }
                        }
                    }
                }
                tbody {
                    @for slot in slots {
                        tr {
                            th.time-col scope="row" { (slot.label) }
                            @for day in DayKey::ALL {
                                td {
                                    @for event in schedule.events_in_slot(day, slot) {
                                        (weekly_cell_entry(event, budget))
                                    }
                                }
                            }
                        }
                    }
                }
            }
            aside.week-sidebar {
                section.weekly-summary {
                    h2 { "This Week" }
                    @let weekly = schedule.weekly_events();
                    @if weekly.is_empty() {
                        p.empty { "No weekly-flagged events" }
                    } @else {
                        ul {
                            @for event in &weekly {
                                li {
                                    a href=(event.day.page_name()) { (event.day.label()) }
                                    " " (event.start_label()) " " (event.title)
                                }
                            }
                        }
                    }
                }
                @if !data.priority_tasks.is_empty() {
                    section.priority-tasks {
                        h2 { "Priority Tasks" }
                        ul.checklist {
                            @for task in &data.priority_tasks {
                                li { (task) }
                            }
                        }
                    }
                }
                @if !data.weekly_goals.is_empty() {
                    section.weekly-goals {
                        h2 { "Weekly Goals" }
                        ul.checklist {
                            @for goal in &data.weekly_goals {
                                li { (goal) }
                            }
                        }
                    }
                }
                p.week-count { (schedule.total_events()) " events this week" }
            }
        }
    };

    base_document(&title, css, "weekly-view", content)
}

/// Renders one portrait day page.
fn render_day_page(
    schedule: &WeekSchedule,
    day: DayKey,
    monday: NaiveDate,
    config: &PlannerConfig,
    slots: &[TimeSlot],
    css: &str,
) -> Markup {
    let date = date_for(day, monday);
    let title = format!("{} — {}", day.label(), long_date(date));
    let budget = config.display.daily_title_chars;
    let prev = DayKey::ALL[(day.offset() + 6) % 7];
    let next = DayKey::ALL[(day.offset() + 1) % 7];

    let nav = html! {
        a.back href="index.html" { "← Week overview" }
        a.prev href=(prev.page_name()) { "‹ " (prev.label()) }
        a.next href=(next.page_name()) { (next.label()) " ›" }
    };

    let content = html! {
        (page_header(&title, nav))
        main.day-page {
            table.day-grid {
                tbody {
                    @for slot in slots {
                        tr {
                            th.time-col scope="row" { (slot.label) }
                            td {
                                @for event in schedule.events_in_slot(day, slot) {
                                    (day_cell_entry(event, slot, budget))
                                }
                            }
                        }
                    }
                }
            }
            footer.day-footer {
                p { (schedule.day_count(day)) " events" }
            }
        }
    };

    base_document(&title, css, "day-view", content)
}

// ============================================================================
// Tests
// ============================================================================
