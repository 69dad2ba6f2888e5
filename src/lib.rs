//! # Inkweek
//!
//! A weekly planner generator for e-ink tablets. A single `week.json` file is
//! the data source: events keyed by weekday become a linked set of HTML pages
//! sized for a 1620×2160 screen, ready for conversion to a navigable PDF.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! Inkweek processes a week through three independent stages:
//!
//! ```text
//! 1. Ingest   week.json  →  WeekSchedule    (raw events → indexed schedule)
//! 2. Render   schedule   →  out/*.html      (weekly overview + 7 day pages)
//! 3. Convert  out/       →  planner.pdf     (external converter, optional)
//! ```
//!
//! The ingest stage is where all validation and derivation happens: it parses
//! times once, assigns stable event ids, derives priority and weekly-summary
//! eligibility, and buckets events by day. The render stage is a pure function
//! from that schedule to HTML; it never re-validates or re-sorts. The convert
//! stage shells out to a browser and is the only stage with a system
//! dependency, which is why it is optional and behind a trait.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`ingest`] | Stage 1 — loads `week.json`, builds the [`schedule::WeekSchedule`], reports skipped events |
//! | [`render`] | Stage 2 — renders the weekly overview and day pages with Maud |
//! | [`pdf`] | Stage 3 — subprocess PDF conversion behind the [`pdf::PdfConverter`] trait |
//! | [`schedule`] | The event index: ids, derivation rules, day buckets, the weekly set, slot queries |
//! | [`slots`] | Time slot grid generation from configured hours and interval |
//! | [`config`] | `planner.toml` loading, validation, and page geometry CSS generation |
//! | [`types`] | Wire types for `week.json` (`DayKey`, `RawEvent`, `WeekData`) |
//! | [`output`] | CLI output formatting — event inventories and render summaries |
//!
//! # Design Decisions
//!
//! ## Derivation Happens Once, at Ingestion
//!
//! Priority and weekly-summary eligibility are derived from duration when an
//! event is added to the schedule and stored on the [`schedule::Event`].
//! Missing times and durations, by contrast, stay `None` and default at query
//! time — an event with no time is valid, an event with a malformed one is
//! not, and the two cases never blur together.
//!
//! ## Insertion Order Is the Only Order
//!
//! Events keep the order they appear in `week.json`, both in day buckets and
//! on the weekly overview. Whoever writes the file decides what comes first;
//! the index never re-sorts chronologically. Within a time slot on a rendered
//! page, ordering likewise follows insertion order.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Malformed HTML is a
//! build error, template variables are Rust expressions, and all interpolation
//! is auto-escaped — event titles from `week.json` cannot inject markup.
//! There is no template directory to ship; the only runtime asset is one CSS
//! file embedded with `include_str!`.
//!
//! ## PDF Conversion Is a Subprocess
//!
//! True in-process PDF generation would drag in a huge dependency for what a
//! headless browser already does well, including the internal page links the
//! planner relies on for navigation. The [`pdf::CommandConverter`] runs a
//! configurable command (Chromium by default) and the rest of the crate
//! neither knows nor cares what produced the file.

pub mod config;
pub mod ingest;
pub mod output;
pub mod pdf;
pub mod render;
pub mod schedule;
pub mod slots;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
