//! Planner configuration module.
//!
//! Handles loading and validating `planner.toml`. There is a single config
//! file per planner project; user values override stock defaults key by key.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [slots]
//! start_hour = 7            # First grid hour (0-23)
//! end_hour = 22             # Last grid hour, inclusive boundary slot
//! interval_minutes = 30     # Row granularity
//!
//! [business_hours]
//! start_hour = 9            # Weekly-eligibility window, inclusive
//! end_hour = 17
//!
//! [display]
//! weekly_title_chars = 9    # Title budget in weekly grid cells
//! daily_title_chars = 40    # Title budget on day pages
//!
//! [page]
//! width = 1620              # Device pixels, portrait
//! height = 2160
//!
//! [converter]
//! command = ["chromium", "--headless", "--disable-gpu"]
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only widen the grid to early mornings
//! [slots]
//! start_hour = 6
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Planner configuration loaded from `planner.toml`.
///
/// All fields have defaults matching the original reMarkable layout
/// (07:00–22:00 grid at half-hour granularity, 9–17 business hours,
/// 1620×2160 portrait pages). Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Time-slot grid range and granularity.
    pub slots: SlotsConfig,
    /// Clock-hour window gating weekly-overview eligibility.
    pub business_hours: BusinessHours,
    /// Title truncation budgets per target area.
    pub display: DisplayConfig,
    /// Target device page geometry.
    pub page: PageConfig,
    /// External HTML-to-PDF converter invocation.
    pub converter: ConverterConfig,
}

impl PlannerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slots.start_hour > self.slots.end_hour {
            return Err(ConfigError::Validation(
                "slots.start_hour must not exceed slots.end_hour".into(),
            ));
        }
        if self.slots.end_hour > 23 {
            return Err(ConfigError::Validation("slots.end_hour must be 0-23".into()));
        }
        if !(1..=59).contains(&self.slots.interval_minutes) {
            return Err(ConfigError::Validation(
                "slots.interval_minutes must be 1-59".into(),
            ));
        }
        if self.business_hours.start_hour > self.business_hours.end_hour {
            return Err(ConfigError::Validation(
                "business_hours.start_hour must not exceed business_hours.end_hour".into(),
            ));
        }
        if self.business_hours.end_hour > 23 {
            return Err(ConfigError::Validation(
                "business_hours.end_hour must be 0-23".into(),
            ));
        }
        if self.display.weekly_title_chars == 0 || self.display.daily_title_chars == 0 {
            return Err(ConfigError::Validation(
                "display title budgets must be non-zero".into(),
            ));
        }
        if self.page.width == 0 || self.page.height == 0 {
            return Err(ConfigError::Validation(
                "page dimensions must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Time-slot grid settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlotsConfig {
    /// First hour on the grid (0-23).
    pub start_hour: u8,
    /// Last hour on the grid, rendered as a single inclusive `:00` boundary slot.
    pub end_hour: u8,
    /// Minutes per grid row. Divisors of 60 give uniform rows; non-divisors
    /// simply stop before the next hour.
    pub interval_minutes: u32,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            start_hour: 7,
            end_hour: 22,
            interval_minutes: 30,
        }
    }
}

/// Clock-hour window used to decide weekly-summary eligibility.
///
/// Both bounds are inclusive: the default 9–17 admits an event starting at
/// 17:45 (hour 17) and rejects one at 08:59 (hour 8).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BusinessHours {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
        }
    }
}

impl BusinessHours {
    /// Whether a start hour falls inside the window.
    pub fn contains(&self, hour: u8) -> bool {
        (self.start_hour..=self.end_hour).contains(&hour)
    }
}

/// Title truncation budgets per target area.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Character budget for narrow weekly grid cells.
    pub weekly_title_chars: usize,
    /// Character budget for day-page rows.
    pub daily_title_chars: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            weekly_title_chars: 9,
            daily_title_chars: 40,
        }
    }
}

/// Target device page geometry, in device pixels.
///
/// Day pages use `width × height` (portrait); the weekly overview swaps
/// the axes for landscape. Defaults match the reMarkable Pro panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: 1620,
            height: 2160,
        }
    }
}

/// External HTML-to-PDF converter settings.
///
/// `command` is the argv prefix; the rendered `index.html` path and the
/// output PDF path are appended by [`crate::pdf::CommandConverter`]. An
/// empty command means no converter is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    pub command: Vec<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            command: vec![
                "chromium".to_string(),
                "--headless".to_string(),
                "--disable-gpu".to_string(),
            ],
        }
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load config from `planner.toml` at the given path.
///
/// A missing file yields the stock defaults. A present file is parsed
/// sparsely (unspecified keys keep their defaults), unknown keys are
/// rejected, and the result is validated.
pub fn load_config(path: &Path) -> Result<PlannerConfig, ConfigError> {
    if !path.exists() {
        return Ok(PlannerConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: PlannerConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `planner.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# inkweek Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Time-slot grid
# ---------------------------------------------------------------------------
[slots]
# First hour on the grid (0-23).
start_hour = 7

# Last hour on the grid. Rendered as a single inclusive :00 boundary slot,
# so 22 means the grid ends with a "22:00" row, not 22:30.
end_hour = 22

# Minutes per grid row (1-59). Divisors of 60 (15, 20, 30) give uniform rows.
interval_minutes = 30

# ---------------------------------------------------------------------------
# Weekly-overview eligibility
# ---------------------------------------------------------------------------
[business_hours]
# Events qualify for the weekly overview only when they start within this
# clock-hour window (both bounds inclusive). Widen to [0, 23] to disable
# the gate entirely.
start_hour = 9
end_hour = 17

# ---------------------------------------------------------------------------
# Display
# ---------------------------------------------------------------------------
[display]
# Title character budget in narrow weekly grid cells (ellipsis appended).
weekly_title_chars = 9

# Title character budget on day pages.
daily_title_chars = 40

# ---------------------------------------------------------------------------
# Page geometry (device pixels, portrait; weekly view swaps the axes)
# ---------------------------------------------------------------------------
[page]
width = 1620
height = 2160

# ---------------------------------------------------------------------------
# PDF conversion (optional, used by `build --pdf`)
# ---------------------------------------------------------------------------
[converter]
# Argv prefix of the HTML-to-PDF converter. inkweek appends
# --print-to-pdf=<output> and the rendered index.html path.
command = ["chromium", "--headless", "--disable-gpu"]
"##
}

/// Generate CSS custom properties from page geometry config.
///
/// Prepended to the static stylesheet so the grid scales to the target
/// device without touching the CSS file.
pub fn generate_geometry_css(page: &PageConfig) -> String {
    format!(
        r#":root {{
    --page-width: {width}px;
    --page-height: {height}px;
}}

@page portrait {{
    size: {width}px {height}px;
}}

@page landscape {{
    size: {height}px {width}px;
}}"#,
        width = page.width,
        height = page.height,
    )
}
