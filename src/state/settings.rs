use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::error::TimelineError;
use crate::core::layout::LayoutOptions;
use crate::core::mapping::{ChartFrame, Viewport};
use crate::core::paths::settings_file_path;

/// Settings file looked up next to the executable or the crate manifest.
pub const SETTINGS_FILE_NAME: &str = "pitwall.json";
/// Environment variable that points at an explicit settings file.
pub const SETTINGS_ENV_VAR: &str = "PITWALL_SETTINGS";

/// Timeline geometry and data-source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSettings {
    /// Chart viewport width in pixels
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,
    /// Chart viewport height in pixels
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    /// Margin kept clear on every side of the plot
    #[serde(default = "default_padding")]
    pub padding: f64,
    /// Horizontal space held back from the time scale for band offsets
    #[serde(default = "default_axis_gutter")]
    pub axis_gutter: f64,
    /// Horizontal shift added per driver, cumulative in finish order
    #[serde(default = "default_band_increment")]
    pub band_increment: f64,
    /// Extra pixels per second stopped, widening short pit stops
    #[serde(default = "default_pit_padding_px_per_second")]
    pub pit_padding_px_per_second: f64,
    /// Number of intervals on the lap axis
    #[serde(default = "default_lap_intervals")]
    pub lap_intervals: u32,
    /// Spacing of time-axis labels, in minutes
    #[serde(default = "default_time_tick_minutes")]
    pub time_tick_minutes: u32,
    /// Width of the pan bar slider
    #[serde(default = "default_slider_width")]
    pub slider_width: f64,
    /// Horizontal magnification applied on top of the fitted time scale
    #[serde(default = "default_time_zoom")]
    pub time_zoom: f64,
    /// OpenF1 REST endpoint
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Season shown first in the menu
    #[serde(default = "default_season")]
    pub default_season: i32,
}

fn default_viewport_width() -> f64 {
    1280.0
}

fn default_viewport_height() -> f64 {
    800.0
}

fn default_padding() -> f64 {
    50.0
}

fn default_axis_gutter() -> f64 {
    50.0
}

fn default_band_increment() -> f64 {
    18.0
}

fn default_pit_padding_px_per_second() -> f64 {
    1.5
}

fn default_lap_intervals() -> u32 {
    6
}

fn default_time_tick_minutes() -> u32 {
    10
}

fn default_slider_width() -> f64 {
    30.0
}

fn default_time_zoom() -> f64 {
    1.0
}

fn default_api_base_url() -> String {
    "https://api.openf1.org/v1".to_string()
}

fn default_season() -> i32 {
    2024
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            padding: default_padding(),
            axis_gutter: default_axis_gutter(),
            band_increment: default_band_increment(),
            pit_padding_px_per_second: default_pit_padding_px_per_second(),
            lap_intervals: default_lap_intervals(),
            time_tick_minutes: default_time_tick_minutes(),
            slider_width: default_slider_width(),
            time_zoom: default_time_zoom(),
            api_base_url: default_api_base_url(),
            default_season: default_season(),
        }
    }
}

impl TimelineSettings {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    pub fn chart_frame(&self) -> ChartFrame {
        ChartFrame {
            viewport: self.viewport(),
            padding: self.padding,
            gutter: self.axis_gutter,
            time_zoom: self.time_zoom,
        }
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            band_increment: self.band_increment,
            pit_padding_px_per_second: self.pit_padding_px_per_second,
            lap_intervals: self.lap_intervals,
            time_tick_minutes: self.time_tick_minutes,
        }
    }

    /// Reject geometry that would divide by zero or invert the chart.
    pub fn validate(&self) -> Result<(), TimelineError> {
        crate::core::mapping::validate_frame(self.viewport(), self.padding, self.axis_gutter)?;
        if !self.time_zoom.is_finite() || self.time_zoom <= 0.0 {
            return Err(TimelineError::InvalidConfiguration(format!(
                "time zoom must be positive, got {}",
                self.time_zoom
            )));
        }
        if !self.band_increment.is_finite() || self.band_increment < 0.0 {
            return Err(TimelineError::InvalidConfiguration(format!(
                "band increment must not be negative, got {}",
                self.band_increment
            )));
        }
        if !self.slider_width.is_finite()
            || self.slider_width <= 0.0
            || self.slider_width >= self.viewport_width
        {
            return Err(TimelineError::InvalidConfiguration(format!(
                "slider width {} does not fit viewport width {}",
                self.slider_width, self.viewport_width
            )));
        }
        Ok(())
    }

    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        Ok(settings)
    }

    /// Load from `PITWALL_SETTINGS` or `pitwall.json`, falling back to defaults.
    pub fn load_or_default() -> Self {
        let path = settings_path();
        if !path.exists() {
            info!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        }
        match Self::load(&path) {
            Ok(settings) => {
                info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(err) => {
                warn!(path = %path.display(), "failed to load settings, using defaults: {}", err);
                Self::default()
            }
        }
    }
}

fn settings_path() -> PathBuf {
    settings_file_path(std::env::var_os(SETTINGS_ENV_VAR), SETTINGS_FILE_NAME)
}
