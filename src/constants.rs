//! Shared UI constants such as colors and control sizing.

pub const BG_BASE: &str = "#0a0a0b";
pub const BG_ELEVATED: &str = "#141414";
pub const BG_SURFACE: &str = "#1a1a1a";
pub const BG_HOVER: &str = "#262626";

pub const BORDER_DEFAULT: &str = "#27272a";
pub const BORDER_STRONG: &str = "#3f3f46";
pub const BORDER_ACCENT: &str = "#3b82f6";

pub const TEXT_PRIMARY: &str = "#fafafa";
pub const TEXT_SECONDARY: &str = "#a1a1aa";
pub const TEXT_MUTED: &str = "#71717a";
pub const TEXT_DIM: &str = "#52525b";

pub const ACCENT_PIT: &str = "#f97316";

pub const WINDOW_WIDTH: f64 = 1280.0;
pub const WINDOW_HEIGHT: f64 = 900.0;
pub const HEADER_HEIGHT: f64 = 36.0;
pub const PAN_BAR_HEIGHT: f64 = 24.0;
pub const PAN_TRACK_HEIGHT: f64 = 5.0;
pub const PAN_SLIDER_HEIGHT: f64 = 15.0;

/// Side length of the square drawn for a layout point.
pub const POINT_SIZE: f64 = 10.0;
pub const SEGMENT_STROKE_WIDTH: f64 = 1.5;
pub const LABEL_FONT_SIZE: f64 = 11.0;

/// Seasons offered on the start screen. OpenF1 coverage begins in 2023.
pub const SEASON_YEARS: &[i32] = &[2023, 2024, 2025];

pub const TIME_ZOOM_MIN: f64 = 1.0;
pub const TIME_ZOOM_MAX: f64 = 8.0;
pub const TIME_ZOOM_STEP: f64 = 1.25;

pub const NO_DATA_MESSAGE: &str = "Not enough data to be displayed. Try another race.";
