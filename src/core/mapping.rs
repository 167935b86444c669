//! Linear time→x and lap→y mapping shared by every layout primitive.

use crate::core::error::{InsufficientReason, TimelineError};
use crate::state::{RaceData, Race};

/// Visible chart area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Viewport plus the margins the mapping must respect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub viewport: Viewport,
    /// Margin on every side of the plot.
    pub padding: f64,
    /// Width held back from the time scale.
    pub gutter: f64,
    /// Magnification over the fitted time scale; 1.0 fits the race into the viewport.
    pub time_zoom: f64,
}

/// Reject viewport geometry before any scale is derived from it.
pub fn validate_frame(viewport: Viewport, padding: f64, gutter: f64) -> Result<(), TimelineError> {
    let invalid = |reason: String| Err(TimelineError::InvalidConfiguration(reason));
    if !viewport.width.is_finite() || !viewport.height.is_finite() {
        return invalid(format!("viewport {}x{} is not finite", viewport.width, viewport.height));
    }
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return invalid(format!("viewport {}x{} must be positive", viewport.width, viewport.height));
    }
    if !padding.is_finite() || padding < 0.0 || !gutter.is_finite() || gutter < 0.0 {
        return invalid(format!("padding {} and gutter {} must not be negative", padding, gutter));
    }
    if viewport.width - 2.0 * padding - gutter <= 0.0 || viewport.height - 2.0 * padding <= 0.0 {
        return invalid(format!(
            "padding {} leaves no drawable area in {}x{}",
            padding, viewport.width, viewport.height
        ));
    }
    Ok(())
}

/// Scale factors derived from a viewport and race-wide extrema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapping {
    frame: ChartFrame,
    time_scale: f64,
    lap_scale: f64,
    max_finish_offset: i64,
    max_final_lap: u32,
}

impl CoordinateMapping {
    /// Fit the latest finish and the highest final lap into `frame`.
    pub fn compute(
        frame: &ChartFrame,
        race_data: &RaceData,
        race: &Race,
    ) -> Result<Self, TimelineError> {
        validate_frame(frame.viewport, frame.padding, frame.gutter)?;
        let max_finish_offset = race_data
            .max_finish_offset(race)
            .ok_or(TimelineError::InsufficientData(InsufficientReason::NoDrivers))?;
        let max_final_lap = race_data
            .max_final_lap()
            .ok_or(TimelineError::InsufficientData(InsufficientReason::NoDrivers))?;
        Self::from_extrema(frame, max_finish_offset, max_final_lap)
    }

    /// Build a mapping from precomputed extrema.
    pub fn from_extrema(
        frame: &ChartFrame,
        max_finish_offset: i64,
        max_final_lap: u32,
    ) -> Result<Self, TimelineError> {
        validate_frame(frame.viewport, frame.padding, frame.gutter)?;
        if !frame.time_zoom.is_finite() || frame.time_zoom <= 0.0 {
            return Err(TimelineError::InvalidConfiguration(format!(
                "time zoom must be positive, got {}",
                frame.time_zoom
            )));
        }
        if max_finish_offset <= 0 {
            return Err(TimelineError::InsufficientData(InsufficientReason::NoFinishTime));
        }
        if max_final_lap == 0 {
            return Err(TimelineError::InsufficientData(InsufficientReason::NoLaps));
        }

        let viewport = frame.viewport;
        let drawable_width = viewport.width - 2.0 * frame.padding - frame.gutter;
        let drawable_height = viewport.height - 2.0 * frame.padding;

        Ok(Self {
            frame: *frame,
            time_scale: drawable_width / max_finish_offset as f64 * frame.time_zoom,
            lap_scale: drawable_height / max_final_lap as f64,
            max_finish_offset,
            max_final_lap,
        })
    }

    /// Pixels per millisecond.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Pixels per lap.
    pub fn lap_scale(&self) -> f64 {
        self.lap_scale
    }

    pub fn padding(&self) -> f64 {
        self.frame.padding
    }

    pub fn viewport(&self) -> Viewport {
        self.frame.viewport
    }

    pub fn max_finish_offset(&self) -> i64 {
        self.max_finish_offset
    }

    pub fn max_final_lap(&self) -> u32 {
        self.max_final_lap
    }

    /// X coordinate of a race offset in milliseconds.
    pub fn time_to_x(&self, offset_ms: i64) -> f64 {
        offset_ms as f64 * self.time_scale + self.frame.padding
    }

    /// Y coordinate of a lap number; lap 0 sits on the bottom axis.
    pub fn lap_to_y(&self, lap: u32) -> f64 {
        self.frame.viewport.height - lap as f64 * self.lap_scale - self.frame.padding
    }

    /// Total horizontal extent of the laid-out race.
    pub fn content_width(&self) -> f64 {
        self.frame.padding + self.max_finish_offset as f64 * self.time_scale + self.frame.padding
    }
}

/// Free-function form of [`CoordinateMapping::compute`].
pub fn compute_mapping(
    frame: &ChartFrame,
    race_data: &RaceData,
    race: &Race,
) -> Result<CoordinateMapping, TimelineError> {
    CoordinateMapping::compute(frame, race_data, race)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Driver, Rgb};
    use chrono::{Duration, TimeZone, Utc};

    fn frame() -> ChartFrame {
        ChartFrame {
            viewport: Viewport::new(1280.0, 800.0),
            padding: 50.0,
            gutter: 50.0,
            time_zoom: 1.0,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_scales_fit_extrema() {
        let mapping = CoordinateMapping::from_extrema(&frame(), 3_600_000, 50).unwrap();
        assert!(approx(mapping.time_scale(), 1130.0 / 3_600_000.0));
        assert!(approx(mapping.lap_scale(), 700.0 / 50.0));

        assert!(approx(mapping.time_to_x(0), 50.0));
        assert!(approx(mapping.time_to_x(3_600_000), 1180.0));
        assert!(approx(mapping.lap_to_y(0), 750.0));
        assert!(approx(mapping.lap_to_y(50), 50.0));
        assert!(approx(mapping.content_width(), 1230.0));
    }

    #[test]
    fn test_zoom_widens_content_past_viewport() {
        let zoomed = ChartFrame {
            time_zoom: 2.0,
            ..frame()
        };
        let mapping = CoordinateMapping::from_extrema(&zoomed, 3_600_000, 50).unwrap();
        assert!(approx(mapping.content_width(), 50.0 + 2260.0 + 50.0));
        assert!(mapping.content_width() >= zoomed.viewport.width);
    }

    #[test]
    fn test_degenerate_extrema_are_insufficient() {
        assert_eq!(
            CoordinateMapping::from_extrema(&frame(), 0, 50),
            Err(TimelineError::InsufficientData(InsufficientReason::NoFinishTime))
        );
        assert_eq!(
            CoordinateMapping::from_extrema(&frame(), 3_600_000, 0),
            Err(TimelineError::InsufficientData(InsufficientReason::NoLaps))
        );
    }

    #[test]
    fn test_empty_race_data_is_insufficient() {
        let start = Utc.with_ymd_and_hms(2024, 4, 7, 5, 0, 0).unwrap();
        let race = Race::new(9496, "Suzuka", "2024-04-07", start);
        let result = compute_mapping(&frame(), &RaceData::default(), &race);
        assert_eq!(result, Err(TimelineError::InsufficientData(InsufficientReason::NoDrivers)));
    }

    #[test]
    fn test_compute_uses_race_wide_extrema() {
        let start = Utc.with_ymd_and_hms(2024, 4, 7, 5, 0, 0).unwrap();
        let race = Race::new(9496, "Suzuka", "2024-04-07", start);
        let drivers = vec![
            Driver::new("VER", 1, start + Duration::milliseconds(3_500_000), 53, Rgb::BLACK),
            Driver::new("SAR", 2, start + Duration::milliseconds(3_600_000), 52, Rgb::BLACK),
        ];
        let data = RaceData::new(drivers, Vec::new());
        let mapping = CoordinateMapping::compute(&frame(), &data, &race).unwrap();
        assert_eq!(mapping.max_finish_offset(), 3_600_000);
        assert_eq!(mapping.max_final_lap(), 53);
    }

    #[test]
    fn test_invalid_frames_are_rejected_first() {
        let cases = [
            Viewport::new(0.0, 800.0),
            Viewport::new(1280.0, -1.0),
            Viewport::new(f64::NAN, 800.0),
            Viewport::new(140.0, 800.0),
            Viewport::new(1280.0, 100.0),
        ];
        for viewport in cases {
            let frame = ChartFrame { viewport, ..frame() };
            assert!(matches!(
                CoordinateMapping::from_extrema(&frame, 3_600_000, 50),
                Err(TimelineError::InvalidConfiguration(_))
            ));
        }
    }
}
