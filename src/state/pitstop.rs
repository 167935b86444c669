use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::TimelineError;
use super::Race;

/// A single stop in the pit lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pitstop {
    /// Car number of the driver who stopped
    pub driver_number: u32,
    /// Lap on which the stop began
    pub lap_number: u32,
    /// Time spent in the pit lane, in seconds
    pub duration_seconds: f64,
    /// Instant the car entered the pit lane
    pub start: DateTime<Utc>,
}

impl Pitstop {
    pub fn new(
        driver_number: u32,
        lap_number: u32,
        duration_seconds: f64,
        start: DateTime<Utc>,
    ) -> Self {
        Self {
            driver_number,
            lap_number,
            duration_seconds,
            start,
        }
    }

    /// Instant the car left the pit lane (millisecond precision), or `None`
    /// when the duration runs past the representable date range.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        after_seconds(self.start, self.duration_seconds)
    }

    /// Milliseconds from the race start to pit entry.
    pub fn start_offset(&self, race: &Race) -> i64 {
        race.offset_millis(self.start)
    }

    /// Milliseconds from the race start to pit exit.
    pub fn end_offset(&self, race: &Race) -> Option<i64> {
        self.end().map(|end| race.offset_millis(end))
    }

    /// Reject records whose telemetry cannot be placed on a timeline.
    pub fn validate(&self) -> Result<(), TimelineError> {
        let reason = if self.driver_number == 0 {
            "missing driver number".to_string()
        } else if self.lap_number == 0 {
            "missing lap number".to_string()
        } else if !self.duration_seconds.is_finite() || self.duration_seconds < 0.0 {
            format!("invalid duration {}", self.duration_seconds)
        } else if self.end().is_none() {
            format!("duration {}s ends outside the supported date range", self.duration_seconds)
        } else {
            return Ok(());
        };
        Err(TimelineError::MalformedRecord {
            record: "pitstop",
            reason,
        })
    }
}

/// `instant` moved forward by a fractional number of seconds, truncated to
/// whole milliseconds. `None` for non-finite input or an unrepresentable result.
pub(crate) fn after_seconds(instant: DateTime<Utc>, seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    TimeDelta::try_milliseconds((seconds * 1000.0) as i64)
        .and_then(|delta| instant.checked_add_signed(delta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn race() -> Race {
        let start = Utc.with_ymd_and_hms(2024, 9, 1, 13, 0, 0).unwrap();
        Race::new(9590, "Monza", "2024-09-01", start)
    }

    #[test]
    fn test_offsets_span_the_stop() {
        let race = race();
        let stop = Pitstop::new(16, 20, 25.0, race.start + TimeDelta::milliseconds(1_200_000));
        assert_eq!(stop.start_offset(&race), 1_200_000);
        assert_eq!(stop.end_offset(&race), Some(1_225_000));
    }

    #[test]
    fn test_fractional_duration_truncates_to_millis() {
        let race = race();
        let stop = Pitstop::new(16, 20, 22.4567, race.start);
        assert_eq!(stop.end_offset(&race), Some(22_456));
    }

    #[test]
    fn test_validate_rejects_unplaceable_records() {
        let race = race();
        assert!(Pitstop::new(16, 20, 23.1, race.start).validate().is_ok());
        assert!(Pitstop::new(0, 20, 23.1, race.start).validate().is_err());
        assert!(Pitstop::new(16, 0, 23.1, race.start).validate().is_err());
        assert!(Pitstop::new(16, 20, f64::NAN, race.start).validate().is_err());
        assert!(Pitstop::new(16, 20, -1.0, race.start).validate().is_err());
    }

    #[test]
    fn test_duration_past_date_range_is_malformed() {
        let race = race();
        let stop = Pitstop::new(16, 20, 1e15, race.start);
        assert_eq!(stop.end(), None);
        assert_eq!(stop.end_offset(&race), None);
        assert!(matches!(
            stop.validate(),
            Err(TimelineError::MalformedRecord { record: "pitstop", .. })
        ));
    }
}
