use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::TimelineError;
use super::Race;

/// An sRGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `rrggbb` team colour, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self, TimelineError> {
        let digits = hex.trim().trim_start_matches('#');
        let malformed = || TimelineError::MalformedRecord {
            record: "driver",
            reason: format!("invalid colour {:?}", hex),
        };
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(malformed());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| malformed())
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A driver's result in one race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    /// Display name (three-letter acronym from OpenF1)
    pub name: String,
    /// Car number, unique within a race
    pub number: u32,
    /// Instant the driver completed their final lap
    pub finish: DateTime<Utc>,
    /// Last lap number completed
    pub final_lap: u32,
    /// Team colour
    pub color: Rgb,
}

impl Driver {
    pub fn new(
        name: impl Into<String>,
        number: u32,
        finish: DateTime<Utc>,
        final_lap: u32,
        color: Rgb,
    ) -> Self {
        Self {
            name: name.into(),
            number,
            finish,
            final_lap,
            color,
        }
    }

    /// Milliseconds from the race start to the driver's finish.
    pub fn finish_offset(&self, race: &Race) -> i64 {
        race.offset_millis(self.finish)
    }

    /// Whether the driver carries enough telemetry to be placed on the timeline.
    pub fn has_telemetry(&self, race: &Race) -> bool {
        self.final_lap > 0 && self.finish_offset(race) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_team_colour() {
        assert_eq!(Rgb::from_hex("3671C6").unwrap(), Rgb::new(0x36, 0x71, 0xc6));
        assert_eq!(Rgb::from_hex("#ff8000").unwrap(), Rgb::new(0xff, 0x80, 0x00));
        assert!(Rgb::from_hex("12345").is_err());
        assert!(Rgb::from_hex("zz0000").is_err());
        assert!(Rgb::from_hex("ééé").is_err());
    }

    #[test]
    fn test_colour_display_round_trips_hex() {
        let color = Rgb::new(0x27, 0xf4, 0xd2);
        assert_eq!(color.to_string(), "#27f4d2");
    }

    #[test]
    fn test_telemetry_requires_positive_finish_and_lap() {
        let start = Utc.with_ymd_and_hms(2024, 5, 26, 13, 0, 0).unwrap();
        let race = Race::new(9523, "Monte Carlo", "2024-05-26", start);
        let finish = start + chrono::Duration::minutes(100);

        let driver = Driver::new("LEC", 16, finish, 78, Rgb::BLACK);
        assert!(driver.has_telemetry(&race));
        assert_eq!(driver.finish_offset(&race), 6_000_000);

        let no_laps = Driver::new("LEC", 16, finish, 0, Rgb::BLACK);
        assert!(!no_laps.has_telemetry(&race));

        let before_start = Driver::new("LEC", 16, start, 78, Rgb::BLACK);
        assert!(!before_start.has_telemetry(&race));
    }
}
