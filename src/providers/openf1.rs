//! OpenF1 REST client.
//!
//! Fetches race sessions, drivers (with their last timed lap) and pit stops,
//! converting the loosely typed JSON into domain records. Records with missing
//! or unparsable fields are logged and skipped.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::ProviderError;
use crate::core::error::TimelineError;
use crate::state::{after_seconds, Driver, Pitstop, Race, RaceData, Rgb, Season};

/// Raw `/sessions` entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionRecord {
    pub session_key: Option<u32>,
    pub circuit_short_name: Option<String>,
    pub date_start: Option<String>,
}

/// Raw `/drivers` entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriverRecord {
    pub driver_number: Option<u32>,
    pub name_acronym: Option<String>,
    pub team_colour: Option<String>,
}

/// Raw `/laps` entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LapRecord {
    pub lap_number: Option<u32>,
    pub lap_duration: Option<f64>,
    pub date_start: Option<String>,
}

/// Raw `/pit` entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PitRecord {
    pub driver_number: Option<u32>,
    pub lap_number: Option<u32>,
    pub pit_duration: Option<f64>,
    pub date: Option<String>,
}

fn missing(record: &'static str, field: &str) -> TimelineError {
    TimelineError::MalformedRecord {
        record,
        reason: format!("missing {}", field),
    }
}

fn parse_instant(record: &'static str, value: Option<&str>) -> Result<DateTime<Utc>, TimelineError> {
    let text = value.ok_or_else(|| missing(record, "timestamp"))?;
    DateTime::parse_from_rfc3339(text)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| TimelineError::MalformedRecord {
            record,
            reason: format!("bad timestamp {:?}: {}", text, err),
        })
}

impl TryFrom<SessionRecord> for Race {
    type Error = TimelineError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let session_key = record.session_key.ok_or_else(|| missing("session", "session_key"))?;
        let circuit_name = record
            .circuit_short_name
            .ok_or_else(|| missing("session", "circuit_short_name"))?;
        let start = parse_instant("session", record.date_start.as_deref())?;
        let date = record.date_start.unwrap_or_default();
        Ok(Race::new(session_key, circuit_name, date, start))
    }
}

impl TryFrom<PitRecord> for Pitstop {
    type Error = TimelineError;

    fn try_from(record: PitRecord) -> Result<Self, Self::Error> {
        let driver_number = record.driver_number.ok_or_else(|| missing("pitstop", "driver_number"))?;
        let lap_number = record.lap_number.ok_or_else(|| missing("pitstop", "lap_number"))?;
        let duration = record.pit_duration.ok_or_else(|| missing("pitstop", "pit_duration"))?;
        let start = parse_instant("pitstop", record.date.as_deref())?;
        let pitstop = Pitstop::new(driver_number, lap_number, duration, start);
        pitstop.validate()?;
        Ok(pitstop)
    }
}

/// Build a driver from their roster entry and lap history.
///
/// The finish is the end of the last lap that carries a usable duration;
/// earlier laps are used when trailing entries are incomplete or negative.
pub fn driver_from_laps(record: DriverRecord, laps: &[LapRecord]) -> Result<Driver, TimelineError> {
    let number = record.driver_number.ok_or_else(|| missing("driver", "driver_number"))?;
    let name = record.name_acronym.ok_or_else(|| missing("driver", "name_acronym"))?;
    let color = match record.team_colour.as_deref() {
        Some(hex) => Rgb::from_hex(hex)?,
        None => Rgb::BLACK,
    };

    let (final_lap, lap_start, lap_duration) = laps
        .iter()
        .rev()
        .find_map(|lap| match (lap.lap_number, lap.lap_duration, lap.date_start.as_deref()) {
            (Some(lap_number), Some(duration), Some(start))
                if duration.is_finite() && duration >= 0.0 =>
            {
                Some((lap_number, start, duration))
            }
            _ => None,
        })
        .ok_or_else(|| TimelineError::MalformedRecord {
            record: "driver",
            reason: format!("no timed laps for car {}", number),
        })?;

    let finish = after_seconds(parse_instant("lap", Some(lap_start))?, lap_duration).ok_or_else(|| {
        TimelineError::MalformedRecord {
            record: "driver",
            reason: format!("lap duration {}s ends outside the supported date range", lap_duration),
        }
    })?;
    Ok(Driver::new(name, number, finish, final_lap, color))
}

/// Convert every record, logging and skipping the ones that fail.
fn collect_valid<R, T>(records: Vec<R>, convert: impl Fn(R) -> Result<T, TimelineError>) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| match convert(record) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("skipping record: {}", err);
                None
            }
        })
        .collect()
}

/// Decode each array element on its own so one bad entry cannot sink the batch.
fn decode_records<T: DeserializeOwned>(values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("skipping undecodable record: {}", err);
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct OpenF1Client {
    client: reqwest::Client,
    base_url: String,
}

impl OpenF1Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_records<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ProviderError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);
        debug!(%url, ?query, "requesting OpenF1");
        let response = self
            .client
            .get(&url)
            .query(query)
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }
        let values: Vec<Value> = response.json().await?;
        Ok(decode_records(values))
    }

    /// All race sessions of a championship year.
    pub async fn fetch_season(&self, year: i32) -> Result<Season, ProviderError> {
        let records: Vec<SessionRecord> = self
            .get_records(
                "sessions",
                &[
                    ("session_type", "Race".to_string()),
                    ("session_name", "Race".to_string()),
                    ("year", year.to_string()),
                ],
            )
            .await?;
        let races = collect_valid(records, Race::try_from);
        info!(year, races = races.len(), "fetched season");
        Ok(Season::new(year, races))
    }

    pub async fn fetch_laps(&self, session_key: u32, driver_number: u32) -> Result<Vec<LapRecord>, ProviderError> {
        self.get_records(
            "laps",
            &[
                ("session_key", session_key.to_string()),
                ("driver_number", driver_number.to_string()),
            ],
        )
        .await
    }

    /// Drivers of a session, each resolved against their lap history.
    pub async fn fetch_drivers(&self, session_key: u32) -> Result<Vec<Driver>, ProviderError> {
        let records: Vec<DriverRecord> = self
            .get_records("drivers", &[("session_key", session_key.to_string())])
            .await?;

        let mut tasks = JoinSet::new();
        for (index, record) in records.into_iter().enumerate() {
            let Some(number) = record.driver_number else {
                warn!("skipping driver record without a car number");
                continue;
            };
            let client = self.clone();
            tasks.spawn(async move {
                let laps = client.fetch_laps(session_key, number).await;
                (index, record, laps)
            });
        }

        let mut resolved = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (index, record, laps) = joined?;
            match driver_from_laps(record, &laps?) {
                Ok(driver) => resolved.push((index, driver)),
                Err(err) => warn!(session_key, "skipping driver: {}", err),
            }
        }
        resolved.sort_by_key(|(index, _)| *index);
        Ok(resolved.into_iter().map(|(_, driver)| driver).collect())
    }

    pub async fn fetch_pitstops(&self, session_key: u32) -> Result<Vec<Pitstop>, ProviderError> {
        let records: Vec<PitRecord> = self
            .get_records("pit", &[("session_key", session_key.to_string())])
            .await?;
        Ok(collect_valid(records, Pitstop::try_from))
    }

    /// Drivers and pit stops for one race, aggregated.
    pub async fn fetch_race_data(&self, race: &Race) -> Result<RaceData, ProviderError> {
        let (drivers, pitstops) = tokio::try_join!(
            self.fetch_drivers(race.session_key),
            self.fetch_pitstops(race.session_key)
        )?;
        info!(
            session_key = race.session_key,
            drivers = drivers.len(),
            pitstops = pitstops.len(),
            "fetched race data"
        );
        Ok(RaceData::new(drivers, pitstops))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn decode<T: DeserializeOwned>(value: Value) -> Vec<T> {
        match value {
            Value::Array(values) => decode_records(values),
            other => panic!("expected array, got {}", other),
        }
    }

    #[test]
    fn test_sessions_become_races() {
        let records: Vec<SessionRecord> = decode(json!([
            {
                "session_key": 9472,
                "circuit_short_name": "Sakhir",
                "date_start": "2024-03-02T15:00:00+00:00",
                "session_type": "Race"
            },
            { "session_key": 9480, "date_start": "2024-03-09T17:00:00+00:00" }
        ]));
        let races = collect_valid(records, Race::try_from);
        assert_eq!(races.len(), 1);
        assert_eq!(races[0].session_key, 9472);
        assert_eq!(races[0].start, Utc.with_ymd_and_hms(2024, 3, 2, 15, 0, 0).unwrap());
        assert_eq!(races[0].date, "2024-03-02T15:00:00+00:00");
    }

    #[test]
    fn test_incomplete_pit_records_are_dropped() {
        let records: Vec<PitRecord> = decode(json!([
            { "driver_number": 1, "lap_number": 17, "pit_duration": 23.4, "date": "2024-03-02T15:29:01.123000+00:00" },
            { "driver_number": 1, "lap_number": 37, "pit_duration": null, "date": "2024-03-02T16:01:00+00:00" },
            { "driver_number": 16, "pit_duration": 22.0, "date": "2024-03-02T15:30:00+00:00" },
            { "driver_number": 16, "lap_number": 18, "pit_duration": 22.0, "date": "not a date" },
            { "driver_number": "sixteen", "lap_number": 18, "pit_duration": 22.0, "date": "2024-03-02T15:30:00+00:00" },
            { "driver_number": 44, "lap_number": 19, "pit_duration": 24.9, "date": "2024-03-02T15:31:00+00:00" }
        ]));
        let stops = collect_valid(records, Pitstop::try_from);
        let summary: Vec<(u32, u32)> = stops.iter().map(|s| (s.driver_number, s.lap_number)).collect();
        assert_eq!(summary, vec![(1, 17), (44, 19)]);
        assert_eq!(stops[0].duration_seconds, 23.4);
    }

    #[test]
    fn test_driver_finish_uses_last_timed_lap() {
        let record = DriverRecord {
            driver_number: Some(1),
            name_acronym: Some("VER".to_string()),
            team_colour: Some("3671C6".to_string()),
        };
        let laps: Vec<LapRecord> = decode(json!([
            { "lap_number": 56, "lap_duration": 95.5, "date_start": "2024-03-02T16:30:00+00:00" },
            { "lap_number": 57, "lap_duration": 94.25, "date_start": "2024-03-02T16:31:35.500000+00:00" },
            { "lap_number": 58, "lap_duration": null, "date_start": "2024-03-02T16:33:09.750000+00:00" }
        ]));

        let driver = driver_from_laps(record, &laps).unwrap();
        assert_eq!(driver.number, 1);
        assert_eq!(driver.final_lap, 57);
        assert_eq!(driver.color, Rgb::new(0x36, 0x71, 0xc6));
        let expected = Utc.with_ymd_and_hms(2024, 3, 2, 16, 33, 9).unwrap() + Duration::milliseconds(750);
        assert_eq!(driver.finish, expected);
    }

    #[test]
    fn test_driver_without_colour_is_black() {
        let record = DriverRecord {
            driver_number: Some(2),
            name_acronym: Some("SAR".to_string()),
            team_colour: None,
        };
        let laps = vec![LapRecord {
            lap_number: Some(56),
            lap_duration: Some(97.0),
            date_start: Some("2024-03-02T16:30:00+00:00".to_string()),
        }];
        assert_eq!(driver_from_laps(record, &laps).unwrap().color, Rgb::BLACK);
    }

    #[test]
    fn test_driver_without_timed_laps_is_malformed() {
        let record = DriverRecord {
            driver_number: Some(2),
            name_acronym: Some("SAR".to_string()),
            team_colour: Some("005AFF".to_string()),
        };
        let laps = vec![LapRecord {
            lap_number: Some(1),
            lap_duration: None,
            date_start: None,
        }];
        assert!(matches!(
            driver_from_laps(record.clone(), &laps),
            Err(TimelineError::MalformedRecord { record: "driver", .. })
        ));
        assert!(driver_from_laps(record, &[]).is_err());
    }

    #[test]
    fn test_negative_lap_duration_falls_back_to_earlier_lap() {
        let record = DriverRecord {
            driver_number: Some(10),
            name_acronym: Some("GAS".to_string()),
            team_colour: Some("0093CC".to_string()),
        };
        let laps: Vec<LapRecord> = decode(json!([
            { "lap_number": 56, "lap_duration": 96.0, "date_start": "2024-03-02T16:30:00+00:00" },
            { "lap_number": 57, "lap_duration": -3.0, "date_start": "2024-03-02T16:31:36+00:00" }
        ]));
        let driver = driver_from_laps(record, &laps).unwrap();
        assert_eq!(driver.final_lap, 56);
        assert_eq!(driver.finish, Utc.with_ymd_and_hms(2024, 3, 2, 16, 31, 36).unwrap());
    }

    #[test]
    fn test_unrepresentable_durations_are_malformed() {
        let record = DriverRecord {
            driver_number: Some(10),
            name_acronym: Some("GAS".to_string()),
            team_colour: None,
        };
        let laps: Vec<LapRecord> = decode(json!([
            { "lap_number": 57, "lap_duration": 1e15, "date_start": "2024-03-02T16:31:36+00:00" }
        ]));
        assert!(matches!(
            driver_from_laps(record, &laps),
            Err(TimelineError::MalformedRecord { record: "driver", .. })
        ));

        let records: Vec<PitRecord> = decode(json!([
            { "driver_number": 10, "lap_number": 17, "pit_duration": 1e15, "date": "2024-03-02T15:29:01+00:00" },
            { "driver_number": 10, "lap_number": 36, "pit_duration": 22.8, "date": "2024-03-02T16:00:00+00:00" }
        ]));
        let stops = collect_valid(records, Pitstop::try_from);
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].lap_number, 36);
    }
}
