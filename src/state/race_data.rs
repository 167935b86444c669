//! Per-race aggregate of drivers and their pit stops.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::core::error::{InsufficientReason, TimelineError};
use super::{Driver, Pitstop, Race};

/// Drivers indexed by car number, plus each driver's pit stops in
/// chronological order. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaceData {
    drivers: BTreeMap<u32, Driver>,
    pitstops: BTreeMap<u32, Vec<Pitstop>>,
}

impl RaceData {
    /// Aggregate flat driver and pit-stop lists.
    ///
    /// A driver number seen twice keeps the later record. Pit stops that fail
    /// validation are dropped without affecting the driver's other stops.
    pub fn new(
        drivers: impl IntoIterator<Item = Driver>,
        pitstops: impl IntoIterator<Item = Pitstop>,
    ) -> Self {
        let mut data = Self::default();

        for driver in drivers {
            if let Some(previous) = data.drivers.insert(driver.number, driver) {
                debug!(number = previous.number, name = %previous.name, "replacing duplicate driver record");
            }
        }

        for pitstop in pitstops {
            if let Err(err) = pitstop.validate() {
                warn!(driver = pitstop.driver_number, lap = pitstop.lap_number, "dropping pit stop: {}", err);
                continue;
            }
            data.insert_pitstop(pitstop);
        }

        data
    }

    /// Insert after every stop that starts no later, so equal start times keep input order.
    fn insert_pitstop(&mut self, pitstop: Pitstop) {
        let sequence = self.pitstops.entry(pitstop.driver_number).or_default();
        let index = sequence.partition_point(|existing| existing.start <= pitstop.start);
        sequence.insert(index, pitstop);
    }

    pub fn drivers(&self) -> impl Iterator<Item = &Driver> {
        self.drivers.values()
    }

    pub fn driver(&self, number: u32) -> Option<&Driver> {
        self.drivers.get(&number)
    }

    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    /// Total number of stored pit stops across all drivers.
    pub fn pitstop_count(&self) -> usize {
        self.pitstops.values().map(Vec::len).sum()
    }

    /// Chronologically ordered stops for one driver; empty when the driver never pitted.
    pub fn pitstops_for(&self, driver_number: u32) -> &[Pitstop] {
        self.pitstops
            .get(&driver_number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Fail with [`TimelineError::InsufficientData`] when there is nothing to chart.
    pub fn ensure_available(&self) -> Result<(), TimelineError> {
        if self.drivers.is_empty() {
            return Err(TimelineError::InsufficientData(InsufficientReason::NoDrivers));
        }
        if self.pitstop_count() == 0 {
            return Err(TimelineError::InsufficientData(InsufficientReason::NoPitstops));
        }
        Ok(())
    }

    /// Latest finish across all drivers, in milliseconds from the race start.
    pub fn max_finish_offset(&self, race: &Race) -> Option<i64> {
        self.drivers().map(|driver| driver.finish_offset(race)).max()
    }

    /// Highest final lap across all drivers.
    pub fn max_final_lap(&self) -> Option<u32> {
        self.drivers().map(|driver| driver.final_lap).max()
    }

    /// Drivers ordered by ascending finish offset; ties fall back to car number.
    pub fn drivers_by_finish(&self, race: &Race) -> Vec<&Driver> {
        let mut drivers: Vec<&Driver> = self.drivers().collect();
        drivers.sort_by_key(|driver| driver.finish_offset(race));
        drivers
    }
}

/// Aggregate drivers and pit stops, failing when the race has nothing to chart.
pub fn build_race_data(
    drivers: Vec<Driver>,
    pitstops: Vec<Pitstop>,
) -> Result<RaceData, TimelineError> {
    let data = RaceData::new(drivers, pitstops);
    data.ensure_available()?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Rgb;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn race() -> Race {
        let start = Utc.with_ymd_and_hms(2024, 7, 7, 14, 0, 0).unwrap();
        Race::new(9558, "Silverstone", "2024-07-07", start)
    }

    fn driver(race: &Race, name: &str, number: u32, finish_ms: i64) -> Driver {
        Driver::new(name, number, race.start + Duration::milliseconds(finish_ms), 52, Rgb::BLACK)
    }

    fn stop(race: &Race, number: u32, lap: u32, start_ms: i64) -> Pitstop {
        Pitstop::new(number, lap, 24.0, race.start + Duration::milliseconds(start_ms))
    }

    fn start_offsets(data: &RaceData, race: &Race, number: u32) -> Vec<i64> {
        data.pitstops_for(number)
            .iter()
            .map(|stop| stop.start_offset(race))
            .collect()
    }

    #[test]
    fn test_pitstops_come_back_in_chronological_order() {
        let race = race();
        let stops = vec![
            stop(&race, 44, 40, 4_000_000),
            stop(&race, 44, 12, 1_100_000),
            stop(&race, 1, 18, 1_700_000),
            stop(&race, 44, 27, 2_600_000),
        ];
        let data = RaceData::new(vec![driver(&race, "HAM", 44, 5_000_000)], stops);

        assert_eq!(start_offsets(&data, &race, 44), vec![1_100_000, 2_600_000, 4_000_000]);
        assert_eq!(start_offsets(&data, &race, 1), vec![1_700_000]);
        assert_eq!(data.pitstop_count(), 4);
    }

    #[test]
    fn test_input_order_does_not_change_sequences() {
        let race = race();
        let stops = vec![
            stop(&race, 44, 12, 1_100_000),
            stop(&race, 44, 27, 2_600_000),
            stop(&race, 44, 40, 4_000_000),
            stop(&race, 4, 22, 2_000_000),
            stop(&race, 4, 9, 900_000),
        ];
        let drivers = vec![driver(&race, "HAM", 44, 5_000_000), driver(&race, "NOR", 4, 4_990_000)];
        let forward = RaceData::new(drivers.clone(), stops.clone());

        let mut reversed = stops.clone();
        reversed.reverse();
        let mut rotated = stops;
        rotated.rotate_left(2);

        assert_eq!(RaceData::new(drivers.clone(), reversed), forward);
        assert_eq!(RaceData::new(drivers, rotated), forward);
    }

    #[test]
    fn test_equal_start_times_keep_input_order() {
        let race = race();
        let first = Pitstop::new(44, 12, 21.0, race.start);
        let second = Pitstop::new(44, 12, 35.0, race.start);
        let data = RaceData::new(Vec::new(), vec![first.clone(), second.clone()]);
        assert_eq!(data.pitstops_for(44), &[first, second]);
    }

    #[test]
    fn test_duplicate_driver_last_write_wins() {
        let race = race();
        let early = driver(&race, "OLD", 44, 1_000);
        let late = driver(&race, "HAM", 44, 2_000);
        let data = RaceData::new(vec![early, late.clone()], Vec::new());
        assert_eq!(data.driver_count(), 1);
        assert_eq!(data.driver(44), Some(&late));
    }

    #[test]
    fn test_malformed_pitstops_are_dropped() {
        let race = race();
        let stops = vec![
            stop(&race, 44, 12, 1_100_000),
            Pitstop::new(44, 0, 23.0, race.start),
            Pitstop::new(44, 30, f64::NAN, race.start),
            stop(&race, 44, 40, 4_000_000),
        ];
        let data = RaceData::new(Vec::new(), stops);
        assert_eq!(start_offsets(&data, &race, 44), vec![1_100_000, 4_000_000]);
    }

    #[test]
    fn test_stop_ending_past_date_range_is_dropped() {
        let race = race();
        let stops = vec![
            stop(&race, 44, 12, 1_100_000),
            Pitstop::new(44, 27, 1e15, race.start + Duration::milliseconds(2_600_000)),
            stop(&race, 44, 40, 4_000_000),
        ];
        let data = RaceData::new(vec![driver(&race, "HAM", 44, 5_000_000)], stops);
        assert_eq!(start_offsets(&data, &race, 44), vec![1_100_000, 4_000_000]);
        assert!(data.pitstops_for(44).iter().all(|stop| stop.end().is_some()));
    }

    #[test]
    fn test_driver_without_stops_has_empty_sequence() {
        let race = race();
        let data = RaceData::new(vec![driver(&race, "HAM", 44, 5_000_000)], Vec::new());
        assert!(data.pitstops_for(44).is_empty());
        assert!(data.pitstops_for(99).is_empty());
    }

    #[test]
    fn test_extrema_and_finish_order() {
        let race = race();
        let drivers = vec![
            driver(&race, "HAM", 44, 5_000_000),
            driver(&race, "VER", 1, 4_900_000),
            driver(&race, "NOR", 4, 4_950_000),
        ];
        let data = RaceData::new(drivers, Vec::new());
        assert_eq!(data.max_finish_offset(&race), Some(5_000_000));
        assert_eq!(data.max_final_lap(), Some(52));

        let order: Vec<u32> = data.drivers_by_finish(&race).iter().map(|d| d.number).collect();
        assert_eq!(order, vec![1, 4, 44]);
    }

    #[test]
    fn test_build_requires_drivers_and_pitstops() {
        let race = race();
        assert_eq!(
            build_race_data(Vec::new(), Vec::new()),
            Err(TimelineError::InsufficientData(InsufficientReason::NoDrivers))
        );
        assert_eq!(
            build_race_data(vec![driver(&race, "HAM", 44, 5_000_000)], Vec::new()),
            Err(TimelineError::InsufficientData(InsufficientReason::NoPitstops))
        );
        let data = build_race_data(
            vec![driver(&race, "HAM", 44, 5_000_000)],
            vec![stop(&race, 44, 12, 1_100_000)],
        );
        assert!(data.is_ok());
    }
}
