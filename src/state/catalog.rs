//! Season schedule and the race card cursor used by the race browser.

use serde::{Deserialize, Serialize};

use super::Race;

/// A championship season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub year: i32,
    pub races: Vec<Race>,
}

impl Season {
    pub fn new(year: i32, races: Vec<Race>) -> Self {
        Self { year, races }
    }
}

/// Cursor over a fixed, chronologically ordered list of races.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaceCatalog {
    year: Option<i32>,
    races: Vec<Race>,
    index: usize,
}

impl RaceCatalog {
    pub fn from_season(season: Season) -> Self {
        let mut races = season.races;
        races.sort_by_key(|race| race.start);
        Self {
            year: Some(season.year),
            races,
            index: 0,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn len(&self) -> usize {
        self.races.len()
    }

    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }

    /// Zero-based position of the cursor.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Race> {
        self.races.get(self.index)
    }

    /// Advance to the following race, wrapping to the first.
    pub fn next(&mut self) -> Option<&Race> {
        if !self.races.is_empty() {
            self.index = (self.index + 1) % self.races.len();
        }
        self.current()
    }

    /// Step back to the preceding race, wrapping to the last.
    pub fn previous(&mut self) -> Option<&Race> {
        if !self.races.is_empty() {
            self.index = (self.index + self.races.len() - 1) % self.races.len();
        }
        self.current()
    }

    /// Move the cursor to the race with `session_key`, leaving it untouched when absent.
    pub fn select(&mut self, session_key: u32) -> Option<&Race> {
        let index = self
            .races
            .iter()
            .position(|race| race.session_key == session_key)?;
        self.index = index;
        self.current()
    }
}
