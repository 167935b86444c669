use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single race session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    /// OpenF1 session key
    pub session_key: u32,
    /// Short circuit name (e.g., "Monza")
    pub circuit_name: String,
    /// Date string as delivered by the schedule source
    pub date: String,
    /// Absolute start of the session; every offset is measured from here
    pub start: DateTime<Utc>,
}

impl Race {
    pub fn new(
        session_key: u32,
        circuit_name: impl Into<String>,
        date: impl Into<String>,
        start: DateTime<Utc>,
    ) -> Self {
        Self {
            session_key,
            circuit_name: circuit_name.into(),
            date: date.into(),
            start,
        }
    }

    /// Milliseconds elapsed from the race start to `instant`.
    pub fn offset_millis(&self, instant: DateTime<Utc>) -> i64 {
        instant.signed_duration_since(self.start).num_milliseconds()
    }

    /// Calendar date for race cards, without the time-of-day part.
    pub fn display_date(&self) -> String {
        self.date
            .split('T')
            .next()
            .filter(|day| !day.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.start.format("%Y-%m-%d").to_string())
    }
}
