use std::fmt;

use thiserror::Error;

/// Why a race cannot be charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsufficientReason {
    /// No driver records survived parsing.
    NoDrivers,
    /// No pit-stop records survived parsing.
    NoPitstops,
    /// No driver finished after the race start.
    NoFinishTime,
    /// No driver completed a lap.
    NoLaps,
}

impl fmt::Display for InsufficientReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InsufficientReason::NoDrivers => "no drivers",
            InsufficientReason::NoPitstops => "no pit stops",
            InsufficientReason::NoFinishTime => "no finish times",
            InsufficientReason::NoLaps => "no completed laps",
        };
        f.write_str(text)
    }
}

/// Errors raised while aggregating, scaling or laying out a race.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    /// A single record is missing required fields. Callers drop it and carry on.
    #[error("malformed {record} record: {reason}")]
    MalformedRecord { record: &'static str, reason: String },
    /// The race has nothing to chart; show a fallback instead.
    #[error("not enough data to chart this race ({0})")]
    InsufficientData(InsufficientReason),
    /// Viewport or layout settings that would break the scale arithmetic.
    #[error("invalid timeline configuration: {0}")]
    InvalidConfiguration(String),
}

impl TimelineError {
    /// Whether the caller should render the no-data fallback.
    pub fn is_no_data(&self) -> bool {
        matches!(self, TimelineError::InsufficientData(_))
    }
}
