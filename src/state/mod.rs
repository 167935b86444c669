//! State management module
//!
//! This module contains the data model for a race timeline:
//! - Race: A race session and its time origin
//! - Driver: A driver's finish and team colour
//! - Pitstop: A single stop in the pit lane
//! - RaceData: Drivers and their chronologically ordered pit stops
//! - RaceCatalog: Cursor over a season's races
//! - TimelineSettings: Chart geometry and data-source configuration

mod race;
mod driver;
mod pitstop;
mod race_data;
mod catalog;
mod settings;

pub use race::Race;
pub use driver::{Driver, Rgb};
pub use pitstop::Pitstop;
pub(crate) use pitstop::after_seconds;
pub use race_data::{build_race_data, RaceData};
pub use catalog::{RaceCatalog, Season};
pub use settings::TimelineSettings;
