//! Race timeline layout engine: scaling, layout and pan math.

pub mod error;
pub mod paths;
pub mod mapping;
pub mod layout;
pub mod axes;
pub mod pan;

use crate::state::{Race, RaceData, TimelineSettings};
use error::TimelineError;
use layout::TimelineLayout;
use mapping::CoordinateMapping;

/// Validate settings, fit the mapping and lay out the race in one pass.
pub fn build_timeline(
    race: &Race,
    race_data: &RaceData,
    settings: &TimelineSettings,
) -> Result<TimelineLayout, TimelineError> {
    settings.validate()?;
    race_data.ensure_available()?;
    let mapping = CoordinateMapping::compute(&settings.chart_frame(), race_data, race)?;
    layout::layout_timeline(race_data, &mapping, race, &settings.layout_options())
}
