//! Timeline layout engine
//!
//! Turns a [`RaceData`] aggregate into drawing primitives: one stroke path per
//! driver tracing start → every pit stop → finish, plus the axes and legend.
//! Traversal only reads the aggregate, so a layout pass can be repeated on the
//! same data.

use tracing::{debug, warn};

use crate::core::axes;
use crate::core::error::{InsufficientReason, TimelineError};
use crate::core::mapping::CoordinateMapping;
use crate::state::{Driver, Pitstop, Race, RaceData, Rgb};

/// A pure drawing instruction with no link back to the domain.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutPrimitive {
    Point { x: f64, y: f64, color: Rgb },
    Segment { x1: f64, y1: f64, x2: f64, y2: f64, color: Rgb },
    Label { text: String, x: f64, y: f64 },
}

impl LayoutPrimitive {
    fn segment(from: Position, to: Position, color: Rgb) -> Self {
        LayoutPrimitive::Segment {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            color,
        }
    }

    fn point(at: Position, color: Rgb) -> Self {
        LayoutPrimitive::Point { x: at.x, y: at.y, color }
    }

    /// Rightmost x coordinate touched by this primitive.
    pub fn max_x(&self) -> f64 {
        match self {
            LayoutPrimitive::Point { x, .. } | LayoutPrimitive::Label { x, .. } => *x,
            LayoutPrimitive::Segment { x1, x2, .. } => x1.max(*x2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Layout knobs taken from [`crate::state::TimelineSettings`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Horizontal shift added per driver, cumulative in finish order.
    pub band_increment: f64,
    /// Extra pit-out shift per second stopped.
    pub pit_padding_px_per_second: f64,
    pub lap_intervals: u32,
    pub time_tick_minutes: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            band_increment: 18.0,
            pit_padding_px_per_second: 1.5,
            lap_intervals: 6,
            time_tick_minutes: 10,
        }
    }
}

/// The stroke path for one driver.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverTrace {
    pub driver_number: u32,
    pub band_offset: f64,
    pub primitives: Vec<LayoutPrimitive>,
}

impl DriverTrace {
    /// The terminal point of the path, i.e. the driver's finish.
    pub fn finish(&self) -> Option<Position> {
        self.primitives.iter().rev().find_map(|primitive| match primitive {
            LayoutPrimitive::Point { x, y, .. } => Some(Position { x: *x, y: *y }),
            _ => None,
        })
    }

    pub fn point_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|primitive| matches!(primitive, LayoutPrimitive::Point { .. }))
            .count()
    }

    pub fn segment_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|primitive| matches!(primitive, LayoutPrimitive::Segment { .. }))
            .count()
    }
}

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    /// Driver paths in band order (earliest finisher first).
    pub traces: Vec<DriverTrace>,
    /// Axes, captions, ticks and legend.
    pub decorations: Vec<LayoutPrimitive>,
    /// Extent reported by the coordinate mapping.
    pub content_width: f64,
    padding: f64,
}

impl TimelineLayout {
    /// Every primitive, decorations first, then each driver's path in band order.
    pub fn primitives(&self) -> impl Iterator<Item = &LayoutPrimitive> {
        self.decorations
            .iter()
            .chain(self.traces.iter().flat_map(|trace| trace.primitives.iter()))
    }

    pub fn len(&self) -> usize {
        self.decorations.len() + self.traces.iter().map(|trace| trace.primitives.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width the pan bar must cover: the mapped content, widened to include
    /// band offsets and pit padding that push past the last finish.
    pub fn extent(&self) -> f64 {
        self.traces
            .iter()
            .flat_map(|trace| trace.primitives.iter())
            .map(|primitive| primitive.max_x() + self.padding)
            .fold(self.content_width, f64::max)
    }
}

/// Walk one driver's stops from the grid to the finish.
///
/// `pitstops` must already be in chronological order. A stop whose end
/// instant cannot be represented is skipped.
pub fn trace_driver(
    driver: &Driver,
    pitstops: &[Pitstop],
    band_offset: f64,
    mapping: &CoordinateMapping,
    race: &Race,
    options: &LayoutOptions,
) -> DriverTrace {
    let color = driver.color;
    let mut primitives = Vec::with_capacity(pitstops.len() * 4 + 2);
    let mut current = Position {
        x: mapping.time_to_x(0) + band_offset,
        y: mapping.lap_to_y(0),
    };

    for stop in pitstops {
        let Some(end_offset) = stop.end_offset(race) else {
            warn!(driver = driver.number, lap = stop.lap_number, "skipping pit stop with unplaceable end");
            continue;
        };
        let y = mapping.lap_to_y(stop.lap_number);
        let pit_in = Position {
            x: mapping.time_to_x(stop.start_offset(race)) + band_offset,
            y,
        };
        let pit_out = Position {
            x: mapping.time_to_x(end_offset)
                + stop.duration_seconds * options.pit_padding_px_per_second
                + band_offset,
            y,
        };

        primitives.push(LayoutPrimitive::segment(current, pit_in, color));
        primitives.push(LayoutPrimitive::point(pit_in, color));
        primitives.push(LayoutPrimitive::point(pit_out, color));
        primitives.push(LayoutPrimitive::segment(pit_in, pit_out, color));
        current = pit_out;
    }

    let finish = Position {
        x: mapping.time_to_x(driver.finish_offset(race)) + band_offset,
        y: mapping.lap_to_y(driver.final_lap),
    };
    primitives.push(LayoutPrimitive::segment(current, finish, color));
    primitives.push(LayoutPrimitive::point(finish, color));

    DriverTrace {
        driver_number: driver.number,
        band_offset,
        primitives,
    }
}

/// Lay out every driver with usable telemetry.
///
/// Returns [`TimelineError::InsufficientData`] instead of an empty layout when
/// the race has no drivers, no pit stops, or no driver with a finish.
pub fn layout_timeline(
    race_data: &RaceData,
    mapping: &CoordinateMapping,
    race: &Race,
    options: &LayoutOptions,
) -> Result<TimelineLayout, TimelineError> {
    race_data.ensure_available()?;

    let drivers: Vec<&Driver> = race_data
        .drivers_by_finish(race)
        .into_iter()
        .filter(|driver| {
            let usable = driver.has_telemetry(race);
            if !usable {
                warn!(driver = driver.number, name = %driver.name, "excluding driver without finish telemetry");
            }
            usable
        })
        .collect();
    if drivers.is_empty() {
        return Err(TimelineError::InsufficientData(InsufficientReason::NoFinishTime));
    }

    let (traces, _) = drivers.iter().fold(
        (Vec::with_capacity(drivers.len()), options.band_increment),
        |(mut traces, band_offset), driver| {
            let pitstops = race_data.pitstops_for(driver.number);
            traces.push(trace_driver(driver, pitstops, band_offset, mapping, race, options));
            (traces, band_offset + options.band_increment)
        },
    );

    let mut layout = TimelineLayout {
        traces,
        decorations: Vec::new(),
        content_width: mapping.content_width(),
        padding: mapping.padding(),
    };
    let axis_end_x = layout.extent() - mapping.padding();
    layout.decorations = axes::decorations(mapping, race, &drivers, options, axis_end_x);

    debug!(
        session_key = race.session_key,
        drivers = layout.traces.len(),
        primitives = layout.len(),
        "laid out race timeline"
    );
    Ok(layout)
}
