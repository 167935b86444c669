//! Axis, tick and legend primitives that frame the driver traces.

use crate::core::layout::{LayoutOptions, LayoutPrimitive};
use crate::core::mapping::CoordinateMapping;
use crate::state::{Driver, Race, Rgb};

/// Stroke colour for both axes.
pub const AXIS_COLOR: Rgb = Rgb::new(0x71, 0x71, 0x7a);
pub const TIME_AXIS_CAPTION: &str = "Race Time Elapsed (minutes)";
pub const LAP_AXIS_CAPTION: &str = "Lap #";

/// Distance between a lap label and the y-axis.
const LAP_LABEL_INSET: f64 = 14.0;

/// Lap values labelled on the y-axis, ascending.
///
/// Counts down from `max_final_lap` in steps of `max_final_lap / intervals`,
/// clamped to at least one lap, and stops before lap 0.
pub fn lap_ticks(max_final_lap: u32, intervals: u32) -> Vec<u32> {
    if max_final_lap == 0 || intervals == 0 {
        return Vec::new();
    }
    let step = (max_final_lap / intervals).max(1);
    let mut ticks: Vec<u32> = (0..=intervals)
        .map_while(|k| max_final_lap.checked_sub(k * step))
        .take_while(|lap| *lap > 0)
        .collect();
    ticks.reverse();
    ticks
}

/// Race offsets (ms) labelled on the x-axis, every `tick_minutes` up to the last finish.
pub fn time_ticks(max_finish_offset: i64, tick_minutes: u32) -> Vec<i64> {
    if max_finish_offset <= 0 || tick_minutes == 0 {
        return Vec::new();
    }
    let step = i64::from(tick_minutes) * 60_000;
    (0..)
        .map(|k: i64| k * step)
        .take_while(|offset| *offset <= max_finish_offset)
        .collect()
}

/// Axes, captions, tick labels and the driver legend.
///
/// `drivers` must be in band order so the legend lines up with the traces.
pub fn decorations(
    mapping: &CoordinateMapping,
    race: &Race,
    drivers: &[&Driver],
    options: &LayoutOptions,
    axis_end_x: f64,
) -> Vec<LayoutPrimitive> {
    let viewport = mapping.viewport();
    let padding = mapping.padding();
    let origin_x = mapping.time_to_x(0);
    let baseline_y = mapping.lap_to_y(0);

    let mut primitives = vec![
        LayoutPrimitive::Label {
            text: race.circuit_name.clone(),
            x: viewport.width / 2.0,
            y: padding * 0.5,
        },
        LayoutPrimitive::Segment {
            x1: origin_x,
            y1: baseline_y,
            x2: axis_end_x,
            y2: baseline_y,
            color: AXIS_COLOR,
        },
        LayoutPrimitive::Segment {
            x1: origin_x,
            y1: baseline_y,
            x2: origin_x,
            y2: padding,
            color: AXIS_COLOR,
        },
        LayoutPrimitive::Label {
            text: TIME_AXIS_CAPTION.to_string(),
            x: viewport.width / 2.0,
            y: baseline_y + padding * 0.8,
        },
        LayoutPrimitive::Label {
            text: LAP_AXIS_CAPTION.to_string(),
            x: origin_x,
            y: padding * 0.7,
        },
    ];

    primitives.extend(
        lap_ticks(mapping.max_final_lap(), options.lap_intervals)
            .into_iter()
            .map(|lap| LayoutPrimitive::Label {
                text: lap.to_string(),
                x: origin_x + LAP_LABEL_INSET,
                y: mapping.lap_to_y(lap),
            }),
    );

    primitives.extend(
        time_ticks(mapping.max_finish_offset(), options.time_tick_minutes)
            .into_iter()
            .map(|offset| LayoutPrimitive::Label {
                text: (offset / 60_000).to_string(),
                x: mapping.time_to_x(offset),
                y: baseline_y + padding * 0.35,
            }),
    );

    if !drivers.is_empty() {
        let spacing = (baseline_y - padding) / drivers.len() as f64;
        for (index, driver) in drivers.iter().enumerate() {
            let y = baseline_y - index as f64 * spacing;
            primitives.push(LayoutPrimitive::Point {
                x: padding * 0.25,
                y,
                color: driver.color,
            });
            primitives.push(LayoutPrimitive::Label {
                text: driver.name.clone(),
                x: padding * 0.6,
                y,
            });
        }
    }

    primitives
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mapping::{ChartFrame, Viewport};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lap_ticks_follow_six_intervals() {
        assert_eq!(lap_ticks(50, 6), vec![2, 10, 18, 26, 34, 42, 50]);
        // An exact multiple reaches lap 0, which is not labelled.
        assert_eq!(lap_ticks(78, 6), vec![13, 26, 39, 52, 65, 78]);
    }

    #[test]
    fn test_lap_ticks_guard_short_races() {
        let ticks = lap_ticks(3, 6);
        assert_eq!(ticks, vec![1, 2, 3]);

        assert_eq!(lap_ticks(1, 6), vec![1]);
        assert!(lap_ticks(0, 6).is_empty());
        assert!(lap_ticks(50, 0).is_empty());
    }

    #[test]
    fn test_time_ticks_cover_the_race() {
        assert_eq!(
            time_ticks(3_600_000, 10),
            vec![0, 600_000, 1_200_000, 1_800_000, 2_400_000, 3_000_000, 3_600_000]
        );
        assert_eq!(time_ticks(599_999, 10), vec![0]);
        assert!(time_ticks(0, 10).is_empty());
        assert!(time_ticks(3_600_000, 0).is_empty());
    }

    #[test]
    fn test_decorations_label_every_driver() {
        let frame = ChartFrame {
            viewport: Viewport::new(1280.0, 800.0),
            padding: 50.0,
            gutter: 50.0,
            time_zoom: 1.0,
        };
        let mapping = CoordinateMapping::from_extrema(&frame, 3_600_000, 50).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 6, 9, 18, 0, 0).unwrap();
        let race = Race::new(9531, "Montreal", "2024-06-09", start);
        let drivers = [
            Driver::new("VER", 1, start, 70, Rgb::new(0x36, 0x71, 0xc6)),
            Driver::new("NOR", 4, start, 70, Rgb::new(0xff, 0x80, 0x00)),
        ];
        let refs: Vec<&Driver> = drivers.iter().collect();
        let options = LayoutOptions::default();

        let primitives = decorations(&mapping, &race, &refs, &options, 1230.0);
        let labels: Vec<&str> = primitives
            .iter()
            .filter_map(|primitive| match primitive {
                LayoutPrimitive::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        assert!(labels.contains(&"Montreal"));
        assert!(labels.contains(&"VER"));
        assert!(labels.contains(&"NOR"));
        assert!(labels.contains(&TIME_AXIS_CAPTION));
        assert!(labels.contains(&"60"));

        let swatches = primitives
            .iter()
            .filter(|primitive| matches!(primitive, LayoutPrimitive::Point { .. }))
            .count();
        assert_eq!(swatches, 2);
    }
}
