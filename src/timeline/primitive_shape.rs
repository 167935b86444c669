use dioxus::prelude::*;

use crate::constants::{LABEL_FONT_SIZE, POINT_SIZE, SEGMENT_STROKE_WIDTH, TEXT_SECONDARY};
use crate::core::layout::LayoutPrimitive;

/// SVG element for one layout primitive. Points are drawn as squares and
/// labels are centred on their anchor.
#[component]
pub(crate) fn PrimitiveShape(primitive: LayoutPrimitive) -> Element {
    match primitive {
        LayoutPrimitive::Point { x, y, color } => {
            let left = x - POINT_SIZE / 2.0;
            let top = y - POINT_SIZE / 2.0;
            rsx! {
                rect {
                    x: "{left}",
                    y: "{top}",
                    width: "{POINT_SIZE}",
                    height: "{POINT_SIZE}",
                    fill: "{color}",
                }
            }
        }
        LayoutPrimitive::Segment { x1, y1, x2, y2, color } => rsx! {
            line {
                x1: "{x1}",
                y1: "{y1}",
                x2: "{x2}",
                y2: "{y2}",
                stroke: "{color}",
                stroke_width: "{SEGMENT_STROKE_WIDTH}",
            }
        },
        LayoutPrimitive::Label { text: content, x, y } => rsx! {
            text {
                x: "{x}",
                y: "{y}",
                fill: "{TEXT_SECONDARY}",
                font_size: "{LABEL_FONT_SIZE}",
                text_anchor: "middle",
                dominant_baseline: "middle",
                style: "user-select: none;",
                "{content}"
            }
        },
    }
}
