use dioxus::prelude::*;

use crate::constants::{
    BORDER_STRONG, PAN_BAR_HEIGHT, PAN_SLIDER_HEIGHT, PAN_TRACK_HEIGHT, TEXT_PRIMARY, TEXT_DIM,
};

/// Horizontal pan bar. Reports the pointer x (relative to the bar) while the
/// slider is dragged; the caller turns it into a content translation.
#[component]
pub(crate) fn PanBar(
    width: f64,
    slider_x: f64,
    slider_width: f64,
    enabled: bool,
    on_drag: EventHandler<f64>,
) -> Element {
    let mut dragging = use_signal(|| false);
    let track_top = (PAN_BAR_HEIGHT - PAN_TRACK_HEIGHT) / 2.0;
    let slider_top = (PAN_BAR_HEIGHT - PAN_SLIDER_HEIGHT) / 2.0;
    let slider_color = if enabled { TEXT_PRIMARY } else { TEXT_DIM };
    let cursor = if enabled { "grab" } else { "default" };

    rsx! {
        div {
            style: "
                position: relative; width: {width}px; height: {PAN_BAR_HEIGHT}px;
                flex-shrink: 0; cursor: {cursor}; user-select: none;
            ",
            onmousedown: move |e| {
                if !enabled {
                    return;
                }
                dragging.set(true);
                on_drag.call(e.element_coordinates().x);
            },
            onmousemove: move |e| {
                if dragging() {
                    on_drag.call(e.element_coordinates().x);
                }
            },
            onmouseup: move |_| dragging.set(false),
            onmouseleave: move |_| dragging.set(false),

            // Track
            div {
                style: "
                    position: absolute; left: 0; top: {track_top}px;
                    width: 100%; height: {PAN_TRACK_HEIGHT}px;
                    background-color: {BORDER_STRONG}; pointer-events: none;
                ",
            }
            // Slider
            div {
                style: "
                    position: absolute; left: {slider_x}px; top: {slider_top}px;
                    width: {slider_width}px; height: {PAN_SLIDER_HEIGHT}px;
                    border-radius: 3px; background-color: {slider_color}; pointer-events: none;
                ",
            }
        }
    }
}
