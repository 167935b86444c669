use dioxus::prelude::*;

use crate::constants::{
    BG_BASE, BG_ELEVATED, BG_SURFACE, BORDER_DEFAULT, HEADER_HEIGHT, NO_DATA_MESSAGE, TEXT_DIM,
    TEXT_MUTED, TEXT_PRIMARY, TIME_ZOOM_STEP,
};
use crate::core::build_timeline;
use crate::core::layout::LayoutPrimitive;
use crate::core::pan::PanController;
use crate::state::{Race, RaceData, TimelineSettings};

use super::pan_bar::PanBar;
use super::primitive_shape::PrimitiveShape;

/// Pit-stop chart for one race.
#[component]
pub fn TimelineView(
    race: Race,
    race_data: RaceData,
    settings: TimelineSettings,
    on_back: EventHandler<MouseEvent>,
    on_menu: EventHandler<MouseEvent>,
    on_zoom_change: EventHandler<f64>,
) -> Element {
    // Latest pointer position on the pan bar; the translation is derived from it on every render.
    let mut pointer_x = use_signal(|| 0.0_f64);

    let width = settings.viewport_width;
    let height = settings.viewport_height;
    let zoom = settings.time_zoom;
    let title = format!("{} · {}", race.circuit_name, race.display_date());

    let chart = match build_timeline(&race, &race_data, &settings) {
        Ok(layout) => {
            let controller = PanController::new(layout.extent(), width, settings.slider_width)
                .map(|mut controller| {
                    controller.drag_to(pointer_x());
                    controller
                });
            let (translation, slider_x, can_pan) = match &controller {
                Ok(controller) => (
                    controller.translation(),
                    controller.slider_x(),
                    controller.needs_panning(),
                ),
                Err(err) => {
                    tracing::warn!("pan bar disabled: {}", err);
                    (0.0, 0.0, false)
                }
            };
            let primitives: Vec<LayoutPrimitive> = layout.primitives().cloned().collect();

            rsx! {
                svg {
                    width: "{width}",
                    height: "{height}",
                    style: "display: block; background-color: {BG_BASE};",
                    g {
                        transform: "translate({translation} 0)",
                        for (index, primitive) in primitives.into_iter().enumerate() {
                            PrimitiveShape { key: "{index}", primitive }
                        }
                    }
                }
                PanBar {
                    width,
                    slider_x,
                    slider_width: settings.slider_width,
                    enabled: can_pan,
                    on_drag: move |x| pointer_x.set(x),
                }
            }
        }
        Err(err) => {
            let message = if err.is_no_data() {
                tracing::info!(session_key = race.session_key, "{}", err);
                NO_DATA_MESSAGE.to_string()
            } else {
                tracing::warn!(session_key = race.session_key, "{}", err);
                format!("Cannot draw this race: {}", err)
            };
            rsx! {
                div {
                    style: "
                        display: flex; align-items: center; justify-content: center;
                        width: {width}px; height: {height}px;
                        font-size: 20px; color: {TEXT_MUTED}; background-color: {BG_BASE};
                    ",
                    "{message}"
                }
            }
        }
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; background-color: {BG_ELEVATED};",

            // Header
            div {
                style: "
                    display: flex; align-items: center; justify-content: space-between;
                    height: {HEADER_HEIGHT}px; padding: 0 14px;
                    background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                    flex-shrink: 0;
                ",
                div {
                    style: "display: flex; align-items: center; gap: 8px;",
                    HeaderBtn { label: "Races", on_click: move |e| on_back.call(e) }
                    HeaderBtn { label: "Menu", on_click: move |e| on_menu.call(e) }
                }
                span { style: "font-size: 13px; font-weight: 500; color: {TEXT_PRIMARY};", "{title}" }
                div {
                    style: "display: flex; align-items: center; gap: 4px;",
                    HeaderBtn { label: "−", on_click: move |_| on_zoom_change.call(zoom / TIME_ZOOM_STEP) }
                    span {
                        style: "font-size: 10px; color: {TEXT_DIM}; min-width: 40px; text-align: center;",
                        "{zoom:.2}×"
                    }
                    HeaderBtn { label: "+", on_click: move |_| on_zoom_change.call(zoom * TIME_ZOOM_STEP) }
                }
            }

            {chart}
        }
    }
}

#[component]
fn HeaderBtn(label: &'static str, on_click: EventHandler<MouseEvent>) -> Element {
    rsx! {
        button {
            class: "collapse-btn",
            style: "min-width: 24px; height: 24px; padding: 0 8px; border: none; border-radius: 4px; background: transparent; color: {TEXT_MUTED}; font-size: 12px; cursor: pointer;",
            onclick: move |e| on_click.call(e),
            "{label}"
        }
    }
}
