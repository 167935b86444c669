use dioxus::prelude::*;

use crate::constants::*;
use crate::state::Race;

/// Race card with previous/next navigation through the season.
#[component]
pub fn RaceBrowser(
    race: Option<Race>,
    position: usize,
    total: usize,
    year: Option<i32>,
    loading: bool,
    on_previous: EventHandler<MouseEvent>,
    on_next: EventHandler<MouseEvent>,
    on_open: EventHandler<Race>,
    on_back: EventHandler<MouseEvent>,
) -> Element {
    let season_label = year.map(|year| format!("{} season", year)).unwrap_or_default();
    let counter = if total == 0 {
        "No races".to_string()
    } else {
        format!("{} / {}", position + 1, total)
    };

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column; align-items: center; justify-content: center;
                gap: 20px; height: 100%; background-color: {BG_BASE};
            ",
            span { style: "font-size: 12px; color: {TEXT_MUTED}; text-transform: uppercase; letter-spacing: 0.5px;", "{season_label}" }
            div {
                style: "display: flex; align-items: center; gap: 16px;",
                NavBtn { label: "◀", on_click: move |e| on_previous.call(e) }
                if let Some(race) = race {
                    RaceCard { race, loading, on_open: move |race| on_open.call(race) }
                } else {
                    div {
                        style: "width: 320px; text-align: center; color: {TEXT_DIM};",
                        "No races found for this season."
                    }
                }
                NavBtn { label: "▶", on_click: move |e| on_next.call(e) }
            }
            span { style: "font-size: 11px; color: {TEXT_DIM}; font-family: 'SF Mono', Consolas, monospace;", "{counter}" }
            button {
                class: "collapse-btn",
                style: "background: transparent; border: none; color: {TEXT_SECONDARY}; font-size: 12px; cursor: pointer; padding: 4px 8px; border-radius: 4px;",
                onclick: move |e| on_back.call(e),
                "Back to menu"
            }
        }
    }
}

#[component]
fn RaceCard(race: Race, loading: bool, on_open: EventHandler<Race>) -> Element {
    let date = race.display_date();
    let action = if loading { "Loading…" } else { "View pit stops" };
    rsx! {
        div {
            style: "
                display: flex; flex-direction: column; gap: 10px;
                width: 320px; padding: 24px; border-radius: 8px;
                background-color: {BG_ELEVATED}; border: 1px solid {BORDER_DEFAULT};
            ",
            span { style: "font-size: 20px; font-weight: 600; color: {TEXT_PRIMARY};", "{race.circuit_name}" }
            span { style: "font-size: 12px; color: {TEXT_MUTED};", "{date}" }
            button {
                disabled: loading,
                style: "
                    margin-top: 8px; padding: 8px; border: none; border-radius: 4px;
                    background-color: {ACCENT_PIT}; color: white; font-size: 12px; cursor: pointer;
                ",
                onclick: move |_| on_open.call(race.clone()),
                "{action}"
            }
        }
    }
}

#[component]
fn NavBtn(label: &'static str, on_click: EventHandler<MouseEvent>) -> Element {
    rsx! {
        button {
            class: "collapse-btn",
            style: "width: 32px; height: 32px; border: none; border-radius: 4px; background-color: {BG_HOVER}; color: {TEXT_MUTED}; font-size: 12px; cursor: pointer;",
            onclick: move |e| on_click.call(e),
            "{label}"
        }
    }
}
