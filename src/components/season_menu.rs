use dioxus::prelude::*;

use crate::constants::*;

/// Start screen: pick a championship season.
#[component]
pub fn SeasonMenu(
    seasons: Vec<i32>,
    highlighted: i32,
    loading: bool,
    on_select: EventHandler<i32>,
) -> Element {
    rsx! {
        div {
            style: "
                display: flex; flex-direction: column; align-items: center; justify-content: center;
                gap: 24px; height: 100%; background-color: {BG_BASE};
            ",
            h1 { style: "margin: 0; font-size: 28px; font-weight: 600; color: {TEXT_PRIMARY};", "Pitwall" }
            span { style: "font-size: 13px; color: {TEXT_MUTED};", "Pit-stop timelines for every race of a season" }
            div {
                style: "display: flex; gap: 12px;",
                for year in seasons {
                    {
                        let border = if year == highlighted { BORDER_ACCENT } else { BORDER_DEFAULT };
                        rsx! {
                            button {
                                key: "{year}",
                                disabled: loading,
                                style: "
                                    width: 96px; height: 44px; border-radius: 6px;
                                    border: 1px solid {border}; background-color: {BG_SURFACE};
                                    color: {TEXT_PRIMARY}; font-size: 15px; cursor: pointer;
                                ",
                                onclick: move |_| on_select.call(year),
                                "{year}"
                            }
                        }
                    }
                }
            }
        }
    }
}
