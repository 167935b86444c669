//! Root application component
//!
//! Owns the screen state machine (menu, race browser, visualizer) and the
//! OpenF1 fetches that feed it.

use dioxus::prelude::*;
use tracing::{info, warn};

use crate::components::{RaceBrowser, SeasonMenu, StatusBar};
use crate::constants::{BG_BASE, SEASON_YEARS, TEXT_MUTED};
use crate::providers::openf1::OpenF1Client;
use crate::state::{Race, RaceCatalog, RaceData, TimelineSettings};
use crate::timeline::{clamp_time_zoom, TimelineView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Races,
    Visualizer,
}

/// Signals shared between the root component and the fetch tasks.
#[derive(Clone, Copy)]
struct AppSignals {
    screen: Signal<Screen>,
    catalog: Signal<RaceCatalog>,
    selected_race: Signal<Option<Race>>,
    race_data: Signal<Option<RaceData>>,
    status: Signal<String>,
    loading: Signal<bool>,
}

/// Main application component
#[component]
pub fn App() -> Element {
    let mut settings = use_signal(TimelineSettings::load_or_default);
    let client = use_hook(|| OpenF1Client::new(settings.peek().api_base_url.clone()));

    let mut signals = AppSignals {
        screen: use_signal(|| Screen::Menu),
        catalog: use_signal(RaceCatalog::default),
        selected_race: use_signal(|| None::<Race>),
        race_data: use_signal(|| None::<RaceData>),
        status: use_signal(|| "Pick a season".to_string()),
        loading: use_signal(|| false),
    };

    let loading = (signals.loading)();
    let screen = (signals.screen)();
    let detail = match screen {
        Screen::Menu => String::new(),
        Screen::Races => {
            let catalog = signals.catalog.read();
            catalog
                .year()
                .map(|year| format!("{} · {} races", year, catalog.len()))
                .unwrap_or_default()
        }
        Screen::Visualizer => signals
            .race_data
            .read()
            .as_ref()
            .map(|data| format!("{} drivers · {} pit stops", data.driver_count(), data.pitstop_count()))
            .unwrap_or_default(),
    };

    let body = match screen {
        Screen::Menu => {
            let client = client.clone();
            let highlighted = settings.read().default_season;
            rsx! {
                SeasonMenu {
                    seasons: SEASON_YEARS.to_vec(),
                    highlighted,
                    loading,
                    on_select: move |year| spawn_season_fetch(client.clone(), year, signals),
                }
            }
        }
        Screen::Races => {
            let client = client.clone();
            let catalog = signals.catalog.read();
            rsx! {
                RaceBrowser {
                    race: catalog.current().cloned(),
                    position: catalog.position(),
                    total: catalog.len(),
                    year: catalog.year(),
                    loading,
                    on_previous: move |_| {
                        signals.catalog.write().previous();
                    },
                    on_next: move |_| {
                        signals.catalog.write().next();
                    },
                    on_open: move |race| spawn_race_fetch(client.clone(), race, signals),
                    on_back: move |_| {
                        signals.screen.set(Screen::Menu);
                        signals.status.set("Pick a season".to_string());
                    },
                }
            }
        }
        Screen::Visualizer => {
            let race = signals.selected_race.read().clone();
            let race_data = signals.race_data.read().clone();
            match (race, race_data) {
                (Some(race), Some(race_data)) => rsx! {
                    TimelineView {
                        race,
                        race_data,
                        settings: settings.read().clone(),
                        on_back: move |_| signals.screen.set(Screen::Races),
                        on_menu: move |_| signals.screen.set(Screen::Menu),
                        on_zoom_change: move |zoom: f64| {
                            settings.write().time_zoom = clamp_time_zoom(zoom);
                        },
                    }
                },
                _ => rsx! {
                    div {
                        style: "padding: 24px; color: {TEXT_MUTED};",
                        "No race loaded. "
                        button {
                            class: "collapse-btn",
                            onclick: move |_| signals.screen.set(Screen::Races),
                            "Back to races"
                        }
                    }
                },
            }
        }
    };

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column;
                width: 100vw; height: 100vh; overflow: hidden;
                background-color: {BG_BASE};
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
                user-select: none;
            ",
            div {
                style: "flex: 1; min-height: 0; overflow: auto;",
                {body}
            }
            StatusBar { message: (signals.status)(), detail }
        }
    }
}

fn spawn_season_fetch(client: OpenF1Client, year: i32, mut signals: AppSignals) {
    if *signals.loading.peek() {
        return;
    }
    signals.loading.set(true);
    signals.status.set(format!("Loading {} season…", year));

    spawn(async move {
        match client.fetch_season(year).await {
            Ok(season) => {
                let catalog = RaceCatalog::from_season(season);
                info!(year, races = catalog.len(), "season ready");
                signals.status.set(if catalog.is_empty() {
                    format!("No races published for {}", year)
                } else {
                    format!("{} season", year)
                });
                signals.catalog.set(catalog);
                signals.screen.set(Screen::Races);
            }
            Err(err) => {
                warn!(year, "failed to fetch season: {}", err);
                signals.status.set(format!("Could not load {}: {}", year, err));
            }
        }
        signals.loading.set(false);
    });
}

fn spawn_race_fetch(client: OpenF1Client, race: Race, mut signals: AppSignals) {
    if *signals.loading.peek() {
        return;
    }
    signals.loading.set(true);
    signals.status.set(format!("Loading {}…", race.circuit_name));

    spawn(async move {
        match client.fetch_race_data(&race).await {
            Ok(race_data) => {
                info!(
                    session_key = race.session_key,
                    drivers = race_data.driver_count(),
                    pitstops = race_data.pitstop_count(),
                    "race data ready"
                );
                signals.status.set(format!("{} · {}", race.circuit_name, race.display_date()));
                signals.race_data.set(Some(race_data));
                signals.selected_race.set(Some(race));
                signals.screen.set(Screen::Visualizer);
            }
            Err(err) => {
                warn!(session_key = race.session_key, "failed to fetch race data: {}", err);
                signals
                    .status
                    .set(format!("Could not load {}: {}", race.circuit_name, err));
            }
        }
        signals.loading.set(false);
    });
}
