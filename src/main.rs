//! Pitwall
//!
//! Desktop viewer that lays out every pit stop of a Formula 1 race on a
//! time/lap timeline, one colored trace per driver.

mod app;
mod components;
mod constants;
mod core;
mod providers;
mod state;
mod timeline;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use tracing_subscriber::EnvFilter;

use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pitwall=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title("Pitwall")
                .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
                .with_resizable(true),
        )
        .with_menu(None); // Disable default menu bar

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);
}
