//! UI components grouped by screen.
mod season_menu;
mod race_browser;
mod status_bar;

pub use season_menu::SeasonMenu;
pub use race_browser::RaceBrowser;
pub use status_bar::StatusBar;
