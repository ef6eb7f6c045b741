//! Shared UI crate for Contract Intel. Analysis logic, views and the theme
//! live here; the `web` and `desktop` crates only wire up routing.

pub mod analysis;
pub mod core;
pub mod i18n;
pub mod results;
pub mod views;

pub mod components {
    // Brand bar, locale switcher and user menu (components/app_header.rs)
    pub mod app_header;
    pub use app_header::AppHeader;

    mod widgets;
    pub use widgets::{AppFooter, ProgressOverlay, SearchBox, StatCard, StatusBadge};
}

/// Stylesheet and viewer bridge shared by both launchers.
pub mod theme {
    use dioxus::prelude::*;

    pub const MAIN_CSS: Asset = asset!("/assets/theme/main.css");
    pub const PDF_BRIDGE: Asset = asset!("/assets/js/pdf-bridge.js");

    /// Inline copies for builds that do not serve a bundle directory.
    pub const MAIN_CSS_INLINE: &str = include_str!("../assets/theme/main.css");
    pub const PDF_BRIDGE_INLINE: &str = include_str!("../assets/js/pdf-bridge.js");
}
