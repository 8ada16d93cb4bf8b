//! Shared UI crate for Driftboard. All cross-platform logic, models and views live here.

use dioxus::prelude::*;

pub mod core;
pub mod dashboard;
pub mod i18n;
pub mod views;

pub mod components {
    // Brand bar + locale switcher (components/app_header.rs)
    pub mod app_header;
    pub use app_header::AppHeader;
}

#[cfg(test)]
mod tests {
    mod i18n_completeness;
}

/// Unified theme shared by every launcher.
pub const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/theme/main.css"
));

/// The drift payload bundled with the app, served next to the web build.
pub const BUNDLED_SNAPSHOT: Asset = asset!("/assets/data/mock_data.json");

/// The same payload compiled in, for launchers that ship without loose asset files.
pub const EMBEDDED_SNAPSHOT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/data/mock_data.json"
));
