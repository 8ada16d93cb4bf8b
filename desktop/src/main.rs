#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::prelude::*;

use ui::components::AppHeader;
use ui::core::config::DashboardConfig;
use ui::views::Dashboard;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(DesktopShell)]
    #[route("/")]
    Dashboard {},
}

// Shared theme is embedded; the desktop bundle carries no stylesheet of its own.
const THEME_CSS: &str = ui::THEME_CSS;

fn main() {
    LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(format!("Driftboard – v{}", env!("CARGO_PKG_VERSION")))
                        .with_maximized(true),
                ),
        )
        .launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    // Packaged bundles carry no loose data files; the payload is compiled in.
    use_context_provider(|| {
        tracing::debug!("desktop dashboard configured with embedded payload");
        DashboardConfig::embedded("mock_data.json", ui::EMBEDDED_SNAPSHOT)
    });

    // Window managers may ignore the builder hint.
    let win = dioxus::desktop::use_window();
    use_effect(move || {
        win.set_maximized(true);
    });

    rsx! {
        document::Style { "{THEME_CSS}" }
        Router::<Route> { }
    }
}

/// Desktop layout around the shared header, bound to the desktop `Route` enum.
#[component]
fn DesktopShell() -> Element {
    rsx! {
        AppHeader { }
        Outlet::<Route> {}
    }
}
