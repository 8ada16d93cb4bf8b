use dioxus::prelude::*;

use ui::components::AppHeader;
use ui::core::config::DashboardConfig;
use ui::views::Dashboard;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebShell)]
    #[route("/")]
    Dashboard {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const THEME_CSS: &str = ui::THEME_CSS;

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // Global language code; the header writes it, pages subscribe to it.
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    // The payload ships as a bundled asset and is fetched relative to the page.
    use_context_provider(|| {
        let source = ui::BUNDLED_SNAPSHOT.to_string();
        tracing::debug!(%source, "web dashboard configured");
        DashboardConfig::with_data_source(source)
    });

    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Style { "{THEME_CSS}" }

        Router::<Route> {}
    }
}

/// Web layout: shared header above the routed page.
#[component]
fn WebShell() -> Element {
    rsx! {
        AppHeader { }
        Outlet::<Route> {}
    }
}
