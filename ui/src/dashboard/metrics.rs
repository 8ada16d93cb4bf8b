use dioxus::prelude::*;

use crate::core::{format, snapshot::DriftSnapshot};

/// Display strings for the three headline fields.
///
/// Built fresh from whatever snapshot is passed in; nothing carries over between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsReadout {
    pub stability: String,
    pub pf_like: String,
    pub turns: String,
}

impl MetricsReadout {
    pub fn from_snapshot(snapshot: &DriftSnapshot) -> Self {
        Self {
            stability: format::format_metric(snapshot.stability_score),
            pf_like: format::format_metric(snapshot.pf_like_metric),
            turns: format::format_turns(snapshot.turn_count()),
        }
    }
}

#[component]
pub fn MetricsPanel(readout: MetricsReadout) -> Element {
    rsx! {
        section { class: "dashboard-card dashboard-metrics",
            div { class: "dashboard-metric",
                span { class: "dashboard-metric__label", {crate::t!("metric-stability")} }
                strong { id: "stabilityValue", class: "dashboard-metric__value", "{readout.stability}" }
            }
            div { class: "dashboard-metric",
                span { class: "dashboard-metric__label", {crate::t!("metric-pf-like")} }
                strong { id: "pfValue", class: "dashboard-metric__value", "{readout.pf_like}" }
            }
            div { class: "dashboard-metric",
                span { class: "dashboard-metric__label", {crate::t!("metric-turns")} }
                strong { id: "turnsValue", class: "dashboard-metric__value", "{readout.turns}" }
            }
        }
    }
}
