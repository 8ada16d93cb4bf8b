use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedSender;
use futures_util::StreamExt;
use tracing::error;

use crate::core::config::DashboardConfig;
use crate::core::loader::load_configured;
use crate::core::snapshot::DriftSnapshot;
use crate::core::{platform, timing};

use super::charts::{DriftCurve, DriftCurveChart, DriftHeatmap, DriftHeatmapChart};
use super::metrics::{MetricsPanel, MetricsReadout};
use super::replay::ScheduledTick;
use super::state::{DashboardEvent, DashboardState};

type SenderSlot = Rc<RefCell<Option<UnboundedSender<DashboardEvent>>>>;

/// Loads the snapshot once, shows it, and replays it turn by turn on demand.
#[component]
pub fn DashboardView() -> Element {
    let config = try_use_context::<DashboardConfig>().unwrap_or_default();

    let state = {
        let tick_ms = config.tick_ms;
        use_signal(move || DashboardState::new(tick_ms))
    };

    let sender_slot: SenderSlot = use_hook(|| Rc::new(RefCell::new(None)));
    let sender_slot_for_loop = sender_slot.clone();

    let coroutine = use_coroutine(move |mut rx: UnboundedReceiver<DashboardEvent>| {
        let sender_slot = sender_slot_for_loop.clone();
        let mut state = state;

        async move {
            while let Some(event) = rx.next().await {
                if let Some(tick) = state.with_mut(|s| s.handle(event)) {
                    queue_tick(sender_slot.clone(), tick);
                }
            }
        }
    });

    sender_slot.borrow_mut().replace(coroutine.tx());

    use_hook({
        let tx = coroutine.tx();
        let config = config.clone();
        move || {
            platform::spawn_future(async move {
                let outcome = load_configured(&config).await.map_err(|err| {
                    error!(source = %config.data_source, "failed to load drift data: {err}");
                    err.to_string()
                });
                let _ = tx.unbounded_send(DashboardEvent::Loaded(outcome));
            });
        }
    });

    let send_event = {
        let coroutine = coroutine;
        move |event: DashboardEvent| {
            coroutine.send(event);
        }
    };

    let (has_data, progress, epoch, frame, error_message) = {
        let current = state.read();
        (
            current.has_data(),
            current
                .progress()
                .map(|(revealed, total)| (revealed.to_string(), total.to_string())),
            current.render_epoch,
            current.displayed.clone(),
            current.load_error.clone(),
        )
    };

    rsx! {
        article { class: "dashboard",
            div { class: "dashboard__controls",
                button {
                    id: "simulateButton",
                    r#type: "button",
                    class: "button button--primary",
                    disabled: !has_data,
                    onclick: move |_| send_event(DashboardEvent::Simulate),
                    {crate::t!("action-simulate")}
                }
                button {
                    id: "resetButton",
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: !has_data,
                    onclick: move |_| send_event(DashboardEvent::Reset),
                    {crate::t!("action-reset")}
                }
                if let Some((revealed, total)) = progress {
                    span { class: "dashboard__progress",
                        {crate::t!("replay-progress", revealed = revealed, total = total)}
                    }
                }
            }

            if let Some(err) = error_message {
                div { class: "dashboard__error", role: "alert",
                    strong { {crate::t!("load-failed")} }
                    " {err}"
                }
            } else if let Some(snapshot) = frame {
                {render_frame(&snapshot, epoch)}
            } else {
                p { class: "dashboard-card__placeholder", {crate::t!("loading")} }
            }
        }
    }
}

/// Draws one snapshot: metrics plus both charts, keyed so every frame replaces the last.
fn render_frame(snapshot: &DriftSnapshot, epoch: u64) -> Element {
    let readout = MetricsReadout::from_snapshot(snapshot);
    let curve = DriftCurve::from_snapshot(snapshot);
    let heatmap = DriftHeatmap::from_snapshot(snapshot);

    rsx! {
        MetricsPanel { readout }
        div { class: "dashboard__charts",
            DriftCurveChart { key: "curve-{epoch}", curve }
            DriftHeatmapChart { key: "heatmap-{epoch}", heatmap }
        }
    }
}

fn queue_tick(sender_slot: SenderSlot, tick: ScheduledTick) {
    if let Some(sender) = sender_slot.borrow().as_ref().cloned() {
        platform::spawn_future(async move {
            timing::sleep_ms(tick.wait_ms).await;
            let _ = sender.unbounded_send(DashboardEvent::Tick {
                run_id: tick.run_id,
                turn: tick.turn,
            });
        });
    }
}
