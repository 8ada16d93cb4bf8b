//! Event handling for the dashboard, kept apart from the component so it can run without a
//! renderer. The view forwards every event to [`DashboardState::handle`] and schedules the tick
//! it returns, if any.

use std::rc::Rc;

use tracing::debug;

use crate::core::config::DEFAULT_TICK_MS;
use crate::core::snapshot::DriftSnapshot;

use super::replay::{ReplayEngine, ReplayState, ScheduledTick, TickOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    Loaded(Result<DriftSnapshot, String>),
    Simulate,
    Reset,
    Tick { run_id: u64, turn: usize },
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Full payload, written once when the load succeeds.
    pub source: Option<Rc<DriftSnapshot>>,
    /// What the metrics and charts currently show.
    pub displayed: Option<DriftSnapshot>,
    /// Bumped on every presentation; keys the chart subtrees.
    pub render_epoch: u64,
    pub load_error: Option<String>,
    pub engine: ReplayEngine,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_MS)
    }
}

impl DashboardState {
    pub fn new(tick_ms: u64) -> Self {
        Self {
            source: None,
            displayed: None,
            render_epoch: 0,
            load_error: None,
            engine: ReplayEngine::new(tick_ms),
        }
    }

    pub fn has_data(&self) -> bool {
        self.source.is_some()
    }

    /// `(revealed, total)` while a replay is running.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self.engine.state {
            ReplayState::Running {
                revealed, total, ..
            } => Some((revealed, total)),
            ReplayState::Idle => None,
        }
    }

    /// Applies one event and returns the tick the caller must deliver later, if any.
    pub fn handle(&mut self, event: DashboardEvent) -> Option<ScheduledTick> {
        match event {
            DashboardEvent::Loaded(Ok(snapshot)) => {
                let snapshot = Rc::new(snapshot);
                self.load_error = None;
                self.show(snapshot.as_ref().clone());
                self.source = Some(snapshot);
                None
            }
            DashboardEvent::Loaded(Err(err)) => {
                self.load_error = Some(err);
                None
            }
            DashboardEvent::Simulate => {
                let Some(snapshot) = self.source.clone() else {
                    debug!("simulate ignored: no snapshot loaded");
                    return None;
                };
                self.engine.start(snapshot)
            }
            DashboardEvent::Reset => {
                let snapshot = self.source.clone()?;
                self.engine.cancel();
                self.show(snapshot.as_ref().clone());
                None
            }
            DashboardEvent::Tick { run_id, turn } => match self.engine.tick(run_id, turn) {
                TickOutcome::Frame(frame) => {
                    self.show(frame.snapshot);
                    frame.next
                }
                TickOutcome::Ignored => None,
            },
        }
    }

    fn show(&mut self, snapshot: DriftSnapshot) {
        self.displayed = Some(snapshot);
        self.render_epoch = self.render_epoch.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snapshot::fixtures::three_turns;
    use crate::dashboard::metrics::MetricsReadout;

    fn loaded() -> DashboardState {
        let mut state = DashboardState::default();
        assert!(state.handle(DashboardEvent::Loaded(Ok(three_turns()))).is_none());
        state
    }

    fn deliver(state: &mut DashboardState, tick: ScheduledTick) -> Option<ScheduledTick> {
        state.handle(DashboardEvent::Tick {
            run_id: tick.run_id,
            turn: tick.turn,
        })
    }

    #[test]
    fn simulate_and_reset_before_load_do_nothing() {
        let mut state = DashboardState::default();
        assert!(state.handle(DashboardEvent::Simulate).is_none());
        assert!(state.handle(DashboardEvent::Reset).is_none());
        assert!(state.displayed.is_none());
        assert_eq!(state.render_epoch, 0);
        assert!(!state.engine.is_running());
    }

    #[test]
    fn load_shows_the_full_snapshot() {
        let state = loaded();
        assert_eq!(state.displayed, Some(three_turns()));
        assert_eq!(state.render_epoch, 1);
        assert!(state.has_data());
        assert!(state.progress().is_none());
    }

    #[test]
    fn failed_load_keeps_the_error_and_shows_nothing() {
        let mut state = DashboardState::default();
        state.handle(DashboardEvent::Loaded(Err("couldn't read drift.json".into())));
        assert_eq!(state.load_error.as_deref(), Some("couldn't read drift.json"));
        assert!(state.displayed.is_none());
        assert!(state.handle(DashboardEvent::Simulate).is_none());
    }

    #[test]
    fn replay_then_reset_restores_full_render_and_drops_stale_tick() {
        let mut state = loaded();
        let first = state.handle(DashboardEvent::Simulate).unwrap();
        assert_eq!(state.progress(), Some((0, 3)));

        let second = deliver(&mut state, first).unwrap();
        let partial = state.displayed.clone().unwrap();
        assert_eq!(partial.drift_series, vec![0.1]);
        assert_eq!(partial.heatmap, vec![vec![1.0]]);
        assert_eq!(MetricsReadout::from_snapshot(&partial).turns, "1");
        assert_eq!(state.progress(), Some((1, 3)));

        assert!(state.handle(DashboardEvent::Reset).is_none());
        assert_eq!(state.displayed, Some(three_turns()));
        assert!(state.progress().is_none());

        let epoch = state.render_epoch;
        assert!(deliver(&mut state, second).is_none());
        assert_eq!(state.displayed, Some(three_turns()));
        assert_eq!(state.render_epoch, epoch);
    }

    #[test]
    fn two_resets_render_identically() {
        let mut state = loaded();
        state.handle(DashboardEvent::Reset);
        let first = state.displayed.clone();
        state.handle(DashboardEvent::Reset);
        assert_eq!(state.displayed, first);
        assert_eq!(state.displayed, Some(three_turns()));
    }

    #[test]
    fn full_replay_ends_on_the_full_series() {
        let mut state = loaded();
        let mut pending = state.handle(DashboardEvent::Simulate);
        let mut frames = 0;
        while let Some(tick) = pending {
            pending = deliver(&mut state, tick);
            frames += 1;
            let shown = state.displayed.as_ref().unwrap();
            assert_eq!(shown.turn_count(), frames);
        }
        assert_eq!(frames, 3);
        assert_eq!(state.displayed, Some(three_turns()));
        assert!(state.progress().is_none());
    }

    #[test]
    fn simulate_while_running_restarts_from_turn_one() {
        let mut state = loaded();
        let first = state.handle(DashboardEvent::Simulate).unwrap();
        let stale = deliver(&mut state, first).unwrap();

        let restarted = state.handle(DashboardEvent::Simulate).unwrap();
        assert_eq!(restarted.turn, 0);
        assert!(deliver(&mut state, stale).is_none());
        assert_eq!(state.displayed.as_ref().unwrap().turn_count(), 1);

        deliver(&mut state, restarted);
        assert_eq!(state.displayed.as_ref().unwrap().turn_count(), 1);
        assert_eq!(state.progress(), Some((1, 3)));
    }
}
