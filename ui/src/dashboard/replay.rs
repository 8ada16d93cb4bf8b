//! Turn-by-turn replay of a loaded snapshot.
//!
//! The engine is a plain state machine; the dashboard view owns the timer. Each accepted
//! tick yields a [`ReplayFrame`] and, unless the last turn was just revealed, the schedule
//! for the following tick. Every run carries a `run_id`, so ticks queued by a superseded or
//! cancelled run are dropped instead of interleaving with the current one.

use std::rc::Rc;

use tracing::{debug, info};

use crate::core::{config::DEFAULT_TICK_MS, snapshot::DriftSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayState {
    Idle,
    Running {
        run_id: u64,
        /// Number of turns already revealed (the next tick shows `revealed + 1`).
        revealed: usize,
        total: usize,
    },
}

/// A tick the view must deliver back to [`ReplayEngine::tick`] after `wait_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTick {
    pub run_id: u64,
    pub turn: usize,
    pub wait_ms: u64,
}

/// One rendered step of a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayFrame {
    /// 0-based index of the turn revealed by this frame.
    pub turn: usize,
    /// First `turn + 1` turns of the source, with full-precision scalars.
    pub snapshot: DriftSnapshot,
    pub next: Option<ScheduledTick>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Frame(ReplayFrame),
    /// Stale tick from a superseded or cancelled run.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct ReplayEngine {
    pub state: ReplayState,
    pub tick_ms: u64,
    run_id: u64,
    source: Option<Rc<DriftSnapshot>>,
}

impl Default for ReplayEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_MS)
    }
}

impl ReplayEngine {
    pub fn new(tick_ms: u64) -> Self {
        Self {
            state: ReplayState::Idle,
            tick_ms,
            run_id: 0,
            source: None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ReplayState::Running { .. })
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Begins a replay of `snapshot`, superseding any replay already running.
    ///
    /// Returns the first tick to schedule, or `None` for an empty series.
    pub fn start(&mut self, snapshot: Rc<DriftSnapshot>) -> Option<ScheduledTick> {
        if self.is_running() {
            debug!(run_id = self.run_id, "superseding running replay");
        }
        self.run_id = self.run_id.wrapping_add(1);

        let total = snapshot.turn_count();
        if total == 0 {
            self.state = ReplayState::Idle;
            self.source = None;
            return None;
        }

        info!(run_id = self.run_id, turns = total, "replay started");
        self.source = Some(snapshot);
        self.state = ReplayState::Running {
            run_id: self.run_id,
            revealed: 0,
            total,
        };
        Some(self.schedule(0))
    }

    /// Reveals the next turn if `run_id` and `turn` match the running replay.
    pub fn tick(&mut self, run_id: u64, turn: usize) -> TickOutcome {
        let (revealed, total) = match self.state {
            ReplayState::Running {
                run_id: active,
                revealed,
                total,
            } if active == run_id && revealed == turn => (revealed, total),
            _ => return TickOutcome::Ignored,
        };
        let Some(source) = self.source.as_ref() else {
            return TickOutcome::Ignored;
        };

        let snapshot = source.truncated(revealed + 1);
        let revealed = revealed + 1;

        let next = if revealed >= total {
            info!(run_id, turns = total, "replay finished");
            self.state = ReplayState::Idle;
            self.source = None;
            None
        } else {
            self.state = ReplayState::Running {
                run_id,
                revealed,
                total,
            };
            Some(self.schedule(revealed))
        };

        TickOutcome::Frame(ReplayFrame {
            turn,
            snapshot,
            next,
        })
    }

    /// Stops the running replay; any tick already queued for it will be ignored.
    pub fn cancel(&mut self) {
        if self.is_running() {
            debug!(run_id = self.run_id, "replay cancelled");
            self.run_id = self.run_id.wrapping_add(1);
        }
        self.state = ReplayState::Idle;
        self.source = None;
    }

    fn schedule(&self, turn: usize) -> ScheduledTick {
        ScheduledTick {
            run_id: self.run_id,
            turn,
            wait_ms: self.tick_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snapshot::fixtures::three_turns;

    /// Drives a run to completion the way the view does, collecting every frame.
    fn drain(engine: &mut ReplayEngine, first: ScheduledTick) -> Vec<ReplayFrame> {
        let mut frames = Vec::new();
        let mut pending = Some(first);
        while let Some(tick) = pending {
            match engine.tick(tick.run_id, tick.turn) {
                TickOutcome::Frame(frame) => {
                    pending = frame.next;
                    frames.push(frame);
                }
                TickOutcome::Ignored => panic!("live tick ignored"),
            }
        }
        frames
    }

    #[test]
    fn every_tick_reveals_one_more_turn() {
        let full = Rc::new(three_turns());
        let mut engine = ReplayEngine::default();
        let first = engine.start(full.clone()).unwrap();
        assert_eq!(first.wait_ms, 260);

        let frames = drain(&mut engine, first);
        assert_eq!(frames.len(), 3);
        for (k, frame) in frames.iter().enumerate() {
            assert_eq!(frame.turn, k);
            assert_eq!(frame.snapshot.drift_series.len(), k + 1);
            assert_eq!(frame.snapshot.heatmap.len(), k + 1);
            assert!(frame.snapshot.heatmap.iter().all(|row| row.len() == k + 1));
            assert_eq!(frame.snapshot.stability_score, full.stability_score);
        }
    }

    #[test]
    fn scenario_first_and_last_frames() {
        let full = Rc::new(three_turns());
        let mut engine = ReplayEngine::default();
        let first = engine.start(full.clone()).unwrap();
        let frames = drain(&mut engine, first);

        assert_eq!(frames[0].snapshot.drift_series, vec![0.1]);
        assert_eq!(frames[0].snapshot.heatmap, vec![vec![1.0]]);

        let last = frames.last().unwrap();
        assert_eq!(last.turn, 2);
        assert_eq!(last.snapshot.drift_series, full.drift_series);
        assert_eq!(last.snapshot.heatmap, full.heatmap);
        assert!(last.next.is_none());
    }

    #[test]
    fn finished_run_returns_to_idle_and_ignores_more_ticks() {
        let mut engine = ReplayEngine::default();
        let first = engine.start(Rc::new(three_turns())).unwrap();
        let run_id = first.run_id;
        drain(&mut engine, first);
        assert_eq!(engine.state, ReplayState::Idle);
        assert_eq!(engine.tick(run_id, 3), TickOutcome::Ignored);
        assert_eq!(engine.tick(run_id, 0), TickOutcome::Ignored);
    }

    #[test]
    fn empty_series_never_runs() {
        let mut engine = ReplayEngine::default();
        assert!(engine.start(Rc::new(DriftSnapshot::default())).is_none());
        assert!(!engine.is_running());
    }

    #[test]
    fn restart_supersedes_running_replay() {
        let full = Rc::new(three_turns());
        let mut engine = ReplayEngine::default();
        let first = engine.start(full.clone()).unwrap();
        let TickOutcome::Frame(frame) = engine.tick(first.run_id, first.turn) else {
            panic!("expected frame");
        };
        let stale = frame.next.unwrap();

        let restarted = engine.start(full).unwrap();
        assert_ne!(restarted.run_id, stale.run_id);
        assert_eq!(restarted.turn, 0);
        assert_eq!(engine.tick(stale.run_id, stale.turn), TickOutcome::Ignored);
        assert_eq!(drain(&mut engine, restarted).len(), 3);
    }

    #[test]
    fn cancel_drops_queued_tick() {
        let mut engine = ReplayEngine::default();
        let first = engine.start(Rc::new(three_turns())).unwrap();
        engine.cancel();
        assert!(!engine.is_running());
        assert_eq!(engine.tick(first.run_id, first.turn), TickOutcome::Ignored);
    }

    #[test]
    fn duplicate_tick_is_ignored() {
        let mut engine = ReplayEngine::default();
        let first = engine.start(Rc::new(three_turns())).unwrap();
        assert!(matches!(
            engine.tick(first.run_id, first.turn),
            TickOutcome::Frame(_)
        ));
        assert_eq!(engine.tick(first.run_id, first.turn), TickOutcome::Ignored);
    }

    #[test]
    fn replay_does_not_touch_the_source() {
        let full = Rc::new(three_turns());
        let mut engine = ReplayEngine::new(10);
        let first = engine.start(full.clone()).unwrap();
        assert_eq!(first.wait_ms, 10);
        drain(&mut engine, first);
        assert_eq!(*full, three_turns());
    }
}
