//! The drift dashboard: metric readout, drift curve, drift heatmap and the turn-by-turn replay.

mod charts;
mod metrics;
mod replay;
mod state;
mod view;

pub use charts::{DriftCurve, DriftCurveChart, DriftHeatmap, DriftHeatmapChart, HeatCell};
pub use metrics::{MetricsPanel, MetricsReadout};
pub use replay::{ReplayEngine, ReplayFrame, ReplayState, ScheduledTick, TickOutcome};
pub use state::{DashboardEvent, DashboardState};
pub use view::DashboardView;
