//! Chart models for the drift curve and the drift heatmap, plus their SVG renderers.
//!
//! Models are rebuilt from scratch for every snapshot; the components only turn a model into
//! markup. Both handle an empty snapshot by drawing bare axes and a "no data" label.

use dioxus::prelude::*;

use crate::core::{format, snapshot::DriftSnapshot};

pub const CHART_WIDTH: f64 = 640.0;
pub const CHART_HEIGHT: f64 = 320.0;

const CURVE_COLOR: &str = "#1d4ed8";
const CURVE_WIDTH: f64 = 3.0;
const MARKER_SIZE: f64 = 7.0;
const ZERO_LINE_COLOR: &str = "#e5e7eb";
const COLORBAR_WIDTH: f64 = 14.0;
const COLORBAR_BANDS: usize = 32;

/// Reversed "Blues" scale: low values light grey, high values deep blue.
const BLUES: [(f64, [u8; 3]); 6] = [
    (0.0, [5, 10, 172]),
    (0.35, [40, 60, 190]),
    (0.5, [70, 100, 245]),
    (0.6, [90, 120, 245]),
    (0.7, [106, 137, 247]),
    (1.0, [220, 220, 220]),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

pub const MARGINS: Margins = Margins {
    top: 20.0,
    right: 10.0,
    bottom: 44.0,
    left: 52.0,
};

impl Margins {
    fn plot_width(&self) -> f64 {
        CHART_WIDTH - self.left - self.right
    }

    fn plot_height(&self) -> f64 {
        CHART_HEIGHT - self.top - self.bottom
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    /// Pixel offset along the axis.
    pub position: f64,
    pub label: String,
}

/// Line + marker chart of drift magnitude per turn.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftCurve {
    pub x: Vec<u32>,
    pub y: Vec<f64>,
    pub y_range: (f64, f64),
    /// Pixel coordinates of each finite point, in turn order.
    pub points: Vec<(f64, f64)>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
    /// Pixel row of `y = 0` when zero lies inside the range.
    pub zero_line: Option<f64>,
}

impl DriftCurve {
    pub fn from_snapshot(snapshot: &DriftSnapshot) -> Self {
        let x = snapshot.turn_axis();
        let y = snapshot.drift_series.clone();
        let y_range = value_range(&y);

        let turns = x.len();
        let x_pixel = |turn: f64| turn_to_pixel(turn, turns, MARGINS.left, MARGINS.plot_width());
        let y_pixel = |value: f64| {
            let (lo, hi) = y_range;
            MARGINS.top + (hi - value) / (hi - lo) * MARGINS.plot_height()
        };

        let points = x
            .iter()
            .zip(&y)
            .filter(|(_, v)| v.is_finite())
            .map(|(turn, v)| (x_pixel(*turn as f64), y_pixel(*v)))
            .collect();

        let x_ticks = x
            .iter()
            .map(|turn| AxisTick {
                position: x_pixel(*turn as f64),
                label: turn.to_string(),
            })
            .collect();

        let y_ticks = nice_ticks(y_range.0, y_range.1)
            .into_iter()
            .map(|value| AxisTick {
                position: y_pixel(value),
                label: format::format_tick(value),
            })
            .collect();

        let zero_line = (y_range.0 < 0.0 && y_range.1 > 0.0).then(|| y_pixel(0.0));

        Self {
            x,
            y,
            y_range,
            points,
            x_ticks,
            y_ticks,
            zero_line,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `points` attribute for the connecting polyline.
    pub fn polyline(&self) -> String {
        self.points
            .iter()
            .map(|(x, y)| format!("{x:.2},{y:.2}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatCell {
    pub row: usize,
    pub col: usize,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    /// `rgb(..)` colour, or `None` for gaps (non-finite values).
    pub fill: Option<String>,
}

impl HeatCell {
    /// Accessible label, e.g. `2 × 3: 0.45`.
    pub fn caption(&self) -> String {
        format!(
            "{} × {}: {}",
            self.row + 1,
            self.col + 1,
            format::format_tick(self.value)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorBand {
    pub y: f64,
    pub height: f64,
    pub fill: String,
}

/// Square turn × turn heatmap with turn 1 in the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftHeatmap {
    pub turns: usize,
    pub cells: Vec<HeatCell>,
    pub value_range: Option<(f64, f64)>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
    pub side: f64,
    pub colorbar: Vec<ColorBand>,
}

impl DriftHeatmap {
    pub fn from_snapshot(snapshot: &DriftSnapshot) -> Self {
        let turns = snapshot.turn_count();
        let side = MARGINS
            .plot_height()
            .min(MARGINS.plot_width() - COLORBAR_WIDTH * 4.0);
        let cell = if turns == 0 { 0.0 } else { side / turns as f64 };
        let value_range = snapshot.heatmap_range();

        let cells = snapshot
            .heatmap
            .iter()
            .take(turns)
            .enumerate()
            .flat_map(|(row, values)| {
                values
                    .iter()
                    .take(turns)
                    .enumerate()
                    .map(move |(col, value)| (row, col, *value))
            })
            .map(|(row, col, value)| HeatCell {
                row,
                col,
                value,
                x: MARGINS.left + col as f64 * cell,
                y: MARGINS.top + row as f64 * cell,
                size: cell,
                fill: value
                    .is_finite()
                    .then(|| rgb(blues_reversed(normalize(value, value_range)))),
            })
            .collect();

        let ticks = |origin: f64| -> Vec<AxisTick> {
            (1..=turns)
                .map(|turn| AxisTick {
                    position: origin + (turn as f64 - 0.5) * cell,
                    label: turn.to_string(),
                })
                .collect()
        };

        let band_height = side / COLORBAR_BANDS as f64;
        let colorbar = (0..COLORBAR_BANDS)
            .map(|band| {
                // top band is the high end of the scale
                let t = 1.0 - (band as f64 + 0.5) / COLORBAR_BANDS as f64;
                ColorBand {
                    y: MARGINS.top + band as f64 * band_height,
                    height: band_height,
                    fill: rgb(blues_reversed(t)),
                }
            })
            .collect();

        Self {
            turns,
            cells,
            value_range,
            x_ticks: ticks(MARGINS.left),
            y_ticks: ticks(MARGINS.top),
            side,
            colorbar,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.turns == 0
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&HeatCell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    fn colorbar_x(&self) -> f64 {
        MARGINS.left + self.side + COLORBAR_WIDTH * 1.5
    }
}

/// Maps a 1-based turn to a pixel column, leaving half a step of padding on both ends.
fn turn_to_pixel(turn: f64, turns: usize, origin: f64, span: f64) -> f64 {
    let slots = turns.max(1) as f64;
    origin + (turn - 0.5) / slots * span
}

fn value_range(values: &[f64]) -> (f64, f64) {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo > hi {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.5 };
        return (lo - pad, hi + pad);
    }
    let pad = (hi - lo) * 0.08;
    (lo - pad, hi + pad)
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction < 1.5 {
        1.0
    } else if fraction < 3.0 {
        2.0
    } else if fraction < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Roughly five evenly spaced round values inside `[lo, hi]`.
fn nice_ticks(lo: f64, hi: f64) -> Vec<f64> {
    if hi <= lo || !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    let step = nice_step((hi - lo) / 5.0);
    // dividing by an integral inverse keeps values like 0.3 exact
    let inverse = (1.0 / step).round();
    let at = |k: f64| if step < 1.0 { k / inverse } else { k * step };
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|k| at(k as f64)).collect()
}

fn normalize(value: f64, range: Option<(f64, f64)>) -> f64 {
    match range {
        Some((lo, hi)) if hi > lo => ((value - lo) / (hi - lo)).clamp(0.0, 1.0),
        _ => 0.5,
    }
}

fn blues_reversed(t: f64) -> [u8; 3] {
    let s = 1.0 - t.clamp(0.0, 1.0);
    let upper = BLUES
        .iter()
        .position(|(stop, _)| *stop >= s)
        .unwrap_or(BLUES.len() - 1)
        .max(1);
    let (s0, c0) = BLUES[upper - 1];
    let (s1, c1) = BLUES[upper];
    let f = if s1 > s0 { (s - s0) / (s1 - s0) } else { 0.0 };
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
    [lerp(c0[0], c1[0]), lerp(c0[1], c1[1]), lerp(c0[2], c1[2])]
}

fn rgb([r, g, b]: [u8; 3]) -> String {
    format!("rgb({r},{g},{b})")
}

#[component]
pub fn DriftCurveChart(curve: DriftCurve) -> Element {
    let plot_left = MARGINS.left;
    let plot_right = CHART_WIDTH - MARGINS.right;
    let plot_top = MARGINS.top;
    let plot_bottom = CHART_HEIGHT - MARGINS.bottom;
    let tick_x = plot_left - 6.0;
    let tick_y = plot_bottom + 16.0;
    let centre_x = plot_left + (plot_right - plot_left) / 2.0;
    let centre_y = plot_top + (plot_bottom - plot_top) / 2.0;
    let title_x = 14.0;
    let title_y = CHART_HEIGHT - 8.0;
    let polyline = curve.polyline();

    rsx! {
        figure { class: "dashboard-card dashboard-chart",
            figcaption { class: "dashboard-chart__title", {crate::t!("chart-drift-curve")} }
            svg {
                id: "driftCurve",
                class: "dashboard-chart__surface",
                view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
                role: "img",

                for tick in curve.y_ticks.iter() {
                    line { class: "dashboard-chart__grid", x1: plot_left, x2: plot_right, y1: tick.position, y2: tick.position }
                    text { class: "dashboard-chart__tick", x: tick_x, y: tick.position + 4.0, text_anchor: "end", "{tick.label}" }
                }
                if let Some(zero) = curve.zero_line {
                    line { x1: plot_left, x2: plot_right, y1: zero, y2: zero, stroke: ZERO_LINE_COLOR, stroke_width: 2.0 }
                }
                for tick in curve.x_ticks.iter() {
                    text { class: "dashboard-chart__tick", x: tick.position, y: tick_y, text_anchor: "middle", "{tick.label}" }
                }
                line { class: "dashboard-chart__axis", x1: plot_left, x2: plot_right, y1: plot_bottom, y2: plot_bottom }
                line { class: "dashboard-chart__axis", x1: plot_left, x2: plot_left, y1: plot_top, y2: plot_bottom }

                if curve.is_empty() {
                    text { class: "dashboard-chart__empty", x: centre_x, y: centre_y, text_anchor: "middle", {crate::t!("chart-no-data")} }
                } else {
                    polyline {
                        points: "{polyline}",
                        fill: "none",
                        stroke: CURVE_COLOR,
                        stroke_width: CURVE_WIDTH,
                        stroke_linejoin: "round",
                    }
                    for (x, y) in curve.points.iter() {
                        circle { cx: *x, cy: *y, r: MARKER_SIZE / 2.0, fill: CURVE_COLOR }
                    }
                }

                text { class: "dashboard-chart__axis-title", x: centre_x, y: title_y, text_anchor: "middle", {crate::t!("axis-turn")} }
                text {
                    class: "dashboard-chart__axis-title",
                    x: title_x,
                    y: centre_y,
                    text_anchor: "middle",
                    transform: "rotate(-90 {title_x} {centre_y})",
                    {crate::t!("axis-drift")}
                }
            }
        }
    }
}

#[component]
pub fn DriftHeatmapChart(heatmap: DriftHeatmap) -> Element {
    let plot_left = MARGINS.left;
    let plot_top = MARGINS.top;
    let plot_right = plot_left + heatmap.side;
    let plot_bottom = plot_top + heatmap.side;
    let tick_x = plot_left - 6.0;
    let tick_y = plot_bottom + 16.0;
    let centre_x = plot_left + heatmap.side / 2.0;
    let centre_y = plot_top + heatmap.side / 2.0;
    let title_x = 14.0;
    let title_y = CHART_HEIGHT - 8.0;
    let bar_x = heatmap.colorbar_x();
    let bar_label_x = bar_x + COLORBAR_WIDTH + 4.0;
    let bar_top_label_y = plot_top + 8.0;
    let (range_lo, range_hi) = heatmap
        .value_range
        .map(|(lo, hi)| (format::format_tick(lo), format::format_tick(hi)))
        .unwrap_or_default();

    rsx! {
        figure { class: "dashboard-card dashboard-chart",
            figcaption { class: "dashboard-chart__title", {crate::t!("chart-drift-heatmap")} }
            svg {
                id: "driftHeatmap",
                class: "dashboard-chart__surface",
                view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
                role: "img",

                for cell in heatmap.cells.iter() {
                    if let Some(fill) = cell.fill.as_ref() {
                        rect {
                            x: cell.x,
                            y: cell.y,
                            width: cell.size,
                            height: cell.size,
                            fill: "{fill}",
                            "aria-label": cell.caption(),
                        }
                    }
                }
                for tick in heatmap.x_ticks.iter() {
                    text { class: "dashboard-chart__tick", x: tick.position, y: tick_y, text_anchor: "middle", "{tick.label}" }
                }
                for tick in heatmap.y_ticks.iter() {
                    text { class: "dashboard-chart__tick", x: tick_x, y: tick.position + 4.0, text_anchor: "end", "{tick.label}" }
                }
                line { class: "dashboard-chart__axis", x1: plot_left, x2: plot_right, y1: plot_bottom, y2: plot_bottom }
                line { class: "dashboard-chart__axis", x1: plot_left, x2: plot_left, y1: plot_top, y2: plot_bottom }

                if heatmap.is_empty() {
                    text { class: "dashboard-chart__empty", x: centre_x, y: centre_y, text_anchor: "middle", {crate::t!("chart-no-data")} }
                } else {
                    for band in heatmap.colorbar.iter() {
                        rect { x: bar_x, y: band.y, width: COLORBAR_WIDTH, height: band.height + 0.5, fill: "{band.fill}" }
                    }
                    text { class: "dashboard-chart__tick", x: bar_label_x, y: bar_top_label_y, "{range_hi}" }
                    text { class: "dashboard-chart__tick", x: bar_label_x, y: plot_bottom, "{range_lo}" }
                }

                text { class: "dashboard-chart__axis-title", x: centre_x, y: title_y, text_anchor: "middle", {crate::t!("axis-turn")} }
                text {
                    class: "dashboard-chart__axis-title",
                    x: title_x,
                    y: centre_y,
                    text_anchor: "middle",
                    transform: "rotate(-90 {title_x} {centre_y})",
                    {crate::t!("axis-turn")}
                }
            }
        }
    }
}
