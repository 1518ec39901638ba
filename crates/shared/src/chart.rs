use std::f64::consts::{FRAC_PI_2, TAU};

use crate::models::RegionalDistribution;
use crate::reference;
use crate::report::{affected_trees, percentage};

/// Donut geometry in SVG user units.
pub const CHART_SIZE: f64 = 240.0;
pub const OUTER_RADIUS: f64 = 110.0;
pub const INNER_RADIUS: f64 = 64.0;

/// Sweeps this close to a full turn are drawn as a closed ring.
const FULL_TURN_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub disease: String,
    pub count: u64,
    pub fraction: f64,
    pub color: &'static str,
    /// Radians, clockwise from twelve o'clock.
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Slice {
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }

    pub fn tooltip(&self) -> String {
        format!(
            "{}: {} ({})",
            self.disease,
            self.percentage_label(),
            affected_trees(self.count)
        )
    }

    pub fn path(&self) -> String {
        annular_sector_path(
            CHART_SIZE / 2.0,
            CHART_SIZE / 2.0,
            OUTER_RADIUS,
            INNER_RADIUS,
            self.start_angle,
            self.end_angle,
        )
    }
}

/// A rendered donut. `id` changes on every mount so the view rebuilds the SVG.
#[derive(Debug, Clone, PartialEq)]
pub struct DonutChart {
    pub id: u64,
    pub total: u64,
    pub slices: Vec<Slice>,
}

/// Split a distribution into slices in descending count order.
///
/// Zero-count diseases get no slice. Returns `None` when the total is zero;
/// there is nothing to draw.
pub fn donut_slices(distribution: &RegionalDistribution) -> Option<(u64, Vec<Slice>)> {
    let total: u64 = distribution.values().sum();
    if total == 0 {
        return None;
    }

    let mut entries: Vec<(&String, &u64)> =
        distribution.iter().filter(|(_, c)| **c > 0).collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));

    let mut angle = 0.0;
    let slices = entries
        .into_iter()
        .map(|(disease, &count)| {
            let fraction = percentage(count, total) / 100.0;
            let start_angle = angle;
            angle += fraction * TAU;
            Slice {
                disease: disease.clone(),
                count,
                fraction,
                color: reference::color_of(disease),
                start_angle,
                end_angle: angle,
            }
        })
        .collect();

    Some((total, slices))
}

fn point_on_circle(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    // Angle 0 is twelve o'clock; SVG y grows downward.
    let theta = angle - FRAC_PI_2;
    (cx + r * theta.cos(), cy + r * theta.sin())
}

/// SVG path for the ring segment between `start` and `end` (radians).
///
/// A full turn cannot be expressed as one arc command, so it is drawn as two
/// half arcs per radius, the inner loop wound the other way to cut the hole.
pub fn annular_sector_path(cx: f64, cy: f64, outer: f64, inner: f64, start: f64, end: f64) -> String {
    let sweep = end - start;
    if sweep >= TAU - FULL_TURN_EPSILON {
        return format!(
            "M {ox:.3} {top:.3} A {o} {o} 0 1 1 {ox:.3} {bottom:.3} A {o} {o} 0 1 1 {ox:.3} {top:.3} Z \
             M {ix:.3} {itop:.3} A {i} {i} 0 1 0 {ix:.3} {ibottom:.3} A {i} {i} 0 1 0 {ix:.3} {itop:.3} Z",
            ox = cx,
            top = cy - outer,
            bottom = cy + outer,
            o = outer,
            ix = cx,
            itop = cy - inner,
            ibottom = cy + inner,
            i = inner,
        );
    }

    let large_arc = if sweep > std::f64::consts::PI { 1 } else { 0 };
    let (x0, y0) = point_on_circle(cx, cy, outer, start);
    let (x1, y1) = point_on_circle(cx, cy, outer, end);
    let (x2, y2) = point_on_circle(cx, cy, inner, end);
    let (x3, y3) = point_on_circle(cx, cy, inner, start);

    format!(
        "M {x0:.3} {y0:.3} A {outer} {outer} 0 {large_arc} 1 {x1:.3} {y1:.3} \
         L {x2:.3} {y2:.3} A {inner} {inner} 0 {large_arc} 0 {x3:.3} {y3:.3} Z"
    )
}

/// Owner of the single chart instance on the page.
///
/// Mounting always destroys the previous chart first, so at most one
/// instance exists at any time.
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<DonutChart>,
    mounted: u64,
}

impl ChartSlot {
    pub fn current(&self) -> Option<&DonutChart> {
        self.current.as_ref()
    }

    /// Number of charts created over the slot's lifetime.
    pub fn mounted(&self) -> u64 {
        self.mounted
    }

    /// Drop the current chart, if any, returning it.
    pub fn destroy(&mut self) -> Option<DonutChart> {
        let old = self.current.take();
        if let Some(chart) = &old {
            tracing::debug!(chart_id = chart.id, "destroyed chart");
        }
        old
    }

    /// Replace the chart with one built from `distribution`.
    ///
    /// A zero total leaves the slot empty and returns `None`.
    pub fn mount(&mut self, distribution: &RegionalDistribution) -> Option<&DonutChart> {
        self.destroy();
        let (total, slices) = donut_slices(distribution)?;
        self.mounted += 1;
        let chart = DonutChart {
            id: self.mounted,
            total,
            slices,
        };
        tracing::debug!(chart_id = chart.id, slices = chart.slices.len(), "mounted chart");
        self.current = Some(chart);
        self.current.as_ref()
    }
}
