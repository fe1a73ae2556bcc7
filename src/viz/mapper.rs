//! Data value to pixel mapping shared by the axis and every mode.

use serde::Serialize;

use super::domain::Domain;
use super::metrics::Metrics;

/// A pixel-space point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Maps `(category, value)` pairs into pixels for one chart.
#[derive(Debug, Clone, Copy)]
pub struct Mapper<'a> {
    metrics: &'a Metrics,
    domain: &'a Domain,
    scale: f64,
    origin_y: f64,
}

impl<'a> Mapper<'a> {
    pub fn new(metrics: &'a Metrics, domain: &'a Domain) -> Self {
        let scale = metrics.plot_height / domain.range();
        let origin_y = metrics.plot_bottom() + domain.y_min * scale;
        Self {
            metrics,
            domain,
            scale,
            origin_y,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        self.metrics
    }

    pub fn domain(&self) -> &Domain {
        self.domain
    }

    /// Pixel y of the value 0.
    pub fn origin_y(&self) -> f64 {
        self.origin_y
    }

    /// Pixel length of a value span (positive values map upward).
    pub fn height_of(&self, value: f64) -> f64 {
        value * self.scale
    }

    /// Pixel y of `value`.
    pub fn y(&self, value: f64) -> f64 {
        self.origin_y - value * self.scale
    }

    /// Left edge of category slot `j` (0-based).
    pub fn slot_left(&self, j: usize) -> f64 {
        self.metrics.plot_left() + self.metrics.category_slot_width * j as f64
    }

    /// Width of one grouped bar: a slot split `N + 1` ways, leaving one share as a gap.
    pub fn bar_width(&self) -> f64 {
        self.metrics.category_slot_width / (self.metrics.series + 1) as f64
    }

    /// Left edge of series `i`'s (0-based) grouped bar in category `j`.
    pub fn bar_left(&self, i: usize, j: usize) -> f64 {
        self.slot_left(j) + i as f64 * self.bar_width()
    }

    /// Horizontal center of the grouped-bar cluster in category `j`.
    pub fn bar_cluster_center(&self, j: usize) -> f64 {
        self.slot_left(j) + self.bar_width() * self.metrics.series as f64 / 2.0
    }

    /// Horizontal center of category slot `j`.
    pub fn slot_center(&self, j: usize) -> f64 {
        self.slot_left(j) + self.metrics.category_slot_width / 2.0
    }

    /// Centered point for `value` in category `j`: the anchor for dots, lines and curves.
    pub fn point(&self, j: usize, value: f64) -> Point {
        Point::new(self.slot_center(j), self.y(value))
    }

    /// Centered points for a whole series, in category order.
    pub fn points(&self, values: &[f64]) -> Vec<Point> {
        values
            .iter()
            .enumerate()
            .map(|(j, v)| self.point(j, *v))
            .collect()
    }
}
