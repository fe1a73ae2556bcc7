//! Series legend: one colored marker and name per series, stacked in the top-right corner.

use crate::error::Result;
use crate::models::ChartData;
use crate::style::Rgba;
use crate::surface::{DrawingSurface, StyleGuard};

use super::mapper::Point;
use super::metrics::Metrics;
use super::util::RING_GREY;

/// Where row `row` (0-based) of the legend goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendRow {
    pub marker: Point,
    pub marker_radius: f64,
    pub label: Point,
}

/// Lay out legend rows given the width of the widest series name.
///
/// All labels start at the same x, which leaves room for the widest one before the right
/// margin; markers sit one and a half font sizes left of the labels.
pub fn legend_rows(m: &Metrics, rows: usize, max_label_width: f64) -> Vec<LegendRow> {
    let t = m.text_font_size;
    let label_x = m.width - m.margin_x - max_label_width;
    (0..rows)
        .map(|i| {
            let row_y = m.margin_y + i as f64 * m.legend_row_height;
            LegendRow {
                marker: Point::new(label_x - t * 1.5, row_y - t / 2.0),
                marker_radius: t * 3.0 / 7.0,
                label: Point::new(label_x, row_y - 2.0),
            }
        })
        .collect()
}

/// Draw the legend. Label widths are measured on the surface, not estimated.
pub fn draw_legend<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    data: &ChartData,
    m: &Metrics,
) -> Result<()> {
    let mut scoped = StyleGuard::new(surface);
    scoped.set_font_size(m.text_font_size);

    let mut max_w = 0.0f64;
    for s in &data.series {
        max_w = max_w.max(scoped.measure_text(&s.name)?);
    }

    for (s, row) in data.series.iter().zip(legend_rows(m, data.series_count(), max_w)) {
        {
            let mut marker = StyleGuard::new(&mut *scoped);
            marker.set_fill_color(s.color);
            marker.set_stroke_color(RING_GREY);
            marker.set_line_width(1.0);
            marker.fill_circle(row.marker.x, row.marker.y, row.marker_radius)?;
            marker.stroke_circle(row.marker.x, row.marker.y, row.marker_radius)?;
        }
        scoped.set_fill_color(Rgba::BLACK);
        scoped.fill_text(&s.name, row.label.x, row.label.y)?;
    }
    Ok(())
}
