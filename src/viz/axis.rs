//! Title, category labels, and the Y axis (labels plus horizontal gridlines).

use crate::error::Result;
use crate::models::ChartData;
use crate::surface::{DrawingSurface, StyleGuard};

use super::mapper::Mapper;
use super::text::{format_plain, format_tick};
use super::types::RenderOptions;
use super::util::{GRID_GREY, RING_GREY};

/// Draw the chart title in the top-left corner.
pub fn draw_title<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    data: &ChartData,
    map: &Mapper<'_>,
) -> Result<()> {
    if data.title.is_empty() {
        return Ok(());
    }
    let m = map.metrics();
    let mut scoped = StyleGuard::new(surface);
    scoped.set_fill_color(data.axis_color);
    scoped.set_font_size(m.title_font_size);
    scoped.fill_text(&data.title, m.margin_x * 2.0, m.margin_y * 1.5)
}

/// Draw the axis label and one label per category under the plot.
///
/// Labels are centered under the bar cluster when bars are drawn, under the slot center
/// otherwise, so they line up with the marks above them.
pub fn draw_category_labels<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    data: &ChartData,
    map: &Mapper<'_>,
    under_bars: bool,
) -> Result<()> {
    let m = map.metrics();
    let baseline = m.plot_bottom() + m.axis_label_band;

    let mut scoped = StyleGuard::new(surface);
    scoped.set_fill_color(data.axis_color);
    scoped.set_font_size(m.text_font_size);
    scoped.fill_text(&data.axis_label, m.margin_x, baseline)?;

    for (j, label) in data.categories.iter().enumerate() {
        let center = if under_bars {
            map.bar_cluster_center(j)
        } else {
            map.slot_center(j)
        };
        let w = scoped.measure_text(label)?;
        scoped.fill_text(label, center - w / 2.0, baseline)?;
    }
    Ok(())
}

/// Draw the Y axis: both extremes first, then every gridline that does not crowd them.
pub fn draw_y_axis<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    data: &ChartData,
    map: &Mapper<'_>,
    opts: &RenderOptions,
) -> Result<()> {
    let domain = map.domain();
    let m = map.metrics();

    let mut scoped = StyleGuard::new(&mut *surface);
    scoped.set_fill_color(data.axis_color);
    scoped.set_font_size(m.text_font_size);
    scoped.set_stroke_color(GRID_GREY);
    scoped.set_line_width(1.0);

    draw_y_line(
        &mut *scoped,
        map,
        &format_plain(domain.y_min),
        m.plot_bottom(),
        domain.y_min == 0.0,
    )?;
    draw_y_line(
        &mut *scoped,
        map,
        &format_plain(domain.y_max),
        m.plot_top(),
        domain.y_max == 0.0,
    )?;

    let decimals = domain.tick_decimals();
    for tick in domain.ticks() {
        let label = format_tick(tick.value, decimals, opts.locale.as_deref());
        draw_y_line(&mut *scoped, map, &label, map.y(tick.value), tick.is_zero)?;
    }
    Ok(())
}

/// One Y label, right-aligned in the left margin, and its gridline across the plot.
fn draw_y_line<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    map: &Mapper<'_>,
    label: &str,
    y: f64,
    is_zero: bool,
) -> Result<()> {
    let m = map.metrics();
    let w = surface.measure_text(label)?;
    surface.fill_text(label, m.margin_x * 1.5 - w, y)?;

    let mut scoped = StyleGuard::new(surface);
    if is_zero {
        scoped.set_stroke_color(RING_GREY);
        scoped.set_line_width(2.0);
    }
    scoped.begin_path();
    scoped.move_to(m.margin_x * 2.0, y);
    scoped.line_to(m.width - m.margin_x, y);
    scoped.stroke()
}
