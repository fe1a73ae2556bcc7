//! Mode compositor: draws every requested mode, series by series, on one shared mapping.

use crate::error::Result;
use crate::models::ChartData;
use crate::surface::{DrawingSurface, StyleGuard};

use super::curve::{MIN_CURVE_POINTS, control_points};
use super::mapper::Mapper;
use super::types::{ModeSet, RenderMode};

/// Fraction of the slot a stacked bar occupies.
pub const STACKED_BAR_FRACTION: f64 = 0.95;
/// Above this many categories dots get smaller.
pub const DENSE_CATEGORY_COUNT: usize = 20;

/// Draw all modes in `modes`, in layering order.
pub fn draw_modes<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    data: &ChartData,
    map: &Mapper<'_>,
    modes: ModeSet,
) -> Result<()> {
    for mode in modes.iter() {
        let mut scoped = StyleGuard::new(&mut *surface);
        match mode {
            RenderMode::Bars => draw_bars(&mut *scoped, data, map)?,
            RenderMode::StackedBars => draw_stacked_bars(&mut *scoped, data, map)?,
            RenderMode::Dots => draw_dots(&mut *scoped, data, map)?,
            RenderMode::Lines => draw_lines(&mut *scoped, data, map)?,
            RenderMode::SmoothedCurve => draw_curves(&mut *scoped, data, map)?,
        }
    }
    Ok(())
}

/// Grouped bars: series `i` takes share `i` of its slot split `N + 1` ways, anchored at zero.
pub fn draw_bars<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    data: &ChartData,
    map: &Mapper<'_>,
) -> Result<()> {
    let w = map.bar_width();
    for (i, s) in data.series.iter().enumerate() {
        surface.set_fill_color(s.color);
        for (j, v) in s.values.iter().enumerate() {
            surface.fill_rect(map.bar_left(i, j), map.origin_y(), w, -map.height_of(*v))?;
        }
    }
    Ok(())
}

/// Stacked bars: each series sits on the running top of its category.
///
/// Returns nothing, but the running tops after the last series equal
/// `origin_y - sum * scale` for every category.
pub fn draw_stacked_bars<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    data: &ChartData,
    map: &Mapper<'_>,
) -> Result<()> {
    stacked_bar_tops(surface, data, map).map(|_| ())
}

/// Draw stacked bars and return the final running top (pixel y) of every category.
pub fn stacked_bar_tops<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    data: &ChartData,
    map: &Mapper<'_>,
) -> Result<Vec<f64>> {
    let w = map.metrics().category_slot_width * STACKED_BAR_FRACTION;
    let mut tops = vec![map.origin_y(); data.category_count()];
    for s in &data.series {
        surface.set_fill_color(s.color);
        for (j, (v, top)) in s.values.iter().zip(tops.iter_mut()).enumerate() {
            let h = map.height_of(*v);
            surface.fill_rect(map.slot_left(j), *top - h, w, h)?;
            *top -= h;
        }
    }
    Ok(tops)
}

/// Marker radius for dots; smaller when categories are dense.
pub fn dot_radius(text_font_size: f64, categories: usize) -> f64 {
    if categories > DENSE_CATEGORY_COUNT {
        text_font_size * 3.0 / 14.0
    } else {
        text_font_size * 3.0 / 7.0
    }
}

pub fn draw_dots<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    data: &ChartData,
    map: &Mapper<'_>,
) -> Result<()> {
    let r = dot_radius(map.metrics().text_font_size, data.category_count());
    for s in &data.series {
        surface.set_fill_color(s.color);
        for p in map.points(&s.values) {
            surface.fill_circle(p.x, p.y, r)?;
        }
    }
    Ok(())
}

/// Stroke width for lines and curves.
pub fn stroke_width(text_font_size: f64) -> f64 {
    (text_font_size / 8.0).max(1.0)
}

pub fn draw_lines<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    data: &ChartData,
    map: &Mapper<'_>,
) -> Result<()> {
    surface.set_line_width(stroke_width(map.metrics().text_font_size));
    for s in &data.series {
        let points = map.points(&s.values);
        let Some((first, rest)) = points.split_first() else {
            continue;
        };
        surface.set_stroke_color(s.color);
        surface.begin_path();
        surface.move_to(first.x, first.y);
        for p in rest {
            surface.line_to(p.x, p.y);
        }
        surface.stroke()?;
    }
    Ok(())
}

/// Smoothed curves. Series with fewer than three points are skipped.
pub fn draw_curves<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    data: &ChartData,
    map: &Mapper<'_>,
) -> Result<()> {
    surface.set_line_width(stroke_width(map.metrics().text_font_size));
    for s in &data.series {
        let points = map.points(&s.values);
        let Some(segments) = control_points(&points) else {
            log::debug!(
                "series `{}` has {} points, a curve needs {MIN_CURVE_POINTS}; skipping",
                s.name,
                points.len()
            );
            continue;
        };
        surface.set_stroke_color(s.color);
        surface.begin_path();
        surface.move_to(points[0].x, points[0].y);
        for seg in segments {
            surface.bezier_curve_to(seg.cp1.into(), seg.cp2.into(), seg.to.into());
        }
        surface.stroke()?;
    }
    Ok(())
}
