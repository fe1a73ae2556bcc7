//! Chart layout and rendering: turn a [`ChartSpec`] into drawing calls on a [`DrawingSurface`].
//!
//! - One shared layout (`metrics`), value domain (`domain`) and pixel mapping (`mapper`)
//! - Five render modes that can be combined on the same chart (`compositor`)
//! - Title, category labels, Y gridlines and a series legend (`axis`, `legend`)
//! - File output to **SVG** or **PNG** through plotters
//!
//! The drawing order is fixed: title, Y axis, category labels, legend, then the modes in
//! layering order (bars, stacked bars, dots, lines, curves).

pub mod axis;
pub mod compositor;
pub mod curve;
pub mod domain;
pub mod legend;
pub mod mapper;
pub mod metrics;
pub mod text;
pub mod types;
pub mod util;

pub use domain::{Domain, Tick};
pub use mapper::{Mapper, Point};
pub use metrics::Metrics;
pub use types::{ModeSet, RenderMode, RenderOptions};

use anyhow::{Context, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use serde::Serialize;
use std::path::Path;

use crate::error::{ChartError, Result};
use crate::models::ChartSpec;
use crate::surface::DrawingSurface;
use crate::viz_plotters_adapter::PlottersSurface;

/// Layout actually used for a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartLayout {
    pub metrics: Metrics,
    pub domain: Domain,
    /// Pixel y of the value 0.
    pub origin_y: f64,
}

/// Render `spec` with `modes` onto `surface`, using default options.
pub fn render_chart<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    spec: &ChartSpec,
    modes: ModeSet,
) -> Result<ChartLayout> {
    render_chart_with(surface, spec, modes, &RenderOptions::default())
}

/// Render `spec` with `modes` onto `surface`.
///
/// ### Errors
/// - `EmptyModeSet` when `modes` is empty
/// - `MalformedSpec` when the spec does not validate, when stacked bars are requested for
///   data holding a negative value, or when the value range overflows or is too narrow to grid
/// - `SurfaceTooSmall` when margins leave no room to plot
/// - `Surface` when a drawing primitive fails
///
/// Nothing is drawn unless the spec, the modes and the surface size all check out.
pub fn render_chart_with<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    spec: &ChartSpec,
    modes: ModeSet,
    opts: &RenderOptions,
) -> Result<ChartLayout> {
    if modes.is_empty() {
        return Err(ChartError::EmptyModeSet);
    }
    let data = spec.validate()?;
    let stacked = modes.contains(RenderMode::StackedBars);
    if stacked && data.has_negative() {
        return Err(ChartError::malformed(
            "stacked bars cannot show negative values",
        ));
    }

    let (width, height) = surface.size();
    let metrics = Metrics::compute(width, height, data.category_count(), data.series_count())?;
    let domain = Domain::compute(&data, stacked);
    domain.check()?;
    let map = Mapper::new(&metrics, &domain);
    log::debug!(
        "rendering `{}` ({} categories x {} series) as {modes} on {width}x{height}",
        data.title,
        metrics.categories,
        metrics.series
    );

    axis::draw_title(surface, &data, &map)?;
    axis::draw_y_axis(surface, &data, &map, opts)?;
    axis::draw_category_labels(surface, &data, &map, modes.has_bars())?;
    legend::draw_legend(surface, &data, &metrics)?;
    compositor::draw_modes(surface, &data, &map, modes)?;

    Ok(ChartLayout {
        metrics,
        domain,
        origin_y: map.origin_y(),
    })
}

/// Render a chart into an image file.
///
/// - `out_path`: `.svg` → SVG, anything else → PNG (bitmap)
/// - `width`/`height`: pixel size of the output
pub fn plot_chart<P: AsRef<Path>>(
    spec: &ChartSpec,
    modes: ModeSet,
    out_path: P,
    width: u32,
    height: u32,
    opts: &RenderOptions,
) -> anyhow::Result<ChartLayout> {
    let out_path = out_path.as_ref();
    let rendered = if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(out_path, (width, height)).into_drawing_area();
        draw_on(root, spec, modes, opts)
    } else {
        let root = BitMapBackend::new(out_path, (width, height)).into_drawing_area();
        draw_on(root, spec, modes, opts)
    };
    rendered.with_context(|| format!("rendering chart to {}", out_path.display()))
}

/// Render a chart to an in-memory SVG document.
pub fn render_svg_string(
    spec: &ChartSpec,
    modes: ModeSet,
    width: u32,
    height: u32,
    opts: &RenderOptions,
) -> anyhow::Result<(String, ChartLayout)> {
    let mut svg = String::new();
    let layout = {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        draw_on(root, spec, modes, opts)?
    };
    Ok((svg, layout))
}

fn draw_on<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    modes: ModeSet,
    opts: &RenderOptions,
) -> anyhow::Result<ChartLayout> {
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let mut surface = PlottersSurface::new(root);
    let layout = render_chart_with(&mut surface, spec, modes, opts)?;
    surface.finish()?;
    Ok(layout)
}
