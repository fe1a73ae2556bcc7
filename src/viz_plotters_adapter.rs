//! Adapter that lets the chart engine draw onto any plotters backend.
//!
//! Usage example:
//! ```no_run
//!     use plotters::prelude::*;
//!     use plotters_svg::SVGBackend;
//!     use tinychart::viz_plotters_adapter::PlottersSurface;
//!     use tinychart::{ChartSpec, ModeSet, render_chart};
//!
//!     # fn demo(spec: &ChartSpec) -> anyhow::Result<()> {
//!     let root = SVGBackend::new("chart.svg", (800, 600)).into_drawing_area();
//!     root.fill(&WHITE).map_err(|e| anyhow::anyhow!("{:?}", e))?;
//!     let mut surface = PlottersSurface::new(root);
//!     render_chart(&mut surface, spec, "bars lines".parse::<ModeSet>()?)?;
//!     surface.present()?;
//!     # Ok(())
//!     # }
//! ```
//!
//! Plotters has no cubic primitive, so curve segments are flattened into
//! [`CUBIC_SUBDIVISIONS`] straight pieces each.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fmt::Debug;
use std::sync::Once;

use crate::error::{ChartError, Result};
use crate::style::Rgba;
use crate::surface::{DrawingSurface, SurfaceStyle};

/// Straight pieces per flattened cubic segment.
pub const CUBIC_SUBDIVISIONS: usize = 16;

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    // Safe to call many times; only runs once.
    INIT_FONTS.call_once(|| {
        if plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../assets/DejaVuSans.ttf"),
        )
        .is_err()
        {
            log::warn!("bundled font could not be registered; text will not render");
        }
    });
}

pub fn rgba_color(c: Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.alpha_f64())
}

fn px(v: f64) -> i32 {
    v.round() as i32
}

fn surface_err<E: Debug>(e: E) -> ChartError {
    ChartError::Surface(format!("{:?}", e))
}

/// Point on a cubic Bezier at parameter `t`.
fn cubic_at(p0: (f64, f64), c1: (f64, f64), c2: (f64, f64), p3: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    (
        a * p0.0 + b * c1.0 + c * c2.0 + d * p3.0,
        a * p0.1 + b * c1.1 + c * c2.1 + d * p3.1,
    )
}

/// [`DrawingSurface`] over a plotters drawing area.
pub struct PlottersSurface<DB: DrawingBackend> {
    area: DrawingArea<DB, Shift>,
    style: SurfaceStyle,
    subpaths: Vec<Vec<(f64, f64)>>,
}

impl<DB: DrawingBackend> PlottersSurface<DB> {
    pub fn new(area: DrawingArea<DB, Shift>) -> Self {
        ensure_fonts_registered();
        Self {
            area,
            style: SurfaceStyle::default(),
            subpaths: Vec::new(),
        }
    }

    pub fn area(&self) -> &DrawingArea<DB, Shift> {
        &self.area
    }

    /// Flush everything drawn so far to the backend's output.
    pub fn present(&self) -> Result<()> {
        self.area.present().map_err(surface_err)
    }

    fn text_style<'a>(&self, color: &'a RGBAColor) -> TextStyle<'a> {
        TextStyle::from((FontFamily::SansSerif, self.style.font_size))
            .color(color)
            .pos(Pos::new(HPos::Left, VPos::Bottom))
    }

    fn current_point(&self) -> Option<(f64, f64)> {
        self.subpaths.last().and_then(|p| p.last().copied())
    }

    fn stroke_style(&self) -> ShapeStyle {
        rgba_color(self.style.stroke).stroke_width(self.style.line_width.round().max(1.0) as u32)
    }
}

impl<DB: DrawingBackend> DrawingSurface for PlottersSurface<DB> {
    fn size(&self) -> (f64, f64) {
        let (w, h) = self.area.dim_in_pixel();
        (w as f64, h as f64)
    }

    fn style(&self) -> SurfaceStyle {
        self.style
    }

    fn set_style(&mut self, style: SurfaceStyle) {
        self.style = style;
    }

    fn measure_text(&self, text: &str) -> Result<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let color = rgba_color(self.style.fill);
        let (w, _) = self
            .area
            .estimate_text_size(text, &self.text_style(&color))
            .map_err(surface_err)?;
        Ok(w as f64)
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        let corners = [(px(x), px(y)), (px(x + width), px(y + height))];
        self.area
            .draw(&Rectangle::new(corners, rgba_color(self.style.fill).filled()))
            .map_err(surface_err)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let color = rgba_color(self.style.fill);
        self.area
            .draw(&Text::new(text.to_string(), (px(x), px(y)), self.text_style(&color)))
            .map_err(surface_err)
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.subpaths.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        match self.subpaths.last_mut() {
            Some(path) => path.push((x, y)),
            None => self.subpaths.push(vec![(x, y)]),
        }
    }

    fn bezier_curve_to(&mut self, cp1: (f64, f64), cp2: (f64, f64), to: (f64, f64)) {
        let Some(from) = self.current_point() else {
            self.move_to(to.0, to.1);
            return;
        };
        for k in 1..=CUBIC_SUBDIVISIONS {
            let t = k as f64 / CUBIC_SUBDIVISIONS as f64;
            let (x, y) = cubic_at(from, cp1, cp2, to, t);
            self.line_to(x, y);
        }
    }

    fn close_path(&mut self) {
        if let Some(path) = self.subpaths.last_mut()
            && let Some(first) = path.first().copied()
        {
            path.push(first);
        }
    }

    fn stroke(&mut self) -> Result<()> {
        let style = self.stroke_style();
        for path in self.subpaths.iter().filter(|p| p.len() >= 2) {
            let pts: Vec<(i32, i32)> = path.iter().map(|(x, y)| (px(*x), px(*y))).collect();
            self.area
                .draw(&PathElement::new(pts, style))
                .map_err(surface_err)?;
        }
        Ok(())
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) -> Result<()> {
        let r = px(radius).max(1);
        self.area
            .draw(&Circle::new(
                (px(cx), px(cy)),
                r,
                rgba_color(self.style.fill).filled(),
            ))
            .map_err(surface_err)
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64) -> Result<()> {
        let r = px(radius).max(1);
        self.area
            .draw(&Circle::new((px(cx), px(cy)), r, self.stroke_style()))
            .map_err(surface_err)
    }

    fn finish(&mut self) -> Result<()> {
        self.present()
    }
}
