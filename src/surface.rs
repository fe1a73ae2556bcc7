//! The drawing capability the chart engine renders through.
//!
//! The engine never touches pixels itself. It issues a small set of primitives against a
//! [`DrawingSurface`]: style changes, text measurement, rectangles, text, paths made of line
//! and cubic segments, and circular markers. Implementations:
//!
//! - [`RecordingSurface`]: keeps every primitive as a [`DrawOp`] (tests, `tinychart inspect`)
//! - [`crate::viz_plotters_adapter::PlottersSurface`]: draws onto any plotters backend (SVG/PNG)

use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

use crate::error::Result;
use crate::style::Rgba;
use crate::viz::text::estimate_text_width_px;

/// Style state applied by subsequent primitives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceStyle {
    pub fill: Rgba,
    pub stroke: Rgba,
    pub line_width: f64,
    pub font_size: f64,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            fill: Rgba::BLACK,
            stroke: Rgba::BLACK,
            line_width: 1.0,
            font_size: 10.0,
        }
    }
}

/// A rectangular 2D drawing surface. Coordinates are pixels, origin top-left, y down.
///
/// Text is positioned by its left end on the baseline.
pub trait DrawingSurface {
    /// Surface width and height in pixels.
    fn size(&self) -> (f64, f64);

    fn style(&self) -> SurfaceStyle;
    fn set_style(&mut self, style: SurfaceStyle);

    fn set_fill_color(&mut self, color: Rgba) {
        let mut s = self.style();
        s.fill = color;
        self.set_style(s);
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        let mut s = self.style();
        s.stroke = color;
        self.set_style(s);
    }

    fn set_line_width(&mut self, width: f64) {
        let mut s = self.style();
        s.line_width = width;
        self.set_style(s);
    }

    fn set_font_size(&mut self, size: f64) {
        let mut s = self.style();
        s.font_size = size;
        self.set_style(s);
    }

    /// Advance width of `text` at the current font size.
    fn measure_text(&self, text: &str) -> Result<f64>;

    /// Fill an axis-aligned rectangle. `width`/`height` may be negative.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<()>;

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()>;

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn bezier_curve_to(&mut self, cp1: (f64, f64), cp2: (f64, f64), to: (f64, f64));
    fn close_path(&mut self);

    /// Stroke the current path with the stroke color and line width.
    fn stroke(&mut self) -> Result<()>;

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) -> Result<()>;
    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64) -> Result<()>;

    /// Flush the drawing to wherever the surface ends up (a file, a buffer). Called once per
    /// chart after the last primitive; surfaces that hold nothing back keep the default.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Scoped style context: remembers the surface style when created and puts it back when
/// dropped, on every exit path.
///
/// ```
/// # use tinychart::surface::{DrawingSurface, RecordingSurface, StyleGuard};
/// # use tinychart::style::Rgba;
/// let mut surface = RecordingSurface::new(100.0, 100.0);
/// let before = surface.style();
/// {
///     let mut scoped = StyleGuard::new(&mut surface);
///     scoped.set_fill_color(Rgba::rgb(255, 0, 0));
/// }
/// assert_eq!(surface.style(), before);
/// ```
pub struct StyleGuard<'a, S: DrawingSurface + ?Sized> {
    surface: &'a mut S,
    saved: SurfaceStyle,
}

impl<'a, S: DrawingSurface + ?Sized> StyleGuard<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        let saved = surface.style();
        Self { surface, saved }
    }
}

impl<S: DrawingSurface + ?Sized> Deref for StyleGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> DerefMut for StyleGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> Drop for StyleGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.set_style(self.saved);
    }
}

/// One path segment as recorded by [`RecordingSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "seg", rename_all = "snake_case")]
pub enum PathSegment {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    CubicTo { cp1: (f64, f64), cp2: (f64, f64), to: (f64, f64) },
    Close,
}

/// A recorded drawing primitive, with the style that was active when it was issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    FillRect { x: f64, y: f64, width: f64, height: f64, color: Rgba },
    FillText { text: String, x: f64, y: f64, font_size: f64, color: Rgba },
    StrokePath { segments: Vec<PathSegment>, color: Rgba, line_width: f64 },
    FillCircle { cx: f64, cy: f64, radius: f64, color: Rgba },
    StrokeCircle { cx: f64, cy: f64, radius: f64, color: Rgba, line_width: f64 },
}

/// In-memory surface that records primitives instead of drawing them.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    style: SurfaceStyle,
    path: Vec<PathSegment>,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            style: SurfaceStyle::default(),
            path: Vec::new(),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn style(&self) -> SurfaceStyle {
        self.style
    }

    fn set_style(&mut self, style: SurfaceStyle) {
        self.style = style;
    }

    fn measure_text(&self, text: &str) -> Result<f64> {
        Ok(estimate_text_width_px(text, self.style.font_size))
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color: self.style.fill,
        });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            font_size: self.style.font_size,
            color: self.style.fill,
        });
        Ok(())
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(PathSegment::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push(PathSegment::LineTo { x, y });
    }

    fn bezier_curve_to(&mut self, cp1: (f64, f64), cp2: (f64, f64), to: (f64, f64)) {
        self.path.push(PathSegment::CubicTo { cp1, cp2, to });
    }

    fn close_path(&mut self) {
        self.path.push(PathSegment::Close);
    }

    fn stroke(&mut self) -> Result<()> {
        self.ops.push(DrawOp::StrokePath {
            segments: self.path.clone(),
            color: self.style.stroke,
            line_width: self.style.line_width,
        });
        Ok(())
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) -> Result<()> {
        self.ops.push(DrawOp::FillCircle {
            cx,
            cy,
            radius,
            color: self.style.fill,
        });
        Ok(())
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64) -> Result<()> {
        self.ops.push(DrawOp::StrokeCircle {
            cx,
            cy,
            radius,
            color: self.style.stroke,
            line_width: self.style.line_width,
        });
        Ok(())
    }
}
