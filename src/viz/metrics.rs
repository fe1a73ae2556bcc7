//! Visual metrics derived from nothing but the surface size and the data shape.

use serde::Serialize;

use crate::error::{ChartError, Result};

/// Fonts, margins and slot sizes for one chart. Pixels throughout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub width: f64,
    pub height: f64,
    pub title_font_size: f64,
    pub text_font_size: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    /// Horizontal band left of the plot holding the Y labels.
    pub axis_gutter: f64,
    /// Vertical band between the top margin and the plot holding the title and legend.
    pub title_gutter: f64,
    /// Vertical band below the plot holding the category labels.
    pub axis_label_band: f64,
    /// Legend row pitch.
    pub legend_row_height: f64,
    pub category_slot_width: f64,
    pub plot_height: f64,
    pub categories: usize,
    pub series: usize,
}

impl Metrics {
    /// Derive metrics for a `width` x `height` surface showing `categories` x `series` values.
    ///
    /// Narrow surfaces (`width < 4/3 height`) size fonts off the width, wide ones off the
    /// height; everything else scales off the text font size.
    ///
    /// ### Errors
    /// `MalformedSpec` for zero categories or series, `SurfaceTooSmall` when no positive plot
    /// area remains.
    pub fn compute(width: f64, height: f64, categories: usize, series: usize) -> Result<Self> {
        if categories == 0 || series == 0 {
            return Err(ChartError::malformed(
                "a chart needs at least one category and one series",
            ));
        }

        let (title_font_size, text_font_size) = if width < height * 4.0 / 3.0 {
            (width / 25.0, width / 40.0)
        } else {
            (height / 18.0, height / 30.0)
        };

        let margin_x = text_font_size * 2.0;
        let margin_y = text_font_size * 2.0;
        let axis_gutter = text_font_size * 4.0;
        let title_gutter = text_font_size * 4.0;
        let axis_label_band = text_font_size * 2.0;

        let category_slot_width = (width - margin_x * 2.0 - axis_gutter) / categories as f64;
        let plot_height = height - margin_y * 2.0 - axis_label_band - title_gutter;

        if !(category_slot_width > 0.0 && plot_height > 0.0) {
            return Err(ChartError::SurfaceTooSmall { width, height });
        }

        Ok(Self {
            width,
            height,
            title_font_size,
            text_font_size,
            margin_x,
            margin_y,
            axis_gutter,
            title_gutter,
            axis_label_band,
            legend_row_height: text_font_size * 1.1,
            category_slot_width,
            plot_height,
            categories,
            series,
        })
    }

    /// Pixel y of the top of the plot (where `yMax` lands).
    pub fn plot_top(&self) -> f64 {
        self.margin_y + self.title_gutter
    }

    /// Pixel y of the bottom of the plot (where `yMin` lands).
    pub fn plot_bottom(&self) -> f64 {
        self.plot_top() + self.plot_height
    }

    /// Pixel x of the left edge of the first category slot.
    pub fn plot_left(&self) -> f64 {
        self.margin_x + self.axis_gutter
    }

    /// Pixel x of the right edge of the last category slot.
    pub fn plot_right(&self) -> f64 {
        self.plot_left() + self.category_slot_width * self.categories as f64
    }
}
