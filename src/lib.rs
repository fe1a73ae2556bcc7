//! tinychart
//!
//! A small Rust library for laying out and drawing multi-series charts from a declarative
//! spec. Pairs with the `tinychart` CLI.
//!
//! ### Features
//! - Everything (fonts, margins, slot widths) derived from the surface size and data shape
//! - Grouped bars, stacked bars, dots, lines and smoothed curves, freely combined
//! - Y gridlines on a power-of-ten step with an emphasized zero line
//! - Draw onto any [`surface::DrawingSurface`]; SVG/PNG through plotters
//! - Host batch that renders many regions and skips the ones without a spec
//!
//! ### Example
//! ```no_run
//! use tinychart::{ChartSpec, ModeSet, RenderOptions};
//!
//! let spec: ChartSpec = serde_json::from_str(r#"{
//!     "title": "Blocks",
//!     "colors": ["black", "cyan", "orange"],
//!     "data": [["Day", "01/08", "02/08"], ["Var 1", 1, 2], ["Var 2", -3, 5]]
//! }"#)?;
//! let modes: ModeSet = "bars lines".parse()?;
//! tinychart::viz::plot_chart(&spec, modes, "blocks.svg", 800, 600, &RenderOptions::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod error;
pub mod host;
pub mod models;
pub mod storage;
pub mod style;
pub mod surface;
pub mod viz;
pub mod viz_plotters_adapter;

pub use error::ChartError;
pub use host::{RegionReport, RegionStatus, SpecRegistry, SpecSource, render_regions};
pub use models::{Cell, ChartData, ChartSpec, Region, Series};
pub use style::Rgba;
pub use surface::{DrawingSurface, RecordingSurface};
pub use viz::{ChartLayout, ModeSet, RenderMode, RenderOptions, render_chart, render_chart_with};
