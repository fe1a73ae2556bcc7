//! Error type shared by the chart engine, the host batch and the surfaces.

use thiserror::Error;

/// Everything that can stop a single chart from being drawn.
///
/// A failure only ever aborts the chart (region) it belongs to; the host batch in
/// [`crate::host`] keeps going with the next region.
#[derive(Debug, Error)]
pub enum ChartError {
    /// No chart specification is bound to the region identifier.
    #[error("no chart spec bound to region `{0}`")]
    SpecNotFound(String),

    /// The chart specification cannot be laid out (ragged rows, non-numeric values, ...).
    #[error("malformed chart spec: {0}")]
    MalformedSpec(String),

    /// A mode tag that does not name any of the five render modes.
    #[error("unknown render mode `{0}` (expected bars, stacked-bars, dots, lines or bezier)")]
    UnknownMode(String),

    /// A chart was asked to render with no mode at all.
    #[error("at least one render mode is required")]
    EmptyModeSet,

    /// The surface leaves no positive plot area once margins and gutters are taken.
    #[error("surface {width}x{height} is too small to hold a chart")]
    SurfaceTooSmall { width: f64, height: f64 },

    /// A drawing primitive failed on the underlying surface.
    #[error("surface error: {0}")]
    Surface(String),
}

impl ChartError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        ChartError::MalformedSpec(msg.into())
    }
}

/// Convenience alias used across the library.
pub type Result<T, E = ChartError> = std::result::Result<T, E>;
