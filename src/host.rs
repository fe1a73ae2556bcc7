//! Host batch: render every region a host offers, each one on its own.
//!
//! A region whose identifier has no chart spec is skipped, a region whose chart fails is
//! reported as failed, and neither stops the regions after it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{ChartError, Result};
use crate::models::{ChartSpec, Region};
use crate::surface::DrawingSurface;
use crate::viz::{ChartLayout, RenderOptions, render_chart_with};

/// Lookup from a region identifier to its chart spec.
pub trait SpecSource {
    fn resolve(&self, id: &str) -> Option<&ChartSpec>;
}

impl SpecSource for HashMap<String, ChartSpec> {
    fn resolve(&self, id: &str) -> Option<&ChartSpec> {
        self.get(id)
    }
}

impl SpecSource for BTreeMap<String, ChartSpec> {
    fn resolve(&self, id: &str) -> Option<&ChartSpec> {
        self.get(id)
    }
}

/// Chart specs keyed by region identifier, in identifier order.
///
/// Serializes as a plain JSON object: `{"sales": {...}, "visits": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecRegistry {
    specs: BTreeMap<String, ChartSpec>,
}

impl SpecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `spec` to `id`, returning the spec previously bound there.
    pub fn insert(&mut self, id: impl Into<String>, spec: ChartSpec) -> Option<ChartSpec> {
        self.specs.insert(id.into(), spec)
    }

    pub fn get(&self, id: &str) -> Option<&ChartSpec> {
        self.specs.get(id)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.specs.keys().map(String::as_str)
    }
}

impl SpecSource for SpecRegistry {
    fn resolve(&self, id: &str) -> Option<&ChartSpec> {
        self.get(id)
    }
}

impl FromIterator<(String, ChartSpec)> for SpecRegistry {
    fn from_iter<I: IntoIterator<Item = (String, ChartSpec)>>(iter: I) -> Self {
        Self {
            specs: iter.into_iter().collect(),
        }
    }
}

/// What happened to one region.
#[derive(Debug)]
pub enum RegionStatus {
    /// No chart spec is bound to the region; nothing was drawn.
    Skipped,
    Failed(ChartError),
    Rendered(ChartLayout),
}

#[derive(Debug)]
pub struct RegionReport {
    pub id: String,
    pub status: RegionStatus,
}

impl RegionReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, RegionStatus::Failed(_))
    }
}

/// Render every region in order with default options.
///
/// `surface_for` is asked for a surface only once a region's spec has been found. After the
/// chart is drawn the surface is finished (an error there fails the region) and dropped.
pub fn render_regions<Src, S, F>(regions: &[Region], specs: &Src, surface_for: F) -> Vec<RegionReport>
where
    Src: SpecSource + ?Sized,
    S: DrawingSurface,
    F: FnMut(&Region) -> Result<S>,
{
    render_regions_with(regions, specs, surface_for, &RenderOptions::default())
}

/// Render every region in order.
pub fn render_regions_with<Src, S, F>(
    regions: &[Region],
    specs: &Src,
    mut surface_for: F,
    opts: &RenderOptions,
) -> Vec<RegionReport>
where
    Src: SpecSource + ?Sized,
    S: DrawingSurface,
    F: FnMut(&Region) -> Result<S>,
{
    regions
        .iter()
        .map(|region| {
            let status = match render_region(region, specs, &mut surface_for, opts) {
                Ok(layout) => RegionStatus::Rendered(layout),
                Err(ChartError::SpecNotFound(id)) => {
                    log::warn!("region `{id}`: no chart spec bound, skipping");
                    RegionStatus::Skipped
                }
                Err(e) => {
                    log::warn!("region `{}` failed: {e}", region.id);
                    RegionStatus::Failed(e)
                }
            };
            RegionReport {
                id: region.id.clone(),
                status,
            }
        })
        .collect()
}

fn render_region<Src, S, F>(
    region: &Region,
    specs: &Src,
    surface_for: &mut F,
    opts: &RenderOptions,
) -> Result<ChartLayout>
where
    Src: SpecSource + ?Sized,
    S: DrawingSurface,
    F: FnMut(&Region) -> Result<S>,
{
    let spec = specs
        .resolve(&region.id)
        .ok_or_else(|| ChartError::SpecNotFound(region.id.clone()))?;
    let mut surface = surface_for(region)?;
    let layout = render_chart_with(&mut surface, spec, region.modes, opts)?;
    surface.finish()?;
    Ok(layout)
}
