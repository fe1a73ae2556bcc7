//! Reading chart specs and region manifests from disk, writing specs and reports back.
//!
//! - JSON: a single [`ChartSpec`], a [`SpecRegistry`] (`{id: spec}`) or a region list
//! - CSV: one chart's data table, header row first; title and colors come from the caller

use anyhow::{Context, Result, anyhow, bail};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::host::SpecRegistry;
use crate::models::{Cell, ChartSpec, Region};

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Load a single chart spec from JSON.
pub fn load_spec_json<P: AsRef<Path>>(path: P) -> Result<ChartSpec> {
    let path = path.as_ref();
    serde_json::from_str(&read_text(path)?)
        .with_context(|| format!("parsing chart spec {}", path.display()))
}

/// Load a spec registry (`{"id": ChartSpec, ...}`) from JSON.
pub fn load_registry_json<P: AsRef<Path>>(path: P) -> Result<SpecRegistry> {
    let path = path.as_ref();
    serde_json::from_str(&read_text(path)?)
        .with_context(|| format!("parsing spec registry {}", path.display()))
}

/// Load a region manifest (a JSON array of regions) from JSON.
pub fn load_regions_json<P: AsRef<Path>>(path: P) -> Result<Vec<Region>> {
    let path = path.as_ref();
    serde_json::from_str(&read_text(path)?)
        .with_context(|| format!("parsing region list {}", path.display()))
}

/// Load one chart spec from a JSON file holding either a spec or a registry.
///
/// A JSON object with a `data` key is a spec (and `id` is ignored); anything else is read as
/// a registry and `id` picks the spec.
pub fn load_spec_or_registry<P: AsRef<Path>>(path: P, id: Option<&str>) -> Result<ChartSpec> {
    let path = path.as_ref();
    let value: serde_json::Value = serde_json::from_str(&read_text(path)?)
        .with_context(|| format!("parsing {}", path.display()))?;
    if value.get("data").is_some() {
        return serde_json::from_value(value)
            .with_context(|| format!("parsing chart spec {}", path.display()));
    }
    let registry: SpecRegistry = serde_json::from_value(value)
        .with_context(|| format!("parsing spec registry {}", path.display()))?;
    let Some(id) = id else {
        let ids: Vec<&str> = registry.ids().collect();
        bail!(
            "{} is a spec registry; pick one with --id ({})",
            path.display(),
            ids.join(", ")
        );
    };
    registry
        .get(id)
        .cloned()
        .ok_or_else(|| anyhow!("no chart spec `{id}` in {}", path.display()))
}

/// Load a chart's data table from CSV.
///
/// The first record is the header (`axis label, categories...`). In the other records the
/// first cell is the series name and cells that parse as numbers become values. Rows may be
/// ragged here; [`ChartSpec::validate`] rejects them later.
pub fn load_spec_csv<P: AsRef<Path>>(path: P, title: &str, colors: &[String]) -> Result<ChartSpec> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut data = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("reading {} record {}", path.display(), i + 1))?;
        let row: Vec<Cell> = rec
            .iter()
            .enumerate()
            .map(|(col, field)| match field.parse::<f64>() {
                Ok(v) if i > 0 && col > 0 => Cell::Number(v),
                _ => Cell::Text(field.to_string()),
            })
            .collect();
        data.push(row);
    }
    log::debug!("loaded {} rows from {}", data.len(), path.display());

    Ok(ChartSpec {
        title: title.to_string(),
        colors: colors.to_vec(),
        data,
    })
}

/// Neutralise spreadsheet formula starters so an exported table opens as plain text.
fn csv_safe(field: &str) -> String {
    match field.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{field}"),
        _ => field.to_string(),
    }
}

/// Save a chart's data table as CSV (title and colors are not part of the table).
pub fn save_spec_csv<P: AsRef<Path>>(spec: &ChartSpec, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in &spec.data {
        let fields: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Cell::Text(s) => csv_safe(s),
                Cell::Number(v) => v.to_string(),
            })
            .collect();
        wtr.write_record(&fields)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save any serializable value as pretty JSON.
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
