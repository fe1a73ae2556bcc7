use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ChartError;
use crate::style::{Rgba, parse_color};
use crate::viz::types::ModeSet;
use crate::viz::util::office_color;

/// One cell of a data row: a label or a numeric value.
///
/// The header row is all labels (numbers are accepted and shown as written), series rows are
/// a name followed by numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(_) => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Number(v as f64)
    }
}

/// Declarative chart description, exactly as a host hands it over.
///
/// ```json
/// {
///   "title": "Blocks",
///   "colors": ["black", "cyan", "orange"],
///   "data": [
///     ["Day", "01/08", "02/08", "03/08", "04/08"],
///     ["Var 1", 1, 2, 3, 4],
///     ["Var 2", -10, 5, 1, 5]
///   ]
/// }
/// ```
///
/// `colors[0]` is the axis/category-label color, `colors[i]` the color of series `i`.
/// Row 0 is `[axis label, category labels...]`, rows 1.. are `[series name, values...]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub colors: Vec<String>,
    pub data: Vec<Vec<Cell>>,
}

/// A single named series of values, one per category.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: Rgba,
    pub values: Vec<f64>,
}

/// A validated chart spec: rectangular, numeric, with resolved colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub axis_label: String,
    pub axis_color: Rgba,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Check the spec's shape and resolve its colors.
    ///
    /// ### Errors
    /// `MalformedSpec` when there is no category or no series, when rows are ragged, when a
    /// series name is not text, or when a value is not a finite number. Missing or unreadable
    /// colors are not errors: they fall back to black (axis) or the default palette (series).
    pub fn validate(&self) -> Result<ChartData, ChartError> {
        let (header, rows) = self
            .data
            .split_first()
            .ok_or_else(|| ChartError::malformed("data has no header row"))?;
        if header.len() < 2 {
            return Err(ChartError::malformed("header row has no category"));
        }
        if rows.is_empty() {
            return Err(ChartError::malformed("data has no series row"));
        }

        let width = header.len();
        let mut series = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let row_no = i + 1;
            if row.len() != width {
                return Err(ChartError::malformed(format!(
                    "row {row_no} has {} cells, header has {width}",
                    row.len()
                )));
            }
            let name = match &row[0] {
                Cell::Text(s) => s.clone(),
                Cell::Number(_) => {
                    return Err(ChartError::malformed(format!(
                        "row {row_no} must start with a series name"
                    )));
                }
            };
            let mut values = Vec::with_capacity(width - 1);
            for (j, cell) in row[1..].iter().enumerate() {
                match cell.as_number() {
                    Some(v) if v.is_finite() => values.push(v),
                    _ => {
                        return Err(ChartError::malformed(format!(
                            "row {row_no}, column {}: `{cell}` is not a finite number",
                            j + 1
                        )));
                    }
                }
            }
            series.push(Series {
                name,
                color: self.series_color(row_no),
                values,
            });
        }

        let axis_color = match self.colors.first().map(|c| (c, parse_color(c))) {
            Some((_, Ok(c))) => c,
            Some((raw, Err(_))) => {
                log::warn!("unrecognised axis color `{raw}`, using black");
                Rgba::BLACK
            }
            None => Rgba::BLACK,
        };

        Ok(ChartData {
            title: self.title.clone(),
            axis_label: header[0].to_string(),
            axis_color,
            categories: header[1..].iter().map(ToString::to_string).collect(),
            series,
        })
    }

    fn series_color(&self, index: usize) -> Rgba {
        match self.colors.get(index).map(|c| parse_color(c)) {
            Some(Ok(c)) => c,
            Some(Err(e)) => {
                log::warn!("series {index}: {e}, falling back to the default palette");
                office_color(index - 1)
            }
            None => {
                log::warn!("no color for series {index}, falling back to the default palette");
                office_color(index - 1)
            }
        }
    }
}

impl ChartData {
    /// Number of categories (`M`).
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Number of series (`N`).
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Every value of every series, row by row.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.series.iter().flat_map(|s| s.values.iter().copied())
    }

    pub fn has_negative(&self) -> bool {
        self.values().any(|v| v < 0.0)
    }

    /// Per-category sum across all series.
    pub fn category_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.category_count()];
        for s in &self.series {
            for (acc, v) in sums.iter_mut().zip(&s.values) {
                *acc += *v;
            }
        }
        sums
    }
}

/// A drawing region offered by the host: where a chart goes and how it should look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub modes: ModeSet,
}
