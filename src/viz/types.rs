//! Public types and constants for the visualization module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;

/// One visual rendering style. Several can be combined on one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RenderMode {
    /// Grouped bars, one per series inside each category slot.
    #[serde(rename = "bars", alias = "blocks")]
    Bars,
    /// Bars of all series stacked on top of each other (non-negative data only).
    #[serde(rename = "stacked-bars", alias = "stacked", alias = "stacked-blocks")]
    StackedBars,
    /// One circular marker per value.
    #[serde(rename = "dots")]
    Dots,
    /// One polyline per series.
    #[serde(rename = "lines")]
    Lines,
    /// One smooth piecewise cubic curve per series.
    #[serde(rename = "bezier", alias = "curve", alias = "smooth", alias = "smoothed-curve")]
    SmoothedCurve,
}

impl RenderMode {
    /// Every mode, in the fixed layering order used by the compositor.
    pub const ALL: [RenderMode; 5] = [
        RenderMode::Bars,
        RenderMode::StackedBars,
        RenderMode::Dots,
        RenderMode::Lines,
        RenderMode::SmoothedCurve,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Canonical tag name.
    pub fn name(self) -> &'static str {
        match self {
            RenderMode::Bars => "bars",
            RenderMode::StackedBars => "stacked-bars",
            RenderMode::Dots => "dots",
            RenderMode::Lines => "lines",
            RenderMode::SmoothedCurve => "bezier",
        }
    }

    /// True for the two bar modes, which lay marks out from the left edge of a slot.
    pub fn is_bar(self) -> bool {
        matches!(self, RenderMode::Bars | RenderMode::StackedBars)
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RenderMode {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bars" | "blocks" => Ok(RenderMode::Bars),
            "stacked-bars" | "stacked" | "stacked-blocks" | "stackedblocks" => {
                Ok(RenderMode::StackedBars)
            }
            "dots" => Ok(RenderMode::Dots),
            "lines" => Ok(RenderMode::Lines),
            "bezier" | "curve" | "smooth" | "smoothed-curve" => Ok(RenderMode::SmoothedCurve),
            other => Err(ChartError::UnknownMode(other.to_string())),
        }
    }
}

/// A non-exclusive set of [`RenderMode`]s.
///
/// Serialized as a list of mode names; deserializes from either a list or a single tag string
/// such as `"bars lines"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "ModeTag", into = "Vec<RenderMode>")]
pub struct ModeSet(u8);

impl ModeSet {
    pub const fn empty() -> Self {
        ModeSet(0)
    }

    pub fn with(mut self, mode: RenderMode) -> Self {
        self.insert(mode);
        self
    }

    pub fn insert(&mut self, mode: RenderMode) {
        self.0 |= mode.bit();
    }

    pub fn contains(&self, mode: RenderMode) -> bool {
        self.0 & mode.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Active modes in layering order: bars, stacked bars, dots, lines, curve.
    pub fn iter(&self) -> impl Iterator<Item = RenderMode> + '_ {
        RenderMode::ALL.into_iter().filter(|m| self.contains(*m))
    }

    pub fn has_bars(&self) -> bool {
        self.iter().any(RenderMode::is_bar)
    }

    /// Parse a tag of mode names separated by whitespace or commas.
    ///
    /// ### Errors
    /// `UnknownMode` for a token naming no mode, `EmptyModeSet` when the tag names nothing.
    pub fn parse(tag: &str) -> Result<Self, ChartError> {
        let mut set = ModeSet::empty();
        for token in tag.split(|c: char| c.is_whitespace() || c == ',') {
            if !token.is_empty() {
                set.insert(token.parse()?);
            }
        }
        if set.is_empty() {
            return Err(ChartError::EmptyModeSet);
        }
        Ok(set)
    }
}

impl From<RenderMode> for ModeSet {
    fn from(mode: RenderMode) -> Self {
        ModeSet::empty().with(mode)
    }
}

impl FromIterator<RenderMode> for ModeSet {
    fn from_iter<I: IntoIterator<Item = RenderMode>>(iter: I) -> Self {
        let mut set = ModeSet::empty();
        for m in iter {
            set.insert(m);
        }
        set
    }
}

impl FromStr for ModeSet {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModeSet::parse(s)
    }
}

impl fmt::Display for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(RenderMode::name).collect();
        f.write_str(&names.join(" "))
    }
}

impl From<ModeSet> for Vec<RenderMode> {
    fn from(set: ModeSet) -> Self {
        set.iter().collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModeTag {
    Tag(String),
    List(Vec<RenderMode>),
}

impl TryFrom<ModeTag> for ModeSet {
    type Error = ChartError;

    fn try_from(tag: ModeTag) -> Result<Self, Self::Error> {
        match tag {
            ModeTag::Tag(s) => ModeSet::parse(&s),
            ModeTag::List(list) if list.is_empty() => Err(ChartError::EmptyModeSet),
            ModeTag::List(list) => Ok(list.into_iter().collect()),
        }
    }
}

/// Knobs that do not change the layout, only how labels read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Locale tag for tick labels (`en`, `de`, `fr`, ...). `None` prints plain numbers.
    pub locale: Option<String>,
}

impl RenderOptions {
    pub fn with_locale(tag: impl Into<String>) -> Self {
        Self {
            locale: Some(tag.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_class_like_tags() {
        let set = ModeSet::parse("blocks, lines").unwrap();
        assert!(set.contains(RenderMode::Bars));
        assert!(set.contains(RenderMode::Lines));
        assert!(!set.contains(RenderMode::Dots));
        assert_eq!(set.to_string(), "bars lines");
    }

    #[test]
    fn iterates_in_layering_order() {
        let set = ModeSet::parse("bezier dots stacked").unwrap();
        let order: Vec<RenderMode> = set.iter().collect();
        assert_eq!(
            order,
            vec![
                RenderMode::StackedBars,
                RenderMode::Dots,
                RenderMode::SmoothedCurve
            ]
        );
    }

    #[test]
    fn rejects_unknown_and_empty_tags() {
        assert!(matches!(
            ModeSet::parse("bars pie"),
            Err(ChartError::UnknownMode(m)) if m == "pie"
        ));
        assert!(matches!(ModeSet::parse("  "), Err(ChartError::EmptyModeSet)));
    }

    #[test]
    fn serde_accepts_tag_or_list() {
        let from_tag: ModeSet = serde_json::from_str(r#""dots lines""#).unwrap();
        let from_list: ModeSet = serde_json::from_str(r#"["dots","lines"]"#).unwrap();
        assert_eq!(from_tag, from_list);
        assert_eq!(
            serde_json::to_string(&from_tag).unwrap(),
            r#"["dots","lines"]"#
        );
        assert!(serde_json::from_str::<ModeSet>("[]").is_err());
    }
}
