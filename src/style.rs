//! Color values used by chart specs and drawing surfaces.
//!
//! Chart specs carry colors as strings, the way a host document would write them:
//! named colors (`"cyan"`), hex (`"#0af"`, `"#00aaff"`, `"#00aaff80"`) and functional
//! `rgb(0, 170, 255)` / `rgba(0, 170, 255, 0.5)`. They are parsed once, when the spec is
//! validated, into [`Rgba`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Alpha as a 0..=1 fraction.
    pub fn alpha_f64(&self) -> f64 {
        self.a as f64 / 255.0
    }

    /// `#RRGGBB`, or `#RRGGBBAA` when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

/// Parse a color string. See the module docs for the accepted forms.
pub fn parse_color(input: &str) -> Result<Rgba, ChartError> {
    let s = input.trim();
    let bad = || ChartError::malformed(format!("unrecognised color `{input}`"));

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(bad);
    }

    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_functional(args).ok_or_else(bad);
    }

    named_color(&lower).ok_or_else(bad)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_functional(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let channel = |s: &str| s.parse::<u8>().ok();
    match parts.as_slice() {
        [r, g, b] => Some(Rgba::rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let alpha = a.parse::<f64>().ok().filter(|v| (0.0..=1.0).contains(v))?;
            Some(Rgba::new(
                channel(r)?,
                channel(g)?,
                channel(b)?,
                (alpha * 255.0).round() as u8,
            ))
        }
        _ => None,
    }
}

/// The CSS basic color keywords plus the handful of extended names chart authors reach for.
fn named_color(name: &str) -> Option<Rgba> {
    let c = match name {
        "black" => Rgba::rgb(0, 0, 0),
        "silver" => Rgba::rgb(192, 192, 192),
        "gray" | "grey" => Rgba::rgb(128, 128, 128),
        "lightgray" | "lightgrey" => Rgba::rgb(211, 211, 211),
        "darkgray" | "darkgrey" => Rgba::rgb(169, 169, 169),
        "white" => Rgba::rgb(255, 255, 255),
        "maroon" => Rgba::rgb(128, 0, 0),
        "red" => Rgba::rgb(255, 0, 0),
        "purple" => Rgba::rgb(128, 0, 128),
        "fuchsia" | "magenta" => Rgba::rgb(255, 0, 255),
        "green" => Rgba::rgb(0, 128, 0),
        "lime" => Rgba::rgb(0, 255, 0),
        "olive" => Rgba::rgb(128, 128, 0),
        "yellow" => Rgba::rgb(255, 255, 0),
        "navy" => Rgba::rgb(0, 0, 128),
        "blue" => Rgba::rgb(0, 0, 255),
        "teal" => Rgba::rgb(0, 128, 128),
        "aqua" | "cyan" => Rgba::rgb(0, 255, 255),
        "orange" => Rgba::rgb(255, 165, 0),
        "brown" => Rgba::rgb(165, 42, 42),
        "pink" => Rgba::rgb(255, 192, 203),
        "gold" => Rgba::rgb(255, 215, 0),
        "indigo" => Rgba::rgb(75, 0, 130),
        "violet" => Rgba::rgb(238, 130, 238),
        "steelblue" => Rgba::rgb(70, 130, 180),
        "darkgreen" => Rgba::rgb(0, 100, 0),
        "darkblue" => Rgba::rgb(0, 0, 139),
        "darkred" => Rgba::rgb(139, 0, 0),
        "transparent" => Rgba::new(0, 0, 0, 0),
        _ => return None,
    };
    Some(c)
}
