//! Text measurement fallback and axis label formatting.

use num_format::ToFormattedString;

use super::util::map_locale;

/// Heuristic: estimate pixel width of text for surfaces without real glyph metrics.
pub fn estimate_text_width_px(text: &str, font_px: f64) -> f64 {
    text.chars().count() as f64 * font_px * 0.60
}

/// Shortest readable form of a value: `-10`, `3.7`, `0.25`.
///
/// Used for the two boundary labels, which show the data extremes as they are.
pub fn format_plain(value: f64) -> String {
    // `{}` on f64 already prints the shortest round-tripping form; only fold `-0`.
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

/// Format a grid tick label with `decimals` fixed digits, optionally localized.
///
/// Integer labels (`decimals == 0`) get the locale's digit grouping; decimal labels get the
/// locale's decimal separator.
pub fn format_tick(value: f64, decimals: usize, locale: Option<&str>) -> String {
    // Ticks land on multiples of a power of ten; round away float noise such as 0.30000000000000004.
    let value = if value.abs() < 0.5 * 10f64.powi(-(decimals as i32)) {
        0.0
    } else {
        value
    };
    match (locale, decimals) {
        (None, _) => format!("{:.*}", decimals, value),
        (Some(tag), 0) => {
            let (loc, _) = map_locale(tag);
            let rounded = value.round() as i64;
            if rounded < 0 {
                format!("-{}", rounded.unsigned_abs().to_formatted_string(loc))
            } else {
                rounded.to_formatted_string(loc)
            }
        }
        (Some(tag), d) => {
            let (_, sep) = map_locale(tag);
            format!("{:.*}", d, value).replace('.', &sep.to_string())
        }
    }
}
