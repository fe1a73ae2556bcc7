//! Utility functions for visualization: fallback colors and locale mapping.

use num_format::Locale;

use crate::style::Rgba;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [Rgba; 10] = [
    Rgba::rgb(68, 114, 196),  // blue      (#4472C4)
    Rgba::rgb(237, 125, 49),  // orange    (#ED7D31)
    Rgba::rgb(165, 165, 165), // gray      (#A5A5A5)
    Rgba::rgb(255, 192, 0),   // gold      (#FFC000)
    Rgba::rgb(91, 155, 213),  // light blue(#5B9BD5)
    Rgba::rgb(112, 173, 71),  // green     (#70AD47)
    Rgba::rgb(38, 68, 120),   // dark blue (#264478)
    Rgba::rgb(158, 72, 14),   // dark org. (#9E480E)
    Rgba::rgb(99, 99, 99),    // dark gray (#636363)
    Rgba::rgb(153, 115, 0),   // brownish  (#997300)
];

/// Gridline grey.
pub const GRID_GREY: Rgba = Rgba::rgb(0xDD, 0xDD, 0xDD);
/// Zero line and legend marker ring grey.
pub const RING_GREY: Rgba = Rgba::rgb(0xBB, 0xBB, 0xBB);

/// Get a color from the Office palette (used for series the spec gives no color).
#[inline]
pub fn office_color(idx: usize) -> Rgba {
    OFFICE10[idx % OFFICE10.len()]
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}
