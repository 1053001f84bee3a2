//! Colors and number formatting for content streams.

mod color;

pub use color::Color;

/// Formats a real number with three decimals, dropping trailing zeros and
/// a trailing decimal point (`1.500` → `1.5`, `2.000` → `2`).
pub fn format_real(value: f64) -> String {
    format_real_with(value, 3)
}

/// Like [`format_real`] with a configurable number of decimals.
pub fn format_real_with(value: f64, decimals: usize) -> String {
    let s = format!("{value:.decimals$}");
    if !s.contains('.') {
        return normalize_zero(s);
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    normalize_zero(trimmed.to_string())
}

fn normalize_zero(s: String) -> String {
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}
