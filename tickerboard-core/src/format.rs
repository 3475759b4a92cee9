//! Display formatting for table cells.
//!
//! Every helper takes an `Option` and renders absence as [`NA`]; none of them
//! panic on missing or non-finite input.

use crate::domain::Magnitude;

/// Placeholder for any value the data source did not supply.
pub const NA: &str = "N/A";

/// Human-readable large number.
///
/// Half-open bands: `[1e12, ∞)` → `T` with 4 decimals, `[1e9, 1e12)` → `B`,
/// `[1e6, 1e9)` → `M` (2 decimals each). Smaller values are comma-grouped.
pub fn format_large(n: f64) -> String {
    if !n.is_finite() {
        return NA.to_string();
    }
    if n >= 1e12 {
        format!("{:.4}T", n / 1e12)
    } else if n >= 1e9 {
        format!("{:.2}B", n / 1e9)
    } else if n >= 1e6 {
        format!("{:.2}M", n / 1e6)
    } else {
        group_thousands(n)
    }
}

/// Comma-grouped number keeping up to three fractional digits.
pub fn group_thousands(n: f64) -> String {
    if !n.is_finite() {
        return NA.to_string();
    }
    let fixed = format!("{:.3}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = n < 0.0 && (int_part != "0" || !frac.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

/// `$` and two decimals, e.g. `$105.00`.
pub fn format_currency(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) if v < 0.0 => format!("-${:.2}", v.abs()),
        Some(v) => format!("${v:.2}"),
        None => NA.to_string(),
    }
}

/// Two decimals with no unit.
pub fn format_fixed2(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{v:.2}"),
        None => NA.to_string(),
    }
}

/// Already-scaled percentage with two decimals, e.g. `5.00%`.
pub fn format_percent(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{v:.2}%"),
        None => NA.to_string(),
    }
}

/// Dividend yield fraction as a percentage; absent yields read as 0%.
pub fn format_dividend_yield(value: Option<f64>) -> String {
    let fraction = value.filter(|v| v.is_finite()).unwrap_or(0.0);
    format!("{:.2}%", fraction * 100.0)
}

pub fn format_magnitude(value: Option<&Magnitude>) -> String {
    match value {
        Some(Magnitude::Value(v)) => format_large(*v),
        Some(Magnitude::Preformatted(s)) => s.clone(),
        None => NA.to_string(),
    }
}

pub fn format_text(value: Option<&str>) -> String {
    value.unwrap_or(NA).to_string()
}
