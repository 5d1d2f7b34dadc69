//! Display formatting for report cells.

/// Placeholder shown for missing values.
pub const MISSING: &str = "-";

/// Group the integer part in thousands and keep at most three fraction
/// digits: `1234567.8912` → `1,234,567.891`.
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    // Past 1e15 an f64 has no thousandths left to round, and scaling by
    // 1000 could overflow to infinity.
    let rounded = if value.abs() < 1e15 {
        (value * 1000.0).round() / 1000.0
    } else {
        value
    };
    let negative = rounded < 0.0;
    let formatted = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if negative && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Grouped count, or `-` when missing.
pub fn count_or_dash(value: Option<u64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| group_thousands(v as f64))
}

/// Dollar amount: `$12,500`. Missing amounts render as `-`.
pub fn currency(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("${}", group_thousands(v)))
}

/// Ratio as a percentage with two decimals: `0.05` → `5.00%`.
pub fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{:.2}%", v * 100.0))
}
