//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Hours with two decimals, as shown in tables and charts.
pub fn hours(h: f64) -> String {
    format!("{:.2}", h)
}

/// `Some(h)` → "4.00", `None` → "--".
pub fn opt_hours(h: Option<f64>) -> String {
    h.map(hours).unwrap_or_else(|| "--".to_string())
}

pub fn mins2readable(mins: i64) -> String {
    let abs_m = mins.abs();
    let sign = if mins < 0 { "-" } else { "" };
    format!("{}{:02}h {:02}m", sign, abs_m / 60, abs_m % 60)
}
