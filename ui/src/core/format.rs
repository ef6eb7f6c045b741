//! Formatting helpers for presenting analysis figures.

pub fn format_percent(value: u8) -> String {
    format!("{value}%")
}

/// Plain number without a trailing `.0` for whole values; `NaN`/infinite map to empty.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

pub fn format_optional_number(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

pub fn format_seconds(elapsed_ms: u64) -> String {
    format!("{:.1}s", elapsed_ms as f64 / 1000.0)
}

pub fn format_kilobytes(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}
