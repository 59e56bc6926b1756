//! Formatting utilities used for CLI and export outputs.

/// Renders a worked duration as `HHh MMm`, e.g. `08h 30m`. Totals over
/// many records can outgrow `u32` minutes, so the hour count is taken
/// as anything that widens to `u64`.
pub fn hm<H: Into<u64>, M: Into<u64>>(hours: H, minutes: M) -> String {
    let (hours, minutes): (u64, u64) = (hours.into(), minutes.into());
    format!("{:02}h {:02}m", hours, minutes)
}

/// Renders a stored time string for table output, `-` when unset.
pub fn time_or_dash(t: &str) -> String {
    if t.is_empty() {
        "-".to_string()
    } else {
        t.to_string()
    }
}

/// Renders an optional id for table output, `-` when the record has none.
pub fn id_or_dash(id: Option<&str>) -> String {
    match id {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}
