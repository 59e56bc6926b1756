//! Time utilities: parsing wall-clock times, formatting, current time.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveTime};

/// Parses a wall-clock time. Accepts `HH:MM:SS` and the short `HH:MM` form.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .ok()
}

/// Canonical `HH:MM:SS` rendering used on records.
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M:%S").to_string()
}

pub fn now_time() -> NaiveTime {
    Local::now().time()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}
