//! Attendance record model, one row per employee per calendar day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single attendance row.
///
/// `time_in` and `time_out` are `HH:MM:SS` wall-clock strings, empty when
/// not yet recorded. `synced` is local bookkeeping only and is never sent
/// on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default, deserialize_with = "crate::models::de_opt_id")]
    pub id: Option<String>,
    pub employee_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub time_in: String,
    #[serde(default)]
    pub time_out: String,
    #[serde(default)]
    pub workinghours: u32,
    #[serde(default)]
    pub workingminutes: u32,
    #[serde(default)]
    pub synced: bool,
}

impl AttendanceRecord {
    /// Fresh open record for a clock-in. No id yet, the server or the
    /// offline path assigns one.
    pub fn clock_in(employee_id: &str, date: NaiveDate, time_in: &str) -> Self {
        Self {
            id: None,
            employee_id: employee_id.to_string(),
            date,
            time_in: time_in.to_string(),
            time_out: String::new(),
            workinghours: 0,
            workingminutes: 0,
            synced: false,
        }
    }

    pub fn has_time_in(&self) -> bool {
        !self.time_in.is_empty()
    }

    /// Checked in, not yet checked out.
    pub fn is_open(&self) -> bool {
        !self.time_in.is_empty() && self.time_out.is_empty()
    }

    /// Both punches recorded.
    pub fn is_complete(&self) -> bool {
        !self.time_in.is_empty() && !self.time_out.is_empty()
    }

    /// Record the clock-out punch and the worked duration.
    pub fn close(&mut self, time_out: &str, hours: u32, minutes: u32) {
        self.time_out = time_out.to_string();
        self.workinghours = hours;
        self.workingminutes = minutes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_id_is_normalized_to_string() {
        let r: AttendanceRecord = serde_json::from_str(
            r#"{"id": 17, "employee_id": "E1", "date": "2025-06-18", "time_in": "09:00:00"}"#,
        )
        .unwrap();
        assert_eq!(r.id.as_deref(), Some("17"));
        assert!(r.is_open());
        assert!(!r.synced);
    }

    #[test]
    fn string_id_and_missing_fields() {
        let r: AttendanceRecord = serde_json::from_str(
            r#"{"id": "abc-1", "employee_id": "E1", "date": "2025-06-18"}"#,
        )
        .unwrap();
        assert_eq!(r.id.as_deref(), Some("abc-1"));
        assert_eq!(r.time_in, "");
        assert_eq!(r.workinghours, 0);
        assert!(!r.has_time_in());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let r = serde_json::from_str::<AttendanceRecord>(
            r#"{"employee_id": "E1", "date": "18/06/2025"}"#,
        );
        assert!(r.is_err());
    }

    #[test]
    fn close_fills_punch_and_duration() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let mut r = AttendanceRecord::clock_in("E1", date, "09:00:00");
        r.close("17:30:00", 8, 30);
        assert!(r.is_complete());
        assert_eq!(r.workinghours, 8);
        assert_eq!(r.workingminutes, 30);
    }
}
