// src/export/model.rs

use serde::Serialize;

use crate::models::AttendanceRecord;

/// Flat attendance row for export.
#[derive(Serialize, Clone, Debug)]
pub struct AttendanceExport {
    pub id: String,
    pub employee_id: String,
    pub date: String,
    pub time_in: String,
    pub time_out: String,
    pub workinghours: u32,
    pub workingminutes: u32,
    pub synced: bool,
}

impl AttendanceExport {
    pub fn from_record(r: &AttendanceRecord) -> Self {
        Self {
            id: r.id.clone().unwrap_or_default(),
            employee_id: r.employee_id.clone(),
            date: r.date.format("%Y-%m-%d").to_string(),
            time_in: r.time_in.clone(),
            time_out: r.time_out.clone(),
            workinghours: r.workinghours,
            workingminutes: r.workingminutes,
            synced: r.synced,
        }
    }
}

/// Header for CSV output.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "employee_id",
        "date",
        "time_in",
        "time_out",
        "workinghours",
        "workingminutes",
        "synced",
    ]
}

pub(crate) fn record_to_row(r: &AttendanceExport) -> Vec<String> {
    vec![
        r.id.clone(),
        r.employee_id.clone(),
        r.date.clone(),
        r.time_in.clone(),
        r.time_out.clone(),
        r.workinghours.to_string(),
        r.workingminutes.to_string(),
        r.synced.to_string(),
    ]
}
