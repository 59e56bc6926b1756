use crate::errors::{AppError, AppResult};
use crate::export::model::AttendanceExport;
use std::path::Path;

/// Write the attendance rows as pretty-printed JSON.
pub fn write_json(path: &Path, rows: &[AttendanceExport]) -> AppResult<()> {
    let json =
        serde_json::to_string_pretty(rows).map_err(|err| AppError::Export(err.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}
