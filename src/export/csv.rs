use crate::errors::{AppError, AppResult};
use crate::export::model::{AttendanceExport, get_headers, record_to_row};
use csv::Writer;
use std::path::Path;

fn e(err: csv::Error) -> AppError {
    AppError::Export(err.to_string())
}

/// Write the attendance rows as CSV to the given file.
pub fn write_csv(path: &Path, rows: &[AttendanceExport]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path).map_err(e)?;

    wtr.write_record(get_headers()).map_err(e)?;
    for row in rows {
        wtr.write_record(record_to_row(row)).map_err(e)?;
    }

    wtr.flush()?;
    Ok(())
}
