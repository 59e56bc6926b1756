use crate::cli::commands::{build_engine, resolve_filter};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sync::History;
use crate::errors::AppResult;
use crate::export::{
    AttendanceExport, ExportFormat, csv::write_csv, ensure_writable, json::write_json,
    notify_export_success,
};
use crate::ui::messages::warning;
use crate::utils::date::PeriodFilter;
use crate::utils::path::expand_tilde;

/// Handle the `export` subcommand
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        period,
        force,
    } = cmd
    {
        // Unlike `list`, an export with no period covers everything.
        let filter = resolve_filter(period.as_deref(), false, || PeriodFilter::All)?;

        let mut engine = build_engine(cfg)?;
        engine.check_rollover().await;

        let (records, remote) = match engine.history().await {
            History::Remote(r) => (r, true),
            History::Local(r) => (r, false),
        };
        if !remote {
            warning("Server unreachable, exporting locally cached records.");
        }

        let rows: Vec<AttendanceExport> = records
            .iter()
            .filter(|r| filter.contains(r.date))
            .map(AttendanceExport::from_record)
            .collect();

        let path = expand_tilde(file);
        ensure_writable(&path, *force)?;

        match format {
            ExportFormat::Csv => write_csv(&path, &rows)?,
            ExportFormat::Json => write_json(&path, &rows)?,
        }
        notify_export_success(format.label(), &path);
    }
    Ok(())
}
