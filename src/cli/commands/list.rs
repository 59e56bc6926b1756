use crate::cli::commands::{build_engine, resolve_filter};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sync::History;
use crate::errors::AppResult;
use crate::models::AttendanceRecord;
use crate::ui::messages::{info, warning};
use crate::utils::date::PeriodFilter;
use crate::utils::formatting::{hm, time_or_dash};
use crate::utils::table::{Column, Table};

/// Handle the `list` subcommand
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, all } = cmd {
        let filter = resolve_filter(period.as_deref(), *all, PeriodFilter::current_month)?;

        let mut engine = build_engine(cfg)?;
        engine.check_rollover().await;

        let (records, remote) = match engine.history().await {
            History::Remote(r) => (r, true),
            History::Local(r) => (r, false),
        };
        if !remote {
            warning("Server unreachable, showing locally cached records.");
        }

        let rows: Vec<&AttendanceRecord> =
            records.iter().filter(|r| filter.contains(r.date)).collect();
        if rows.is_empty() {
            info("No attendance records for the selected period.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("Date", 10),
            Column::new("In", 8),
            Column::new("Out", 8),
            Column::new("Worked", 11),
            Column::new("Synced", 7),
        ]);

        // A single wild remote row can overflow u32 minutes; sum wide.
        let mut total_minutes = 0u64;
        for r in &rows {
            let worked = if r.is_complete() {
                total_minutes += u64::from(r.workinghours) * 60 + u64::from(r.workingminutes);
                hm(r.workinghours, r.workingminutes)
            } else {
                "in progress".to_string()
            };
            table.add_row(vec![
                r.date.format("%Y-%m-%d").to_string(),
                time_or_dash(&r.time_in),
                time_or_dash(&r.time_out),
                worked,
                if r.synced { "yes" } else { "pending" }.to_string(),
            ]);
        }

        print!("{}", table.render());
        info(format!(
            "{} record(s), total {}",
            rows.len(),
            hm(total_minutes / 60, total_minutes % 60)
        ));
    }
    Ok(())
}
