use crate::cli::commands::build_engine;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `sync` subcommand
pub async fn handle(cfg: &Config) -> AppResult<()> {
    let mut engine = build_engine(cfg)?;
    engine.check_rollover().await;

    let report = engine.reconcile().await;
    if report.attempted == 0 {
        info("Offline queue is empty, nothing to sync.");
        return Ok(());
    }
    if report.replayed > 0 {
        success(format!("Replayed {} queued record(s).", report.replayed));
    }
    if report.remaining > 0 {
        warning(format!(
            "{} record(s) still pending, will retry on the next sync.",
            report.remaining
        ));
    }
    Ok(())
}
