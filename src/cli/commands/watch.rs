use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::cli::commands::build_engine;
use crate::config::Config;
use crate::core::scheduler::RecurringTask;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `watch` subcommand: stay in the foreground, reconcile the
/// offline queue and watch for day rollover on fixed intervals until
/// interrupted.
pub async fn handle(cfg: &Config) -> AppResult<()> {
    let engine = Arc::new(Mutex::new(build_engine(cfg)?));

    info(format!(
        "Watching attendance (sync every {}s, rollover check every {}s). Press Ctrl-C to stop.",
        cfg.sync_interval_secs, cfg.rollover_interval_secs
    ));

    let sync_engine = Arc::clone(&engine);
    let sync_task = RecurringTask::spawn(
        "reconcile",
        Duration::from_secs(cfg.sync_interval_secs.max(1)),
        move || {
            let engine = Arc::clone(&sync_engine);
            async move {
                let report = engine.lock().await.reconcile().await;
                if report.replayed > 0 {
                    success(format!("Synced {} queued record(s).", report.replayed));
                }
            }
        },
    );

    let rollover_engine = Arc::clone(&engine);
    let rollover_task = RecurringTask::spawn(
        "rollover",
        Duration::from_secs(cfg.rollover_interval_secs.max(1)),
        move || {
            let engine = Arc::clone(&rollover_engine);
            async move {
                if engine.lock().await.check_rollover().await {
                    info("New day started, attendance state reset.");
                }
            }
        },
    );

    tokio::signal::ctrl_c().await?;
    println!();
    info("Stopping background tasks...");
    sync_task.cancel().await;
    rollover_task.cancel().await;
    Ok(())
}
