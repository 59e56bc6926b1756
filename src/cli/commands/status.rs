use crate::cli::commands::build_engine;
use crate::config::Config;
use crate::core::duration::work_duration;
use crate::core::session::SessionStatus;
use crate::errors::AppResult;
use crate::ui::messages::{info, queued, success};
use crate::utils::date;
use crate::utils::formatting::hm;

/// Handle the `status` subcommand
pub async fn handle(cfg: &Config) -> AppResult<()> {
    let mut engine = build_engine(cfg)?;
    engine.check_rollover().await;

    println!("📅 {}", date::today_string());

    match engine.session().status() {
        SessionStatus::NotStarted => {
            info("Not checked in today.");
        }
        SessionStatus::CheckedIn => {
            if let Some(r) = engine.session().today() {
                let live = work_duration(&r.time_in, None);
                info(format!(
                    "Checked in since {} ({} so far)",
                    r.time_in,
                    hm(live.hours, live.minutes)
                ));
            }
        }
        SessionStatus::CheckedOut => {
            if let Some(r) = engine.session().today() {
                success(format!(
                    "Checked out at {} ({} worked)",
                    r.time_out,
                    hm(r.workinghours, r.workingminutes)
                ));
            }
        }
    }

    let pending = engine.pending();
    if pending > 0 {
        queued(format!("{pending} record(s) waiting to sync"));
    } else {
        info("All records synced.");
    }
    Ok(())
}
