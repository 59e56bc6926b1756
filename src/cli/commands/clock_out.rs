use crate::cli::commands::build_engine;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sync::ClockOutcome;
use crate::errors::AppResult;
use crate::ui::messages::{queued, success, warning};
use crate::utils::formatting::hm;
use crate::utils::time::parse_optional_time;

/// Handle the `out` subcommand
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Out { at } = cmd {
        let at = parse_optional_time(at.as_ref())?;
        let mut engine = build_engine(cfg)?;
        engine.check_rollover().await;

        match engine.clock_out(at).await? {
            ClockOutcome::Synced(r) => {
                success(format!(
                    "Clocked out at {} ({} worked)",
                    r.time_out,
                    hm(r.workinghours, r.workingminutes)
                ));
            }
            ClockOutcome::Queued(r) => {
                warning("Server unreachable, recorded locally.");
                queued(format!(
                    "Clocked out at {} ({} worked, pending sync)",
                    r.time_out,
                    hm(r.workinghours, r.workingminutes)
                ));
            }
        }
    }
    Ok(())
}
