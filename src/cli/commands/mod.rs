pub mod clock_in;
pub mod clock_out;
pub mod config;
pub mod departments;
pub mod employees;
pub mod export;
pub mod init;
pub mod leave;
pub mod list;
pub mod status;
pub mod sync;
pub mod watch;

use crate::api::ApiClient;
use crate::config::Config;
use crate::core::sync::SyncEngine;
use crate::errors::{AppError, AppResult};
use crate::store::SqliteStore;
use crate::utils::date::PeriodFilter;

/// Sync engine wired the way every attendance command needs it.
pub(crate) fn build_engine(cfg: &Config) -> AppResult<SyncEngine<ApiClient, SqliteStore>> {
    let employee = cfg.identity()?;
    let api = ApiClient::new(&cfg.api_base_url)?;
    let store = SqliteStore::open(&cfg.state_db)?;
    Ok(SyncEngine::new(api, store, employee))
}

/// Period filter from CLI flags, with a command-specific default.
pub(crate) fn resolve_filter(
    period: Option<&str>,
    all: bool,
    default: fn() -> PeriodFilter,
) -> AppResult<PeriodFilter> {
    if all {
        return Ok(PeriodFilter::All);
    }
    match period {
        Some(p) => PeriodFilter::parse(p).map_err(AppError::InvalidDate),
        None => Ok(default()),
    }
}
