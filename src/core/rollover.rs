//! Calendar day rollover detection.
//!
//! The client remembers the last day it saw. When the observed day moves
//! past it, yesterday's snapshot is cleared so a new attendance cycle can
//! start. Clock adjustments backwards also count as a day change.

use chrono::NaiveDate;
use tracing::info;

use crate::store::StateStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRollover {
    /// Same day as the previous check.
    Unchanged,
    /// First check ever, nothing to roll.
    Seeded,
    /// The day changed since the previous check.
    Rolled { previous: NaiveDate },
}

/// Compare `today` against the persisted marker and update it. On a
/// rollover the today-record snapshot is dropped from the store; resetting
/// the in-memory session is the caller's job.
pub fn observe(store: &impl StateStore, today: NaiveDate) -> DayRollover {
    match store.last_checked_date() {
        None => {
            store.set_last_checked_date(today);
            DayRollover::Seeded
        }
        Some(previous) if previous == today => DayRollover::Unchanged,
        Some(previous) => {
            info!("day rolled over from {previous} to {today}");
            store.set_last_checked_date(today);
            store.clear_today();
            DayRollover::Rolled { previous }
        }
    }
}
