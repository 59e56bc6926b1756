//! Today's attendance session state machine.
//!
//! NOT_STARTED -> CHECKED_IN -> CHECKED_OUT, one cycle per calendar day.
//! Only a day rollover resets the cycle. Illegal transitions come back as
//! typed errors and leave the session untouched.

use chrono::NaiveDate;
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::models::AttendanceRecord;
use crate::store::StateStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    CheckedIn,
    CheckedOut,
}

/// In-memory view of today's record for one employee.
#[derive(Debug)]
pub struct AttendanceSession {
    today: Option<AttendanceRecord>,
}

impl AttendanceSession {
    /// Rebuild the session from the persisted snapshot. A snapshot for a
    /// different day or a different employee is stale: it is dropped from
    /// the store and the session starts fresh.
    pub fn load(store: &impl StateStore, employee_id: &str, today: NaiveDate) -> Self {
        let record = store.load_today().and_then(|r| {
            if r.employee_id != employee_id || r.date != today {
                debug!(
                    "dropping stale snapshot (employee {}, date {})",
                    r.employee_id, r.date
                );
                store.clear_today();
                None
            } else {
                Some(r)
            }
        });
        Self { today: record }
    }

    pub fn today(&self) -> Option<&AttendanceRecord> {
        self.today.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        match &self.today {
            None => SessionStatus::NotStarted,
            Some(r) if r.is_complete() => SessionStatus::CheckedOut,
            Some(r) if r.has_time_in() => SessionStatus::CheckedIn,
            Some(_) => SessionStatus::NotStarted,
        }
    }

    /// A clock-in is only legal before the day's cycle has started.
    pub fn guard_clock_in(&self) -> AppResult<()> {
        match self.status() {
            SessionStatus::NotStarted => Ok(()),
            SessionStatus::CheckedIn => Err(AppError::AlreadyCheckedIn(self.time_in_or_default())),
            SessionStatus::CheckedOut => {
                Err(AppError::AlreadyCheckedOut(self.time_out_or_default()))
            }
        }
    }

    /// A clock-out needs an open check-in. Returns the open record.
    pub fn guard_clock_out(&self) -> AppResult<&AttendanceRecord> {
        match self.status() {
            SessionStatus::CheckedIn => match &self.today {
                Some(r) => Ok(r),
                None => Err(AppError::NotCheckedIn),
            },
            SessionStatus::NotStarted => Err(AppError::NotCheckedIn),
            SessionStatus::CheckedOut => {
                Err(AppError::AlreadyCheckedOut(self.time_out_or_default()))
            }
        }
    }

    /// Replace today's record. Callers go through the guards first.
    pub fn set_today(&mut self, record: AttendanceRecord) {
        self.today = Some(record);
    }

    /// Mark today's record as synced if the replayed record matches it,
    /// both by id and by punch stage. Returns the updated record so the
    /// caller can persist it.
    pub fn confirm_synced(&mut self, id: &str, time_out: &str) -> Option<AttendanceRecord> {
        let today = self.today.as_mut()?;
        if today.id.as_deref() == Some(id) && today.time_out == time_out {
            today.synced = true;
            return Some(today.clone());
        }
        None
    }

    /// Day rollover: forget today's record and start a new cycle.
    pub fn reset(&mut self) {
        self.today = None;
    }

    fn time_in_or_default(&self) -> String {
        self.today
            .as_ref()
            .map(|r| r.time_in.clone())
            .unwrap_or_default()
    }

    fn time_out_or_default(&self) -> String {
        self.today
            .as_ref()
            .map(|r| r.time_out.clone())
            .unwrap_or_default()
    }
}
