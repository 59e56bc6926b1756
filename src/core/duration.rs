//! Worked-duration computation between two wall-clock punches.

use chrono::{Days, NaiveDate};
use tracing::warn;

use crate::utils::time::{now_time, parse_time};

/// Hours/minutes split of a worked span, plus the raw total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkDuration {
    pub hours: u32,
    pub minutes: u32,
    pub total_minutes: u32,
}

impl WorkDuration {
    fn from_minutes(total: u32) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
            total_minutes: total,
        }
    }
}

/// Minutes worked between `time_in` and `time_out`.
///
/// Times are wall-clock only. A missing `time_out` means the session is
/// still open and counts up to the current instant. A `time_out` earlier
/// than `time_in` means the shift crossed midnight and counts into the
/// next day. Unparsable punches yield a zero duration; a shift is never
/// negative and nothing here panics.
pub fn work_duration(time_in: &str, time_out: Option<&str>) -> WorkDuration {
    let Some(start) = parse_time(time_in) else {
        warn!("unparsable clock-in time '{time_in}', counting zero");
        return WorkDuration::default();
    };
    let end = match time_out {
        Some(raw) => match parse_time(raw) {
            Some(t) => t,
            None => {
                warn!("unparsable clock-out time '{raw}', counting zero");
                return WorkDuration::default();
            }
        },
        None => now_time(),
    };

    // Anchor both punches to the same reference day. The date itself
    // cancels out of the subtraction.
    let anchor = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    let start_dt = anchor.and_time(start);
    let mut end_dt = anchor.and_time(end);
    if end < start {
        // Overnight shift, clock-out lands on the next day.
        end_dt = anchor
            .checked_add_days(Days::new(1))
            .unwrap_or(anchor)
            .and_time(end);
    }

    let total = (end_dt - start_dt).num_minutes().max(0) as u32;
    WorkDuration::from_minutes(total)
}
