use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// ISO date string for the current calendar day, the record's logical day.
pub fn today_string() -> String {
    today().format("%Y-%m-%d").to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Date filter built from a CLI period expression.
///
/// Supported formats:
/// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// - ranges `start:end` in any of the above granularities
/// - `all` (no filtering)
#[derive(Debug, Clone)]
pub enum PeriodFilter {
    All,
    Range { start: NaiveDate, end: NaiveDate },
}

impl PeriodFilter {
    pub fn parse(period: &str) -> Result<Self, String> {
        if period == "all" {
            return Ok(PeriodFilter::All);
        }

        if let Some((a, b)) = period.split_once(':') {
            let (start, _) = bounds_of(a)?;
            let (_, end) = bounds_of(b)?;
            if end < start {
                return Err(format!("Invalid period range: {}", period));
            }
            return Ok(PeriodFilter::Range { start, end });
        }

        let (start, end) = bounds_of(period)?;
        Ok(PeriodFilter::Range { start, end })
    }

    /// Filter for the current month, the default when no period is given.
    pub fn current_month() -> Self {
        let now = today();
        let start = NaiveDate::from_ymd_opt(now.year(), now.month(), 1).unwrap();
        PeriodFilter::Range {
            start,
            end: last_day_of_month(now.year(), now.month()),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            PeriodFilter::All => true,
            PeriodFilter::Range { start, end } => *start <= date && date <= *end,
        }
    }
}

/// First and last day covered by a single period token.
fn bounds_of(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&format!("{}-01", p), "%Y-%m-%d") {
        return Ok((first, last_day_of_month(first.year(), first.month())));
    }

    // YYYY
    if let Ok(year) = p.parse::<i32>() {
        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| invalid(p))?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(|| invalid(p))?;
        return Ok((first, last));
    }

    Err(invalid(p))
}

fn invalid(p: &str) -> String {
    format!("Invalid period: {}", p)
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .unwrap()
}
