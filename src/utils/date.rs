use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Inclusive range of dates selected by a `--period` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, d: &NaiveDate) -> bool {
        *d >= self.from && *d <= self.to
    }
}

/// Resolve a single period token (YYYY, YYYY-MM or YYYY-MM-DD) to its first and last day.
fn period_bounds(p: &str) -> Result<DateRange, String> {
    let p = p.trim();

    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok(DateRange { from: d, to: d });
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d") {
        let last = last_day_of_month(first.year(), first.month())
            .ok_or_else(|| format!("'{}' (expected YYYY, YYYY-MM, YYYY-MM-DD or A:B)", p))?;
        return Ok(DateRange { from: first, to: last });
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
        && let (Some(from), Some(to)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        )
    {
        return Ok(DateRange { from, to });
    }

    Err(format!("'{}' (expected YYYY, YYYY-MM, YYYY-MM-DD or A:B)", p))
}

/// Parse a period filter: a single token or a `start:end` range of tokens.
pub fn parse_period(p: &str) -> Result<DateRange, String> {
    if let Some((start, end)) = p.split_once(':') {
        let s = period_bounds(start)?;
        let e = period_bounds(end)?;
        if e.to < s.from {
            return Err(format!("'{}' ends before it starts", p));
        }
        return Ok(DateRange {
            from: s.from,
            to: e.to,
        });
    }

    period_bounds(p)
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}
