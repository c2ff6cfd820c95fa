//! Elapsed time between a start and an end wall-clock time on a given date.

use chrono::{Duration, NaiveDate, NaiveTime};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elapsed {
    pub minutes: i64,
    pub hours: f64,
}

/// An end earlier than the start is taken to be on the next day (overnight shift).
pub fn compute(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Elapsed {
    let start_dt = date.and_time(start);
    let mut end_dt = date.and_time(end);
    if end_dt < start_dt {
        end_dt += Duration::days(1);
    }

    let minutes = (end_dt - start_dt).num_seconds().div_euclid(60);
    Elapsed {
        minutes,
        hours: round2(minutes as f64 / 60.0),
    }
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
