//! Conversions between chrono values and Excel serial numbers (1900 date system).

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const SECONDS_PER_DAY: f64 = 86_400.0;

fn excel_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

pub fn datetime_to_serial(dt: &NaiveDateTime) -> f64 {
    let delta = *dt - excel_epoch();
    delta.num_seconds() as f64 / SECONDS_PER_DAY
}

pub fn date_to_serial(d: &NaiveDate) -> f64 {
    (*d - excel_epoch().date()).num_days() as f64
}

pub fn time_to_serial(t: &NaiveTime) -> f64 {
    t.num_seconds_from_midnight() as f64 / SECONDS_PER_DAY
}

/// Serial → datetime, rounded to the nearest second.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    excel_epoch().checked_add_signed(Duration::seconds(seconds))
}

/// Fractional part of a serial as a time of day.
pub fn serial_to_time(serial: f64) -> Option<NaiveTime> {
    serial_to_datetime(serial.fract().abs()).map(|dt| dt.time())
}
