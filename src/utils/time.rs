//! Dates and distance-of-time phrasing

use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

const MINUTES_PER_DAY: i64 = 1440;
const MINUTES_PER_MONTH: i64 = 43_200;
const MINUTES_PER_YEAR: i64 = 525_600;

const MONTHS: [&str; 12] =
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// Describe the distance between two instants in words ("about 1 hour").
///
/// The order of `from` and `to` does not matter. With `include_seconds`,
/// distances under a minute are given in steps of 5, 10 and 20 seconds.
pub fn time_distance<Tz: TimeZone>(
    from: &DateTime<Tz>,
    to: &DateTime<Tz>,
    include_seconds: bool,
) -> String {
    let seconds = (to.timestamp_millis() - from.timestamp_millis()).abs() as f64 / 1000.0;
    let minutes = (seconds / 60.0).round() as i64;

    match minutes {
        0..=1 if include_seconds => match seconds.round() as i64 {
            0..=4 => "less than 5 seconds".to_string(),
            5..=9 => "less than 10 seconds".to_string(),
            10..=19 => "less than 20 seconds".to_string(),
            20..=39 => "half a minute".to_string(),
            40..=59 => "less than a minute".to_string(),
            _ => "1 minute".to_string(),
        },
        0 => "less than a minute".to_string(),
        1 => "1 minute".to_string(),
        2..=44 => format!("{minutes} minutes"),
        45..=89 => "about 1 hour".to_string(),
        90..=1439 => format!("about {} hours", rounded(minutes, 60)),
        1440..=2519 => "1 day".to_string(),
        2520..=43_199 => format!("{} days", rounded(minutes, MINUTES_PER_DAY)),
        43_200..=86_399 => "about 1 month".to_string(),
        86_400..=525_599 => format!("{} months", rounded(minutes, MINUTES_PER_MONTH)),
        _ => years_in_words(minutes),
    }
}

fn years_in_words(minutes: i64) -> String {
    if minutes >= 2 * MINUTES_PER_YEAR {
        return format!("{} years", rounded(minutes, MINUTES_PER_YEAR));
    }
    let remainder = minutes - MINUTES_PER_YEAR;
    if remainder < MINUTES_PER_YEAR / 4 {
        "about 1 year".to_string()
    } else if remainder < MINUTES_PER_YEAR * 3 / 4 {
        "over 1 year".to_string()
    } else {
        "almost 2 years".to_string()
    }
}

fn rounded(value: i64, unit: i64) -> i64 {
    (value as f64 / unit as f64).round() as i64
}

/// Three letter English month abbreviation, or an empty string when `month`
/// is not in 1..=12.
pub fn short_month(month: u32) -> &'static str {
    match month {
        1..=12 => MONTHS[month as usize - 1],
        _ => "",
    }
}

/// Phrase a range of years ("the years 1990 - 2000").
pub fn years(a: i32, b: i32) -> String {
    if a == b {
        format!("the year {a}")
    } else if b - a == 1 {
        format!("the years {a} and {b}")
    } else {
        format!("the years {a} - {b}")
    }
}

/// Split a `YYYY`, `YYYY-MM` or `YYYY-MM-DD` release date into its parts.
///
/// Missing parts are returned as zero.
pub fn released(date: &str) -> Result<(i32, u32, u32)> {
    let invalid = || Error::InvalidDate(date.to_string());
    let parts: Vec<&str> = date.trim().split('-').collect();
    match parts.as_slice() {
        [year] => Ok((year.parse().map_err(|_| invalid())?, 0, 0)),
        [year, month] => {
            let year = year.parse().map_err(|_| invalid())?;
            let month: u32 = month.parse().map_err(|_| invalid())?;
            if !(1..=12).contains(&month) {
                return Err(invalid());
            }
            Ok((year, month, 0))
        }
        [_, _, _] => {
            let d = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d.year(), d.month(), d.day()))
        }
        _ => Err(invalid()),
    }
}

/// Whether `day` could be a day of the month.
pub fn valid_day(day: i32) -> bool {
    (1..=31).contains(&day)
}

/// Whether `year` lies between 1970 and the current year.
pub fn valid_year(year: i32) -> bool {
    (1970..=Utc::now().year()).contains(&year)
}
