//! Month-name lookups and date-range generation.

use crate::error::{DateError, Result};
use crate::instant::Instant;

const SHORT_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const FULL_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month number (1–12) for an English month name, short (`"Jun"`) or full
/// (`"June"`). Matching is case-insensitive and by short-name prefix.
pub fn month_number(name: &str) -> Option<u32> {
    SHORT_NAMES
        .iter()
        .position(|short| {
            name.get(..short.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(short))
        })
        .map(|i| i as u32 + 1)
}

/// English name of a month number, short by default, full on request.
pub fn month_name(number: u32, full: bool) -> Option<&'static str> {
    let index = number.checked_sub(1)? as usize;
    let table = if full { &FULL_NAMES } else { &SHORT_NAMES };
    table.get(index).copied()
}

/// Generates instants from `start` to `end` inclusive, one `interval` apart.
///
/// `interval` has the shape `"<N> (minute|hour|day)[s]"`, e.g. `"10 hours"`.
/// `descending` reverses the result.
///
/// # Errors
///
/// Returns [`DateError::InvalidModifier`] for a malformed or zero interval.
pub fn date_range(
    start: Instant,
    end: Instant,
    interval: &str,
    descending: bool,
) -> Result<Vec<Instant>> {
    let step_millis = parse_interval(interval)?;
    let mut dates = Vec::new();
    let mut cursor = start.millis();
    while cursor <= end.millis() {
        dates.push(Instant::from_millis(cursor));
        cursor = match cursor.checked_add(step_millis) {
            Some(next) => next,
            None => break,
        };
    }
    if descending {
        dates.reverse();
    }
    Ok(dates)
}

fn parse_interval(interval: &str) -> Result<i64> {
    let invalid = || DateError::InvalidModifier(format!("interval \"{interval}\""));
    let (value, unit) = interval.split_once(' ').ok_or_else(invalid)?;
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let seconds: i64 = match unit {
        "minute" | "minutes" => 60,
        "hour" | "hours" => 3_600,
        "day" | "days" => 86_400,
        _ => return Err(invalid()),
    };
    let count: i64 = value.parse().map_err(|_| invalid())?;
    if count == 0 {
        return Err(invalid());
    }
    Ok(seconds.saturating_mul(count).saturating_mul(1000))
}
