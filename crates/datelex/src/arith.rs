//! Calendar-aware arithmetic on instants.
//!
//! Second through week deltas are fixed-length multiples of seconds. Month and
//! year deltas instead walk the calendar from the instant's date in the
//! evaluating zone, accumulating the length of every month or year crossed.
//! The walk uses a divisible-by-four leap rule; century years are not
//! special-cased, so 1900 and 2100 count as leap years. Downstream consumers
//! rely on this historical behavior.

use chrono::Datelike;
use chrono_tz::Tz;

use crate::error::{DateError, Result};
use crate::instant::Instant;

/// A delta unit recognized by the modifier grammar and by time-ago phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub(crate) const ALL: [Self; 7] = [
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Year,
    ];

    /// Canonical singular time-ago phrase key (`"second ago"` .. `"year ago"`).
    pub(crate) fn singular_phrase(self) -> &'static str {
        match self {
            Self::Second => "second ago",
            Self::Minute => "minute ago",
            Self::Hour => "hour ago",
            Self::Day => "day ago",
            Self::Week => "week ago",
            Self::Month => "month ago",
            Self::Year => "year ago",
        }
    }

    /// Canonical plural time-ago phrase key (`"seconds ago"` .. `"years ago"`).
    pub(crate) fn plural_phrase(self) -> &'static str {
        match self {
            Self::Second => "seconds ago",
            Self::Minute => "minutes ago",
            Self::Hour => "hours ago",
            Self::Day => "days ago",
            Self::Week => "weeks ago",
            Self::Month => "months ago",
            Self::Year => "years ago",
        }
    }

    fn word(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Matches a unit word, singular or with a plural `s`.
    fn from_word(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|unit| word == unit.word() || word.strip_suffix('s') == Some(unit.word()))
    }

    /// Seconds per unit for the fixed-length units; month and year walk the
    /// calendar instead.
    fn fixed_seconds(self) -> Option<i64> {
        match self {
            Self::Second => Some(1),
            Self::Minute => Some(60),
            Self::Hour => Some(3_600),
            Self::Day => Some(86_400),
            Self::Week => Some(604_800),
            Self::Month | Self::Year => None,
        }
    }
}

/// Applies a textual modifier to an instant.
///
/// The modifier has the shape `"[+-]N <unit>[s][ ago]"` where the unit is one
/// of second, minute, hour, day, week, month, year; a trailing `ago` negates
/// the sign. Examples: `"2 days"`, `"-1 hour"`, `"3 weeks ago"`.
///
/// # Errors
///
/// Returns [`DateError::InvalidModifier`] when the modifier does not match
/// the grammar.
pub fn modify(instant: Instant, modifier: &str, zone: &Tz) -> Result<Instant> {
    let (value, unit) = parse_modifier(modifier)
        .ok_or_else(|| DateError::InvalidModifier(format!("\"{modifier}\"")))?;
    Ok(apply(instant, unit, value, zone))
}

/// Applies `value` units to `instant`; negative values move backward.
pub(crate) fn apply(instant: Instant, unit: TimeUnit, value: i64, zone: &Tz) -> Instant {
    let shift_millis = match unit.fixed_seconds() {
        Some(seconds) => value.saturating_mul(seconds).saturating_mul(1000),
        None => {
            let local = instant.to_zoned(zone);
            let forward = value >= 0;
            let steps = value.unsigned_abs();
            let days = if unit == TimeUnit::Month {
                walk_months(local.year(), local.month() as i32, steps, forward)
            } else {
                walk_years(local.year(), steps, forward)
            };
            let signed = if forward { days } else { -days };
            signed.saturating_mul(86_400_000)
        }
    };
    Instant::from_millis(instant.millis().saturating_add(shift_millis))
}

/// Day count for a month walk. Moving backward crosses the month being entered,
/// moving forward the month being left.
fn walk_months(mut year: i32, mut month: i32, steps: u64, forward: bool) -> i64 {
    let mut days = 0i64;
    for _ in 0..steps {
        if !forward {
            month -= 1;
            if month == 0 {
                month = 12;
                year -= 1;
            }
        }
        days += days_in_month(year, month);
        if forward {
            month += 1;
            if month == 13 {
                month = 1;
                year += 1;
            }
        }
    }
    days
}

fn walk_years(mut year: i32, steps: u64, forward: bool) -> i64 {
    let mut days = 0i64;
    for _ in 0..steps {
        if forward {
            year += 1;
        }
        days += if is_leap(year) { 366 } else { 365 };
        if !forward {
            year -= 1;
        }
    }
    days
}

fn is_leap(year: i32) -> bool {
    year % 4 == 0
}

fn days_in_month(year: i32, month: i32) -> i64 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        2 => {
            if is_leap(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

/// Splits a modifier into its signed magnitude and unit.
fn parse_modifier(text: &str) -> Option<(i64, TimeUnit)> {
    let mut parts = text.split(' ');
    let value_part = parts.next()?;
    let unit_part = parts.next()?;
    let ago = match parts.next() {
        None => false,
        Some("ago") => true,
        Some(_) => return None,
    };
    if parts.next().is_some() {
        return None;
    }

    let digits = value_part.strip_prefix(['+', '-']).unwrap_or(value_part);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut value: i64 = value_part.parse().ok()?;
    let unit = TimeUnit::from_word(unit_part)?;
    if ago {
        value = -value;
    }
    Some((value, unit))
}
