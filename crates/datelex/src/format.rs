//! Rendering instants as text.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Offset, Timelike};
use chrono_tz::Tz;

use crate::error::DateError;
use crate::instant::Instant;

/// The textual renderings an instant supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DD HH:MM:SS`
    DateTime,
    /// `HH:MM:SS`
    Time,
    /// `YYYY-MM-DDTHH:MM:SS±HH:MM`
    Iso,
}

impl FromStr for FormatKind {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "datetime" => Ok(Self::DateTime),
            "time" => Ok(Self::Time),
            "iso" => Ok(Self::Iso),
            other => Err(DateError::InvalidFormat(format!(
                "\"{other}\" (permissible kinds: \"date\", \"datetime\", \"time\", \"iso\")"
            ))),
        }
    }
}

/// Renders `instant` in `zone`, or in UTC when `utc` is set.
///
/// The iso rendering carries the offset in effect at that instant, zero under
/// `utc`.
pub fn render(instant: Instant, kind: FormatKind, zone: &Tz, utc: bool) -> String {
    let (date, time, offset_seconds) = if utc {
        let u = instant.to_utc();
        (u.date_naive(), u.time(), 0)
    } else {
        let local = instant.to_zoned(zone);
        let offset = local.offset().fix().local_minus_utc();
        (local.date_naive(), local.time(), offset)
    };

    match kind {
        FormatKind::Date => render_date(date),
        FormatKind::Time => render_time(time),
        FormatKind::DateTime => format!("{} {}", render_date(date), render_time(time)),
        FormatKind::Iso => format!(
            "{}T{}{}",
            render_date(date),
            render_time(time),
            render_offset(offset_seconds)
        ),
    }
}

fn render_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

fn render_time(time: NaiveTime) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

fn render_offset(offset_seconds: i32) -> String {
    let sign = if offset_seconds >= 0 { '+' } else { '-' };
    let abs = offset_seconds.unsigned_abs();
    format!("{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
}
