//! The canonical date-time grammar.
//!
//! Consumes the normalizer's output: an ISO-like string, or the loose
//! `month day, year` / `day monthname year` shapes the rewrite rules emit.
//! An offset embedded in the text wins; otherwise the text is wall-clock time
//! in the evaluating zone (date-only ISO input reads as midnight UTC). When
//! the caller supplies an override offset, one trailing zone designator is
//! stripped first — discarded, not resolved — and the parsed instant is then
//! shifted so the text reads as wall-clock time in the override zone.

use chrono::{FixedOffset, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{DateError, Result};
use crate::instant::Instant;
use crate::offset::UtcOffset;

/// Zone abbreviations with a fixed numeric meaning, in minutes east of UTC.
/// Anything else is rejected — or stripped unresolved under an override.
const ZONE_ABBREVIATIONS: [(&str, i32); 12] = [
    ("z", 0),
    ("ut", 0),
    ("utc", 0),
    ("gmt", 0),
    ("est", -300),
    ("edt", -240),
    ("cst", -360),
    ("cdt", -300),
    ("mst", -420),
    ("mdt", -360),
    ("pst", -480),
    ("pdt", -420),
];

fn abbreviation_offset(token: &str) -> Option<i32> {
    ZONE_ABBREVIATIONS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, minutes)| *minutes)
}

struct ParsedDateTime {
    date: NaiveDate,
    time: NaiveTime,
    zone: ZoneSpec,
}

enum ZoneSpec {
    /// Wall-clock time in the evaluating zone.
    Local,
    /// A fixed offset read from the text, in minutes east.
    Fixed(i32),
}

pub(crate) fn parse_instant(
    canonical: &str,
    override_offset: Option<UtcOffset>,
    zone: &Tz,
    original: &str,
) -> Result<Instant> {
    let mut text = canonical.trim();
    if override_offset.is_some() {
        text = strip_trailing_zone(text);
    }

    let invalid = || DateError::InvalidDate(format!("\"{original}\""));

    let parsed = parse_iso(text)
        .or_else(|| parse_loose(text))
        .ok_or_else(invalid)?;
    let instant = realize(&parsed, zone).ok_or_else(invalid)?;

    Ok(match override_offset {
        Some(offset) => reconcile(instant, offset, zone),
        None => instant,
    })
}

/// Removes one trailing zone designator: a signed `H{1,2}:MM` offset or a `z`
/// glued to a digit, else a space-separated word of one to five letters that
/// is not a meridiem marker.
fn strip_trailing_zone(text: &str) -> &str {
    if let Some(stripped) = strip_trailing_offset(text) {
        return stripped;
    }
    if let Some(stripped) = strip_trailing_abbreviation(text) {
        return stripped;
    }
    text
}

fn strip_trailing_offset(text: &str) -> Option<&str> {
    let b = text.as_bytes();
    let n = b.len();
    if n >= 2 && b[n - 1] == b'z' && b[n - 2].is_ascii_digit() {
        return Some(&text[..n - 1]);
    }
    if n < 6 || b[n - 3] != b':' || !b[n - 1].is_ascii_digit() || !b[n - 2].is_ascii_digit() {
        return None;
    }
    let mut i = n - 3;
    let mut hour_digits = 0;
    while hour_digits < 2 && i > 0 && b[i - 1].is_ascii_digit() {
        i -= 1;
        hour_digits += 1;
    }
    if hour_digits == 0 || i == 0 {
        return None;
    }
    let sign = b[i - 1];
    if sign != b'+' && sign != b'-' {
        return None;
    }
    if i < 2 || !b[i - 2].is_ascii_digit() {
        return None;
    }
    Some(&text[..i - 1])
}

fn strip_trailing_abbreviation(text: &str) -> Option<&str> {
    let space = text.rfind(' ')?;
    if space == 0 {
        return None;
    }
    let word = &text[space + 1..];
    if !(1..=5).contains(&word.len()) || !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }
    if word.starts_with("am") || word.starts_with("pm") {
        return None;
    }
    Some(&text[..space])
}

// ── ISO-like shape ──────────────────────────────────────────────────────────

fn parse_iso(text: &str) -> Option<ParsedDateTime> {
    if !text.is_ascii() || text.len() < 10 {
        return None;
    }
    let date = parse_ymd(&text[..10])?;
    let rest = &text[10..];
    if rest.is_empty() {
        // date-only ISO reads as midnight UTC
        return Some(ParsedDateTime {
            date,
            time: NaiveTime::MIN,
            zone: ZoneSpec::Fixed(0),
        });
    }
    let rest = rest.strip_prefix('t')?;
    let (time, rest) = parse_iso_time(rest)?;
    let zone = match rest {
        "" => ZoneSpec::Local,
        "z" => ZoneSpec::Fixed(0),
        _ => {
            let tail = rest.strip_prefix(' ').unwrap_or(rest);
            if let Some(minutes) = parse_embedded_offset(tail) {
                ZoneSpec::Fixed(minutes)
            } else if let Some(minutes) = abbreviation_offset(tail) {
                ZoneSpec::Fixed(minutes)
            } else {
                return None;
            }
        }
    };
    Some(ParsedDateTime { date, time, zone })
}

fn parse_ymd(s: &str) -> Option<NaiveDate> {
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return None;
    }
    let year = digits_value(&s[..4])?;
    let month = digits_value(&s[5..7])?;
    let day = digits_value(&s[8..10])?;
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// `HH:MM[:SS[.fff]]`, returning the unconsumed remainder.
fn parse_iso_time(s: &str) -> Option<(NaiveTime, &str)> {
    let b = s.as_bytes();
    if b.len() < 5 || b[2] != b':' {
        return None;
    }
    let hour = digits_value(&s[..2])?;
    let minute = digits_value(&s[3..5])?;
    let mut rest = &s[5..];
    let mut second = 0;
    let mut milli = 0;
    if rest.len() >= 3 && rest.as_bytes()[0] == b':' {
        second = digits_value(&rest[1..3])?;
        rest = &rest[3..];
        if rest.len() >= 2 && rest.as_bytes()[0] == b'.' {
            let frac_end = rest[1..]
                .find(|c: char| !c.is_ascii_digit())
                .map_or(rest.len(), |i| i + 1);
            let frac = &rest[1..frac_end];
            if frac.is_empty() || frac.len() > 3 {
                return None;
            }
            let mut value = digits_value(frac)?;
            for _ in frac.len()..3 {
                value *= 10;
            }
            milli = value;
            rest = &rest[frac_end..];
        }
    }
    let time = NaiveTime::from_hms_milli_opt(hour, minute, second, milli)?;
    Some((time, rest))
}

/// Strict `[+-]HH:MM` as embedded in ISO text.
fn parse_embedded_offset(s: &str) -> Option<i32> {
    let b = s.as_bytes();
    let sign = match b.first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    if b.len() != 6 || b[3] != b':' {
        return None;
    }
    let hours = digits_value(&s[1..3])?;
    let minutes = digits_value(&s[4..6])?;
    Some(sign * (hours * 60 + minutes) as i32)
}

fn digits_value(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

// ── loose shape ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum DateField {
    Number(u32),
    Month(u32),
}

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// An English month name or any prefix of it, three letters or longer.
fn month_from_name(token: &str) -> Option<u32> {
    if token.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|name| name.starts_with(token))
        .map(|i| i as u32 + 1)
}

/// Whitespace/comma tokens forming `M D Y`, `monthname D Y` or `D monthname
/// Y`, with an optional `H:MM[:SS]` time, meridiem, and zone abbreviation.
fn parse_loose(text: &str) -> Option<ParsedDateTime> {
    let mut fields: Vec<DateField> = Vec::new();
    let mut time: Option<(u32, u32, u32)> = None;
    let mut pm: Option<bool> = None;
    let mut zone: Option<i32> = None;

    for token in text.split([' ', ',']).filter(|t| !t.is_empty()) {
        if token.contains(':') {
            if time.is_some() {
                return None;
            }
            time = Some(parse_loose_time(token)?);
        } else if token == "am" || token == "pm" {
            if pm.is_some() {
                return None;
            }
            pm = Some(token == "pm");
        } else if token.bytes().all(|b| b.is_ascii_digit()) {
            if fields.len() == 3 {
                return None;
            }
            fields.push(DateField::Number(token.parse().ok()?));
        } else if let Some(month) = month_from_name(token) {
            if fields.iter().any(|f| matches!(f, DateField::Month(_))) {
                return None;
            }
            fields.push(DateField::Month(month));
        } else if let Some(minutes) = abbreviation_offset(token) {
            if zone.is_some() {
                return None;
            }
            zone = Some(minutes);
        } else {
            return None;
        }
    }

    let (year, month, day) = match fields[..] {
        [DateField::Month(m), DateField::Number(d), DateField::Number(y)] => (y, m, d),
        [DateField::Number(d), DateField::Month(m), DateField::Number(y)] => (y, m, d),
        [DateField::Number(m), DateField::Number(d), DateField::Number(y)] => (y, m, d),
        _ => return None,
    };
    // two-digit years read as 1900-relative
    let year = if year < 100 { year + 1900 } else { year };

    let (mut hour, minute, second) = time.unwrap_or((0, 0, 0));
    if let Some(pm) = pm {
        if hour == 0 || hour > 12 {
            return None;
        }
        hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
    }

    let date = NaiveDate::from_ymd_opt(year as i32, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(ParsedDateTime {
        date,
        time,
        zone: zone.map_or(ZoneSpec::Local, ZoneSpec::Fixed),
    })
}

fn parse_loose_time(token: &str) -> Option<(u32, u32, u32)> {
    let mut parts = token.split(':');
    let hour = time_component(parts.next()?)?;
    let minute = time_component(parts.next()?)?;
    let second = match parts.next() {
        Some(s) => time_component(s)?,
        None => 0,
    };
    if parts.next().is_some() || hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    Some((hour, minute, second))
}

fn time_component(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

// ── realization ─────────────────────────────────────────────────────────────

fn realize(parsed: &ParsedDateTime, zone: &Tz) -> Option<Instant> {
    let naive = parsed.date.and_time(parsed.time);
    let utc = match parsed.zone {
        ZoneSpec::Fixed(minutes) => {
            let offset = FixedOffset::east_opt(minutes * 60)?;
            offset
                .from_local_datetime(&naive)
                .single()?
                .with_timezone(&Utc)
        }
        ZoneSpec::Local => match zone.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            // wall-clock time repeated at a DST fold: take the earlier instant
            LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
            // wall-clock time skipped by a DST gap
            LocalResult::None => return None,
        },
    };
    Some(Instant::from_millis(utc.timestamp_millis()))
}

/// Shifts an instant that was interpreted as local wall-clock time so the
/// text reads as wall-clock time in the override zone instead.
fn reconcile(instant: Instant, override_offset: UtcOffset, zone: &Tz) -> Instant {
    let east_minutes = instant.to_zoned(zone).offset().fix().local_minus_utc() / 60;
    let correction = i64::from(east_minutes - override_offset.minutes()) * 60_000;
    Instant::from_millis(instant.millis().saturating_add(correction))
}
