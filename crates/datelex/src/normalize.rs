//! Rewriting free-form date text into canonical shapes.
//!
//! The normalizer runs an ordered sequence of shape recognizers over input
//! that has already been trimmed and lowercased. The first recognizer whose
//! shape matches wins and later recognizers are not consulted — even when the
//! winning recognizer fails its phrase lookup, in which case the text passes
//! through unchanged and the date-time grammar has the final say. Recognizers
//! either rewrite the text, or — for "time ago" phrases — resolve a delta
//! against the anchor immediately and short-circuit with a finished instant.
//!
//! Rule order:
//!
//! 1. SQL date-time separator (`"2014-11-21 13:16:45" → "…T13:16:45"`)
//! 2. Ordinal day suffix before a comma (`"23rd," → "23,"`)
//! 3. Dashed date plus remainder (`"20-01-2015, 18:19" → "01 20, 2015 18:19"`)
//! 4. Day shortcuts (yesterday / today / tomorrow aliases)
//! 5. Singular time-ago phrase (`"hour ago"`, `"godzinę temu"`)
//! 6. Plural time-ago phrase, numeral first (`"3 days ago"`)
//! 7. Plural time-ago phrase, numeral inside (`"vor 3 tagen"`)
//! 8. Day plus month-name prefix (`"27 sie" → "27 august 2026"`)

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;

use crate::arith::{self, TimeUnit};
use crate::instant::Instant;
use crate::locale::LocaleConfig;

/// What normalization produced for one input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Normalized {
    /// Canonical (or untouched) text for the date-time grammar.
    Text(String),
    /// A fully resolved instant; the grammar is skipped.
    Resolved(Instant),
}

/// Outcome of a single recognizer.
enum RuleMatch {
    Rewritten(String),
    Resolved(Instant),
    /// The shape matched but the phrase lookup failed; the cascade stops and
    /// the original text goes through unchanged.
    Unresolved,
}

pub(crate) fn normalize(text: &str, locale: &LocaleConfig, anchor: &DateTime<Tz>) -> Normalized {
    let outcome = try_sql_datetime(text)
        .or_else(|| try_strip_ordinal(text))
        .or_else(|| try_dashed_date(text))
        .or_else(|| try_day_shortcut(text, locale, anchor))
        .or_else(|| try_time_ago_singular(text, locale, anchor))
        .or_else(|| try_time_ago_prefixed(text, locale, anchor))
        .or_else(|| try_time_ago_infixed(text, locale, anchor))
        .or_else(|| try_day_month_name(text, locale, anchor));

    match outcome {
        Some(RuleMatch::Rewritten(canonical)) => Normalized::Text(canonical),
        Some(RuleMatch::Resolved(instant)) => Normalized::Resolved(instant),
        Some(RuleMatch::Unresolved) | None => Normalized::Text(text.to_string()),
    }
}

fn resolve_ago(anchor: &DateTime<Tz>, unit: TimeUnit, magnitude: i64) -> RuleMatch {
    let now = Instant::from_millis(anchor.timestamp_millis());
    RuleMatch::Resolved(arith::apply(now, unit, -magnitude, &anchor.timezone()))
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn lowercase_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_lowercase)
}

/// Rule 1: `YYYY-MM-DD( |t)HH:MM:SS<rest>` → `YYYY-MM-DDTHH:MM:SS<rest>`.
fn try_sql_datetime(s: &str) -> Option<RuleMatch> {
    let b = s.as_bytes();
    if b.len() < 19 || !s.is_char_boundary(19) || !b[..19].is_ascii() {
        return None;
    }
    let date = &s[..10];
    let time = &s[11..19];
    if !is_ymd_shape(date) || !(b[10] == b' ' || b[10] == b't') || !is_hms_shape(time) {
        return None;
    }
    Some(RuleMatch::Rewritten(format!("{date}T{time}{}", &s[19..])))
}

fn is_ymd_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

fn is_hms_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 8
        && b.iter().enumerate().all(|(i, c)| match i {
            2 | 5 => *c == b':',
            _ => c.is_ascii_digit(),
        })
}

/// Rule 2: `<text> D<xx>,<rest>` → `<text> D,<rest>`, dropping the two-letter
/// ordinal suffix after a one- or two-digit day.
fn try_strip_ordinal(s: &str) -> Option<RuleMatch> {
    for (comma, _) in s.char_indices().filter(|&(_, c)| c == ',').rev() {
        let head = &s[..comma];
        let tail = &s[comma + 1..];
        if tail.is_empty() {
            continue;
        }
        let b = head.as_bytes();
        let n = b.len();
        if n < 2 || !b[n - 1].is_ascii_lowercase() || !b[n - 2].is_ascii_lowercase() {
            continue;
        }
        let suffix_start = n - 2;
        let mut digit_start = suffix_start;
        while digit_start > 0
            && suffix_start - (digit_start - 1) <= 2
            && b[digit_start - 1].is_ascii_digit()
        {
            digit_start -= 1;
        }
        if digit_start == suffix_start {
            continue;
        }
        if digit_start < 2 || b[digit_start - 1] != b' ' {
            continue;
        }
        let day = &head[digit_start..suffix_start];
        let before = &head[..digit_start - 1];
        return Some(RuleMatch::Rewritten(format!("{before} {day},{tail}")));
    }
    None
}

/// Rule 3: `D{1,2}-MM-YYYY` or `YYYY-MM-DD` followed by `[, ]+` and a
/// remainder, reordered to `<month> <day>, <year> <remainder>`.
fn try_dashed_date(s: &str) -> Option<RuleMatch> {
    let sep = s.find([',', ' '])?;
    let head = &s[..sep];
    let rest = s[sep..].trim_start_matches([',', ' ']);
    let mut parts = head.split('-');
    let (a, b, c) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || ![a, b, c].iter().all(|f| all_digits(f)) {
        return None;
    }
    let rewritten = if a.len() <= 2 && b.len() == 2 && c.len() == 4 {
        // day-month-year
        format!("{b} {a}, {c} {rest}")
    } else if a.len() == 4 && b.len() == 2 && c.len() == 2 {
        // year-month-day
        format!("{b} {c}, {a} {rest}")
    } else {
        return None;
    };
    Some(RuleMatch::Rewritten(rewritten))
}

/// Rule 4: one lowercase word of five or more letters, optionally followed by
/// a time starting with a digit, resolved against the day-shortcut aliases.
fn try_day_shortcut(s: &str, locale: &LocaleConfig, anchor: &DateTime<Tz>) -> Option<RuleMatch> {
    let word_end = s.find(|c: char| !c.is_lowercase()).unwrap_or(s.len());
    let word = &s[..word_end];
    if word.chars().count() < 5 {
        return None;
    }
    let time = match &s[word_end..] {
        "" => None,
        separated => {
            let rest = separated.trim_start_matches([',', ' ']);
            if rest.len() == separated.len()
                || rest.len() < 2
                || !rest.as_bytes()[0].is_ascii_digit()
            {
                return None;
            }
            Some(rest)
        }
    };

    let Some(shift) = locale.day_shift(word) else {
        return Some(RuleMatch::Unresolved);
    };
    let date = anchor.date_naive();
    let date = match shift {
        -1 => date.pred_opt(),
        1 => date.succ_opt(),
        _ => Some(date),
    };
    let Some(date) = date else {
        return Some(RuleMatch::Unresolved);
    };

    let rendered = match time {
        Some(t) => format!("{} {}, {} {}", date.month(), date.day(), date.year(), t),
        None => format!("{} {}, {}", date.month(), date.day(), date.year()),
    };
    Some(RuleMatch::Rewritten(rendered))
}

/// Rule 5: the whole input is two or more lowercase words; a match against a
/// singular time-ago phrase resolves a magnitude-one delta.
fn try_time_ago_singular(
    s: &str,
    locale: &LocaleConfig,
    anchor: &DateTime<Tz>,
) -> Option<RuleMatch> {
    let words: Vec<&str> = s.split(' ').collect();
    if words.len() < 2 || !words.iter().all(|w| lowercase_word(w)) {
        return None;
    }
    Some(match locale.singular_unit(s) {
        Some(unit) => resolve_ago(anchor, unit, 1),
        None => RuleMatch::Unresolved,
    })
}

/// Rule 6: digits followed by exactly two words of two or more lowercase
/// letters, matched against the plural time-ago phrases.
fn try_time_ago_prefixed(
    s: &str,
    locale: &LocaleConfig,
    anchor: &DateTime<Tz>,
) -> Option<RuleMatch> {
    let mut words = s.split(' ');
    let (value, first, second) = (words.next()?, words.next()?, words.next()?);
    if words.next().is_some()
        || !all_digits(value)
        || !lowercase_word(first)
        || first.chars().count() < 2
        || !lowercase_word(second)
        || second.chars().count() < 2
    {
        return None;
    }
    let phrase = format!("{first} {second}");
    let magnitude: i64 = value.parse().ok()?;
    Some(match locale.plural_unit(&phrase) {
        Some(unit) => resolve_ago(anchor, unit, magnitude),
        None => RuleMatch::Unresolved,
    })
}

/// Rule 7: one or more words, digits, and a final word of three or more
/// letters; the numeral is replaced by `{value}` before the plural lookup.
fn try_time_ago_infixed(
    s: &str,
    locale: &LocaleConfig,
    anchor: &DateTime<Tz>,
) -> Option<RuleMatch> {
    let words: Vec<&str> = s.split(' ').collect();
    if words.len() < 3 {
        return None;
    }
    let last = words[words.len() - 1];
    let number = words[words.len() - 2];
    let leading = &words[..words.len() - 2];
    if !all_digits(number)
        || !lowercase_word(last)
        || last.chars().count() < 3
        || !leading.iter().all(|w| lowercase_word(w))
    {
        return None;
    }
    let phrase = format!("{} {{value}} {last}", leading.join(" "));
    let magnitude: i64 = number.parse().ok()?;
    Some(match locale.plural_unit(&phrase) {
        Some(unit) => resolve_ago(anchor, unit, magnitude),
        None => RuleMatch::Unresolved,
    })
}

/// Rule 8: a day number and a word tested as a prefix against every month
/// alias, with an optional year and verbatim remainder.
fn try_day_month_name(s: &str, locale: &LocaleConfig, anchor: &DateTime<Tz>) -> Option<RuleMatch> {
    let (day, after_day) = split_leading_digits(s)?;
    let after_day = after_day.strip_prefix(' ')?;
    let word_end = after_day
        .find(|c: char| !c.is_lowercase())
        .unwrap_or(after_day.len());
    if word_end == 0 {
        return None;
    }
    let word = &after_day[..word_end];
    let mut tail = &after_day[word_end..];

    // optional " YYYY": two to four digits ending at a separator or the end
    let mut year: Option<&str> = None;
    if let Some(after_space) = tail.strip_prefix(' ') {
        if let Some((number, after_number)) = split_leading_digits(after_space) {
            if (2..=4).contains(&number.len())
                && (after_number.is_empty() || after_number.starts_with([',', ' ']))
            {
                year = Some(number);
                tail = after_number;
            }
        }
    }

    // optional remainder: separators plus content, kept verbatim
    let rest = if tail.is_empty() {
        ""
    } else {
        let content = tail.trim_start_matches([',', ' ']);
        if content.len() == tail.len() || content.is_empty() {
            return None;
        }
        tail
    };

    match locale.month_by_prefix(word) {
        None => Some(RuleMatch::Unresolved),
        Some((_, canonical)) => {
            let year_text = match year {
                Some(y) => y.to_string(),
                None => anchor.year().to_string(),
            };
            Some(RuleMatch::Rewritten(format!(
                "{day} {canonical} {year_text}{rest}"
            )))
        }
    }
}

fn split_leading_digits(s: &str) -> Option<(&str, &str)> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        None
    } else {
        Some((&s[..end], &s[end..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Warsaw;

    /// Friday 2026-08-07, 14:00 in Warsaw (12:00 UTC).
    fn anchor() -> DateTime<Tz> {
        Warsaw.with_ymd_and_hms(2026, 8, 7, 14, 0, 0).unwrap()
    }

    fn locale() -> LocaleConfig {
        LocaleConfig::default()
    }

    fn text(input: &str) -> String {
        match normalize(input, &locale(), &anchor()) {
            Normalized::Text(t) => t,
            Normalized::Resolved(i) => panic!("unexpectedly resolved {input:?} to {i:?}"),
        }
    }

    fn resolved(input: &str) -> Instant {
        match normalize(input, &locale(), &anchor()) {
            Normalized::Resolved(i) => i,
            Normalized::Text(t) => panic!("expected an instant for {input:?}, got text {t:?}"),
        }
    }

    fn ago(unit: TimeUnit, magnitude: i64) -> Instant {
        let now = Instant::from_millis(anchor().timestamp_millis());
        arith::apply(now, unit, -magnitude, &Warsaw)
    }

    // ── rule 1: SQL separator ───────────────────────────────────────────

    #[test]
    fn test_sql_datetime_gets_t_separator() {
        assert_eq!(text("2014-11-21 13:16:45"), "2014-11-21T13:16:45");
        assert_eq!(text("2014-11-21t13:16:45"), "2014-11-21T13:16:45");
    }

    #[test]
    fn test_sql_datetime_preserves_rest() {
        assert_eq!(text("2014-11-21 13:16:45+01:00"), "2014-11-21T13:16:45+01:00");
        assert_eq!(text("2014-11-21 13:16:45 est"), "2014-11-21T13:16:45 est");
    }

    #[test]
    fn test_short_time_is_not_sql_shape() {
        // single-digit hour falls through to the dashed-date rule
        assert_eq!(text("2014-11-21 1:30"), "11 21, 2014 1:30");
    }

    // ── rule 2: ordinal suffix ──────────────────────────────────────────

    #[test]
    fn test_ordinal_suffix_is_stripped() {
        assert_eq!(
            text("february 23rd, 2014 11:32 pm"),
            "february 23, 2014 11:32 pm"
        );
        assert_eq!(text("july 1st, 2020"), "july 1, 2020");
    }

    #[test]
    fn test_ordinal_needs_comma_and_rest() {
        assert_eq!(text("february 23rd"), "february 23rd");
        assert_eq!(text("february 23rd,"), "february 23rd,");
    }

    // ── rule 3: dashed dates ────────────────────────────────────────────

    #[test]
    fn test_day_month_year_dashes_reorder() {
        assert_eq!(text("20-01-2015, 18:19"), "01 20, 2015 18:19");
        assert_eq!(text("3-01-2015 18:19"), "01 3, 2015 18:19");
    }

    #[test]
    fn test_year_month_day_dashes_reorder() {
        assert_eq!(text("2014-11-21, 1:32"), "11 21, 2014 1:32");
    }

    #[test]
    fn test_bare_dashed_date_passes_through() {
        // no separator and remainder, so the rule does not fire
        assert_eq!(text("2014-11-21"), "2014-11-21");
    }

    // ── rule 4: day shortcuts ───────────────────────────────────────────

    #[test]
    fn test_today_resolves_to_anchor_date() {
        assert_eq!(text("today"), "8 7, 2026");
        assert_eq!(text("dzisiaj"), "8 7, 2026");
    }

    #[test]
    fn test_yesterday_and_tomorrow_shift_the_date() {
        assert_eq!(text("yesterday"), "8 6, 2026");
        assert_eq!(text("wczoraj, 23:01:23"), "8 6, 2026 23:01:23");
        assert_eq!(text("jutro"), "8 8, 2026");
        assert_eq!(text("tomorrow 9:15"), "8 8, 2026 9:15");
    }

    #[test]
    fn test_day_shift_crosses_month_boundary() {
        let first = Warsaw.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();
        let normalized = normalize("yesterday", &locale(), &first);
        assert_eq!(normalized, Normalized::Text("7 31, 2026".into()));
    }

    #[test]
    fn test_unknown_long_word_stops_the_cascade() {
        // shape matched, lookup failed: text is untouched and later rules
        // never run
        assert_eq!(text("gobbledygook"), "gobbledygook");
        assert_eq!(text("wednesday, 23:01"), "wednesday, 23:01");
    }

    // ── rules 5-7: time-ago phrases ─────────────────────────────────────

    #[test]
    fn test_singular_phrase_resolves_one_unit_back() {
        assert_eq!(resolved("hour ago"), ago(TimeUnit::Hour, 1));
        assert_eq!(resolved("godzinę temu"), ago(TimeUnit::Hour, 1));
        assert_eq!(resolved("year ago"), ago(TimeUnit::Year, 1));
        assert_eq!(resolved("rok temu"), ago(TimeUnit::Year, 1));
    }

    #[test]
    fn test_unknown_singular_phrase_passes_through() {
        assert_eq!(text("fortnight ago"), "fortnight ago");
    }

    #[test]
    fn test_plural_phrase_with_leading_numeral() {
        assert_eq!(resolved("20 seconds ago"), ago(TimeUnit::Second, 20));
        assert_eq!(resolved("2 tygodnie temu"), ago(TimeUnit::Week, 2));
        assert_eq!(resolved("120 miesięcy temu"), ago(TimeUnit::Month, 120));
        assert_eq!(resolved("5 lat temu"), ago(TimeUnit::Year, 5));
    }

    #[test]
    fn test_plural_phrase_with_infixed_numeral() {
        let config = LocaleConfig::builder()
            .register_time_ago_phrases(
                &[
                    ("second ago", &["vor einer sekunde"] as &[&str]),
                    ("minute ago", &["vor einer minute"]),
                    ("hour ago", &["vor einer stunde"]),
                    ("day ago", &["vor einem tag"]),
                    ("week ago", &["vor einer woche"]),
                    ("month ago", &["vor einem monat"]),
                    ("year ago", &["vor einem jahr"]),
                ],
                &[
                    ("seconds ago", &["vor {value} sekunden"] as &[&str]),
                    ("minutes ago", &["vor {value} minuten"]),
                    ("hours ago", &["vor {value} stunden"]),
                    ("days ago", &["vor {value} tagen"]),
                    ("weeks ago", &["vor {value} wochen"]),
                    ("months ago", &["vor {value} monaten"]),
                    ("years ago", &["vor {value} jahren"]),
                ],
            )
            .unwrap()
            .build();
        let normalized = normalize("vor 3 tagen", &config, &anchor());
        assert_eq!(normalized, Normalized::Resolved(ago(TimeUnit::Day, 3)));
    }

    #[test]
    fn test_unregistered_infixed_phrase_passes_through() {
        assert_eq!(text("il y a 2 jours"), "il y a 2 jours");
    }

    // ── rule 8: day + month-name prefix ─────────────────────────────────

    #[test]
    fn test_month_name_with_year_and_time() {
        assert_eq!(text("23 luty 2014, 12:00"), "23 february 2014, 12:00");
    }

    #[test]
    fn test_month_name_without_year_uses_anchor_year() {
        assert_eq!(text("23 wrzesień, 14:50"), "23 september 2026, 14:50");
        assert_eq!(text("27 sie"), "27 august 2026");
    }

    #[test]
    fn test_unknown_month_name_passes_through() {
        assert_eq!(text("23 janvier 2014"), "23 janvier 2014");
    }

    #[test]
    fn test_five_digit_trailing_number_is_kept_as_remainder() {
        assert_eq!(text("23 luty 20145"), "23 february 2026 20145");
    }

    // ── cascade precedence ──────────────────────────────────────────────

    #[test]
    fn test_plural_time_ago_wins_over_month_prefix() {
        // "2 tygodnie temu" also fits the day-plus-word shape of rule 8, but
        // rule 6 runs first
        assert_eq!(resolved("2 tygodnie temu"), ago(TimeUnit::Week, 2));
    }

    #[test]
    fn test_unmatched_input_is_untouched() {
        assert_eq!(text(""), "");
        assert_eq!(text("february 23, 2014 11:32 pm"), "february 23, 2014 11:32 pm");
    }
}
