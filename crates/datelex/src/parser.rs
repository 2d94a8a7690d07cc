//! The parsing façade.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::Result;
use crate::format::FormatKind;
use crate::instant::Instant;
use crate::locale::LocaleConfig;
use crate::normalize::{self, Normalized};
use crate::offset;
use crate::{arith, datetime, format};

/// Parses free-form date text against a locale snapshot and an evaluating
/// timezone.
///
/// A parser owns an immutable [`LocaleConfig`]; build one per locale set and
/// share it freely. Zone-less input reads as wall-clock time in `zone`, and
/// relative phrases resolve against an anchor — the current time for
/// [`parse`](Self::parse), caller-supplied for [`parse_at`](Self::parse_at).
///
/// # Examples
///
/// ```
/// use datelex::DateParser;
/// use datelex::locale::LocaleConfig;
///
/// let parser = DateParser::new(LocaleConfig::default(), chrono_tz::Europe::Warsaw);
/// let instant = parser.parse("20-01-2015, 18:19", None).unwrap();
/// assert_eq!(
///     parser.format(instant, "iso", false).unwrap(),
///     "2015-01-20T18:19:00+01:00"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DateParser {
    locale: LocaleConfig,
    zone: Tz,
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new(LocaleConfig::default(), Tz::UTC)
    }
}

impl DateParser {
    pub fn new(locale: LocaleConfig, zone: Tz) -> Self {
        Self { locale, zone }
    }

    /// The evaluating timezone.
    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Parses date text into an instant, relative phrases resolving against
    /// the current time.
    ///
    /// `override_zone` asserts the wall-clock zone the text was written in:
    /// `"UTC"`, `"Z"`, or an offset between `-12:00` and `+12:00`. Any zone
    /// designator already trailing the text is then discarded in its favor.
    ///
    /// # Errors
    ///
    /// [`crate::DateError::InvalidTimezone`] for a malformed `override_zone`;
    /// [`crate::DateError::InvalidDate`], carrying the input text, when the
    /// text cannot be resolved to a real instant.
    pub fn parse(&self, text: &str, override_zone: Option<&str>) -> Result<Instant> {
        self.parse_at(text, override_zone, Utc::now())
    }

    /// Like [`parse`](Self::parse), with an explicit anchor for deterministic
    /// resolution of day shortcuts and time-ago phrases.
    pub fn parse_at(
        &self,
        text: &str,
        override_zone: Option<&str>,
        anchor: DateTime<Utc>,
    ) -> Result<Instant> {
        let override_offset = override_zone.map(offset::parse_offset).transpose()?;
        let trimmed = text.trim().to_lowercase();
        let local_anchor = anchor.with_timezone(&self.zone);

        match normalize::normalize(&trimmed, &self.locale, &local_anchor) {
            Normalized::Resolved(instant) => Ok(instant),
            Normalized::Text(canonical) => {
                datetime::parse_instant(&canonical, override_offset, &self.zone, text)
            }
        }
    }

    /// Applies a delta such as `"2 days"` or `"3 weeks ago"` to an instant;
    /// see [`crate::arith::modify`].
    pub fn modify(&self, instant: Instant, modifier: &str) -> Result<Instant> {
        arith::modify(instant, modifier, &self.zone)
    }

    /// Renders an instant. `kind` is one of `"date"`, `"datetime"`, `"time"`,
    /// `"iso"`; with `utc` set, rendering uses UTC instead of the parser zone.
    ///
    /// # Errors
    ///
    /// [`crate::DateError::InvalidFormat`] for an unrecognized kind.
    pub fn format(&self, instant: Instant, kind: &str, utc: bool) -> Result<String> {
        let kind: FormatKind = kind.parse()?;
        Ok(format::render(instant, kind, &self.zone, utc))
    }
}
