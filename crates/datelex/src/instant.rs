//! The `Instant` value type.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::arith;
use crate::error::Result;
use crate::format::{self, FormatKind};

/// An absolute point in time, counted in milliseconds since the Unix epoch.
///
/// `Instant` is a plain immutable value: parsing, arithmetic, and timestamp
/// conversion all produce new values. Millisecond counts outside the range the
/// calendar can represent saturate at the range bounds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Instant(i64);

impl Instant {
    /// Creates an instant from epoch milliseconds.
    pub fn from_millis(millis: i64) -> Self {
        let min = DateTime::<Utc>::MIN_UTC.timestamp_millis();
        let max = DateTime::<Utc>::MAX_UTC.timestamp_millis();
        Self(millis.clamp(min, max))
    }

    /// Creates an instant from a Unix timestamp in seconds.
    pub fn from_timestamp(seconds: i64) -> Self {
        Self::from_millis(seconds.saturating_mul(1000))
    }

    /// Epoch milliseconds.
    pub fn millis(self) -> i64 {
        self.0
    }

    /// Unix timestamp in seconds, floored.
    pub fn timestamp(self) -> i64 {
        self.0.div_euclid(1000)
    }

    /// Applies a textual delta such as `"2 days"`, `"-1 hour"` or
    /// `"3 weeks ago"`. Month and year deltas walk real calendar boundaries
    /// in `zone`; see [`crate::arith::modify`].
    pub fn modify(self, modifier: &str, zone: &Tz) -> Result<Self> {
        arith::modify(self, modifier, zone)
    }

    /// Renders the instant in `zone`, or in UTC when `utc` is set.
    pub fn format(self, kind: FormatKind, zone: &Tz, utc: bool) -> String {
        format::render(self, kind, zone, utc)
    }

    pub(crate) fn to_utc(self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    pub(crate) fn to_zoned(self, zone: &Tz) -> DateTime<Tz> {
        self.to_utc().with_timezone(zone)
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_millis(datetime.timestamp_millis())
    }
}
