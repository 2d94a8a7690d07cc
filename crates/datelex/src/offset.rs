//! Timezone offset designators.

use std::fmt;

use crate::error::{DateError, Result};

/// A fixed UTC offset in signed minutes east, between −12:00 and +12:00.
///
/// The minutes component is always below 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcOffset(i32);

impl UtcOffset {
    pub const UTC: Self = Self(0);

    /// Total signed minutes east of UTC.
    pub fn minutes(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 >= 0 { '+' } else { '-' };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{:02}:{:02}", abs / 60, abs % 60)
    }
}

/// Parses a timezone designator into a [`UtcOffset`].
///
/// Accepts `"UTC"` in any case or the literal `"Z"`, both meaning zero, and
/// otherwise requires the exact shape `[+-]HH:MM` within −12:00..+12:00.
///
/// # Errors
///
/// Returns [`DateError::InvalidTimezone`] for any other shape or an offset
/// outside the permitted range.
pub fn parse_offset(text: &str) -> Result<UtcOffset> {
    if text.eq_ignore_ascii_case("utc") || text == "Z" {
        return Ok(UtcOffset::UTC);
    }

    let invalid = || DateError::InvalidTimezone(format!("\"{text}\""));

    let b = text.as_bytes();
    let shaped = b.len() == 6
        && (b[0] == b'+' || b[0] == b'-')
        && b[1].is_ascii_digit()
        && b[2].is_ascii_digit()
        && b[3] == b':'
        && b[4].is_ascii_digit()
        && b[5].is_ascii_digit();
    if !shaped {
        return Err(invalid());
    }

    let hours = i32::from(b[1] - b'0') * 10 + i32::from(b[2] - b'0');
    let minutes = i32::from(b[4] - b'0') * 10 + i32::from(b[5] - b'0');
    if minutes >= 60 {
        return Err(invalid());
    }
    let total = hours * 60 + minutes;
    if total > 720 {
        return Err(invalid());
    }

    Ok(UtcOffset(if b[0] == b'-' { -total } else { total }))
}
