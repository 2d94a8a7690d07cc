//! # datelex
//!
//! Locale-aware parsing of loosely structured date text.
//!
//! Free-form expressions — SQL-style timestamps, `"February 23rd, 2014 11:32
//! PM"`, dashed dates, day shortcuts like `"yesterday"`, and "time ago"
//! phrases in any registered language — are rewritten by an ordered rule
//! cascade into a canonical shape and parsed into an exact [`Instant`].
//! The inverse direction renders instants as date, time, datetime, or
//! offset-qualified iso text, and calendar-aware arithmetic walks real month
//! and year boundaries.
//!
//! English and Polish phrases are built in; other languages are registered
//! through [`locale::LocaleBuilder`] before constructing a [`DateParser`].
//!
//! ## Modules
//!
//! - [`parser`] — [`DateParser`], the parsing façade
//! - [`locale`] — immutable locale phrase configuration
//! - [`instant`] — the epoch-millisecond [`Instant`] value type
//! - [`arith`] — calendar-aware deltas ([`modify`])
//! - [`format`] — text renderings ([`render`], [`FormatKind`])
//! - [`offset`] — timezone offset designators ([`parse_offset`])
//! - [`calendar`] — month-name lookups and date-range generation
//! - [`error`] — error types
//!
//! # Example
//!
//! ```
//! use datelex::{DateParser, locale::LocaleConfig};
//!
//! let parser = DateParser::new(LocaleConfig::default(), chrono_tz::Europe::Warsaw);
//!
//! let instant = parser.parse("February 23rd, 2014 11:32 PM", None).unwrap();
//! assert_eq!(
//!     parser.format(instant, "iso", false).unwrap(),
//!     "2014-02-23T23:32:00+01:00"
//! );
//!
//! let later = parser.modify(instant, "2 weeks").unwrap();
//! assert_eq!(parser.format(later, "date", false).unwrap(), "2014-03-09");
//! ```

pub mod arith;
pub mod calendar;
mod datetime;
pub mod error;
pub mod format;
pub mod instant;
pub mod locale;
mod normalize;
pub mod offset;
pub mod parser;

pub use arith::{modify, TimeUnit};
pub use calendar::{date_range, month_name, month_number};
pub use error::{DateError, Result};
pub use format::{render, FormatKind};
pub use instant::Instant;
pub use locale::{LocaleBuilder, LocaleConfig};
pub use offset::{parse_offset, UtcOffset};
pub use parser::DateParser;
