//! Locale phrase configuration.
//!
//! [`LocaleConfig`] is an immutable snapshot of every month name, day-shortcut
//! word, and "time ago" phrase the normalizer recognizes. English and Polish
//! are built in; further languages are added through [`LocaleBuilder`] before
//! the parser is constructed. Once built, a config is never mutated, so a
//! parser holding one can be shared freely between threads.
//!
//! Alias lists keep registration order and lookups take the first match in
//! that order: months are scanned 1 through 12, and within a month its aliases
//! oldest first. This ordering is part of the contract.

use crate::arith::TimeUnit;
use crate::error::{DateError, Result};

#[derive(Debug, Clone)]
pub struct LocaleConfig {
    months: [Vec<String>; 12],
    /// Aliases for yesterday, today, tomorrow, in that order.
    days: [Vec<String>; 3],
    singular: [Vec<String>; 7],
    plural: [Vec<String>; 7],
}

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn seeded() -> LocaleConfig {
    LocaleConfig {
        months: [
            list(&["january", "styczeń"]),
            list(&["february", "luty"]),
            list(&["march", "marzec"]),
            list(&["april", "kwiecień"]),
            list(&["may", "maj"]),
            list(&["june", "czerwiec"]),
            list(&["july", "lipiec"]),
            list(&["august", "sierpień"]),
            list(&["september", "wrzesień"]),
            list(&["october", "październik"]),
            list(&["november", "listopad"]),
            list(&["december", "grudzień"]),
        ],
        days: [
            list(&["yesterday", "wczoraj"]),
            list(&["today", "dzisiaj"]),
            list(&["tomorrow", "jutro"]),
        ],
        singular: [
            list(&["second ago", "sekundę temu"]),
            list(&["minute ago", "minutę temu"]),
            list(&["hour ago", "godzinę temu"]),
            list(&["day ago", "dzień temu"]),
            list(&["week ago", "tydzień temu"]),
            list(&["month ago", "miesiąc temu"]),
            list(&["year ago", "rok temu"]),
        ],
        plural: [
            list(&["seconds ago", "sekundy temu", "sekund temu"]),
            list(&["minutes ago", "minuty temu", "minut temu"]),
            list(&["hours ago", "godziny temu", "godzin temu"]),
            list(&["days ago", "dni temu"]),
            list(&["weeks ago", "tygodnie temu", "tygodni temu"]),
            list(&["months ago", "miesiące temu", "miesięcy temu"]),
            list(&["years ago", "lata temu", "lat temu"]),
        ],
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        seeded()
    }
}

impl LocaleConfig {
    /// Starts a builder seeded with the English and Polish defaults.
    pub fn builder() -> LocaleBuilder {
        LocaleBuilder { config: seeded() }
    }

    /// Day shift (−1, 0, +1) for a yesterday/today/tomorrow alias.
    pub(crate) fn day_shift(&self, word: &str) -> Option<i32> {
        self.days
            .iter()
            .position(|aliases| aliases.iter().any(|a| a == word))
            .map(|index| index as i32 - 1)
    }

    /// First month whose alias list contains an alias starting with `word`,
    /// together with that month's first registered alias.
    pub(crate) fn month_by_prefix(&self, word: &str) -> Option<(u32, &str)> {
        self.months.iter().enumerate().find_map(|(index, aliases)| {
            if aliases.iter().any(|a| a.starts_with(word)) {
                Some((index as u32 + 1, aliases.first()?.as_str()))
            } else {
                None
            }
        })
    }

    pub(crate) fn singular_unit(&self, phrase: &str) -> Option<TimeUnit> {
        Self::unit_for(&self.singular, phrase)
    }

    pub(crate) fn plural_unit(&self, phrase: &str) -> Option<TimeUnit> {
        Self::unit_for(&self.plural, phrase)
    }

    fn unit_for(table: &[Vec<String>; 7], phrase: &str) -> Option<TimeUnit> {
        TimeUnit::ALL
            .into_iter()
            .zip(table.iter())
            .find(|(_, aliases)| aliases.iter().any(|a| a == phrase))
            .map(|(unit, _)| unit)
    }
}

/// Builds a [`LocaleConfig`].
///
/// Registration is additive and atomic: a call either registers everything it
/// was given or fails with [`DateError::InvalidConfig`] and registers nothing.
/// Supplied names and phrases are lowercased before storage.
#[derive(Debug, Clone)]
pub struct LocaleBuilder {
    config: LocaleConfig,
}

impl Default for LocaleBuilder {
    fn default() -> Self {
        LocaleConfig::builder()
    }
}

impl LocaleBuilder {
    pub fn new() -> Self {
        LocaleConfig::builder()
    }

    /// Registers the month names of another language, one per month in
    /// calendar order.
    ///
    /// # Errors
    ///
    /// Fails unless exactly twelve non-empty names are supplied.
    pub fn register_month_names<S: AsRef<str>>(mut self, names: &[S]) -> Result<Self> {
        if names.len() != 12 {
            return Err(DateError::InvalidConfig(format!(
                "month registration needs names for all 12 months, got {}",
                names.len()
            )));
        }
        for (index, name) in names.iter().enumerate() {
            if name.as_ref().is_empty() {
                return Err(DateError::InvalidConfig(format!(
                    "empty name for month number {}",
                    index + 1
                )));
            }
        }
        for (aliases, name) in self.config.months.iter_mut().zip(names) {
            aliases.push(name.as_ref().to_lowercase());
        }
        Ok(self)
    }

    /// Registers the day-shortcut words of another language.
    ///
    /// # Errors
    ///
    /// Fails when any of the three names is empty.
    pub fn register_day_names(
        mut self,
        yesterday: &str,
        today: &str,
        tomorrow: &str,
    ) -> Result<Self> {
        const KEYS: [&str; 3] = ["yesterday", "today", "tomorrow"];
        let names = [yesterday, today, tomorrow];
        for (key, name) in KEYS.iter().zip(names) {
            if name.is_empty() {
                return Err(DateError::InvalidConfig(format!(
                    "missing name for \"{key}\" day"
                )));
            }
        }
        for (aliases, name) in self.config.days.iter_mut().zip(names) {
            aliases.push(name.to_lowercase());
        }
        Ok(self)
    }

    /// Registers "time ago" phrases for another language.
    ///
    /// Both maps must cover all seven canonical English keys (`"second ago"`
    /// through `"year ago"`, and `"seconds ago"` through `"years ago"`); each
    /// key maps to one or more phrases. A plural phrase may carry a `{value}`
    /// placeholder where the language splices the numeral mid-phrase, as in
    /// `"vor {value} tagen"`. Duplicate phrases are skipped and unknown keys
    /// ignored.
    ///
    /// # Errors
    ///
    /// Fails when either map is missing a canonical key.
    pub fn register_time_ago_phrases(
        mut self,
        singular: &[(&str, &[&str])],
        plural: &[(&str, &[&str])],
    ) -> Result<Self> {
        let singular_rows = collect_phrases(singular, TimeUnit::singular_phrase, "singular")?;
        let plural_rows = collect_phrases(plural, TimeUnit::plural_phrase, "plural")?;
        append_phrases(&mut self.config.singular, singular_rows);
        append_phrases(&mut self.config.plural, plural_rows);
        Ok(self)
    }

    /// Finalizes the configuration.
    pub fn build(self) -> LocaleConfig {
        self.config
    }
}

fn collect_phrases(
    supplied: &[(&str, &[&str])],
    key_of: fn(TimeUnit) -> &'static str,
    kind: &str,
) -> Result<[Vec<String>; 7]> {
    let mut rows: [Vec<String>; 7] = Default::default();
    for (unit, row) in TimeUnit::ALL.into_iter().zip(rows.iter_mut()) {
        let key = key_of(unit);
        let phrases = supplied
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .ok_or_else(|| {
                DateError::InvalidConfig(format!("missing {kind} phrase for \"{key}\""))
            })?;
        row.extend(phrases.iter().map(|p| p.to_lowercase()));
    }
    Ok(rows)
}

fn append_phrases(table: &mut [Vec<String>; 7], rows: [Vec<String>; 7]) {
    for (aliases, row) in table.iter_mut().zip(rows) {
        for phrase in row {
            if !aliases.contains(&phrase) {
                aliases.push(phrase);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn german_singular() -> Vec<(&'static str, &'static [&'static str])> {
        vec![
            ("second ago", &["vor einer Sekunde"] as &[&str]),
            ("minute ago", &["vor einer Minute"]),
            ("hour ago", &["vor einer Stunde"]),
            ("day ago", &["vor einem Tag"]),
            ("week ago", &["vor einer Woche"]),
            ("month ago", &["vor einem Monat"]),
            ("year ago", &["vor einem Jahr"]),
        ]
    }

    fn german_plural() -> Vec<(&'static str, &'static [&'static str])> {
        vec![
            ("seconds ago", &["vor {value} sekunden"] as &[&str]),
            ("minutes ago", &["vor {value} minuten"]),
            ("hours ago", &["vor {value} stunden"]),
            ("days ago", &["vor {value} tagen"]),
            ("weeks ago", &["vor {value} wochen"]),
            ("months ago", &["vor {value} monaten"]),
            ("years ago", &["vor {value} jahren"]),
        ]
    }

    #[test]
    fn test_default_day_shifts() {
        let config = LocaleConfig::default();
        assert_eq!(config.day_shift("yesterday"), Some(-1));
        assert_eq!(config.day_shift("wczoraj"), Some(-1));
        assert_eq!(config.day_shift("today"), Some(0));
        assert_eq!(config.day_shift("jutro"), Some(1));
        assert_eq!(config.day_shift("mañana"), None);
    }

    #[test]
    fn test_month_prefix_lookup() {
        let config = LocaleConfig::default();
        assert_eq!(config.month_by_prefix("sie"), Some((8, "august")));
        assert_eq!(config.month_by_prefix("luty"), Some((2, "february")));
        assert_eq!(config.month_by_prefix("wrzesień"), Some((9, "september")));
        assert_eq!(config.month_by_prefix("janvier"), None);
    }

    #[test]
    fn test_month_scan_order_first_match_wins() {
        // "ma" is a prefix of both "march"/"marzec" (3) and "may"/"maj" (5);
        // the lower month number wins
        let config = LocaleConfig::default();
        assert_eq!(config.month_by_prefix("ma"), Some((3, "march")));
    }

    #[test]
    fn test_default_time_ago_units() {
        let config = LocaleConfig::default();
        assert_eq!(config.singular_unit("hour ago"), Some(TimeUnit::Hour));
        assert_eq!(config.singular_unit("godzinę temu"), Some(TimeUnit::Hour));
        assert_eq!(config.plural_unit("tygodnie temu"), Some(TimeUnit::Week));
        assert_eq!(config.plural_unit("tygodni temu"), Some(TimeUnit::Week));
        assert_eq!(config.plural_unit("hour ago"), None);
    }

    #[test]
    fn test_register_month_names() {
        let config = LocaleConfig::builder()
            .register_month_names(&[
                "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August",
                "September", "Oktober", "November", "Dezember",
            ])
            .unwrap()
            .build();
        assert_eq!(config.month_by_prefix("märz"), Some((3, "march")));
        // defaults survive registration
        assert_eq!(config.month_by_prefix("marzec"), Some((3, "march")));
    }

    #[test]
    fn test_register_month_names_requires_twelve() {
        let result = LocaleConfig::builder().register_month_names(&["Januar", "Februar"]);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("12 months"), "got: {message}");
    }

    #[test]
    fn test_register_month_names_rejects_empty_name() {
        let names = [
            "Januar", "Februar", "", "April", "Mai", "Juni", "Juli", "August", "September",
            "Oktober", "November", "Dezember",
        ];
        let result = LocaleConfig::builder().register_month_names(&names);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("month number 3"), "got: {message}");
    }

    #[test]
    fn test_register_day_names() {
        let config = LocaleConfig::builder()
            .register_day_names("Gestern", "Heute", "Morgen")
            .unwrap()
            .build();
        assert_eq!(config.day_shift("gestern"), Some(-1));
        assert_eq!(config.day_shift("heute"), Some(0));
        assert_eq!(config.day_shift("morgen"), Some(1));
        assert_eq!(config.day_shift("yesterday"), Some(-1));
    }

    #[test]
    fn test_register_day_names_rejects_empty() {
        let result = LocaleConfig::builder().register_day_names("gestern", "", "morgen");
        let message = result.unwrap_err().to_string();
        assert!(message.contains("\"today\""), "got: {message}");
    }

    #[test]
    fn test_register_time_ago_phrases() {
        let config = LocaleConfig::builder()
            .register_time_ago_phrases(&german_singular(), &german_plural())
            .unwrap()
            .build();
        assert_eq!(config.singular_unit("vor einem tag"), Some(TimeUnit::Day));
        assert_eq!(config.plural_unit("vor {value} tagen"), Some(TimeUnit::Day));
        // Polish defaults still present
        assert_eq!(config.plural_unit("lat temu"), Some(TimeUnit::Year));
    }

    #[test]
    fn test_register_time_ago_phrases_missing_key() {
        let mut plural = german_plural();
        plural.retain(|(key, _)| *key != "weeks ago");
        let result =
            LocaleConfig::builder().register_time_ago_phrases(&german_singular(), &plural);
        let message = result.unwrap_err().to_string();
        assert!(
            message.contains("plural phrase for \"weeks ago\""),
            "got: {message}"
        );
    }

    #[test]
    fn test_register_time_ago_phrases_skips_duplicates() {
        let config = LocaleConfig::builder()
            .register_time_ago_phrases(&german_singular(), &german_plural())
            .unwrap()
            .register_time_ago_phrases(&german_singular(), &german_plural())
            .unwrap()
            .build();
        let count = config
            .singular
            .iter()
            .flat_map(|aliases| aliases.iter())
            .filter(|a| *a == "vor einem tag")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_failed_registration_leaves_nothing_behind() {
        // a failing call must not have touched the singular table either
        let mut plural = german_plural();
        plural.retain(|(key, _)| *key != "years ago");
        let builder = LocaleConfig::builder();
        let result = builder
            .clone()
            .register_time_ago_phrases(&german_singular(), &plural);
        assert!(result.is_err());
        let config = builder.build();
        assert_eq!(config.singular_unit("vor einem tag"), None);
    }
}
