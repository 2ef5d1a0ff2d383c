use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Culture-specific rules for formatting numbers and dates.
///
/// The invariant locale uses `.` as decimal separator and ISO-8601 dates.
///
/// # Examples
///
/// ```
/// use csv_record_codec::Locale;
///
/// let polish = Locale::from_name("pl-PL").unwrap();
/// assert_eq!(polish.decimal_separator(), ',');
///
/// let custom = Locale::invariant()
///     .with_name("x-ledger")
///     .with_decimal_separator(',')
///     .with_group_separator(Some('.'));
/// assert_eq!(custom.group_separator(), Some('.'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    name: String,
    decimal_separator: char,
    group_separator: Option<char>,
    date_format: String,
    date_time_format: String,
}

/// Built-in cultures: (name, decimal, group, date, date-time).
const KNOWN: &[(&str, char, Option<char>, &str, &str)] = &[
    ("en-US", '.', Some(','), "%m/%d/%Y", "%m/%d/%Y %H:%M:%S"),
    ("en-GB", '.', Some(','), "%d/%m/%Y", "%d/%m/%Y %H:%M:%S"),
    ("pl-PL", ',', Some('\u{a0}'), "%d.%m.%Y", "%d.%m.%Y %H:%M:%S"),
    ("de-DE", ',', Some('.'), "%d.%m.%Y", "%d.%m.%Y %H:%M:%S"),
    ("fr-FR", ',', Some('\u{202f}'), "%d/%m/%Y", "%d/%m/%Y %H:%M:%S"),
];

impl Locale {
    /// The culture-neutral locale used when none is given.
    pub fn invariant() -> Self {
        Self {
            name: String::new(),
            decimal_separator: '.',
            group_separator: Some(','),
            date_format: "%Y-%m-%d".to_string(),
            date_time_format: "%Y-%m-%dT%H:%M:%S%.f".to_string(),
        }
    }

    /// Looks up a built-in culture by identifier such as `pl-PL`, `pl_pl` or `pl`.
    ///
    /// An empty name or `invariant` gives [`Locale::invariant`].
    pub fn from_name(name: &str) -> Result<Self, CodecError> {
        let wanted = name.trim().replace('_', "-");
        if wanted.is_empty() || wanted.eq_ignore_ascii_case("invariant") {
            return Ok(Self::invariant());
        }

        let found = KNOWN.iter().find(|(known, ..)| {
            known.eq_ignore_ascii_case(&wanted)
                || known
                    .split('-')
                    .next()
                    .is_some_and(|language| language.eq_ignore_ascii_case(&wanted))
        });

        match found {
            Some(&(known, decimal, group, date, date_time)) => Ok(Self {
                name: known.to_string(),
                decimal_separator: decimal,
                group_separator: group,
                date_format: date.to_string(),
                date_time_format: date_time.to_string(),
            }),
            None => Err(CodecError::InvalidArgument(format!(
                "unknown locale '{}'",
                name
            ))),
        }
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn group_separator(&self) -> Option<char> {
        self.group_separator
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn date_time_format(&self) -> &str {
        &self.date_time_format
    }

    pub fn identifier(&self) -> &str {
        &self.name
    }

    pub fn is_invariant(&self) -> bool {
        *self == Self::invariant()
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Overrides the decimal separator.
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Overrides the digit grouping separator, `None` to disable grouping.
    pub fn with_group_separator(mut self, separator: Option<char>) -> Self {
        self.group_separator = separator;
        self
    }

    /// Overrides the default date pattern (chrono strftime syntax).
    pub fn with_date_format(mut self, pattern: &str) -> Self {
        self.date_format = pattern.to_string();
        self
    }

    /// Overrides the default date-time pattern (chrono strftime syntax).
    pub fn with_date_time_format(mut self, pattern: &str) -> Self {
        self.date_time_format = pattern.to_string();
        self
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::invariant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_matched_loosely() {
        assert_eq!(Locale::from_name("PL-pl").unwrap().identifier(), "pl-PL");
        assert_eq!(Locale::from_name("de_de").unwrap().identifier(), "de-DE");
        assert_eq!(Locale::from_name("fr").unwrap().identifier(), "fr-FR");
        assert!(Locale::from_name("").unwrap().is_invariant());
        assert!(Locale::from_name("Invariant").unwrap().is_invariant());
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!(matches!(
            Locale::from_name("xx-YY"),
            Err(CodecError::InvalidArgument(_))
        ));
    }

    #[test]
    fn builder_overrides_rules() {
        let locale = Locale::invariant()
            .with_name("custom")
            .with_decimal_separator(',')
            .with_group_separator(None)
            .with_date_format("%Y%m%d");

        assert_eq!(locale.identifier(), "custom");
        assert_eq!(locale.decimal_separator(), ',');
        assert_eq!(locale.group_separator(), None);
        assert_eq!(locale.date_format(), "%Y%m%d");
        assert!(!locale.is_invariant());
    }
}
