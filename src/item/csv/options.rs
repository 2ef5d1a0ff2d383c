use serde::{Deserialize, Serialize};

use crate::{core::locale::Locale, error::CodecError};

/// Quote character used when none is configured.
pub const DEFAULT_QUOTE: char = '"';

/// Per-call codec settings.
///
/// Options are never mutated by the codec. They derive serde so applications
/// can keep them in their own configuration files.
///
/// # Default Configuration
///
/// - Separator: comma (,)
/// - Quote: none, meaning fields are quoted with `"` only when necessary
/// - Locale: invariant
/// - Injection sanitization: enabled
/// - Headers: enabled
///
/// # Examples
///
/// ```
/// use csv_record_codec::{CsvOptions, Locale};
///
/// let options = CsvOptions::new()
///     .separator(';')
///     .quote('"')
///     .locale(Locale::from_name("de-DE").unwrap());
///
/// assert!(options.always_quote());
/// assert_eq!(options.quote_char(), '"');
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub separator: char,
    /// `Some(c)` quotes every field with `c`.
    pub quote: Option<char>,
    pub locale: Locale,
    pub sanitize_for_injection: bool,
    pub has_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            separator: ',',
            quote: None,
            locale: Locale::invariant(),
            sanitize_for_injection: true,
            has_headers: true,
        }
    }
}

impl CsvOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Quotes every field with `quote`.
    pub fn quote(mut self, quote: char) -> Self {
        self.quote = Some(quote);
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn sanitize_for_injection(mut self, yes: bool) -> Self {
        self.sanitize_for_injection = yes;
        self
    }

    pub fn has_headers(mut self, yes: bool) -> Self {
        self.has_headers = yes;
        self
    }

    /// The quote character in effect for both writing and reading.
    pub fn quote_char(&self) -> char {
        self.quote.unwrap_or(DEFAULT_QUOTE)
    }

    pub fn always_quote(&self) -> bool {
        self.quote.is_some()
    }

    /// Rejects separator and quote combinations that cannot be parsed back.
    pub fn validate(&self) -> Result<(), CodecError> {
        let quote = self.quote_char();
        if matches!(self.separator, '\r' | '\n') {
            return Err(CodecError::InvalidArgument(
                "separator cannot be a line break".to_string(),
            ));
        }
        if matches!(quote, '\r' | '\n') {
            return Err(CodecError::InvalidArgument(
                "quote cannot be a line break".to_string(),
            ));
        }
        if self.separator == quote {
            return Err(CodecError::InvalidArgument(format!(
                "separator and quote are both '{}'",
                quote
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_quote_only_when_necessary() {
        let options = CsvOptions::default();
        assert_eq!(options.separator, ',');
        assert!(!options.always_quote());
        assert_eq!(options.quote_char(), '"');
        assert!(options.sanitize_for_injection);
        assert!(options.has_headers);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn clashing_separator_and_quote_are_rejected() {
        let options = CsvOptions::new().separator('"');
        assert!(matches!(
            options.validate(),
            Err(CodecError::InvalidArgument(_))
        ));
        assert!(CsvOptions::new().separator('\n').validate().is_err());
        assert!(CsvOptions::new().quote('\r').validate().is_err());
    }

    #[test]
    fn options_load_from_partial_json() {
        let options: CsvOptions =
            serde_json::from_str(r#"{ "separator": ";", "quote": "'" }"#).unwrap();
        assert_eq!(options.separator, ';');
        assert_eq!(options.quote, Some('\''));
        assert!(options.locale.is_invariant());
        assert!(options.has_headers);
    }
}
