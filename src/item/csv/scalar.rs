use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    core::{
        locale::Locale,
        record::{SemanticType, Value},
    },
    error::CodecError,
};

/// Formats a single value as text under `locale`.
///
/// `hint` overrides the locale pattern for dates and, written as `.N`, fixes
/// the number of decimals for floating values. Integers are never grouped.
pub fn format(value: &Value, locale: &Locale, hint: Option<&str>) -> Result<String, CodecError> {
    let text = match value {
        Value::Null => String::new(),
        Value::String(s) | Value::Nested(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Floating(f) => format_floating(*f, locale, hint)?,
        Value::Date(d) => format_pattern(d.format(hint.unwrap_or(locale.date_format())))?,
        Value::DateTime(d) => {
            format_pattern(d.format(hint.unwrap_or(locale.date_time_format())))?
        }
    };
    Ok(text)
}

fn format_floating(value: f64, locale: &Locale, hint: Option<&str>) -> Result<String, CodecError> {
    let text = match hint {
        Some(hint) => {
            let precision = precision(hint)?;
            format!("{:.*}", precision, value)
        }
        None => value.to_string(),
    };

    if locale.decimal_separator() == '.' {
        Ok(text)
    } else {
        Ok(text.replace('.', &locale.decimal_separator().to_string()))
    }
}

fn precision(hint: &str) -> Result<usize, CodecError> {
    hint.strip_prefix('.')
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| {
            CodecError::InvalidArgument(format!("invalid floating format hint '{}'", hint))
        })
}

fn format_pattern(formatted: impl std::fmt::Display) -> Result<String, CodecError> {
    let mut text = String::new();
    write!(text, "{}", formatted)
        .map_err(|_| CodecError::InvalidArgument("invalid date format pattern".to_string()))?;
    Ok(text)
}

/// Parses a single token as `semantic_type` under `locale`.
///
/// An empty token yields `Value::Null` for nullable fields and the type's
/// default value otherwise. Nested records cannot be parsed.
pub fn parse(
    token: &str,
    semantic_type: SemanticType,
    nullable: bool,
    locale: &Locale,
    hint: Option<&str>,
) -> Result<Value, CodecError> {
    // Callers report nesting with the column name before reaching here.
    if semantic_type == SemanticType::Nested {
        return Err(CodecError::UnsupportedNesting {
            field: String::new(),
        });
    }

    if token.is_empty() {
        if nullable {
            return Ok(Value::Null);
        }
        if let Some(default) = semantic_type.default_value() {
            return Ok(default);
        }
    }

    let malformed = || CodecError::ScalarFormat {
        token: token.to_string(),
        expected: semantic_type,
    };

    match semantic_type {
        SemanticType::String => Ok(Value::String(token.to_string())),
        SemanticType::Integer => token
            .trim()
            .parse::<i128>()
            .map(Value::Integer)
            .map_err(|_| malformed()),
        SemanticType::Floating => parse_floating(token, locale)
            .map(Value::Floating)
            .ok_or_else(malformed),
        SemanticType::Boolean => match token.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Value::Boolean(true)),
            "false" | "0" => Ok(Value::Boolean(false)),
            _ => Err(malformed()),
        },
        SemanticType::Date => {
            let pattern = hint.unwrap_or(locale.date_format());
            NaiveDate::parse_from_str(token.trim(), pattern)
                .map(Value::Date)
                .map_err(|_| malformed())
        }
        SemanticType::DateTime => {
            let pattern = hint.unwrap_or(locale.date_time_format());
            NaiveDateTime::parse_from_str(token.trim(), pattern)
                .map(Value::DateTime)
                .map_err(|_| malformed())
        }
        SemanticType::Nested => Err(malformed()),
    }
}

/// Normalizes a locale-formatted number to Rust syntax before parsing.
fn parse_floating(token: &str, locale: &Locale) -> Option<f64> {
    let decimal = locale.decimal_separator();
    let group = locale.group_separator().filter(|&g| g != decimal);

    let mut normalized = String::with_capacity(token.len());
    for c in token.trim().chars() {
        if c == decimal {
            normalized.push('.');
        } else if Some(c) == group {
            continue;
        } else if c == '.' {
            return None;
        } else {
            normalized.push(c);
        }
    }

    normalized.parse().ok()
}
