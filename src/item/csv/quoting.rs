use std::borrow::Cow;

use crate::error::CodecError;

/// Leading characters that make spreadsheet software evaluate a cell as a formula.
pub const FORMULA_TRIGGERS: [char; 4] = ['=', '+', '-', '@'];

/// Returns true when `token` cannot be written bare.
pub fn needs_quoting(token: &str, separator: char, quote: char) -> bool {
    token
        .chars()
        .any(|c| c == separator || c == quote || c == '\r' || c == '\n')
}

/// Wraps `token` in `quote`, doubling every quote inside it.
pub fn quote(token: &str, quote: char) -> String {
    let mut quoted = String::with_capacity(token.len() + 2);
    quoted.push(quote);
    for c in token.chars() {
        if c == quote {
            quoted.push(quote);
        }
        quoted.push(c);
    }
    quoted.push(quote);
    quoted
}

/// Strips the wrapping quotes of a raw token and collapses doubled quotes.
///
/// Tokens that do not start with `quote` are returned untouched. The error
/// line is left at 0; callers attach the real line.
pub fn unquote(token: &str, quote: char) -> Result<Cow<'_, str>, CodecError> {
    let Some(body) = token.strip_prefix(quote) else {
        return Ok(Cow::Borrowed(token));
    };

    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != quote {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some(next) if next == quote => value.push(quote),
            Some(_) => {
                return Err(CodecError::Quote {
                    line: 0,
                    reason: "unexpected character after closing quote".to_string(),
                })
            }
            None => return Ok(Cow::Owned(value)),
        }
    }

    Err(CodecError::Quote {
        line: 0,
        reason: "unterminated quote".to_string(),
    })
}

/// Prefixes an apostrophe when the first non-whitespace character is a formula trigger.
pub fn sanitize(token: &str) -> Cow<'_, str> {
    match token.trim_start().chars().next() {
        Some(first) if FORMULA_TRIGGERS.contains(&first) => Cow::Owned(format!("'{}", token)),
        _ => Cow::Borrowed(token),
    }
}

/// Appends `token` to `out`, quoted when `always` is set or the content requires it.
pub fn write_token(out: &mut String, token: &str, separator: char, quote_char: char, always: bool) {
    if always || needs_quoting(token, separator, quote_char) {
        out.push_str(&quote(token, quote_char));
    } else {
        out.push_str(token);
    }
}

/// One physical row of input, split into raw tokens that still carry their quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow<'a> {
    /// 1-based line on which the row starts.
    pub line: usize,
    pub tokens: Vec<&'a str>,
}

/// Splits `text` into rows and raw tokens.
///
/// Separators and line breaks inside a quoted span belong to the token.
/// A quote opens a span only at the start of a token. Rows end at CRLF, LF
/// or a lone CR; the last row may be unterminated and blank lines are skipped.
///
/// Fails with [`CodecError::Quote`] at the row's line when a quoted span is
/// still open at the end of the text.
pub fn split_rows(
    text: &str,
    separator: char,
    quote: char,
) -> Result<Vec<RawRow<'_>>, CodecError> {
    let mut rows = Vec::new();
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut row_line = 1;
    let mut start = 0;
    let mut in_quotes = false;
    let mut at_token_start = true;
    let mut chars = text.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if in_quotes {
            if c == quote {
                if chars.peek().is_some_and(|&(_, next)| next == quote) {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else if c == '\n' || (c == '\r' && chars.peek().map(|&(_, n)| n) != Some('\n')) {
                line += 1;
            }
            continue;
        }

        if c == quote && at_token_start {
            in_quotes = true;
            at_token_start = false;
        } else if c == separator {
            tokens.push(&text[start..index]);
            start = index + c.len_utf8();
            at_token_start = true;
        } else if c == '\r' || c == '\n' {
            tokens.push(&text[start..index]);
            if c == '\r' && chars.peek().is_some_and(|&(_, next)| next == '\n') {
                chars.next();
            }
            start = chars.peek().map_or(text.len(), |&(next, _)| next);
            finish_row(&mut rows, &mut tokens, row_line);
            line += 1;
            row_line = line;
            at_token_start = true;
        } else {
            at_token_start = false;
        }
    }

    if in_quotes {
        return Err(CodecError::Quote {
            line: row_line,
            reason: "unterminated quote".to_string(),
        });
    }

    if start < text.len() || !tokens.is_empty() {
        tokens.push(&text[start..]);
        finish_row(&mut rows, &mut tokens, row_line);
    }

    Ok(rows)
}

fn finish_row<'a>(rows: &mut Vec<RawRow<'a>>, tokens: &mut Vec<&'a str>, line: usize) {
    let row = std::mem::take(tokens);
    if row.len() == 1 && row[0].is_empty() {
        return;
    }
    rows.push(RawRow { line, tokens: row });
}
