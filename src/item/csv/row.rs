use log::trace;

use crate::{
    core::{
        mapping::ResolvedColumn,
        record::{Record, SemanticType},
    },
    error::CodecError,
    item::csv::{
        options::CsvOptions,
        quoting::{self, RawRow},
        scalar,
    },
};

/// Every row, including the last, ends with CRLF.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Appends the header row built from the column names.
pub fn write_header<R: 'static>(columns: &[ResolvedColumn<R>], options: &CsvOptions, out: &mut String) {
    let quote = options.quote_char();
    for (index, column) in columns.iter().enumerate() {
        let lone_empty = columns.len() == 1 && column.header.is_empty();

        if index > 0 {
            out.push(options.separator);
        }
        quoting::write_token(
            out,
            &column.header,
            options.separator,
            quote,
            options.always_quote() || lone_empty,
        );
    }
    out.push_str(LINE_TERMINATOR);
}

/// Appends one record as a data row.
///
/// Nothing is appended when a field fails to format. Only textual fields are
/// sanitized, so a negative number or a date is written unchanged.
pub fn write_record<R: 'static>(
    record: &R,
    columns: &[ResolvedColumn<R>],
    options: &CsvOptions,
    out: &mut String,
) -> Result<(), CodecError> {
    let quote = options.quote_char();
    let mut line = String::new();

    for (index, column) in columns.iter().enumerate() {
        let descriptor = column.descriptor;
        let value = (descriptor.get)(record);
        let text = scalar::format(&value, &options.locale, descriptor.format)?;

        let textual = matches!(
            descriptor.semantic_type,
            SemanticType::String | SemanticType::Nested
        );
        let text = if options.sanitize_for_injection && textual {
            quoting::sanitize(&text).into_owned()
        } else {
            text
        };

        // A lone empty field would read back as a blank line.
        let lone_empty = columns.len() == 1 && text.is_empty();

        if index > 0 {
            line.push(options.separator);
        }
        quoting::write_token(
            &mut line,
            &text,
            options.separator,
            quote,
            options.always_quote() || lone_empty,
        );
    }

    line.push_str(LINE_TERMINATOR);
    out.push_str(&line);
    Ok(())
}

/// Fails when any column holds a nested record, which cannot be read back.
pub fn ensure_readable<R: 'static>(columns: &[ResolvedColumn<R>]) -> Result<(), CodecError> {
    match columns
        .iter()
        .find(|c| c.descriptor.semantic_type == SemanticType::Nested)
    {
        Some(column) => Err(CodecError::UnsupportedNesting {
            field: column.descriptor.name.to_string(),
        }),
        None => Ok(()),
    }
}

/// Builds a record from one raw row.
///
/// `positions[i]` is the token index holding column `i`.
pub fn read_record<R: Record>(
    row: &RawRow<'_>,
    columns: &[ResolvedColumn<R>],
    positions: &[usize],
    options: &CsvOptions,
) -> Result<R, CodecError> {
    if row.tokens.len() != columns.len() {
        return Err(CodecError::RowShape {
            line: row.line,
            expected: columns.len(),
            actual: row.tokens.len(),
        });
    }

    let quote = options.quote_char();
    let mut record = R::default();

    for (column, &position) in columns.iter().zip(positions) {
        let descriptor = column.descriptor;
        let token = quoting::unquote(row.tokens[position], quote).map_err(|e| e.at_line(row.line))?;
        let value = scalar::parse(
            &token,
            descriptor.semantic_type,
            descriptor.nullable,
            &options.locale,
            descriptor.format,
        )?;
        (descriptor.set)(&mut record, value)?;
    }

    trace!("Decoded row at line {}", row.line);
    Ok(record)
}
