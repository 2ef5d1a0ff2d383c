use std::cell::Cell;

use log::{debug, warn};

use crate::{
    core::{
        item::{ItemReader, ItemReaderResult},
        locale::Locale,
        mapping::{self, Columns, FieldMap},
        record::Record,
        stream::TextSource,
    },
    error::CodecError,
    item::csv::{
        options::CsvOptions,
        quoting::{self, RawRow},
        row,
    },
};

/// A CSV item reader that implements the `ItemReader` trait.
///
/// The whole text is split into rows when the reader is built and the
/// header row is aligned against the resolved columns. Each call to
/// [`read`](ItemReader::read) then decodes the next data row.
///
/// # Examples
///
/// ```
/// use csv_record_codec::{csv_record, core::item::ItemReader};
/// use csv_record_codec::item::csv::csv_reader::CsvItemReaderBuilder;
///
/// #[derive(Debug, Default)]
/// struct Record {
///     name: String,
///     value: i32,
/// }
///
/// csv_record! {
///     Record {
///         name: String => "name",
///         value: i32 => "value",
///     }
/// }
///
/// let data = "name,value\r\nfoo,123\r\nbar,456\r\n";
/// let reader = CsvItemReaderBuilder::<Record>::new().from_source(data).unwrap();
///
/// let record = reader.read().unwrap().unwrap();
/// assert_eq!(record.name, "foo");
/// assert_eq!(record.value, 123);
///
/// let record = reader.read().unwrap().unwrap();
/// assert_eq!(record.name, "bar");
/// assert!(reader.read().unwrap().is_none());
/// ```
pub struct CsvItemReader<'t, R: 'static> {
    rows: Vec<RawRow<'t>>,
    columns: Columns<R>,
    /// Token index of each column, in column order.
    positions: Vec<usize>,
    options: CsvOptions,
    cursor: Cell<usize>,
}

impl<R: Record> ItemReader<R> for CsvItemReader<'_, R> {
    fn read(&self) -> ItemReaderResult<R> {
        let index = self.cursor.get();
        let Some(raw) = self.rows.get(index) else {
            return Ok(None);
        };
        self.cursor.set(index + 1);

        row::read_record(raw, &self.columns, &self.positions, &self.options).map(Some)
    }
}

impl<R: 'static> CsvItemReader<'_, R> {
    /// Number of data rows, excluding the header.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A builder for configuring CSV item reading.
///
/// # Default Configuration
///
/// - Separator: comma (,)
/// - Quote: `"`
/// - Locale: invariant
/// - Headers: required as the first row
pub struct CsvItemReaderBuilder<'a, R> {
    options: CsvOptions,
    field_map: Option<&'a FieldMap<R>>,
}

impl<R: Record> Default for CsvItemReaderBuilder<'_, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, R: Record> CsvItemReaderBuilder<'a, R> {
    pub fn new() -> Self {
        Self {
            options: CsvOptions::default(),
            field_map: None,
        }
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.options.separator = delimiter;
        self
    }

    pub fn quote(mut self, quote: char) -> Self {
        self.options.quote = Some(quote);
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.options.locale = locale;
        self
    }

    /// When disabled, every row is data and columns are taken by position.
    pub fn has_headers(mut self, yes: bool) -> Self {
        self.options.has_headers = yes;
        self
    }

    /// Replaces all options at once.
    pub fn options(mut self, options: CsvOptions) -> Self {
        self.options = options;
        self
    }

    /// Columns are matched to header names when a field map is given.
    pub fn field_map(mut self, field_map: &'a FieldMap<R>) -> Self {
        self.field_map = Some(field_map);
        self
    }

    /// Creates a reader over the text of `source`.
    ///
    /// Fails with [`CodecError::InvalidArgument`] when the source has no text.
    pub fn from_source<'t, S: TextSource + ?Sized>(
        self,
        source: &'t S,
    ) -> Result<CsvItemReader<'t, R>, CodecError> {
        let text = source
            .text()
            .ok_or_else(|| CodecError::InvalidArgument("input text is absent".to_string()))?;

        self.options.validate()?;
        let columns = mapping::resolve(self.field_map)?;
        row::ensure_readable(&columns)?;

        let mut rows =
            quoting::split_rows(text, self.options.separator, self.options.quote_char())?;
        let expects_header = self.options.has_headers && !R::is_scalar();

        let positions = if expects_header && !rows.is_empty() {
            let header = rows.remove(0);
            align_header(&header, &columns, self.field_map.is_some(), &self.options)?
        } else {
            (0..columns.len()).collect()
        };

        debug!(
            "Read {} data row(s) for {} column(s)",
            rows.len(),
            columns.len()
        );

        Ok(CsvItemReader {
            rows,
            columns,
            positions,
            options: self.options,
            cursor: Cell::new(0),
        })
    }
}

/// Maps each column to its token index in the header row.
///
/// Mapped columns are found by name, default columns by position.
fn align_header<R: 'static>(
    header: &RawRow<'_>,
    columns: &[mapping::ResolvedColumn<R>],
    by_name: bool,
    options: &CsvOptions,
) -> Result<Vec<usize>, CodecError> {
    if header.tokens.len() != columns.len() {
        return Err(CodecError::RowShape {
            line: header.line,
            expected: columns.len(),
            actual: header.tokens.len(),
        });
    }

    let names = header
        .tokens
        .iter()
        .map(|token| quoting::unquote(token, options.quote_char()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.at_line(header.line))?;

    if !by_name {
        for (column, name) in columns.iter().zip(&names) {
            if column.header != *name {
                warn!(
                    "Header '{}' read as column '{}' by position",
                    name, column.header
                );
            }
        }
        return Ok((0..columns.len()).collect());
    }

    columns
        .iter()
        .map(|column| {
            names
                .iter()
                .position(|name| *name == column.header)
                .ok_or_else(|| CodecError::MissingColumn {
                    column: column.header.clone(),
                })
        })
        .collect()
}
