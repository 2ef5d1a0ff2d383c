/// CSV encoding and decoding of typed records.
///
/// This module holds the codec engine: quoting and escaping, locale-aware
/// scalar formatting, row encoding and the reader and writer that drive them
/// over a whole document.
///
/// # Module Architecture
///
/// 1. **quoting**: decides when a token must be quoted, escapes and unescapes
///    quotes, neutralizes spreadsheet formulas and splits text into raw rows.
///
/// 2. **scalar**: formats and parses single values under a [`Locale`](crate::Locale).
///
/// 3. **row**: turns one record into one line and one raw row back into a record.
///
/// 4. **CsvItemWriter** / **CsvItemReader**: drive the row codec over a
///    sequence of records or lines. Both follow the builder pattern.
///
/// # Format
///
/// Every row ends with CRLF, including the last. Fields holding the
/// separator, the quote character or a line break are quoted and quotes
/// inside them are doubled. Documents carry a header row unless the record
/// type is a scalar or headers are disabled.
///
/// # Examples
///
/// ```
/// use csv_record_codec::{csv_record, deserialize, serialize, CsvOptions, FieldMap};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Person {
///     first_name: String,
///     last_name: String,
///     age: i32,
/// }
///
/// csv_record! {
///     Person {
///         first_name: String => "FirstName",
///         last_name: String => "LastName",
///         age: i32 => "Age",
///     }
/// }
///
/// let people = vec![Person {
///     first_name: "Alex".to_string(),
///     last_name: "Friedman".to_string(),
///     age: 27,
/// }];
///
/// let text = serialize(&people, None, &CsvOptions::default()).unwrap();
/// assert_eq!(text, "FirstName,LastName,Age\r\nAlex,Friedman,27\r\n");
///
/// let map = FieldMap::new()
///     .map("FirstName", "forename")
///     .map("LastName", "surname")
///     .map("Age", "age");
/// let text = serialize(&people, Some(&map), &CsvOptions::new().quote('"')).unwrap();
/// assert_eq!(
///     text,
///     "\"forename\",\"surname\",\"age\"\r\n\"Alex\",\"Friedman\",\"27\"\r\n"
/// );
///
/// let back: Vec<Person> = deserialize(Some(text.as_str()), Some(&map), &CsvOptions::default()).unwrap();
/// assert_eq!(back, people);
/// ```

/// A module providing facilities for reading CSV data records.
pub mod csv_reader;

/// A module providing facilities for writing CSV data records.
pub mod csv_writer;

/// Per-call codec options.
pub mod options;

/// Quoting, escaping, injection sanitization and row splitting.
pub mod quoting;

/// Row-level encoding and decoding.
pub mod row;

/// Locale-aware formatting and parsing of single values.
pub mod scalar;

use crate::{
    core::{
        item::{ItemReader, ItemWriter},
        mapping::FieldMap,
        record::Record,
    },
    error::CodecError,
};

use self::{
    csv_reader::CsvItemReaderBuilder, csv_writer::CsvItemWriterBuilder, options::CsvOptions,
};

/// Serializes `records` into a CSV document.
///
/// An empty slice yields an empty string without a header.
pub fn serialize<R: Record>(
    records: &[R],
    field_map: Option<&FieldMap<R>>,
    options: &CsvOptions,
) -> Result<String, CodecError> {
    let mut builder = CsvItemWriterBuilder::new().options(options.clone());
    if let Some(map) = field_map {
        builder = builder.field_map(map);
    }

    let writer = builder.build()?;
    writer.write(records)?;
    Ok(writer.into_string())
}

/// Deserializes a CSV document into records.
///
/// `None` input fails with [`CodecError::InvalidArgument`]. The first error
/// aborts the whole call; no partial results are returned.
pub fn deserialize<R: Record>(
    text: Option<&str>,
    field_map: Option<&FieldMap<R>>,
    options: &CsvOptions,
) -> Result<Vec<R>, CodecError> {
    let mut builder = CsvItemReaderBuilder::new().options(options.clone());
    if let Some(map) = field_map {
        builder = builder.field_map(map);
    }

    let reader = builder.from_source(&text)?;
    let mut records = Vec::with_capacity(reader.len());
    while let Some(record) = reader.read()? {
        records.push(record);
    }
    Ok(records)
}
