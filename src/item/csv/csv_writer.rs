use std::cell::{Cell, RefCell};

use log::debug;

use crate::{
    core::{
        item::{ItemWriter, ItemWriterResult},
        locale::Locale,
        mapping::{self, Columns, FieldMap},
        record::Record,
        stream::TextSink,
    },
    error::CodecError,
    item::csv::{options::CsvOptions, row},
};

/// A CSV item writer that implements the `ItemWriter` trait.
///
/// Records are encoded into an internal buffer. The header row is written
/// just before the first record, so a writer that never sees a record
/// produces an empty document. A record that fails to encode leaves the
/// buffer untouched.
///
/// # Examples
///
/// ```
/// use csv_record_codec::{csv_record, core::item::ItemWriter};
/// use csv_record_codec::item::csv::csv_writer::CsvItemWriterBuilder;
///
/// #[derive(Debug, Default)]
/// struct City {
///     city: String,
///     pop: u64,
/// }
///
/// csv_record! {
///     City {
///         city: String => "city",
///         pop: u64 => "pop",
///     }
/// }
///
/// let writer = CsvItemWriterBuilder::<City>::new().build().unwrap();
/// writer
///     .write(&[City { city: "Boston".to_string(), pop: 4628910 }])
///     .unwrap();
///
/// assert_eq!(writer.into_string(), "city,pop\r\nBoston,4628910\r\n");
/// ```
pub struct CsvItemWriter<R: 'static> {
    columns: Columns<R>,
    options: CsvOptions,
    buffer: RefCell<String>,
    header_written: Cell<bool>,
    count: Cell<usize>,
}

impl<R: Record> ItemWriter<R> for CsvItemWriter<R> {
    fn write(&self, items: &[R]) -> ItemWriterResult {
        let mut chunk = String::new();
        let mut header_written = self.header_written.get();

        for item in items {
            if !header_written {
                if self.options.has_headers && !R::is_scalar() {
                    row::write_header(&self.columns, &self.options, &mut chunk);
                }
                header_written = true;
            }
            row::write_record(item, &self.columns, &self.options, &mut chunk)?;
        }

        self.buffer.borrow_mut().push_str(&chunk);
        self.header_written.set(header_written);
        self.count.set(self.count.get() + items.len());
        Ok(())
    }
}

impl<R: 'static> CsvItemWriter<R> {
    /// Number of records written so far.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Consumes the writer and returns the document.
    pub fn into_string(self) -> String {
        debug!("Serialized {} record(s)", self.count.get());
        self.buffer.into_inner()
    }

    /// Consumes the writer and appends the document to `sink`.
    pub fn flush_into<S: TextSink + ?Sized>(self, sink: &mut S) {
        sink.append_text(&self.into_string());
    }
}

/// A builder for configuring CSV item writing.
///
/// # Default Configuration
///
/// - Separator: comma (,)
/// - Quoting: only when necessary
/// - Locale: invariant
/// - Headers: enabled
/// - Injection sanitization: enabled
#[derive(Default)]
pub struct CsvItemWriterBuilder<'a, R> {
    options: CsvOptions,
    field_map: Option<&'a FieldMap<R>>,
}

impl<'a, R: Record> CsvItemWriterBuilder<'a, R> {
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

    /// Quotes every field with `quote`.
    pub fn quote(mut self, quote: char) -> Self {
        self.options.quote = Some(quote);
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.options.locale = locale;
        self
    }

    pub fn has_headers(mut self, yes: bool) -> Self {
        self.options.has_headers = yes;
        self
    }

    pub fn sanitize_for_injection(mut self, yes: bool) -> Self {
        self.options.sanitize_for_injection = yes;
        self
    }

    /// Replaces all options at once.
    pub fn options(mut self, options: CsvOptions) -> Self {
        self.options = options;
        self
    }

    pub fn field_map(mut self, field_map: &'a FieldMap<R>) -> Self {
        self.field_map = Some(field_map);
        self
    }

    /// Validates the options and resolves the columns to write.
    pub fn build(self) -> Result<CsvItemWriter<R>, CodecError> {
        self.options.validate()?;
        let columns = mapping::resolve(self.field_map)?;

        Ok(CsvItemWriter {
            columns,
            options: self.options,
            buffer: RefCell::new(String::new()),
            header_written: Cell::new(false),
            count: Cell::new(0),
        })
    }
}
