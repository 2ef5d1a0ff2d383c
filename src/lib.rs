#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 # CSV Record Codec

 A typed CSV codec: it turns a sequence of records into CSV text and parses
 CSV text back into records, with a configurable separator and quoting,
 locale-aware number and date formatting, and column mapping overrides.

 ## Core Concepts

- **Record:** a type whose fields are described by an ordered list of
  `FieldDescriptor`s (name, semantic type, getter, setter). Implement it with
  the `csv_record!` macro.
- **FieldMap:** renames, reorders and projects a record's fields onto CSV columns.
- **Locale:** decimal separator, digit grouping and date patterns.
- **CsvOptions:** separator, quote character, locale, header and sanitization switches.
- **CsvItemWriter / CsvItemReader:** drive the codec over a whole document.

 ## Format

 - Every row ends with CRLF, including the last.
 - Fields holding the separator, the quote character or a line break are
   quoted; quotes inside them are doubled.
 - Supplying a quote character quotes every field.
 - Textual fields starting with `=`, `+`, `-` or `@` are prefixed with an
   apostrophe so spreadsheets do not evaluate them. This is not undone on read.
 - Nested record fields are written with their `Display` text and cannot be read back.

 ## Getting Started

```rust
use csv_record_codec::{csv_record, deserialize, serialize, CsvOptions, Locale};

#[derive(Debug, Default, PartialEq)]
struct Quote {
    ticker: String,
    close: f64,
}

csv_record! {
    Quote {
        ticker: String => "Ticker",
        close: f64 => "Close",
    }
}

fn main() -> Result<(), csv_record_codec::CodecError> {
    let quotes = vec![Quote { ticker: "ACME".to_string(), close: 12.5 }];

    let options = CsvOptions::new()
        .separator(';')
        .locale(Locale::from_name("pl-PL")?);

    let text = serialize(&quotes, None, &options)?;
    assert_eq!(text, "Ticker;Close\r\nACME;12,5\r\n");

    let back: Vec<Quote> = deserialize(Some(text.as_str()), None, &options)?;
    assert_eq!(back, quotes);

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Core module: record model, locales, column mapping and stream contracts
pub mod core;

/// Error types for codec operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Set of items readers / writers
pub mod item;

#[doc(inline)]
pub use crate::core::{
    locale::Locale,
    mapping::{FieldMap, FieldMapping},
    record::{CsvField, FieldDescriptor, Record, SemanticType, Value},
    stream::{TextSink, TextSource},
};

#[doc(inline)]
pub use item::csv::{deserialize, options::CsvOptions, serialize};
