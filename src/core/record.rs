use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::CodecError;

/// The kind of scalar a field holds, which decides how it is formatted and parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    String,
    Integer,
    Floating,
    Boolean,
    Date,
    DateTime,
    /// A record held inside another record. Written with its `Display`
    /// representation, never read back.
    Nested,
}

impl SemanticType {
    /// The value an empty token stands for when the field is not nullable.
    pub fn default_value(self) -> Option<Value> {
        match self {
            SemanticType::String => Some(Value::String(String::new())),
            SemanticType::Integer => Some(Value::Integer(0)),
            SemanticType::Floating => Some(Value::Floating(0.0)),
            SemanticType::Boolean => Some(Value::Boolean(false)),
            SemanticType::Date => Some(Value::Date(NaiveDate::default())),
            SemanticType::DateTime => Some(Value::DateTime(NaiveDateTime::default())),
            SemanticType::Nested => None,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SemanticType::String => "string",
            SemanticType::Integer => "integer",
            SemanticType::Floating => "floating",
            SemanticType::Boolean => "boolean",
            SemanticType::Date => "date",
            SemanticType::DateTime => "date-time",
            SemanticType::Nested => "nested record",
        };
        f.write_str(name)
    }
}

/// A single field value on its way between a record and a CSV token.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Integer(i128),
    Floating(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Nested(String),
}

/// Describes one field of a record type: its default column name, how its
/// value is formatted, and how to read it from and write it into a record.
///
/// The position of a descriptor in [`Record::descriptors`] is its order.
pub struct FieldDescriptor<R> {
    pub name: &'static str,
    pub semantic_type: SemanticType,
    /// Formatting hint: a chrono pattern for dates, `.N` for fixed decimals.
    pub format: Option<&'static str>,
    /// Whether an empty token means "no value" rather than the type default.
    pub nullable: bool,
    pub get: fn(&R) -> Value,
    pub set: fn(&mut R, Value) -> Result<(), CodecError>,
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("semantic_type", &self.semantic_type)
            .field("format", &self.format)
            .field("nullable", &self.nullable)
            .finish_non_exhaustive()
    }
}

/// A type that can be written to and read from CSV rows.
///
/// Implement it with [`csv_record!`](crate::csv_record) or by hand.
pub trait Record: Default + 'static {
    /// Field descriptors in declaration order.
    fn descriptors() -> &'static [FieldDescriptor<Self>];

    /// Scalar records are a single anonymous column, written and read without a header row.
    fn is_scalar() -> bool {
        false
    }
}

/// Conversion between a concrete field type and [`Value`].
pub trait CsvField: Sized {
    const SEMANTIC_TYPE: SemanticType;
    const NULLABLE: bool = false;

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Result<Self, CodecError>;
}

fn mismatch(value: Value, expected: SemanticType) -> CodecError {
    let token = match value {
        Value::Null => String::new(),
        Value::String(s) | Value::Nested(s) => s,
        Value::Integer(i) => i.to_string(),
        Value::Floating(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Date(d) => d.to_string(),
        Value::DateTime(d) => d.to_string(),
    };
    CodecError::ScalarFormat { token, expected }
}

impl CsvField for String {
    const SEMANTIC_TYPE: SemanticType = SemanticType::String;

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, CodecError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(mismatch(other, SemanticType::String)),
        }
    }
}

macro_rules! integer_field {
    ($($ty:ty),*) => {$(
        impl CsvField for $ty {
            const SEMANTIC_TYPE: SemanticType = SemanticType::Integer;

            fn to_value(&self) -> Value {
                Value::Integer(*self as i128)
            }

            fn from_value(value: Value) -> Result<Self, CodecError> {
                match value {
                    Value::Integer(i) => <$ty>::try_from(i).map_err(|_| CodecError::ScalarFormat {
                        token: i.to_string(),
                        expected: SemanticType::Integer,
                    }),
                    other => Err(mismatch(other, SemanticType::Integer)),
                }
            }
        }
    )*};
}

integer_field!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl CsvField for f64 {
    const SEMANTIC_TYPE: SemanticType = SemanticType::Floating;

    fn to_value(&self) -> Value {
        Value::Floating(*self)
    }

    fn from_value(value: Value) -> Result<Self, CodecError> {
        match value {
            Value::Floating(f) => Ok(f),
            other => Err(mismatch(other, SemanticType::Floating)),
        }
    }
}

impl CsvField for f32 {
    const SEMANTIC_TYPE: SemanticType = SemanticType::Floating;

    fn to_value(&self) -> Value {
        // Widen through the shortest f32 text so 1.1f32 is written as 1.1.
        let widened = self.to_string().parse().unwrap_or(f64::from(*self));
        Value::Floating(widened)
    }

    fn from_value(value: Value) -> Result<Self, CodecError> {
        match value {
            Value::Floating(f) => Ok(f as f32),
            other => Err(mismatch(other, SemanticType::Floating)),
        }
    }
}

impl CsvField for bool {
    const SEMANTIC_TYPE: SemanticType = SemanticType::Boolean;

    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }

    fn from_value(value: Value) -> Result<Self, CodecError> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(mismatch(other, SemanticType::Boolean)),
        }
    }
}

impl CsvField for NaiveDate {
    const SEMANTIC_TYPE: SemanticType = SemanticType::Date;

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }

    fn from_value(value: Value) -> Result<Self, CodecError> {
        match value {
            Value::Date(d) => Ok(d),
            other => Err(mismatch(other, SemanticType::Date)),
        }
    }
}

impl CsvField for NaiveDateTime {
    const SEMANTIC_TYPE: SemanticType = SemanticType::DateTime;

    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }

    fn from_value(value: Value) -> Result<Self, CodecError> {
        match value {
            Value::DateTime(d) => Ok(d),
            other => Err(mismatch(other, SemanticType::DateTime)),
        }
    }
}

impl<T: CsvField> CsvField for Option<T> {
    const SEMANTIC_TYPE: SemanticType = T::SEMANTIC_TYPE;
    const NULLABLE: bool = true;

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, CodecError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

macro_rules! scalar_record {
    ($($ty:ty),*) => {$(
        impl Record for $ty {
            fn descriptors() -> &'static [FieldDescriptor<Self>] {
                const DESCRIPTORS: &[FieldDescriptor<$ty>] = &[FieldDescriptor {
                    name: "",
                    semantic_type: <$ty as CsvField>::SEMANTIC_TYPE,
                    format: None,
                    nullable: false,
                    get: |record: &$ty| CsvField::to_value(record),
                    set: |record: &mut $ty, value: Value| {
                        *record = <$ty as CsvField>::from_value(value)?;
                        Ok(())
                    },
                }];
                DESCRIPTORS
            }

            fn is_scalar() -> bool {
                true
            }
        }
    )*};
}

scalar_record!(String, bool, i32, i64, u32, u64, f32, f64);

/// Implements [`Record`] for a struct by listing its fields in column order.
///
/// Each entry is `field: Type => "Column"`, optionally followed by
/// `; format = "pattern"` for a formatting hint or `; nested` for a field
/// holding another record, which is written with its `Display` text.
///
/// ```
/// use csv_record_codec::{csv_record, Record};
///
/// #[derive(Debug, Default)]
/// struct Person {
///     first_name: String,
///     age: i32,
/// }
///
/// csv_record! {
///     Person {
///         first_name: String => "FirstName",
///         age: i32 => "Age",
///     }
/// }
///
/// let names: Vec<_> = Person::descriptors().iter().map(|d| d.name).collect();
/// assert_eq!(names, ["FirstName", "Age"]);
/// ```
#[macro_export]
macro_rules! csv_record {
    (@descriptor $record:ty, $field:ident, $fty:ty, $column:literal) => {
        $crate::csv_record!(@field $record, $field, $fty, $column, ::core::option::Option::None)
    };
    (@descriptor $record:ty, $field:ident, $fty:ty, $column:literal, format, $hint:literal) => {
        $crate::csv_record!(@field $record, $field, $fty, $column, ::core::option::Option::Some($hint))
    };
    (@descriptor $record:ty, $field:ident, $fty:ty, $column:literal, nested) => {
        $crate::FieldDescriptor {
            name: $column,
            semantic_type: $crate::SemanticType::Nested,
            format: ::core::option::Option::None,
            nullable: false,
            get: |record: &$record| $crate::Value::Nested(::std::string::ToString::to_string(&record.$field)),
            set: |_: &mut $record, _: $crate::Value| {
                ::core::result::Result::Err($crate::CodecError::UnsupportedNesting {
                    field: ::std::string::ToString::to_string($column),
                })
            },
        }
    };
    (@field $record:ty, $field:ident, $fty:ty, $column:literal, $format:expr) => {
        $crate::FieldDescriptor {
            name: $column,
            semantic_type: <$fty as $crate::CsvField>::SEMANTIC_TYPE,
            format: $format,
            nullable: <$fty as $crate::CsvField>::NULLABLE,
            get: |record: &$record| $crate::CsvField::to_value(&record.$field),
            set: |record: &mut $record, value: $crate::Value| {
                record.$field = <$fty as $crate::CsvField>::from_value(value)?;
                ::core::result::Result::Ok(())
            },
        }
    };
    ($record:ty {
        $( $field:ident : $fty:ty => $column:literal $( ; $kind:ident $( = $hint:literal )? )? ),* $(,)?
    }) => {
        impl $crate::Record for $record {
            fn descriptors() -> &'static [$crate::FieldDescriptor<Self>] {
                const DESCRIPTORS: &[$crate::FieldDescriptor<$record>] = &[
                    $( $crate::csv_record!(@descriptor $record, $field, $fty, $column $(, $kind $(, $hint)?)?) ),*
                ];
                DESCRIPTORS
            }
        }
    };
}
