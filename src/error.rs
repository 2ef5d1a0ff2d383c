use thiserror::Error;

use crate::core::record::SemanticType;

#[derive(Error, Debug, Clone, PartialEq)]
/// Codec error
pub enum CodecError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown field '{field}' in field map")]
    UnknownField { field: String },

    #[error("column '{column}' is mapped more than once")]
    DuplicateColumn { column: String },

    #[error("column '{column}' not found in header row")]
    MissingColumn { column: String },

    #[error("field '{field}' is a nested record and cannot be deserialized")]
    UnsupportedNesting { field: String },

    #[error("cannot parse '{token}' as {expected}")]
    ScalarFormat {
        token: String,
        expected: SemanticType,
    },

    #[error("line {line}: {reason}")]
    Quote { line: usize, reason: String },

    #[error("line {line}: expected {expected} columns, found {actual}")]
    RowShape {
        line: usize,
        expected: usize,
        actual: usize,
    },
}

impl CodecError {
    /// Attaches a source line to errors that carry one.
    pub(crate) fn at_line(self, at: usize) -> Self {
        match self {
            CodecError::Quote { reason, .. } => CodecError::Quote { line: at, reason },
            CodecError::RowShape {
                expected, actual, ..
            } => CodecError::RowShape {
                line: at,
                expected,
                actual,
            },
            other => other,
        }
    }
}
