//! Errors raised while converting an Arrow schema to Parquet schema elements.

use std::{error::Error, fmt};

use arrow::datatypes::TimeUnit;
use parquet::errors::ParquetError;
use snafu::Snafu;

/// Convenience alias for schema conversion results.
pub type SchemaResult<T> = Result<T, SchemaConvertError>;

/// Errors encountered while mapping Arrow fields to Parquet schema elements.
///
/// Any of these aborts the whole conversion; callers never see a partially
/// converted element list.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SchemaConvertError {
    /// The Arrow type has no entry in the Parquet type table.
    #[snafu(display("unsupported arrow type for column '{column}': {type_name}"))]
    UnsupportedType {
        /// Column name that failed conversion.
        column: String,
        /// Arrow type name as reported by the source schema.
        type_name: String,
    },

    /// Timestamps are only stored with millisecond precision.
    #[snafu(display(
        "unsupported timestamp unit for column '{column}': {unit:?} (only Millisecond is supported)"
    ))]
    UnsupportedTimestampUnit {
        /// Column name that failed conversion.
        column: String,
        /// The offending Arrow time unit.
        unit: TimeUnit,
    },

    /// A flattened element list does not describe a well-formed tree.
    #[snafu(display("malformed schema element list: {details}"))]
    MalformedTree {
        /// Which flattening invariant was violated.
        details: String,
    },

    /// The parquet crate rejected the rebuilt schema tree.
    #[snafu(display("parquet rejected schema node '{name}': {source}"))]
    ParquetSchema {
        /// Name of the node being built.
        name: String,
        /// Underlying parquet error.
        source: ParquetError,
    },
}

/// Error returned when a textual type tag does not name a supported type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseExternalTypeError {
    /// The tag that failed to parse.
    pub tag: String,
}

impl fmt::Display for ParseExternalTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown type tag '{}' (expected one of int8..int64, uint8..uint64, float32, \
             float64, date32, date64, binary, utf8, bool, time32[ms], timestamp[s|ms|us|ns])",
            self.tag
        )
    }
}

impl Error for ParseExternalTypeError {}
