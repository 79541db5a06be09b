//! The closed set of Arrow types that have a Parquet storage mapping.
//!
//! Arrow's `DataType` is open-ended; the Parquet type table is not. Narrowing
//! to [`ExternalType`] happens once, at the boundary, so the table itself can
//! be an exhaustive match.

use std::{fmt, str::FromStr};

use arrow::datatypes::{DataType, TimeUnit};

use crate::schema::error::{ParseExternalTypeError, SchemaResult, UnsupportedTypeSnafu};

/// Arrow types supported by the Parquet type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalType {
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    UInt8,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Unsigned 64-bit integer.
    UInt64,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// Days since the epoch, 32-bit.
    Date32,
    /// Milliseconds since the epoch, 64-bit.
    Date64,
    /// Variable-length bytes.
    Binary,
    /// UTF-8 text.
    Utf8,
    /// Boolean.
    Boolean,
    /// Time of day in milliseconds.
    Time32Millis,
    /// Timestamp with the given unit. Only millisecond timestamps map to a
    /// Parquet type; the unit is kept so the error can name it.
    Timestamp(TimeUnit),
}

impl ExternalType {
    /// Narrow an Arrow data type for `column` to a supported external type.
    ///
    /// Timestamps of every unit are accepted here (timezone is ignored); the
    /// unit is checked by the type table.
    pub fn from_arrow(column: &str, data_type: &DataType) -> SchemaResult<Self> {
        let ty = match data_type {
            DataType::Int8 => ExternalType::Int8,
            DataType::Int16 => ExternalType::Int16,
            DataType::Int32 => ExternalType::Int32,
            DataType::Int64 => ExternalType::Int64,
            DataType::UInt8 => ExternalType::UInt8,
            DataType::UInt16 => ExternalType::UInt16,
            DataType::UInt32 => ExternalType::UInt32,
            DataType::UInt64 => ExternalType::UInt64,
            DataType::Float32 => ExternalType::Float32,
            DataType::Float64 => ExternalType::Float64,
            DataType::Date32 => ExternalType::Date32,
            DataType::Date64 => ExternalType::Date64,
            DataType::Binary => ExternalType::Binary,
            DataType::Utf8 => ExternalType::Utf8,
            DataType::Boolean => ExternalType::Boolean,
            DataType::Time32(TimeUnit::Millisecond) => ExternalType::Time32Millis,
            DataType::Timestamp(unit, _tz) => ExternalType::Timestamp(*unit),
            other => {
                return UnsupportedTypeSnafu {
                    column: column.to_string(),
                    type_name: other.to_string(),
                }
                .fail();
            }
        };
        Ok(ty)
    }

    /// The Arrow data type this external type was narrowed from.
    pub fn to_arrow(self) -> DataType {
        match self {
            ExternalType::Int8 => DataType::Int8,
            ExternalType::Int16 => DataType::Int16,
            ExternalType::Int32 => DataType::Int32,
            ExternalType::Int64 => DataType::Int64,
            ExternalType::UInt8 => DataType::UInt8,
            ExternalType::UInt16 => DataType::UInt16,
            ExternalType::UInt32 => DataType::UInt32,
            ExternalType::UInt64 => DataType::UInt64,
            ExternalType::Float32 => DataType::Float32,
            ExternalType::Float64 => DataType::Float64,
            ExternalType::Date32 => DataType::Date32,
            ExternalType::Date64 => DataType::Date64,
            ExternalType::Binary => DataType::Binary,
            ExternalType::Utf8 => DataType::Utf8,
            ExternalType::Boolean => DataType::Boolean,
            ExternalType::Time32Millis => DataType::Time32(TimeUnit::Millisecond),
            ExternalType::Timestamp(unit) => DataType::Timestamp(unit, None),
        }
    }
}

fn unit_suffix(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Second => "s",
        TimeUnit::Millisecond => "ms",
        TimeUnit::Microsecond => "us",
        TimeUnit::Nanosecond => "ns",
    }
}

impl fmt::Display for ExternalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalType::Int8 => write!(f, "int8"),
            ExternalType::Int16 => write!(f, "int16"),
            ExternalType::Int32 => write!(f, "int32"),
            ExternalType::Int64 => write!(f, "int64"),
            ExternalType::UInt8 => write!(f, "uint8"),
            ExternalType::UInt16 => write!(f, "uint16"),
            ExternalType::UInt32 => write!(f, "uint32"),
            ExternalType::UInt64 => write!(f, "uint64"),
            ExternalType::Float32 => write!(f, "float32"),
            ExternalType::Float64 => write!(f, "float64"),
            ExternalType::Date32 => write!(f, "date32"),
            ExternalType::Date64 => write!(f, "date64"),
            ExternalType::Binary => write!(f, "binary"),
            ExternalType::Utf8 => write!(f, "utf8"),
            ExternalType::Boolean => write!(f, "bool"),
            ExternalType::Time32Millis => write!(f, "time32[ms]"),
            ExternalType::Timestamp(unit) => write!(f, "timestamp[{}]", unit_suffix(*unit)),
        }
    }
}

impl FromStr for ExternalType {
    type Err = ParseExternalTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        let ty = match tag.as_str() {
            "int8" => ExternalType::Int8,
            "int16" => ExternalType::Int16,
            "int32" => ExternalType::Int32,
            "int64" => ExternalType::Int64,
            "uint8" => ExternalType::UInt8,
            "uint16" => ExternalType::UInt16,
            "uint32" => ExternalType::UInt32,
            "uint64" => ExternalType::UInt64,
            "float32" => ExternalType::Float32,
            "float64" => ExternalType::Float64,
            "date32" => ExternalType::Date32,
            "date64" => ExternalType::Date64,
            "binary" => ExternalType::Binary,
            "utf8" | "string" => ExternalType::Utf8,
            "bool" | "boolean" => ExternalType::Boolean,
            "time32[ms]" => ExternalType::Time32Millis,
            "timestamp[s]" => ExternalType::Timestamp(TimeUnit::Second),
            "timestamp[ms]" => ExternalType::Timestamp(TimeUnit::Millisecond),
            "timestamp[us]" => ExternalType::Timestamp(TimeUnit::Microsecond),
            "timestamp[ns]" => ExternalType::Timestamp(TimeUnit::Nanosecond),
            _ => {
                return Err(ParseExternalTypeError {
                    tag: s.to_string(),
                });
            }
        };
        Ok(ty)
    }
}
