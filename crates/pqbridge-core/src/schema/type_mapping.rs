//! Arrow field to Parquet (physical, converted, repetition) type table.

use std::fmt;

use arrow::datatypes::{Field, Schema, TimeUnit};
use parquet::basic::{ConvertedType, Repetition, Type as PhysicalType};

use crate::schema::{
    error::{SchemaResult, UnsupportedTimestampUnitSnafu},
    external_type::ExternalType,
};

/// Parquet storage annotation for a single leaf column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    /// On-disk storage type.
    pub physical_type: PhysicalType,
    /// Optional annotation refining how the physical bytes are interpreted.
    pub converted_type: Option<ConvertedType>,
    /// Field cardinality, derived from nullability only.
    pub repetition: Repetition,
}

impl TypeMapping {
    /// Look up `ty` in the type table.
    ///
    /// Repetition is `OPTIONAL` for nullable fields and `REQUIRED` otherwise,
    /// independent of the type. Timestamps with any unit other than
    /// millisecond are rejected rather than rescaled.
    pub fn for_type(column: &str, ty: ExternalType, nullable: bool) -> SchemaResult<Self> {
        use ConvertedType as C;
        use PhysicalType as P;

        let (physical_type, converted_type) = match ty {
            ExternalType::Int8 => (P::INT32, Some(C::INT_8)),
            ExternalType::Int16 => (P::INT32, Some(C::INT_16)),
            ExternalType::Int32 => (P::INT32, None),
            ExternalType::Int64 => (P::INT64, None),
            ExternalType::UInt8 => (P::INT32, Some(C::UINT_8)),
            ExternalType::UInt16 => (P::INT32, Some(C::UINT_16)),
            ExternalType::UInt32 => (P::INT32, Some(C::UINT_32)),
            ExternalType::UInt64 => (P::INT64, Some(C::UINT_64)),
            ExternalType::Float32 => (P::FLOAT, None),
            ExternalType::Float64 => (P::DOUBLE, None),
            ExternalType::Date32 | ExternalType::Date64 => (P::INT32, Some(C::DATE)),
            ExternalType::Binary => (P::BYTE_ARRAY, None),
            ExternalType::Utf8 => (P::BYTE_ARRAY, Some(C::UTF8)),
            ExternalType::Boolean => (P::BOOLEAN, None),
            ExternalType::Time32Millis => (P::INT32, Some(C::TIME_MILLIS)),
            ExternalType::Timestamp(TimeUnit::Millisecond) => {
                (P::INT64, Some(C::TIMESTAMP_MILLIS))
            }
            ExternalType::Timestamp(unit) => {
                return UnsupportedTimestampUnitSnafu {
                    column: column.to_string(),
                    unit,
                }
                .fail();
            }
        };

        let repetition = if nullable {
            Repetition::OPTIONAL
        } else {
            Repetition::REQUIRED
        };

        Ok(Self {
            physical_type,
            converted_type,
            repetition,
        })
    }
}

/// A named [`TypeMapping`]: everything a tag-driven schema handler needs to
/// create one leaf column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Column name, copied from the Arrow field.
    pub name: String,
    /// Resolved Parquet types.
    pub mapping: TypeMapping,
}

impl FieldMapping {
    /// Render the field tag, e.g.
    /// `name=a, type=INT32, convertedtype=INT_8, repetitiontype=OPTIONAL`.
    pub fn metadata_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FieldMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.mapping;
        match m.converted_type {
            Some(converted) => write!(
                f,
                "name={}, type={}, convertedtype={}, repetitiontype={}",
                self.name, m.physical_type, converted, m.repetition
            ),
            None => write!(
                f,
                "name={}, type={}, repetitiontype={}",
                self.name, m.physical_type, m.repetition
            ),
        }
    }
}

/// Map one Arrow field through the type table.
pub fn map_field(field: &Field) -> SchemaResult<FieldMapping> {
    let ty = ExternalType::from_arrow(field.name(), field.data_type())?;
    let mapping = TypeMapping::for_type(field.name(), ty, field.is_nullable())?;
    Ok(FieldMapping {
        name: field.name().clone(),
        mapping,
    })
}

/// Render the field tag of every field in `schema`, in schema order.
///
/// Fails on the first unsupported field; no partial list is returned.
pub fn metadata_strings(schema: &Schema) -> SchemaResult<Vec<String>> {
    schema
        .fields()
        .iter()
        .map(|f| map_field(f).map(|m| m.metadata_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use arrow::datatypes::DataType;

    use super::*;
    use crate::schema::SchemaConvertError;

    fn table() -> Vec<(DataType, PhysicalType, Option<ConvertedType>)> {
        use ConvertedType as C;
        use PhysicalType as P;
        vec![
            (DataType::Int8, P::INT32, Some(C::INT_8)),
            (DataType::Int16, P::INT32, Some(C::INT_16)),
            (DataType::Int32, P::INT32, None),
            (DataType::Int64, P::INT64, None),
            (DataType::UInt8, P::INT32, Some(C::UINT_8)),
            (DataType::UInt16, P::INT32, Some(C::UINT_16)),
            (DataType::UInt32, P::INT32, Some(C::UINT_32)),
            (DataType::UInt64, P::INT64, Some(C::UINT_64)),
            (DataType::Float32, P::FLOAT, None),
            (DataType::Float64, P::DOUBLE, None),
            (DataType::Date32, P::INT32, Some(C::DATE)),
            (DataType::Date64, P::INT32, Some(C::DATE)),
            (DataType::Binary, P::BYTE_ARRAY, None),
            (DataType::Utf8, P::BYTE_ARRAY, Some(C::UTF8)),
            (DataType::Boolean, P::BOOLEAN, None),
            (
                DataType::Time32(TimeUnit::Millisecond),
                P::INT32,
                Some(C::TIME_MILLIS),
            ),
            (
                DataType::Timestamp(TimeUnit::Millisecond, None),
                P::INT64,
                Some(C::TIMESTAMP_MILLIS),
            ),
        ]
    }

    #[test]
    fn every_table_row_maps_exactly() {
        for (dt, physical, converted) in table() {
            for nullable in [true, false] {
                let field = Field::new("col", dt.clone(), nullable);
                let got = map_field(&field).expect("supported type");
                let repetition = if nullable {
                    Repetition::OPTIONAL
                } else {
                    Repetition::REQUIRED
                };
                assert_eq!(
                    got.mapping,
                    TypeMapping {
                        physical_type: physical,
                        converted_type: converted,
                        repetition,
                    },
                    "mapping for {dt:?} nullable={nullable}"
                );
            }
        }
    }

    #[test]
    fn nullable_int8_renders_converted_template() {
        let field = Field::new("a", DataType::Int8, true);
        let got = map_field(&field).expect("int8 maps");
        assert_eq!(
            got.metadata_string(),
            "name=a, type=INT32, convertedtype=INT_8, repetitiontype=OPTIONAL"
        );
    }

    #[test]
    fn required_int64_renders_primitive_template() {
        let field = Field::new("b", DataType::Int64, false);
        let got = map_field(&field).expect("int64 maps");
        assert_eq!(got.metadata_string(), "name=b, type=INT64, repetitiontype=REQUIRED");
    }

    #[test]
    fn timestamp_units_other_than_millis_are_rejected() {
        for unit in [TimeUnit::Second, TimeUnit::Microsecond, TimeUnit::Nanosecond] {
            let field = Field::new("ts", DataType::Timestamp(unit, None), false);
            let err = map_field(&field).unwrap_err();
            assert!(
                matches!(
                    &err,
                    SchemaConvertError::UnsupportedTimestampUnit { column, unit: u }
                        if column == "ts" && *u == unit
                ),
                "unexpected error: {err:?}"
            );
        }
    }

    #[test]
    fn metadata_strings_abort_on_first_bad_field() {
        let schema = Schema::new(vec![
            Field::new("ok", DataType::Utf8, true),
            Field::new("bad", DataType::LargeBinary, true),
            Field::new("never_reached", DataType::Int32, false),
        ]);
        let err = metadata_strings(&schema).unwrap_err();
        assert!(
            matches!(&err, SchemaConvertError::UnsupportedType { column, .. } if column == "bad"),
            "unexpected error: {err:?}"
        );
    }
}
