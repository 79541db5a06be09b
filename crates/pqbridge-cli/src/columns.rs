use std::str::FromStr;

use arrow::datatypes::{Field, Schema};
use pqbridge_core::ExternalType;

/// A `--column NAME:TYPE[?]` argument. A trailing `?` marks the column
/// nullable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub ty: ExternalType,
    pub nullable: bool,
}

impl FromStr for ColumnSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, ty) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("expected NAME:TYPE, got '{s}'"))?;
        if name.is_empty() {
            return Err(format!("column name is empty in '{s}'"));
        }
        let (ty, nullable) = match ty.strip_suffix('?') {
            Some(t) => (t, true),
            None => (ty, false),
        };
        let ty = ty.parse::<ExternalType>().map_err(|e| e.to_string())?;
        Ok(Self {
            name: name.to_string(),
            ty,
            nullable,
        })
    }
}

pub fn schema_from_columns(columns: &[ColumnSpec]) -> Schema {
    Schema::new(
        columns
            .iter()
            .map(|c| Field::new(c.name.clone(), c.ty.to_arrow(), c.nullable))
            .collect::<Vec<_>>(),
    )
}
