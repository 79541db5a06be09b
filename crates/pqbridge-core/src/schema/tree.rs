//! Preorder-flattened Parquet schema element lists.
//!
//! Parquet stores its schema as a depth-first list of nodes: a group node
//! declares how many children follow it, and leaves carry the physical type.
//! Arrow schemas produced here are single-level, so the list is always a
//! synthetic root followed by one leaf per field, in field order.

use std::{fmt, sync::Arc};

use arrow::datatypes::{FieldRef, Schema};
use log::debug;
use parquet::basic::{ConvertedType, Repetition, Type as PhysicalType};
use parquet::schema::types::{SchemaDescriptor, Type, TypePtr};
use serde::{Serialize, Serializer};
use snafu::ResultExt;

use crate::schema::{
    error::{MalformedTreeSnafu, ParquetSchemaSnafu, SchemaResult},
    type_mapping::{FieldMapping, map_field},
};

/// Name of the synthetic root group node.
pub const ROOT_NAME: &str = "arrow_schema";

/// One node of the flattened schema tree.
///
/// A node with `num_children` set is a group and never carries a physical
/// type; every other node is a leaf column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaElement {
    /// Node name.
    pub name: String,
    /// Storage type, absent for group nodes.
    #[serde(serialize_with = "serialize_display_opt")]
    pub physical_type: Option<PhysicalType>,
    /// Converted (logical) annotation, if any.
    #[serde(serialize_with = "serialize_display_opt")]
    pub converted_type: Option<ConvertedType>,
    /// Field cardinality.
    #[serde(serialize_with = "serialize_display")]
    pub repetition: Repetition,
    /// Number of direct children, set only on group nodes.
    pub num_children: Option<i32>,
}

fn serialize_display<T: fmt::Display, S: Serializer>(v: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(v)
}

fn serialize_display_opt<T: fmt::Display, S: Serializer>(
    v: &Option<T>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match v {
        Some(v) => s.collect_str(v),
        None => s.serialize_none(),
    }
}

impl SchemaElement {
    fn root(num_children: i32) -> Self {
        Self {
            name: ROOT_NAME.to_string(),
            physical_type: None,
            converted_type: None,
            repetition: Repetition::REQUIRED,
            num_children: Some(num_children),
        }
    }

    /// Whether this node is a leaf column.
    pub fn is_leaf(&self) -> bool {
        self.num_children.is_none()
    }
}

impl From<FieldMapping> for SchemaElement {
    fn from(field: FieldMapping) -> Self {
        Self {
            name: field.name,
            physical_type: Some(field.mapping.physical_type),
            converted_type: field.mapping.converted_type,
            repetition: field.mapping.repetition,
            num_children: None,
        }
    }
}

impl fmt::Display for SchemaElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.num_children, self.physical_type) {
            (Some(n), _) => write!(f, "{} {} group ({n} children)", self.repetition, self.name),
            (None, Some(p)) => match self.converted_type {
                Some(c) => write!(f, "{} {} {p} ({c})", self.repetition, self.name),
                None => write!(f, "{} {} {p}", self.repetition, self.name),
            },
            (None, None) => write!(f, "{} {} <untyped>", self.repetition, self.name),
        }
    }
}

/// Flatten every field of `schema` into a Parquet schema element list.
pub fn build_schema_elements(schema: &Schema) -> SchemaResult<Vec<SchemaElement>> {
    build_schema_elements_from_fields(schema.fields())
}

/// Flatten `fields` into a schema element list: the root group at index 0,
/// then field `i` at index `i + 1`.
///
/// The first unsupported field aborts the whole build.
pub fn build_schema_elements_from_fields(fields: &[FieldRef]) -> SchemaResult<Vec<SchemaElement>> {
    let num_children = i32::try_from(fields.len()).map_err(|_| {
        MalformedTreeSnafu {
            details: format!("{} fields exceed the i32 child count", fields.len()),
        }
        .build()
    })?;

    let mut elements = Vec::with_capacity(fields.len() + 1);
    elements.push(SchemaElement::root(num_children));
    for field in fields {
        elements.push(map_field(field)?.into());
    }

    debug!("converted arrow schema to {} parquet schema elements", elements.len());
    Ok(elements)
}

/// Rebuild a `parquet` schema tree from a preorder element list.
///
/// Checks the flattening invariants: the first node is a group, declared
/// child counts account for every following node, group nodes carry no
/// physical type and leaves always do.
pub fn to_parquet_schema(elements: &[SchemaElement]) -> SchemaResult<TypePtr> {
    let root = elements.first().ok_or_else(|| {
        MalformedTreeSnafu {
            details: "element list is empty".to_string(),
        }
        .build()
    })?;
    if root.is_leaf() {
        return MalformedTreeSnafu {
            details: format!("root '{}' has no child count", root.name),
        }
        .fail();
    }

    let mut pos = 0;
    let tree = build_node(elements, &mut pos, true)?;
    if pos != elements.len() {
        return MalformedTreeSnafu {
            details: format!(
                "root declares {} nodes but the list holds {}",
                pos,
                elements.len()
            ),
        }
        .fail();
    }
    Ok(tree)
}

fn build_node(elements: &[SchemaElement], pos: &mut usize, is_root: bool) -> SchemaResult<TypePtr> {
    let el = elements.get(*pos).ok_or_else(|| {
        MalformedTreeSnafu {
            details: format!("list ends at index {pos} but more children were declared"),
        }
        .build()
    })?;
    *pos += 1;

    let ty = match el.num_children {
        Some(n) => {
            if el.physical_type.is_some() {
                return MalformedTreeSnafu {
                    details: format!("group '{}' carries a physical type", el.name),
                }
                .fail();
            }
            let n = usize::try_from(n).map_err(|_| {
                MalformedTreeSnafu {
                    details: format!("group '{}' declares {n} children", el.name),
                }
                .build()
            })?;
            let mut children = Vec::with_capacity(n);
            for _ in 0..n {
                children.push(build_node(elements, pos, false)?);
            }
            let builder = Type::group_type_builder(&el.name).with_fields(children);
            // The schema root carries no repetition in the parquet type model.
            let builder = if is_root {
                builder
            } else {
                builder.with_repetition(el.repetition)
            };
            builder.build()
        }
        None => {
            let physical = el.physical_type.ok_or_else(|| {
                MalformedTreeSnafu {
                    details: format!("leaf '{}' has no physical type", el.name),
                }
                .build()
            })?;
            Type::primitive_type_builder(&el.name, physical)
                .with_repetition(el.repetition)
                .with_converted_type(el.converted_type.unwrap_or(ConvertedType::NONE))
                .build()
        }
    }
    .context(ParquetSchemaSnafu {
        name: el.name.clone(),
    })?;

    Ok(Arc::new(ty))
}

/// Convert `schema` all the way to a parquet [`SchemaDescriptor`], ready for
/// column sizing.
pub fn schema_descriptor(schema: &Schema) -> SchemaResult<SchemaDescriptor> {
    let elements = build_schema_elements(schema)?;
    let root = to_parquet_schema(&elements)?;
    Ok(SchemaDescriptor::new(root))
}
