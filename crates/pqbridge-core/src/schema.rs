//! Arrow schema to Parquet schema element conversion.
//!
//! Parquet writers that size and lay out column data from a flat schema
//! element list cannot consume an Arrow [`Schema`](arrow::datatypes::Schema)
//! directly. This module bridges the two:
//!
//! - [`ExternalType`] narrows an Arrow `DataType` to the closed set of types
//!   this crate knows how to store.
//! - [`map_field`] resolves one Arrow field to its Parquet
//!   [`TypeMapping`] and the textual field tag handed to tag-driven schema
//!   handlers.
//! - [`build_schema_elements`] flattens a whole schema into the preorder
//!   element list with a synthetic root, and [`to_parquet_schema`] rebuilds a
//!   `parquet` schema tree from that list.
//!
//! Conversion is all-or-nothing: the first unsupported field aborts the whole
//! schema and no partial list is returned.

pub mod error;
pub mod external_type;
pub mod tree;
pub mod type_mapping;

pub use error::{ParseExternalTypeError, SchemaConvertError, SchemaResult};
pub use external_type::ExternalType;
pub use tree::{
    ROOT_NAME, SchemaElement, build_schema_elements, build_schema_elements_from_fields,
    schema_descriptor, to_parquet_schema,
};
pub use type_mapping::{FieldMapping, TypeMapping, map_field, metadata_strings};
