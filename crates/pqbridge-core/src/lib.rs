//! Core of the Arrow-to-Parquet bridge.
//!
//! This crate provides the pieces a Parquet writer needs before it can lay out
//! column data for an Arrow schema:
//!
//! - A closed Arrow type table mapping each supported Arrow field to its
//!   Parquet (physical type, converted type, repetition) triple, plus the
//!   textual field tag consumed by tag-driven schema handlers (`schema` module).
//! - A builder that flattens those mappings into the preorder schema element
//!   list Parquet stores in its footer, rooted at a synthetic group node.
//! - A write-once registry of block codecs keyed by the Parquet compression
//!   codec id, with a raw (unframed) LZ4 block codec (`codec` module).
//!
//! Higher-level crates (the `pqbridge` CLI, writers) depend on this crate
//! rather than re-implementing the type table or the block contract.
#![deny(missing_docs)]
pub mod codec;
pub mod schema;

pub use codec::{BlockCodec, CodecDescriptor, CodecError, CodecId, CodecRegistry};
pub use schema::{
    ExternalType, FieldMapping, ROOT_NAME, SchemaConvertError, SchemaElement, TypeMapping,
    build_schema_elements, map_field, metadata_strings, to_parquet_schema,
};
