use parquet::errors::ParquetError;
use pqbridge_core::{CodecError, SchemaConvertError};

use snafu::Snafu;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CliError {
    #[snafu(display("Input file not found or not readable: {path}"))]
    ReadInput {
        path: String,
        source: std::io::Error,
    },

    #[snafu(display("Failed to write output file: {path}"))]
    WriteOutput {
        path: String,
        source: std::io::Error,
    },

    #[snafu(display("Failed to read parquet footer of {path}"))]
    OpenParquet { path: String, source: ParquetError },

    #[snafu(display("Pass either --parquet or at least one --column"))]
    MissingSchemaSource,

    #[snafu(display("Schema cannot be stored as parquet: {source}"))]
    ConvertSchema { source: SchemaConvertError },

    #[snafu(display("{source}"))]
    Codec { source: CodecError },

    #[snafu(display("Failed to render schema element as JSON"))]
    RenderJson { source: serde_json::Error },

    #[snafu(display("Failed to write to stdout"))]
    Stdout { source: std::io::Error },
}
