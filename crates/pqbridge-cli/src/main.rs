//! CLI tool for inspecting Arrow-to-Parquet schema conversion and block codecs.

mod columns;
mod error;

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use arrow::datatypes::Schema;
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use pqbridge_core::{CodecId, CodecRegistry, build_schema_elements, metadata_strings};
use snafu::ResultExt;

use crate::{
    columns::{ColumnSpec, schema_from_columns},
    error::{
        CliResult, CodecSnafu, ConvertSchemaSnafu, MissingSchemaSourceSnafu, OpenParquetSnafu,
        ReadInputSnafu, RenderJsonSnafu, StdoutSnafu, WriteOutputSnafu,
    },
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemaFormatArg {
    /// One schema element per line
    Text,
    /// Schema elements as JSON lines
    Json,
    /// Per-field `name=..., type=...` tags
    Tags,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CodecArg {
    Uncompressed,
    Snappy,
    Gzip,
    Lzo,
    Brotli,
    Lz4,
    Zstd,
    Lz4Raw,
}

impl From<CodecArg> for CodecId {
    fn from(v: CodecArg) -> Self {
        match v {
            CodecArg::Uncompressed => CodecId::Uncompressed,
            CodecArg::Snappy => CodecId::Snappy,
            CodecArg::Gzip => CodecId::Gzip,
            CodecArg::Lzo => CodecId::Lzo,
            CodecArg::Brotli => CodecId::Brotli,
            CodecArg::Lz4 => CodecId::Lz4,
            CodecArg::Zstd => CodecId::Zstd,
            CodecArg::Lz4Raw => CodecId::Lz4Raw,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the Parquet schema elements for an Arrow schema
    Schema {
        /// Read the Arrow schema from this Parquet file's footer
        #[arg(long, conflicts_with = "column")]
        parquet: Option<PathBuf>,

        /// Repeatable NAME:TYPE column, `?` suffix for nullable (e.g. a:int8?)
        #[arg(long = "column")]
        column: Vec<ColumnSpec>,

        #[arg(long, value_enum, default_value_t = SchemaFormatArg::Text)]
        format: SchemaFormatArg,
    },

    /// Compress one file as a single block
    Compress {
        #[arg(long, value_enum)]
        codec: CodecArg,

        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        output: PathBuf,
    },

    /// Decompress one file holding a single block
    Decompress {
        #[arg(long, value_enum)]
        codec: CodecArg,

        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Debug, Parser)]
#[command(name = "pqbridge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

fn schema_from_parquet(path: &Path) -> CliResult<Schema> {
    let file = File::open(path).context(ReadInputSnafu {
        path: path.display().to_string(),
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).context(OpenParquetSnafu {
        path: path.display().to_string(),
    })?;
    Ok(builder.schema().as_ref().clone())
}

fn cmd_schema(
    parquet: Option<PathBuf>,
    columns: Vec<ColumnSpec>,
    format: SchemaFormatArg,
) -> CliResult<()> {
    let schema = match parquet {
        Some(path) => schema_from_parquet(&path)?,
        None if !columns.is_empty() => schema_from_columns(&columns),
        None => return MissingSchemaSourceSnafu.fail(),
    };

    let mut out = io::stdout().lock();
    match format {
        SchemaFormatArg::Text => {
            let elements = build_schema_elements(&schema).context(ConvertSchemaSnafu)?;
            for (i, el) in elements.iter().enumerate() {
                writeln!(out, "{i}: {el}").context(StdoutSnafu)?;
            }
        }
        SchemaFormatArg::Json => {
            let elements = build_schema_elements(&schema).context(ConvertSchemaSnafu)?;
            for el in &elements {
                let line = serde_json::to_string(el).context(RenderJsonSnafu)?;
                writeln!(out, "{line}").context(StdoutSnafu)?;
            }
        }
        SchemaFormatArg::Tags => {
            for tag in metadata_strings(&schema).context(ConvertSchemaSnafu)? {
                writeln!(out, "{tag}").context(StdoutSnafu)?;
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Compress,
    Decompress,
}

fn cmd_block(direction: Direction, codec: CodecId, input: &Path, output: &Path) -> CliResult<()> {
    let registry = CodecRegistry::with_defaults().context(CodecSnafu)?;
    let block_codec = registry.lookup(codec).context(CodecSnafu)?;

    let data = std::fs::read(input).context(ReadInputSnafu {
        path: input.display().to_string(),
    })?;
    debug!("read {} bytes from {}", data.len(), input.display());

    let result = match direction {
        Direction::Compress => block_codec.compress(&data),
        Direction::Decompress => block_codec.decompress(&data),
    }
    .context(CodecSnafu)?;

    std::fs::write(output, &result).context(WriteOutputSnafu {
        path: output.display().to_string(),
    })?;

    let verb = match direction {
        Direction::Compress => "Compressed",
        Direction::Decompress => "Decompressed",
    };
    println!(
        "{verb} {} -> {} bytes with {codec}: {}",
        data.len(),
        result.len(),
        output.display()
    );
    Ok(())
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Schema {
            parquet,
            column,
            format,
        } => cmd_schema(parquet, column, format),

        Command::Compress {
            codec,
            input,
            output,
        } => cmd_block(Direction::Compress, codec.into(), &input, &output),

        Command::Decompress {
            codec,
            input,
            output,
        } => cmd_block(Direction::Decompress, codec.into(), &input, &output),
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
