use std::{path::Path, sync::Arc};

use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Write a Parquet file with `schema` and no rows; only the footer matters.
pub fn write_empty_parquet(path: &Path, schema: Schema) -> TestResult {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let schema = Arc::new(schema);
    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema.clone(), None)?;
    writer.write(&RecordBatch::new_empty(schema))?;
    writer.close()?;
    Ok(())
}
