//! Integration tests for `pqbridge schema`.

use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

mod common;

use common::write_empty_parquet;

fn cli() -> Command {
    Command::cargo_bin("pqbridge").expect("pqbridge binary is built")
}

#[test]
fn schema_tags_from_columns() -> Result<(), Box<dyn std::error::Error>> {
    let output = cli()
        .args(["schema", "--column", "a:int8?", "--column", "b:int64", "--format", "tags"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "name=a, type=INT32, convertedtype=INT_8, repetitiontype=OPTIONAL",
            "name=b, type=INT64, repetitiontype=REQUIRED",
        ]
    );
    Ok(())
}

#[test]
fn schema_text_lists_root_first() -> Result<(), Box<dyn std::error::Error>> {
    cli()
        .args(["schema", "--column", "a:int8?", "--column", "s:string?"])
        .assert()
        .success()
        .stdout(contains("0: REQUIRED arrow_schema group (2 children)"))
        .stdout(contains("1: OPTIONAL a INT32 (INT_8)"))
        .stdout(contains("2: OPTIONAL s BYTE_ARRAY (UTF8)"));
    Ok(())
}

#[test]
fn schema_json_from_parquet_footer() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let parquet = tmp.path().join("data.parquet");
    write_empty_parquet(
        &parquet,
        Schema::new(vec![
            Field::new("ts", DataType::Timestamp(TimeUnit::Millisecond, None), false),
            Field::new("volume", DataType::UInt16, true),
        ]),
    )?;

    let output = cli()
        .args([
            "schema",
            "--parquet",
            parquet.to_string_lossy().as_ref(),
            "--format",
            "json",
        ])
        .output()?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let lines: Vec<serde_json::Value> = String::from_utf8(output.stdout)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["num_children"], 2);
    assert_eq!(lines[1]["name"], "ts");
    assert_eq!(lines[1]["converted_type"], "TIMESTAMP_MILLIS");
    assert_eq!(lines[2]["converted_type"], "UINT_16");
    assert_eq!(lines[2]["repetition"], "OPTIONAL");
    Ok(())
}

#[test]
fn schema_rejects_unsupported_timestamp_unit() {
    cli()
        .args(["schema", "--column", "ts:timestamp[ns]"])
        .assert()
        .failure()
        .stderr(contains("unsupported timestamp unit for column 'ts'"));
}

#[test]
fn schema_requires_a_source() {
    cli()
        .args(["schema"])
        .assert()
        .failure()
        .stderr(contains("Pass either --parquet or at least one --column"));
}
