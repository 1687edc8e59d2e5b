//! Integration tests for decoding realistic `go list -json` output.
//!
//! `go list -json` writes one indented object per package with no separators
//! other than newlines, and omits empty fields. These tests decode such
//! output from files on disk, both strictly and resiliently.

use depgraph_stream::{read_records, read_records_resilient, Error, RecordReader, Warning};
use futures::stream::StreamExt;
use rstest::rstest;
use serde::Deserialize;
use std::io::Write;
use tempfile::NamedTempFile;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct Package {
    import_path: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    imports: Vec<String>,
}

const GO_LIST_OUTPUT: &str = r#"{
	"Dir": "/usr/lib/go/src/errors",
	"ImportPath": "errors",
	"Name": "errors",
	"Goroot": true,
	"Standard": true
}
{
	"Dir": "/home/dev/app/cmd/app",
	"ImportPath": "example.com/app/cmd/app",
	"Name": "main",
	"Imports": [
		"errors",
		"example.com/app/internal/store"
	],
	"Deps": [
		"errors",
		"example.com/app/internal/store"
	]
}
{
	"ImportPath": "example.com/app/internal/store",
	"Name": "store"
}
"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn decodes_go_list_output_from_file() {
    let file = write_temp(GO_LIST_OUTPUT);

    let packages: Vec<Package> = read_records(file.path()).await.unwrap();

    let paths: Vec<&str> = packages.iter().map(|p| p.import_path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "errors",
            "example.com/app/cmd/app",
            "example.com/app/internal/store"
        ]
    );
    assert_eq!(packages[1].name, "main");
    assert_eq!(packages[1].imports.len(), 2);
    assert!(packages[0].imports.is_empty());
}

#[tokio::test]
async fn reports_record_start_lines() {
    let mut reader = RecordReader::new(GO_LIST_OUTPUT.as_bytes());
    let mut lines = Vec::new();
    while let Some(_pkg) = reader.next_record::<Package>().await.unwrap() {
        lines.push(reader.record_line());
    }
    assert_eq!(lines, [1, 8, 21]);
}

#[rstest]
#[case::missing_import_path("{\"Name\": \"x\"}")]
#[case::wrong_type("{\"ImportPath\": 12}")]
#[case::not_an_object("\"just a string\"")]
#[tokio::test]
async fn resilient_read_skips_bad_shapes(#[case] bad: &str) {
    let contents = format!("{{\"ImportPath\": \"a\"}}\n{bad}\n{{\"ImportPath\": \"b\"}}\n");
    let file = write_temp(&contents);

    let (packages, warnings) = read_records_resilient::<Package>(file.path())
        .await
        .unwrap();

    assert_eq!(packages.len(), 2);
    assert_eq!(warnings.len(), 1);
    assert!(matches!(
        &warnings[0],
        Warning::InvalidRecord {
            record_number: 2,
            line_number: 2,
            ..
        }
    ));
}

#[tokio::test]
async fn strict_read_fails_on_bad_shape() {
    let file = write_temp("{\"ImportPath\": \"a\"}\n{\"ImportPath\": []}\n");

    let err = read_records::<Package>(file.path()).await.unwrap_err();

    assert!(matches!(err, Error::InvalidRecord { record_number: 2, .. }));
    assert!(err.to_string().contains("record 2"));
}

#[tokio::test]
async fn truncated_file_is_an_error_even_when_resilient() {
    let file = write_temp("{\"ImportPath\": \"a\"}\n{\"ImportPath\": \"b\"");

    let err = read_records_resilient::<Package>(file.path())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Truncated { line_number: 2 }));
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_records::<Package>(dir.path().join("absent.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[tokio::test]
async fn stream_counts_match_reader_counts() {
    let count = RecordReader::new(GO_LIST_OUTPUT.as_bytes())
        .into_stream::<Package>()
        .filter(|r| std::future::ready(r.is_ok()))
        .count()
        .await;
    assert_eq!(count, 3);
}
