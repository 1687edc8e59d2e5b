//! Building a [`DepGraph`] from a package record stream.
//!
//! This is the ingestion loop around the graph: records are decoded one at a
//! time by `depgraph-stream` and handed to [`DepGraph::insert`] until the
//! stream ends. The source can be any async reader, a file, or the stdout
//! of a `go list -json -deps` run.

use crate::config::GoListConfig;
use crate::domain::PackageRecord;
use crate::error::{Error, Result};
use crate::graph::DepGraph;
use depgraph_stream::{RecordReader, Warning, WarningCollector};
use futures::stream::StreamExt;
use std::io;
use std::path::Path;
use std::process::Stdio;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

/// What happened while loading a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Records decoded from the stream, including skipped variants.
    pub records: usize,

    /// Build-variant records the graph ignored.
    pub skipped_variants: usize,

    /// Records that were skipped because they did not have the expected shape.
    pub warnings: Vec<Warning>,
}

/// Load a graph from any async reader.
///
/// Records of the wrong shape are skipped and reported in
/// [`LoadSummary::warnings`].
///
/// # Errors
///
/// Returns [`Error::Stream`] if reading fails, the input is not valid JSON,
/// or it ends inside a record.
pub async fn load_from_reader<R: AsyncRead + Unpin>(reader: R) -> Result<(DepGraph, LoadSummary)> {
    let collector = WarningCollector::new();
    let mut records = std::pin::pin!(
        RecordReader::new(reader).into_resilient_stream::<PackageRecord>(collector.clone())
    );

    let mut graph = DepGraph::new();
    let mut summary = LoadSummary::default();

    while let Some(record) = records.next().await {
        let record = record?;
        summary.records += 1;
        if record.is_variant() {
            summary.skipped_variants += 1;
            tracing::trace!(import_path = %record.import_path, "Skipping build variant");
        }
        graph.insert(record);
    }

    summary.warnings = collector.into_warnings();
    tracing::debug!(
        records = summary.records,
        packages = graph.count_all(),
        main = graph.count_main(),
        test = graph.count_test(),
        skipped_variants = summary.skipped_variants,
        warnings = summary.warnings.len(),
        "Loaded dependency graph"
    );
    Ok((graph, summary))
}

/// Load a graph from a record stream file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened, otherwise the errors
/// of [`load_from_reader`].
pub async fn load_from_path(path: &Path) -> Result<(DepGraph, LoadSummary)> {
    tracing::debug!(path = %path.display(), "Loading dependency records");
    let file = File::open(path).await?;
    load_from_reader(file).await
}

/// Run `go list -json -deps` in `dir` and load its output.
///
/// Records are decoded as the command writes them; its stderr is collected
/// alongside for error reporting.
///
/// # Errors
///
/// Returns [`Error::Io`] if the command cannot be started, the errors of
/// [`load_from_reader`] if its output cannot be decoded, and
/// [`Error::GoList`] if it otherwise exits unsuccessfully.
pub async fn load_from_go_list(go: &GoListConfig, dir: &Path) -> Result<(DepGraph, LoadSummary)> {
    tracing::debug!(command = %go.command_line(), dir = %dir.display(), "Running go list");
    let mut child = Command::new(&go.command)
        .args(go.args())
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let (Some(stdout), Some(mut stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return Err(Error::Io(io::Error::other("go list output was not captured")));
    };

    // Both pipes are drained together so a chatty stderr cannot block stdout.
    let mut captured = Vec::new();
    let (loaded, drained) = tokio::join!(
        load_from_reader(stdout),
        stderr.read_to_end(&mut captured)
    );
    drained?;
    let status = child.wait().await?;
    let loaded = loaded?;

    if !status.success() {
        return Err(Error::GoList {
            command: go.command_line(),
            status: status.to_string(),
            stderr: String::from_utf8_lossy(&captured).trim().to_string(),
        });
    }

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STREAM: &str = r#"{"ImportPath": "errors", "Name": "errors"}
{"ImportPath": "pkgA", "Name": "pkgA", "Imports": ["errors"], "Deps": ["errors"]}
{"ImportPath": "pkgA [pkgA.test]", "Name": "pkgA", "Imports": ["errors"], "Deps": ["errors"]}
{"ImportPath": "pkgA.test", "Name": "main", "Imports": ["pkgA [pkgA.test]"], "Deps": ["errors", "pkgA [pkgA.test]"]}
{"ImportPath": "cmd/app", "Name": "main", "Imports": ["pkgA"], "Deps": ["errors", "pkgA"]}
"#;

    #[tokio::test]
    async fn loads_records_and_skips_variants() {
        let (graph, summary) = load_from_reader(STREAM.as_bytes()).await.unwrap();

        assert_eq!(summary.records, 5);
        assert_eq!(summary.skipped_variants, 1);
        assert!(summary.warnings.is_empty());
        assert_eq!(graph.count_all(), 4);
        assert_eq!(graph.count_main(), 1);
        assert_eq!(graph.count_test(), 1);
        assert!(!graph.exists("pkgA [pkgA.test]"));
    }

    #[tokio::test]
    async fn empty_stream_gives_empty_graph() {
        let (graph, summary) = load_from_reader(&b""[..]).await.unwrap();
        assert_eq!(graph.count_all(), 0);
        assert_eq!(summary, LoadSummary::default());
    }

    #[tokio::test]
    async fn bad_records_become_warnings() {
        let input = "{\"ImportPath\": \"a\"}\n{\"Imports\": [\"a\"]}\n{\"ImportPath\": \"b\"}\n";
        let (graph, summary) = load_from_reader(input.as_bytes()).await.unwrap();

        assert_eq!(graph.count_all(), 2);
        assert_eq!(summary.records, 2);
        assert_eq!(summary.warnings.len(), 1);
        assert_eq!(summary.warnings[0].line_number(), 2);
    }

    #[tokio::test]
    async fn syntax_error_fails_the_load() {
        let err = load_from_reader(&b"{\"ImportPath\": \"a\"} {oops}"[..])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Stream(depgraph_stream::Error::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn missing_go_binary_is_io_error() {
        let go = GoListConfig {
            command: "depgraph-test-no-such-binary".to_string(),
            ..GoListConfig::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_go_list(&go, dir.path()).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_go_command_reports_status() {
        let go = GoListConfig {
            command: "false".to_string(),
            ..GoListConfig::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_go_list(&go, dir.path()).await.unwrap_err();
        match err {
            Error::GoList { command, .. } => assert!(command.starts_with("false list -json")),
            other => panic!("expected GoList error, got {other:?}"),
        }
    }

    /// Runs `sh list -json -deps` in a directory whose `list` file is the
    /// given script, standing in for the `go` binary.
    #[cfg(unix)]
    async fn run_fake_go_list(script: &str) -> Result<(DepGraph, LoadSummary)> {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("list"), script).unwrap();
        let go = GoListConfig {
            command: "sh".to_string(),
            patterns: Vec::new(),
            tests: false,
        };
        load_from_go_list(&go, dir.path()).await
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn go_list_output_is_streamed_into_the_graph() {
        let script = r#"
for i in $(seq 1 2000); do
  echo "{\"ImportPath\": \"lib$i\", \"Name\": \"lib\"}"
done
echo '{"ImportPath": "cmd/app", "Name": "main", "Imports": ["lib1"], "Deps": ["lib1"]}'
echo "go: downloading example.com/lib v1.0.0" >&2
"#;
        let (graph, summary) = run_fake_go_list(script).await.unwrap();

        assert_eq!(summary.records, 2001);
        assert_eq!(graph.count_all(), 2001);
        assert_eq!(graph.search_main("lib1"), ["cmd/app"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn large_stderr_does_not_block_failure_report() {
        let script = "i=0\nwhile [ $i -lt 5000 ]; do echo \"package example.com/x$i: not found\" >&2; i=$((i+1)); done\nexit 1\n";
        let err = run_fake_go_list(script).await.unwrap_err();
        match err {
            Error::GoList { stderr, .. } => {
                assert!(stderr.starts_with("package example.com/x0: not found"));
                assert!(stderr.ends_with("package example.com/x4999: not found"));
            }
            other => panic!("expected GoList error, got {other:?}"),
        }
    }
}
