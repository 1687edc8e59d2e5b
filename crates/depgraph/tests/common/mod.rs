//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path to a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run the depgraph binary in `dir` with colors and logging turned off.
pub fn run_depgraph_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_depgraph"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off")
        .env_remove("DEPGRAPH_GO")
        .output()
        .expect("Failed to execute depgraph")
}

/// Run the depgraph binary against the `go_list.json` fixture with `--json`
/// and parse its stdout.
pub fn query_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let input = fixture_path("go_list.json");
    let input = input.to_str().expect("fixture path is UTF-8");
    let mut full = vec!["--json", "--input", input];
    full.extend_from_slice(args);

    let output = run_depgraph_in_dir(dir, &full);
    assert!(
        output.status.success(),
        "depgraph {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}
