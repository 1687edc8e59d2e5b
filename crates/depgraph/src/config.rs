//! Configuration loading for depgraph.
//!
//! Configuration is optional. When present it lives in a `.depgraph.yaml`
//! file found by walking up from the working directory, or is named
//! explicitly with `--config`:
//!
//! ```yaml
//! input: deps.json
//! go:
//!   command: go
//!   patterns: ["./..."]
//!   tests: true
//! ```
//!
//! A relative `input` is resolved against the directory holding the config
//! file. The `DEPGRAPH_GO` environment variable overrides `go.command`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = ".depgraph.yaml";

/// Environment variable overriding the `go` binary.
pub const GO_COMMAND_ENV: &str = "DEPGRAPH_GO";

/// Maximum directory depth to traverse when searching for a config file.
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DepgraphConfig {
    /// Record stream to load instead of running `go list`.
    pub input: Option<PathBuf>,

    /// How to invoke `go list` when no input file is given.
    pub go: GoListConfig,
}

/// Settings for the `go list` invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GoListConfig {
    /// The `go` binary to run.
    pub command: String,

    /// Package patterns passed to `go list`.
    pub patterns: Vec<String>,

    /// Whether to include test binaries (`-test`).
    pub tests: bool,
}

impl Default for GoListConfig {
    fn default() -> Self {
        Self {
            command: "go".to_string(),
            patterns: vec!["./...".to_string()],
            tests: true,
        }
    }
}

impl GoListConfig {
    /// Arguments passed to the `go` binary.
    pub fn args(&self) -> Vec<String> {
        let mut args: Vec<String> = ["list", "-json", "-deps"]
            .into_iter()
            .map(String::from)
            .collect();
        if self.tests {
            args.push("-test".to_string());
        }
        args.extend(self.patterns.iter().cloned());
        args
    }

    /// The full command line, for messages.
    pub fn command_line(&self) -> String {
        let mut line = self.command.clone();
        for arg in self.args() {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }
}

impl DepgraphConfig {
    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file does not exist,
    /// [`ConfigError::Read`] on other IO failures, and
    /// [`ConfigError::Parse`] if the YAML is invalid.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let mut config: Self =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(base) = path.parent() {
            config.input = config
                .input
                .map(|input| if input.is_relative() { base.join(input) } else { input });
        }
        Ok(config)
    }

    /// Load the nearest config file above `start_dir`, or the defaults if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is found but cannot be read or parsed.
    pub async fn discover(start_dir: &Path) -> Result<Self, ConfigError> {
        match find_config_file(start_dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Using config file");
                Self::load(&path).await
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment overrides, reading variables through `lookup`.
    #[must_use]
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(command) = lookup(GO_COMMAND_ENV).filter(|c| !c.is_empty()) {
            self.go.command = command;
        }
        self
    }
}

/// Find the nearest config file by searching up the directory tree.
///
/// Returns `None` if no config file exists within [`MAX_TRAVERSAL_DEPTH`]
/// levels or before the filesystem root.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
