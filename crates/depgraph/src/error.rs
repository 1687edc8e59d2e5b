//! Error types for loading dependency graphs.
//!
//! The graph queries themselves never fail; these errors cover reading the
//! record stream, running `go list`, and reading configuration.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for depgraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The package record stream could not be decoded.
    #[error("Stream error: {0}")]
    Stream(#[from] depgraph_stream::Error),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The `go list` command exited unsuccessfully.
    #[error("`{command}` failed ({status}): {stderr}")]
    GoList {
        /// The command line that was run.
        command: String,
        /// Exit status as reported by the OS.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file given explicitly does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The configuration file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid YAML for [`DepgraphConfig`](crate::config::DepgraphConfig).
    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// A specialized Result type for depgraph operations.
pub type Result<T> = std::result::Result<T, Error>;
