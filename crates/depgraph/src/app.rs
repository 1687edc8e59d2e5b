//! Application context for CLI command execution.
//!
//! This module resolves where the dependency records come from, loads them
//! into a [`DepGraph`], and holds the result for the command to query.

use crate::config::{DepgraphConfig, GoListConfig};
use crate::error::Result;
use crate::graph::DepGraph;
use crate::loader::{self, LoadSummary};
use std::fmt;
use std::path::{Path, PathBuf};

/// Argument value selecting standard input.
pub const STDIN_ARG: &str = "-";

/// Where package records are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A record stream file.
    File(PathBuf),
    /// Standard input.
    Stdin,
    /// The output of `go list`, run in `dir`.
    GoList {
        /// How to invoke `go list`.
        go: GoListConfig,
        /// Working directory for the command.
        dir: PathBuf,
    },
}

impl InputSource {
    /// Pick the input: an explicit path wins, then the configured input file,
    /// then a `go list` run in `dir`.
    pub fn resolve(explicit: Option<&Path>, config: &DepgraphConfig, dir: &Path) -> Self {
        match explicit.or(config.input.as_deref()) {
            Some(path) if path.as_os_str() == STDIN_ARG => Self::Stdin,
            Some(path) => Self::File(path.to_path_buf()),
            None => Self::GoList {
                go: config.go.clone(),
                dir: dir.to_path_buf(),
            },
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => write!(f, "<stdin>"),
            Self::GoList { go, dir } => write!(f, "`{}` in {}", go.command_line(), dir.display()),
        }
    }
}

/// Application context for CLI operations.
///
/// Holds the fully built graph; commands only read from it.
#[derive(Debug)]
pub struct App {
    graph: DepGraph,
    summary: LoadSummary,
    source: InputSource,
}

impl App {
    /// Load the graph from `source`.
    ///
    /// Skipped records are logged as warnings; they do not fail the load.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or decoded, or if
    /// `go list` fails.
    pub async fn load(source: InputSource) -> Result<Self> {
        let (graph, summary) = match &source {
            InputSource::File(path) => loader::load_from_path(path).await?,
            InputSource::Stdin => loader::load_from_reader(tokio::io::stdin()).await?,
            InputSource::GoList { go, dir } => loader::load_from_go_list(go, dir).await?,
        };

        for warning in &summary.warnings {
            tracing::warn!(source = %source, "{warning}");
        }

        Ok(Self {
            graph,
            summary,
            source,
        })
    }

    /// Wrap an already-built graph.
    pub fn from_graph(graph: DepGraph, source: InputSource) -> Self {
        Self {
            graph,
            summary: LoadSummary::default(),
            source,
        }
    }

    /// The loaded graph.
    pub fn graph(&self) -> &DepGraph {
        &self.graph
    }

    /// What happened during loading.
    pub fn summary(&self) -> &LoadSummary {
        &self.summary
    }

    /// Where the graph was loaded from.
    pub fn source(&self) -> &InputSource {
        &self.source
    }
}
