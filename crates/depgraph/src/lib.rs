//! Depgraph - queries over a Go package dependency graph.
//!
//! This crate provides both a CLI application and a library. The library
//! builds a [`DepGraph`] from the package records `go list -json -deps`
//! emits and answers reverse-dependency, unused-package, chain and subgraph
//! queries against it.
//!
//! ```
//! use depgraph::{DepGraph, PackageRecord};
//!
//! let graph: DepGraph = [
//!     PackageRecord::new("cmd/app", "main")
//!         .with_imports(["lib"])
//!         .with_deps(["lib"]),
//!     PackageRecord::new("lib", "lib"),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(graph.search_main("lib"), ["cmd/app"]);
//! assert_eq!(graph.search_chain("lib")[0].to_string(), "main -> cmd/app -> lib");
//! ```

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod loader;

// Public CLI module (needed by binary)
pub mod cli;

// Application context and printing for the CLI
pub mod app;
pub mod output;

pub use domain::{PackageKind, PackageRecord};
pub use error::{ConfigError, Error, Result};
pub use graph::{Chain, ChainLink, DepGraph, Subgraph};
pub use loader::{LoadSummary, load_from_go_list, load_from_path, load_from_reader};
