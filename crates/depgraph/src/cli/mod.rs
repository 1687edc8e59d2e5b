//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for depgraph using clap's derive API.
//! Each command loads the dependency graph once and runs a single query against it.
//!
//! # Commands
//!
//! - `stats`: Count ingested, main and test packages
//! - `info`: Show what the graph knows about one package
//! - `rdeps`: List the packages depending on a package
//! - `unused`: List library packages nothing depends on
//! - `chain`: Show how main packages reach a package
//! - `graph`: Show every import path between two packages
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--input`: Read records from a file (`-` for stdin) instead of running `go list`
//! - `--dir`: Directory to run `go list` in
//! - `--config`: Use this config file instead of searching for `.depgraph.yaml`
//!
//! # Example
//!
//! ```bash
//! go list -json -deps -test ./... > deps.json
//! depgraph -i deps.json rdeps golang.org/x/text/unicode/norm --scope all
//! depgraph -i deps.json chain golang.org/x/text/unicode/norm
//! depgraph graph example.com/app/cmd/app net/http --dot | dot -Tsvg > deps.svg
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

// Re-export argument structs
pub use args::{ChainArgs, GraphArgs, InfoArgs, RdepsArgs, StatsArgs, UnusedArgs};

// Re-export types
pub use types::ScopeArg;

// Re-export validators for external use
pub use validators::validate_package;

/// Depgraph - query the package dependency graph of a Go module
///
/// Reads the records printed by `go list -json -deps` and answers questions
/// about who depends on what.
#[derive(Parser, Debug)]
#[command(name = "depgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Read package records from this file ("-" for stdin)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory to run `go list` in and to search for a config file from
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Config file to use instead of searching for `.depgraph.yaml`
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show package counts
    ///
    /// Counts ingested packages, main packages and test binaries.
    Stats(StatsArgs),

    /// Show what the graph knows about a package
    ///
    /// Reports whether the package was ingested, its kind, and how many
    /// imports, dependencies and dependents it has.
    Info(InfoArgs),

    /// List the packages that depend on a package
    ///
    /// By default only main packages are listed; use `--scope` to list test
    /// binaries or every dependent instead.
    Rdeps(RdepsArgs),

    /// List packages nothing depends on
    ///
    /// Main packages and test binaries are never reported.
    Unused(UnusedArgs),

    /// Show how main packages reach a package
    ///
    /// Prints one import chain per main package that depends on the target.
    Chain(ChainArgs),

    /// Show every import path between two packages
    ///
    /// Prints the edges of the subgraph linking START to TARGET, or Graphviz
    /// DOT with `--dot`.
    Graph(GraphArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let Some(command) = &self.command else {
            println!("Depgraph dependency graph queries");
            println!("Use --help for more information");
            return Ok(());
        };

        let app = self.load_app().await?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        match command {
            Commands::Stats(args) => execute::execute_stats(&app, args, output_mode, &mut out),
            Commands::Info(args) => execute::execute_info(&app, args, output_mode, &mut out),
            Commands::Rdeps(args) => execute::execute_rdeps(&app, args, output_mode, &mut out),
            Commands::Unused(args) => execute::execute_unused(&app, args, output_mode, &mut out),
            Commands::Chain(args) => execute::execute_chain(&app, args, output_mode, &mut out),
            Commands::Graph(args) => execute::execute_graph(&app, args, output_mode, &mut out),
        }?;

        out.flush()?;
        Ok(())
    }

    /// Resolve configuration and input, then load the graph.
    async fn load_app(&self) -> Result<crate::app::App> {
        use crate::app::{App, InputSource};
        use crate::config::DepgraphConfig;

        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        let config = match &self.config {
            Some(path) => DepgraphConfig::load(path).await?,
            None => DepgraphConfig::discover(&dir).await?,
        }
        .with_env(|key| std::env::var(key).ok());

        let source = InputSource::resolve(self.input.as_deref(), &config, &dir);
        tracing::debug!(source = %source, "Loading dependency graph");

        App::load(source.clone())
            .await
            .with_context(|| format!("Failed to load dependency graph from {source}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // ========== CLI Parsing Tests ==========

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["depgraph"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
        assert!(cli.input.is_none());
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "depgraph", "--json", "-i", "deps.json", "-C", "/src", "unused",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.input, Some(PathBuf::from("deps.json")));
        assert_eq!(cli.dir, Some(PathBuf::from("/src")));
        assert!(matches!(cli.command, Some(Commands::Unused(_))));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["depgraph", "stats", "--input", "-", "--config", "c.yaml"])
                .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("-")));
        assert_eq!(cli.config, Some(PathBuf::from("c.yaml")));
        assert!(matches!(cli.command, Some(Commands::Stats(_))));
    }

    #[test]
    fn test_parse_info() {
        let cli = Cli::try_parse_from(["depgraph", "info", "net/http"]).unwrap();
        match cli.command {
            Some(Commands::Info(args)) => assert_eq!(args.package, "net/http"),
            _ => panic!("Expected Info command"),
        }
    }

    #[test]
    fn test_parse_rdeps_default_scope() {
        let cli = Cli::try_parse_from(["depgraph", "rdeps", "fmt"]).unwrap();
        match cli.command {
            Some(Commands::Rdeps(args)) => {
                assert_eq!(args.package, "fmt");
                assert_eq!(args.scope, ScopeArg::Main); // default
            }
            _ => panic!("Expected Rdeps command"),
        }
    }

    #[rstest]
    #[case("main", ScopeArg::Main)]
    #[case("test", ScopeArg::Test)]
    #[case("all", ScopeArg::All)]
    fn test_parse_rdeps_scope(#[case] value: &str, #[case] expected: ScopeArg) {
        let cli = Cli::try_parse_from(["depgraph", "rdeps", "fmt", "--scope", value]).unwrap();
        match cli.command {
            Some(Commands::Rdeps(args)) => assert_eq!(args.scope, expected),
            _ => panic!("Expected Rdeps command"),
        }
    }

    #[test]
    fn test_parse_rdeps_invalid_scope() {
        let result = Cli::try_parse_from(["depgraph", "rdeps", "fmt", "--scope", "lib"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_chain() {
        let cli = Cli::try_parse_from(["depgraph", "chain", "pkgB"]).unwrap();
        match cli.command {
            Some(Commands::Chain(args)) => assert_eq!(args.package, "pkgB"),
            _ => panic!("Expected Chain command"),
        }
    }

    #[test]
    fn test_parse_graph_with_dot() {
        let cli = Cli::try_parse_from(["depgraph", "graph", "cmd/app", "pkgB", "--dot"]).unwrap();
        match cli.command {
            Some(Commands::Graph(args)) => {
                assert_eq!(args.start, "cmd/app");
                assert_eq!(args.target, "pkgB");
                assert!(args.dot);
            }
            _ => panic!("Expected Graph command"),
        }
    }

    #[test]
    fn test_parse_graph_requires_target() {
        let result = Cli::try_parse_from(["depgraph", "graph", "cmd/app"]);
        assert!(result.is_err());
    }

    #[rstest]
    #[case::info(&["depgraph", "info", ""])]
    #[case::rdeps(&["depgraph", "rdeps", "a b"])]
    #[case::chain(&["depgraph", "chain", "   "])]
    #[case::graph(&["depgraph", "graph", "a", "b c"])]
    fn test_parse_rejects_invalid_package(#[case] argv: &[&str]) {
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(Cli::try_parse_from(["depgraph", "why"]).is_err());
    }
}
