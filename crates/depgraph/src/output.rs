//! Output formatting for CLI commands.
//!
//! Every printer writes to a caller-supplied [`Write`] in either a
//! human-readable text form or pretty-printed JSON for programmatic use.

use crate::domain::PackageKind;
use crate::graph::{Chain, ChainLink, DepGraph, Subgraph};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Package counts, as printed by `stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Ingested packages.
    pub packages: usize,
    /// Main packages.
    pub main: usize,
    /// Test binaries.
    pub test: usize,
}

impl GraphStats {
    /// Collect the counts of a graph.
    pub fn of(graph: &DepGraph) -> Self {
        Self {
            packages: graph.count_all(),
            main: graph.count_main(),
            test: graph.count_test(),
        }
    }
}

/// Membership facts about one package, as printed by `info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    /// The package asked about.
    pub package: String,
    /// Whether it was ingested.
    pub exists: bool,
    /// Its role, when it was ingested.
    pub kind: Option<PackageKind>,
    /// Number of direct imports.
    pub imports: usize,
    /// Number of transitive dependencies.
    pub deps: usize,
    /// Number of ingested packages depending on it.
    pub dependents: usize,
}

impl PackageInfo {
    /// Gather the facts about `package`.
    pub fn of(graph: &DepGraph, package: &str) -> Self {
        let exists = graph.exists(package);
        let kind = exists.then(|| {
            if graph.is_main(package) {
                PackageKind::Main
            } else if graph.is_test(package) {
                PackageKind::Test
            } else {
                PackageKind::Library
            }
        });
        Self {
            package: package.to_string(),
            exists,
            kind,
            imports: graph.imports_of(package).map_or(0, |s| s.len()),
            deps: graph.deps_of(package).map_or(0, |s| s.len()),
            dependents: graph.search_all(package).len(),
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)
}

fn write_empty<W: Write>(w: &mut W, message: &str) -> io::Result<()> {
    writeln!(w, "{}", message.dimmed())
}

/// Print a list of import paths, one per line.
pub fn print_packages<W: Write>(w: &mut W, packages: &[&str], mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => write_json(w, packages),
        OutputMode::Text if packages.is_empty() => write_empty(w, "No matching packages."),
        OutputMode::Text => {
            for package in packages {
                writeln!(w, "{package}")?;
            }
            Ok(())
        }
    }
}

fn colorize_link(link: &ChainLink) -> String {
    match link {
        ChainLink::Root => link.to_string().green().bold().to_string(),
        ChainLink::Package(path) => path.cyan().to_string(),
        ChainLink::Elided => link.to_string().dimmed().to_string(),
    }
}

/// Print witness chains, one per line.
pub fn print_chains<W: Write>(w: &mut W, chains: &[Chain], mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => write_json(w, chains),
        OutputMode::Text if chains.is_empty() => {
            write_empty(w, "No main package depends on this package.")
        }
        OutputMode::Text => {
            for chain in chains {
                let rendered: Vec<String> = chain.links().iter().map(colorize_link).collect();
                writeln!(w, "{}", rendered.join(" -> "))?;
            }
            Ok(())
        }
    }
}

/// Print a subgraph, or a note that none exists.
///
/// With `dot` set the subgraph is written as Graphviz DOT regardless of `mode`.
pub fn print_subgraph<W: Write>(
    w: &mut W,
    subgraph: Option<&Subgraph>,
    mode: OutputMode,
    dot: bool,
) -> io::Result<()> {
    match (subgraph, mode) {
        (Some(sub), _) if dot => write!(w, "{}", sub.to_dot()),
        (sub, OutputMode::Json) => write_json(w, &sub),
        (None, OutputMode::Text) => write_empty(w, "No dependency between these packages."),
        (Some(sub), OutputMode::Text) => {
            writeln!(
                w,
                "{} -> {} ({} edges)",
                sub.start().cyan(),
                sub.target().cyan(),
                sub.edge_count()
            )?;
            for (from, tos) in sub.edges() {
                for to in tos {
                    writeln!(w, "  {from} -> {to}")?;
                }
            }
            Ok(())
        }
    }
}

/// Print package counts.
pub fn print_stats<W: Write>(w: &mut W, stats: GraphStats, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => write_json(w, &stats),
        OutputMode::Text => {
            writeln!(w, "{:<15}{}", "Packages:".bold(), stats.packages)?;
            writeln!(w, "{:<15}{}", "Main packages:".bold(), stats.main)?;
            writeln!(w, "{:<15}{}", "Test binaries:".bold(), stats.test)
        }
    }
}

/// Print membership facts about one package.
pub fn print_info<W: Write>(w: &mut W, info: &PackageInfo, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => write_json(w, info),
        OutputMode::Text if !info.exists => {
            write_empty(w, &format!("{} is not in the dependency data.", info.package))
        }
        OutputMode::Text => {
            writeln!(w, "{}", info.package.cyan().bold())?;
            if let Some(kind) = info.kind {
                writeln!(w, "  kind:       {kind}")?;
            }
            writeln!(w, "  imports:    {}", info.imports)?;
            writeln!(w, "  deps:       {}", info.deps)?;
            writeln!(w, "  dependents: {}", info.dependents)
        }
    }
}
