//! Command execution logic.
//!
//! Each command runs one query against the loaded graph and prints the
//! result. Empty results are not errors.

use anyhow::Result;
use std::io::Write;

use super::args::{ChainArgs, GraphArgs, InfoArgs, RdepsArgs, StatsArgs, UnusedArgs};
use super::types::ScopeArg;
use crate::app::App;
use crate::output::{self, GraphStats, OutputMode, PackageInfo};

/// Execute the stats command
pub fn execute_stats<W: Write>(
    app: &App,
    _args: &StatsArgs,
    output_mode: OutputMode,
    w: &mut W,
) -> Result<()> {
    output::print_stats(w, GraphStats::of(app.graph()), output_mode)?;
    Ok(())
}

/// Execute the info command
pub fn execute_info<W: Write>(
    app: &App,
    args: &InfoArgs,
    output_mode: OutputMode,
    w: &mut W,
) -> Result<()> {
    let info = PackageInfo::of(app.graph(), &args.package);
    output::print_info(w, &info, output_mode)?;
    Ok(())
}

/// Execute the rdeps command
pub fn execute_rdeps<W: Write>(
    app: &App,
    args: &RdepsArgs,
    output_mode: OutputMode,
    w: &mut W,
) -> Result<()> {
    let graph = app.graph();
    let found = match args.scope {
        ScopeArg::Main => graph.search_main(&args.package),
        ScopeArg::Test => graph.search_test(&args.package),
        ScopeArg::All => graph.search_all(&args.package),
    };
    tracing::debug!(package = %args.package, scope = %args.scope, found = found.len(), "Reverse dependency search");

    if found.is_empty() && !graph.exists(&args.package) {
        tracing::info!(package = %args.package, "Package is not in the dependency data");
    }
    output::print_packages(w, &found, output_mode)?;
    Ok(())
}

/// Execute the unused command
pub fn execute_unused<W: Write>(
    app: &App,
    _args: &UnusedArgs,
    output_mode: OutputMode,
    w: &mut W,
) -> Result<()> {
    let unused = app.graph().list_unused();
    output::print_packages(w, &unused, output_mode)?;
    Ok(())
}

/// Execute the chain command
pub fn execute_chain<W: Write>(
    app: &App,
    args: &ChainArgs,
    output_mode: OutputMode,
    w: &mut W,
) -> Result<()> {
    let chains = app.graph().search_chain(&args.package);
    let elided = chains.iter().filter(|c| !c.is_complete()).count();
    if elided > 0 {
        tracing::debug!(
            package = %args.package,
            elided,
            "Some chains could not be fully reconstructed from the direct imports"
        );
    }
    output::print_chains(w, &chains, output_mode)?;
    Ok(())
}

/// Execute the graph command
pub fn execute_graph<W: Write>(
    app: &App,
    args: &GraphArgs,
    output_mode: OutputMode,
    w: &mut W,
) -> Result<()> {
    let subgraph = app.graph().search_subgraph(&args.start, &args.target);
    output::print_subgraph(w, subgraph.as_ref(), output_mode, args.dot)?;
    Ok(())
}
