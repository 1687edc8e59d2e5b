//! CLI argument structs for all commands.

use clap::Parser;

use super::types::ScopeArg;
use super::validators::validate_package;

/// Arguments for the `stats` command
#[derive(Parser, Debug, Clone, Default)]
pub struct StatsArgs {}

/// Arguments for the `info` command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {
    /// Package import path
    #[arg(value_parser = validate_package)]
    pub package: String,
}

/// Arguments for the `rdeps` command
#[derive(Parser, Debug, Clone)]
pub struct RdepsArgs {
    /// Package import path to find dependents of
    #[arg(value_parser = validate_package)]
    pub package: String,

    /// Which dependents to report
    #[arg(short, long, value_enum, default_value_t = ScopeArg::Main)]
    pub scope: ScopeArg,
}

/// Arguments for the `unused` command
#[derive(Parser, Debug, Clone, Default)]
pub struct UnusedArgs {}

/// Arguments for the `chain` command
#[derive(Parser, Debug, Clone)]
pub struct ChainArgs {
    /// Package import path the chains should end at
    #[arg(value_parser = validate_package)]
    pub package: String,
}

/// Arguments for the `graph` command
#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    /// Package the paths start from
    #[arg(value_parser = validate_package)]
    pub start: String,

    /// Package the paths lead to
    #[arg(value_parser = validate_package)]
    pub target: String,

    /// Print Graphviz DOT instead of an edge list
    #[arg(long)]
    pub dot: bool,
}
