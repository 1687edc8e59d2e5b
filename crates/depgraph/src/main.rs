//! Depgraph CLI binary.

use anyhow::Result;
use depgraph::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the depgraph CLI.
///
/// Uses tokio's current_thread runtime; the only async work is reading the
/// record stream and waiting on `go list`.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for query results.
    // Example: RUST_LOG=depgraph=debug,depgraph_stream=trace depgraph stats
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("depgraph=info,depgraph_stream=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting depgraph CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Depgraph CLI completed successfully");
    Ok(())
}
