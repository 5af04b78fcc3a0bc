//! RDS upgrade paths CLI binary.

use anyhow::Result;
use rds_upgrade_paths::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the rds-upgrade-paths CLI.
///
/// Catalog queries are issued one at a time, so a current_thread runtime is
/// sufficient.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=rds_upgrade_paths=debug rds-upgrade-paths generate --snapshot s.json
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rds_upgrade_paths=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting rds-upgrade-paths CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("rds-upgrade-paths CLI completed successfully");
    Ok(())
}
