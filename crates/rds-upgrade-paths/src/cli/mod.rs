//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `generate`: Walk the catalog and write one graph file per engine
//! - `blue-green`: Check whether a version supports blue/green deployments
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! aws rds describe-db-engine-versions --output json > snapshot.json
//! rds-upgrade-paths generate --snapshot snapshot.json --output-dir public/aws/rds-upgrade-paths
//! rds-upgrade-paths blue-green postgres 14.9
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{BlueGreenArgs, GenerateArgs};
pub use types::EngineArg;
pub use validators::validate_version;

/// RDS upgrade paths - per-engine upgrade graphs with blue/green support
///
/// Walks the RDS engine version catalog and writes, for each engine, a graph
/// of versions and the versions they can be upgraded to.
#[derive(Parser, Debug)]
#[command(name = "rds-upgrade-paths")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build upgrade graphs and write them to disk
    ///
    /// Walks every configured engine in the catalog, then writes
    /// `<engine>.json` into the output directory. Nothing is written if the
    /// walk fails.
    Generate(GenerateArgs),

    /// Check blue/green deployment support for a version
    ///
    /// Uses the built-in table of minimum supported versions, merged with
    /// any `blue-green` overrides from the configuration file.
    BlueGreen(BlueGreenArgs),
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
        match &self.command {
            Commands::Generate(args) => execute::execute_generate(args, self.json).await,
            Commands::BlueGreen(args) => execute::execute_blue_green(args, self.json).await,
        }
    }
}
