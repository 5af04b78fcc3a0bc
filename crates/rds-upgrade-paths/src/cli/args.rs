//! CLI argument structs for all commands.

use clap::Parser;
use std::path::PathBuf;

use super::types::EngineArg;
use super::validators::validate_version;
use crate::config::{MAX_PAGE_SIZE, MIN_PAGE_SIZE};

/// Arguments for the `generate` command
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Configuration file (defaults to `rds-upgrade-paths.yaml` if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Read the catalog from a `describe-db-engine-versions` JSON snapshot
    #[arg(short, long, conflicts_with = "aws")]
    pub snapshot: Option<PathBuf>,

    /// Query the live AWS RDS API (requires the `aws` feature)
    #[arg(long)]
    pub aws: bool,

    /// Named AWS profile for the live catalog
    #[arg(long, requires = "aws")]
    pub profile: Option<String>,

    /// Directory receiving one `<engine>.json` per engine
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Engines to process (comma-separated, defaults to all)
    #[arg(short, long = "engine", value_enum, value_delimiter = ',')]
    pub engines: Vec<EngineArg>,

    /// Records requested per catalog page
    #[arg(long, value_parser = clap::value_parser!(u32).range(i64::from(MIN_PAGE_SIZE)..=i64::from(MAX_PAGE_SIZE)))]
    pub page_size: Option<u32>,
}

/// Arguments for the `blue-green` command
#[derive(Parser, Debug, Clone)]
pub struct BlueGreenArgs {
    /// Engine the version belongs to
    #[arg(value_enum)]
    pub engine: EngineArg,

    /// Engine version to check
    #[arg(value_name = "VERSION", value_parser = validate_version)]
    pub engine_version: String,

    /// Configuration file providing blue/green overrides (defaults to
    /// `rds-upgrade-paths.yaml` if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
