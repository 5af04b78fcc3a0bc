//! Configuration for upgrade path generation.
//!
//! Configuration is read from an optional YAML file. Every key is optional:
//!
//! ```yaml
//! output-dir: public/aws/rds-upgrade-paths
//! page-size: 100
//! engines: [postgres, mysql]
//! aws-profile: production
//! blue-green:
//!   mariadb:
//!     baselines: ["10.2", "11.4"]
//! ```

use crate::domain::Engine;
use crate::eligibility::{BlueGreenPolicy, BlueGreenRule};
use crate::error::{Error, Result};
use crate::walker::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "rds-upgrade-paths.yaml";

/// Default directory graph files are written to
pub const DEFAULT_OUTPUT_DIR: &str = "public/aws/rds-upgrade-paths";

/// Smallest page size accepted by the RDS API
pub const MIN_PAGE_SIZE: u32 = 20;

/// Largest page size accepted by the RDS API
pub const MAX_PAGE_SIZE: u32 = 100;

/// Run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Directory receiving one `<engine>.json` per engine
    pub output_dir: PathBuf,

    /// Records requested per catalog page
    pub page_size: u32,

    /// Engines to process, in order
    pub engines: Vec<Engine>,

    /// Named AWS profile for the live catalog
    pub aws_profile: Option<String>,

    /// Per-engine overrides of the built-in blue/green table
    pub blue_green: BTreeMap<Engine, BlueGreenRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            page_size: DEFAULT_PAGE_SIZE,
            engines: Engine::ALL.to_vec(),
            aws_profile: None,
            blue_green: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parse and validate configuration from YAML.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the YAML is malformed or fails validation.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Config` if
    /// it is invalid.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        Self::from_yaml(&content)
    }

    /// Load `path` if given, else [`CONFIG_FILE_NAME`] from `dir` if present,
    /// else defaults.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub async fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path).await;
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if fs::try_exists(&candidate).await? {
            tracing::debug!(path = %candidate.display(), "Using configuration file");
            Self::load(&candidate).await
        } else {
            Ok(Self::default())
        }
    }

    /// Check value ranges and engine list consistency.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(Error::Config(format!(
                "page-size must be between {MIN_PAGE_SIZE} and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }

        if self.engines.is_empty() {
            return Err(Error::Config("engines must not be empty".to_string()));
        }

        let mut seen = BTreeSet::new();
        for engine in &self.engines {
            if !seen.insert(engine) {
                return Err(Error::Config(format!("engine '{engine}' listed twice")));
            }
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::Config("output-dir must not be empty".to_string()));
        }

        Ok(())
    }

    /// The blue/green policy: built-in rules with configured overrides.
    pub fn policy(&self) -> BlueGreenPolicy {
        BlueGreenPolicy::builtin().with_overrides(&self.blue_green)
    }
}
