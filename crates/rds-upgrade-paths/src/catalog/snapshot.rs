//! In-memory catalog backed by a list of engine version records.
//!
//! Records use the shape returned by `aws rds describe-db-engine-versions`,
//! so a snapshot can be captured once with the AWS CLI and replayed offline:
//!
//! ```bash
//! aws rds describe-db-engine-versions --output json > snapshot.json
//! ```
//!
//! Pagination uses the record offset as the continuation marker.

use super::{Catalog, CatalogResult, Page, PageRequest, UpgradeRecord, VersionRecord};
use crate::domain::Engine;
use crate::error::CatalogError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upgrade target entry of a snapshot record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnapshotTarget {
    /// Target version; entries without one are skipped
    #[serde(default)]
    pub engine_version: Option<String>,
}

/// One `DBEngineVersion` entry of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnapshotRecord {
    /// Engine identifier as reported by RDS
    pub engine: String,

    /// Version string
    pub engine_version: String,

    /// Execution modes the record applies to
    #[serde(default)]
    pub supported_engine_modes: Vec<String>,

    /// Valid upgrade targets
    #[serde(default)]
    pub valid_upgrade_target: Vec<SnapshotTarget>,
}

impl SnapshotRecord {
    /// Create a record with no targets and no declared modes.
    pub fn new(engine: Engine, version: impl Into<String>) -> Self {
        Self {
            engine: engine.as_str().to_string(),
            engine_version: version.into(),
            supported_engine_modes: Vec::new(),
            valid_upgrade_target: Vec::new(),
        }
    }

    /// Set the upgrade targets.
    #[must_use]
    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_upgrade_target = targets
            .into_iter()
            .map(|target| SnapshotTarget {
                engine_version: Some(target.into()),
            })
            .collect();
        self
    }

    /// Set the supported execution modes.
    #[must_use]
    pub fn with_modes<I, S>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_engine_modes = modes.into_iter().map(Into::into).collect();
        self
    }

    fn is_engine(&self, engine: Engine) -> bool {
        self.engine == engine.as_str()
    }

    fn to_upgrade_record(&self) -> UpgradeRecord {
        UpgradeRecord {
            upgrade_targets: self
                .valid_upgrade_target
                .iter()
                .filter_map(|target| target.engine_version.clone())
                .collect(),
            supported_engine_modes: self.supported_engine_modes.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotDocument {
    #[serde(rename = "DBEngineVersions", default)]
    db_engine_versions: Vec<SnapshotRecord>,
}

/// Catalog serving records from memory.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCatalog {
    records: Vec<SnapshotRecord>,
}

impl SnapshotCatalog {
    /// Create a catalog from records.
    pub fn from_records(records: Vec<SnapshotRecord>) -> Self {
        Self { records }
    }

    /// Parse a `describe-db-engine-versions` JSON document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Snapshot` if the document is not valid JSON of
    /// the expected shape.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let document: SnapshotDocument = serde_json::from_str(json)?;
        Ok(Self::from_records(document.db_engine_versions))
    }

    /// Load a `describe-db-engine-versions` JSON document from disk.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read and
    /// `CatalogError::Snapshot` if it cannot be decoded.
    pub async fn load(path: &Path) -> CatalogResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            records = catalog.records.len(),
            "Loaded catalog snapshot"
        );
        Ok(catalog)
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn paginate<T>(matches: Vec<T>, request: &PageRequest) -> CatalogResult<Page<T>> {
    let offset = match request.marker.as_deref() {
        None | Some("") => 0,
        Some(marker) => marker
            .parse::<usize>()
            .ok()
            .filter(|offset| *offset <= matches.len())
            .ok_or_else(|| CatalogError::InvalidMarker(marker.to_string()))?,
    };
    let size = usize::try_from(request.max_records.max(1)).unwrap_or(usize::MAX);
    let end = offset.saturating_add(size).min(matches.len());

    let marker = (end < matches.len()).then(|| end.to_string());
    let records = matches.into_iter().skip(offset).take(end - offset).collect();
    Ok(Page { records, marker })
}

#[async_trait]
impl Catalog for SnapshotCatalog {
    async fn list_versions(
        &self,
        engine: Engine,
        page: PageRequest,
    ) -> CatalogResult<Page<VersionRecord>> {
        let matches = self
            .records
            .iter()
            .filter(|record| record.is_engine(engine))
            .map(|record| VersionRecord {
                engine_version: record.engine_version.clone(),
            })
            .collect();
        paginate(matches, &page)
    }

    async fn list_upgrade_records(
        &self,
        engine: Engine,
        version: &str,
        page: PageRequest,
    ) -> CatalogResult<Page<UpgradeRecord>> {
        let matches = self
            .records
            .iter()
            .filter(|record| record.is_engine(engine) && record.engine_version == version)
            .map(SnapshotRecord::to_upgrade_record)
            .collect();
        paginate(matches, &page)
    }
}
