//! Catalog abstraction for engine version data.
//!
//! The catalog enumerates known engine versions and, per version, the
//! versions it can be upgraded to. Both queries are paginated with an opaque
//! continuation marker. Implementations:
//!
//! - **Snapshot**: in-memory records, optionally loaded from the JSON output
//!   of `aws rds describe-db-engine-versions`
//! - **RDS** (feature `aws`): the live `DescribeDBEngineVersions` API
//!
//! # Example
//!
//! ```
//! use rds_upgrade_paths::catalog::{Catalog, PageRequest, SnapshotCatalog, SnapshotRecord};
//! use rds_upgrade_paths::domain::Engine;
//!
//! # async fn example() -> Result<(), rds_upgrade_paths::error::CatalogError> {
//! let catalog = SnapshotCatalog::from_records(vec![
//!     SnapshotRecord::new(Engine::Postgres, "14.9").with_targets(["15.4"]),
//! ]);
//!
//! let page = catalog
//!     .list_versions(Engine::Postgres, PageRequest::first(100))
//!     .await?;
//! assert_eq!(page.records[0].engine_version, "14.9");
//! # Ok(())
//! # }
//! ```

use crate::domain::Engine;
use crate::error::CatalogError;
use async_trait::async_trait;

#[cfg(feature = "aws")]
pub mod rds;
pub mod snapshot;

#[cfg(feature = "aws")]
pub use rds::RdsCatalog;
pub use snapshot::{SnapshotCatalog, SnapshotRecord, SnapshotTarget};

/// Execution mode whose upgrade records are kept.
pub const PROVISIONED_MODE: &str = "provisioned";

/// A specialized Result type for catalog queries.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Request for one page of catalog results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of records the catalog should return
    pub max_records: u32,

    /// Continuation marker from the previous page
    pub marker: Option<String>,
}

impl PageRequest {
    /// Request the first page.
    pub fn first(max_records: u32) -> Self {
        Self {
            max_records,
            marker: None,
        }
    }

    /// Request the page following `marker`.
    pub fn after(max_records: u32, marker: impl Into<String>) -> Self {
        Self {
            max_records,
            marker: Some(marker.into()),
        }
    }
}

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records on this page
    pub records: Vec<T>,

    /// Marker for the next page, if more data is available
    pub marker: Option<String>,
}

impl<T> Page<T> {
    /// A page with no successor.
    pub fn last(records: Vec<T>) -> Self {
        Self {
            records,
            marker: None,
        }
    }

    /// The marker to continue from, treating an empty marker as the end.
    pub fn next_marker(&self) -> Option<&str> {
        self.marker.as_deref().filter(|marker| !marker.is_empty())
    }
}

/// A version listed for an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    /// The engine version string
    pub engine_version: String,
}

/// Upgrade information reported for one version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeRecord {
    /// Candidate upgrade target versions, in catalog order
    pub upgrade_targets: Vec<String>,

    /// Execution modes this record applies to; empty means unrestricted
    pub supported_engine_modes: Vec<String>,
}

impl UpgradeRecord {
    /// Whether the targets of this record apply to provisioned instances.
    pub fn applies_to_provisioned(&self) -> bool {
        self.supported_engine_modes.is_empty()
            || self
                .supported_engine_modes
                .iter()
                .any(|mode| mode == PROVISIONED_MODE)
    }
}

/// Paginated source of engine version data.
///
/// Implementations must be `Send + Sync` so a catalog can be shared behind
/// `Box<dyn Catalog>`. Callers issue one request at a time.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// List the versions of `engine`.
    async fn list_versions(
        &self,
        engine: Engine,
        page: PageRequest,
    ) -> CatalogResult<Page<VersionRecord>>;

    /// List the upgrade records describing `version` of `engine`.
    async fn list_upgrade_records(
        &self,
        engine: Engine,
        version: &str,
        page: PageRequest,
    ) -> CatalogResult<Page<UpgradeRecord>>;
}
