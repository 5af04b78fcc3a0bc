//! Live catalog over the AWS RDS `DescribeDBEngineVersions` API.
//!
//! Credentials and region come from the standard AWS configuration chain
//! (environment, shared config files, instance metadata). A named profile can
//! be selected explicitly. Retries and timeouts are left to the SDK.

use super::{Catalog, CatalogResult, Page, PageRequest, UpgradeRecord, VersionRecord};
use crate::domain::Engine;
use crate::error::CatalogError;
use async_trait::async_trait;
use aws_sdk_rds::Client;
use aws_sdk_rds::operation::describe_db_engine_versions::DescribeDbEngineVersionsOutput;

/// Catalog backed by the RDS API.
#[derive(Debug, Clone)]
pub struct RdsCatalog {
    client: Client,
}

impl RdsCatalog {
    /// Create a catalog from an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Load AWS configuration, optionally for a named profile, and build a
    /// client from it.
    pub async fn from_env(profile: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        let config = loader.load().await;
        tracing::debug!(profile = ?profile, region = ?config.region(), "Loaded AWS configuration");
        Self::new(Client::new(&config))
    }

    async fn describe(
        &self,
        engine: Engine,
        version: Option<&str>,
        page: PageRequest,
    ) -> CatalogResult<DescribeDbEngineVersionsOutput> {
        let max_records = i32::try_from(page.max_records).unwrap_or(i32::MAX);
        self.client
            .describe_db_engine_versions()
            .engine(engine.as_str())
            .set_engine_version(version.map(str::to_string))
            .max_records(max_records)
            .set_marker(page.marker)
            .send()
            .await
            .map_err(CatalogError::backend)
    }
}

#[async_trait]
impl Catalog for RdsCatalog {
    async fn list_versions(
        &self,
        engine: Engine,
        page: PageRequest,
    ) -> CatalogResult<Page<VersionRecord>> {
        let output = self.describe(engine, None, page).await?;
        let records = output
            .db_engine_versions()
            .iter()
            .filter_map(|v| v.engine_version())
            .map(|version| VersionRecord {
                engine_version: version.to_string(),
            })
            .collect();
        Ok(Page {
            records,
            marker: output.marker().map(str::to_string),
        })
    }

    async fn list_upgrade_records(
        &self,
        engine: Engine,
        version: &str,
        page: PageRequest,
    ) -> CatalogResult<Page<UpgradeRecord>> {
        let output = self.describe(engine, Some(version), page).await?;
        let records = output
            .db_engine_versions()
            .iter()
            .map(|v| UpgradeRecord {
                upgrade_targets: v
                    .valid_upgrade_target()
                    .iter()
                    .filter_map(|target| target.engine_version().map(str::to_string))
                    .collect(),
                supported_engine_modes: v.supported_engine_modes().to_vec(),
            })
            .collect();
        Ok(Page {
            records,
            marker: output.marker().map(str::to_string),
        })
    }
}
