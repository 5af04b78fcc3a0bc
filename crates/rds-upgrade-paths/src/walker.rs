//! Catalog walk that builds per-engine version tables.
//!
//! For each engine, every listed version gets its upgrade targets collected
//! and its blue/green eligibility resolved. Work is strictly sequential and
//! the first failure aborts the walk: no partial tree is ever returned.

use crate::catalog::{Catalog, PageRequest};
use crate::collector::collect_upgrade_targets;
use crate::domain::{Engine, EngineVersion, Tree, VersionTable};
use crate::eligibility::BlueGreenPolicy;
use crate::error::{Error, Result};
use tracing::{debug, info};

/// Default number of records requested per catalog page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Walks a catalog and builds version tables.
pub struct CatalogWalker<'a> {
    catalog: &'a dyn Catalog,
    policy: &'a BlueGreenPolicy,
    page_size: u32,
}

impl std::fmt::Debug for CatalogWalker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogWalker")
            .field("catalog", &"<dyn Catalog>")
            .field("policy", &self.policy)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl<'a> CatalogWalker<'a> {
    /// Create a walker using [`DEFAULT_PAGE_SIZE`].
    pub fn new(catalog: &'a dyn Catalog, policy: &'a BlueGreenPolicy) -> Self {
        Self {
            catalog,
            policy,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the page size hint sent with every catalog request.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Build the version table of a single engine.
    ///
    /// # Errors
    ///
    /// Returns `Error::ListVersions` if a version listing page fails and
    /// `Error::CollectTargets` if collecting any version's targets fails.
    pub async fn build_version_table(&self, engine: Engine) -> Result<VersionTable> {
        let mut table = VersionTable::new();
        let mut request = PageRequest::first(self.page_size);

        loop {
            let page = self
                .catalog
                .list_versions(engine, request)
                .await
                .map_err(|source| Error::ListVersions { engine, source })?;
            debug!(%engine, versions = page.records.len(), "Fetched version page");

            for record in &page.records {
                let version = record.engine_version.as_str();
                let upgrade_targets =
                    collect_upgrade_targets(self.catalog, engine, version, self.page_size).await?;
                let blue_green_supported = self.policy.is_supported(engine, version);
                debug!(
                    %engine,
                    version,
                    targets = upgrade_targets.len(),
                    blue_green = blue_green_supported,
                    "Collected version"
                );

                table.insert(
                    version.to_string(),
                    EngineVersion {
                        blue_green_supported,
                        upgrade_targets,
                    },
                );
            }

            match page.next_marker() {
                Some(marker) => request = PageRequest::after(self.page_size, marker),
                None => break,
            }
        }

        Ok(table)
    }

    /// Build the tree for `engines`, one engine at a time.
    ///
    /// # Errors
    ///
    /// Fails on the first engine whose table cannot be built; tables already
    /// built for earlier engines are discarded.
    pub async fn build_tree(&self, engines: &[Engine]) -> Result<Tree> {
        let mut tree = Tree::new();
        for &engine in engines {
            info!(%engine, "Walking engine versions");
            let table = self.build_version_table(engine).await?;
            info!(%engine, versions = table.len(), "Built version table");
            tree.engine_versions.insert(engine, table);
        }
        Ok(tree)
    }
}

/// Build the tree for every supported engine.
///
/// # Errors
///
/// See [`CatalogWalker::build_tree`].
pub async fn build_tree(catalog: &dyn Catalog, policy: &BlueGreenPolicy) -> Result<Tree> {
    CatalogWalker::new(catalog, policy)
        .build_tree(&Engine::ALL)
        .await
}
