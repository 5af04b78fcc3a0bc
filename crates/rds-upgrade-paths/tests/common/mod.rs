//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use rds_upgrade_paths::catalog::{
    Catalog, CatalogResult, Page, PageRequest, UpgradeRecord, VersionRecord,
};
use rds_upgrade_paths::domain::Engine;
use rds_upgrade_paths::error::CatalogError;
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};

/// A catalog request observed by [`ScriptedCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `list_versions(engine)` with the marker sent
    Versions(Engine, Option<String>),
    /// `list_upgrade_records(engine, version)` with the marker sent
    Upgrades(Engine, String, Option<String>),
}

/// Catalog serving pre-arranged pages and recording every request.
///
/// Markers are `page-<n>`. The final page of every listing carries an empty
/// marker rather than none, as some backends do.
#[derive(Debug, Default)]
pub struct ScriptedCatalog {
    version_pages: HashMap<Engine, Vec<Vec<String>>>,
    upgrade_pages: HashMap<(Engine, String), Vec<Vec<UpgradeRecord>>>,
    failing_listings: HashSet<Engine>,
    failing_versions: HashMap<(Engine, String), usize>,
    calls: CallLog,
}

/// Shared handle to the requests received by a [`ScriptedCatalog`].
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `pages` of versions for `engine`.
    pub fn versions(mut self, engine: Engine, pages: &[&[&str]]) -> Self {
        let pages = pages
            .iter()
            .map(|page| page.iter().map(ToString::to_string).collect())
            .collect();
        self.version_pages.insert(engine, pages);
        self
    }

    /// Serve `pages` of upgrade records for `version` of `engine`.
    pub fn upgrades(mut self, engine: Engine, version: &str, pages: Vec<Vec<UpgradeRecord>>) -> Self {
        self.upgrade_pages.insert((engine, version.to_string()), pages);
        self
    }

    /// Make every version listing request for `engine` fail.
    pub fn fail_listing(mut self, engine: Engine) -> Self {
        self.failing_listings.insert(engine);
        self
    }

    /// Make every upgrade request for `version` of `engine` fail.
    pub fn fail_upgrades(self, engine: Engine, version: &str) -> Self {
        self.fail_upgrades_on_page(engine, version, 0)
    }

    /// Make upgrade requests for `version` of `engine` fail from page `index` on.
    pub fn fail_upgrades_on_page(mut self, engine: Engine, version: &str, index: usize) -> Self {
        self.failing_versions.insert((engine, version.to_string()), index);
        self
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.calls()
    }

    /// A handle that outlives the catalog being boxed into an `App`.
    pub fn call_log(&self) -> CallLog {
        self.calls.clone()
    }

    fn page_index(request: &PageRequest) -> CatalogResult<usize> {
        match request.marker.as_deref() {
            None => Ok(0),
            Some(marker) => marker
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| CatalogError::InvalidMarker(marker.to_string())),
        }
    }

    fn serve<T: Clone>(pages: Option<&Vec<Vec<T>>>, request: &PageRequest) -> CatalogResult<Page<T>> {
        let index = Self::page_index(request)?;

        let Some(pages) = pages else {
            return Ok(Page::last(Vec::new()));
        };
        let records = pages
            .get(index)
            .cloned()
            .ok_or_else(|| CatalogError::InvalidMarker(format!("page-{index}")))?;
        let marker = if index + 1 < pages.len() {
            format!("page-{}", index + 1)
        } else {
            String::new()
        };
        Ok(Page {
            records,
            marker: Some(marker),
        })
    }
}

#[async_trait]
impl Catalog for ScriptedCatalog {
    async fn list_versions(
        &self,
        engine: Engine,
        page: PageRequest,
    ) -> CatalogResult<Page<VersionRecord>> {
        self.calls.push(Call::Versions(engine, page.marker.clone()));
        if self.failing_listings.contains(&engine) {
            return Err(CatalogError::backend(io::Error::other("listing unavailable")));
        }

        let page = Self::serve(self.version_pages.get(&engine), &page)?;
        Ok(Page {
            records: page
                .records
                .into_iter()
                .map(|engine_version| VersionRecord { engine_version })
                .collect(),
            marker: page.marker,
        })
    }

    async fn list_upgrade_records(
        &self,
        engine: Engine,
        version: &str,
        page: PageRequest,
    ) -> CatalogResult<Page<UpgradeRecord>> {
        self.calls.push(Call::Upgrades(
            engine,
            version.to_string(),
            page.marker.clone(),
        ));
        let failing_from = self.failing_versions.get(&(engine, version.to_string()));
        if failing_from.is_some_and(|&from| Self::page_index(&page).is_ok_and(|i| i >= from)) {
            return Err(CatalogError::backend(io::Error::other("throttled")));
        }

        Self::serve(
            self.upgrade_pages.get(&(engine, version.to_string())),
            &page,
        )
    }
}

/// An upgrade record with the given targets and modes.
pub fn record(targets: &[&str], modes: &[&str]) -> UpgradeRecord {
    UpgradeRecord {
        upgrade_targets: targets.iter().map(ToString::to_string).collect(),
        supported_engine_modes: modes.iter().map(ToString::to_string).collect(),
    }
}
