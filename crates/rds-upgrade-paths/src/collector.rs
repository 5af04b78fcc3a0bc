//! Upgrade target collection for a single engine version.

use crate::catalog::{Catalog, PageRequest};
use crate::domain::Engine;
use crate::error::{Error, Result};

/// Collect every valid upgrade target of `version`.
///
/// Pages through the catalog's upgrade records for the version until no
/// continuation marker is returned. Records restricted to execution modes
/// other than provisioned are skipped. Targets keep catalog order and are not
/// deduplicated.
///
/// # Errors
///
/// Returns `Error::CollectTargets` if any page request fails. No partial
/// result is returned.
pub async fn collect_upgrade_targets(
    catalog: &dyn Catalog,
    engine: Engine,
    version: &str,
    page_size: u32,
) -> Result<Vec<String>> {
    let mut targets = Vec::new();
    let mut request = PageRequest::first(page_size);

    loop {
        let page = catalog
            .list_upgrade_records(engine, version, request)
            .await
            .map_err(|source| Error::CollectTargets {
                engine,
                version: version.to_string(),
                source,
            })?;

        for record in &page.records {
            if record.applies_to_provisioned() {
                targets.extend(record.upgrade_targets.iter().cloned());
            }
        }

        match page.next_marker() {
            Some(marker) => request = PageRequest::after(page_size, marker),
            None => break,
        }
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SnapshotCatalog, SnapshotRecord};

    #[tokio::test]
    async fn test_filters_serverless_records() {
        let catalog = SnapshotCatalog::from_records(vec![
            SnapshotRecord::new(Engine::AuroraPostgresql, "13.12")
                .with_modes(["serverless"])
                .with_targets(["13.13"]),
            SnapshotRecord::new(Engine::AuroraPostgresql, "13.12")
                .with_modes(["serverless", "provisioned"])
                .with_targets(["14.9"]),
            SnapshotRecord::new(Engine::AuroraPostgresql, "13.12").with_targets(["15.4"]),
        ]);

        let targets = collect_upgrade_targets(&catalog, Engine::AuroraPostgresql, "13.12", 100)
            .await
            .unwrap();
        assert_eq!(targets, vec!["14.9", "15.4"]);
    }

    #[tokio::test]
    async fn test_keeps_duplicates_across_pages() {
        let catalog = SnapshotCatalog::from_records(vec![
            SnapshotRecord::new(Engine::Mariadb, "10.6.14").with_targets(["10.6.15"]),
            SnapshotRecord::new(Engine::Mariadb, "10.6.14").with_targets(["10.6.15", "10.11.5"]),
        ]);

        let targets = collect_upgrade_targets(&catalog, Engine::Mariadb, "10.6.14", 1)
            .await
            .unwrap();
        assert_eq!(targets, vec!["10.6.15", "10.6.15", "10.11.5"]);
    }

    #[tokio::test]
    async fn test_unknown_version_has_no_targets() {
        let catalog = SnapshotCatalog::default();
        let targets = collect_upgrade_targets(&catalog, Engine::Mysql, "8.0.99", 100)
            .await
            .unwrap();
        assert!(targets.is_empty());
    }
}
