//! Integration tests for upgrade target collection and catalog walking.
//!
//! These tests drive the collector and walker against a scripted catalog to
//! verify pagination, execution mode filtering and request ordering.

mod common;

use common::{Call, ScriptedCatalog, record};
use rds_upgrade_paths::collector::collect_upgrade_targets;
use rds_upgrade_paths::domain::Engine;
use rds_upgrade_paths::eligibility::BlueGreenPolicy;
use rds_upgrade_paths::walker::CatalogWalker;
use rstest::rstest;

#[rstest]
#[case::no_modes(&[], &["13.13", "14.9"])]
#[case::serverless_only(&["serverless"], &[])]
#[case::serverless_and_provisioned(&["serverless", "provisioned"], &["13.13", "14.9"])]
#[tokio::test]
async fn test_mode_filtering(#[case] modes: &[&str], #[case] expected: &[&str]) {
    let catalog = ScriptedCatalog::new().upgrades(
        Engine::AuroraPostgresql,
        "13.12",
        vec![vec![record(&["13.13", "14.9"], modes)]],
    );

    let targets = collect_upgrade_targets(&catalog, Engine::AuroraPostgresql, "13.12", 100)
        .await
        .unwrap();
    assert_eq!(targets, expected);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
#[tokio::test]
async fn test_consumes_exactly_n_pages(#[case] n: usize) {
    let pages = (0..n)
        .map(|i| vec![record(&[format!("15.{i}").as_str()], &[])])
        .collect();
    let catalog = ScriptedCatalog::new().upgrades(Engine::Postgres, "14.9", pages);

    let targets = collect_upgrade_targets(&catalog, Engine::Postgres, "14.9", 20)
        .await
        .unwrap();

    let expected: Vec<String> = (0..n).map(|i| format!("15.{i}")).collect();
    assert_eq!(targets, expected);

    let calls = catalog.calls();
    assert_eq!(calls.len(), n);
    for (i, call) in calls.iter().enumerate() {
        let marker = (i > 0).then(|| format!("page-{i}"));
        assert_eq!(call, &Call::Upgrades(Engine::Postgres, "14.9".to_string(), marker));
    }
}

#[tokio::test]
async fn test_targets_keep_catalog_order_and_duplicates() {
    let catalog = ScriptedCatalog::new().upgrades(
        Engine::Mysql,
        "8.0.32",
        vec![
            vec![record(&["8.0.34", "8.0.33"], &[])],
            vec![record(&["8.0.33"], &["provisioned"])],
        ],
    );

    let targets = collect_upgrade_targets(&catalog, Engine::Mysql, "8.0.32", 100)
        .await
        .unwrap();
    assert_eq!(targets, vec!["8.0.34", "8.0.33", "8.0.33"]);
}

#[tokio::test]
async fn test_walker_paginates_versions_and_collects_each() {
    let catalog = ScriptedCatalog::new()
        .versions(Engine::Mariadb, &[&["10.6.14", "10.6.15"], &["10.11.5"]])
        .upgrades(
            Engine::Mariadb,
            "10.6.14",
            vec![vec![record(&["10.6.15"], &[])], vec![record(&["10.11.5"], &[])]],
        )
        .upgrades(Engine::Mariadb, "10.6.15", vec![vec![record(&["10.11.5"], &[])]]);
    let policy = BlueGreenPolicy::builtin();

    let table = CatalogWalker::new(&catalog, &policy)
        .with_page_size(20)
        .build_version_table(Engine::Mariadb)
        .await
        .unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table["10.6.14"].upgrade_targets, vec!["10.6.15", "10.11.5"]);
    assert!(table["10.11.5"].upgrade_targets.is_empty());
    assert!(table.values().all(|v| v.blue_green_supported));

    let calls = catalog.calls();
    assert_eq!(
        calls,
        vec![
            Call::Versions(Engine::Mariadb, None),
            Call::Upgrades(Engine::Mariadb, "10.6.14".to_string(), None),
            Call::Upgrades(Engine::Mariadb, "10.6.14".to_string(), Some("page-1".to_string())),
            Call::Upgrades(Engine::Mariadb, "10.6.15".to_string(), None),
            Call::Versions(Engine::Mariadb, Some("page-1".to_string())),
            Call::Upgrades(Engine::Mariadb, "10.11.5".to_string(), None),
        ]
    );
}

#[tokio::test]
async fn test_walker_processes_engines_in_order() {
    let catalog = ScriptedCatalog::new()
        .versions(Engine::Postgres, &[&["14.9"]])
        .versions(Engine::Mysql, &[&["8.0.35"]]);
    let policy = BlueGreenPolicy::builtin();

    let tree = CatalogWalker::new(&catalog, &policy)
        .build_tree(&[Engine::Mysql, Engine::Postgres])
        .await
        .unwrap();

    assert_eq!(tree.engine_versions.len(), 2);
    let listed: Vec<_> = catalog
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::Versions(engine, None) => Some(engine),
            _ => None,
        })
        .collect();
    assert_eq!(listed, vec![Engine::Mysql, Engine::Postgres]);
}
