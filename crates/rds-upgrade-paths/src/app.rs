//! Application context for a generation run.
//!
//! `App` owns the catalog and configuration and drives the full pipeline:
//! walk the catalog into a [`Tree`], assemble each engine's graph, encode
//! every graph, then persist them. Nothing is written until every graph has
//! been built and encoded.
//!
//! # Example
//!
//! ```no_run
//! use rds_upgrade_paths::app::App;
//! use rds_upgrade_paths::catalog::SnapshotCatalog;
//! use rds_upgrade_paths::config::Config;
//! use rds_upgrade_paths::sink::JsonDirectorySink;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let catalog = SnapshotCatalog::load(Path::new("snapshot.json")).await?;
//!     let app = App::new(Box::new(catalog), Config::default());
//!     let report = app.generate(&JsonDirectorySink::new("out")).await?;
//!     println!("wrote {} graphs", report.graphs.len());
//!     Ok(())
//! }
//! ```

use crate::catalog::Catalog;
use crate::config::Config;
use crate::domain::{Engine, Tree};
use crate::eligibility::BlueGreenPolicy;
use crate::error::{Error, Result};
use crate::graph::assemble;
use crate::sink::{EncodedGraph, GraphSink, encode_graph};
use crate::walker::CatalogWalker;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Outcome of writing one engine's graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphReport {
    /// Engine the graph describes
    pub engine: Engine,

    /// Where the graph was written
    pub path: PathBuf,

    /// Number of version nodes
    pub nodes: usize,

    /// Number of upgrade links
    pub links: usize,
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// One entry per engine, in processing order
    pub graphs: Vec<GraphReport>,
}

/// Application context for generation runs.
pub struct App {
    /// The catalog backend (trait object for polymorphism)
    catalog: Box<dyn Catalog>,

    /// Run configuration
    config: Config,

    /// Blue/green policy derived from configuration
    policy: BlueGreenPolicy,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("catalog", &"<dyn Catalog>")
            .finish_non_exhaustive()
    }
}

impl App {
    /// Create an App from a catalog and configuration.
    pub fn new(catalog: Box<dyn Catalog>, config: Config) -> Self {
        let policy = config.policy();
        Self {
            catalog,
            config,
            policy,
        }
    }

    /// The run configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The blue/green policy in effect.
    pub fn policy(&self) -> &BlueGreenPolicy {
        &self.policy
    }

    /// Walk the catalog for every configured engine.
    ///
    /// # Errors
    ///
    /// Returns the first catalog failure; no partial tree is returned.
    pub async fn build_tree(&self) -> Result<Tree> {
        CatalogWalker::new(self.catalog.as_ref(), &self.policy)
            .with_page_size(self.config.page_size)
            .build_tree(&self.config.engines)
            .await
    }

    /// Build every graph and persist it through `sink`.
    ///
    /// # Errors
    ///
    /// Returns the first catalog, encoding or write failure, or
    /// `Error::EngineNotWalked` if a configured engine is missing from the
    /// walked tree. Only write failures can happen after a file is written.
    pub async fn generate(&self, sink: &dyn GraphSink) -> Result<RunReport> {
        info!(engines = self.config.engines.len(), "Generating the tree");
        let tree = self.build_tree().await?;

        let encoded = encode_graphs(&tree, &self.config.engines)?;

        let mut report = RunReport::default();
        for graph in &encoded {
            info!(engine = %graph.engine, "Writing graph file");
            let path = sink.persist(graph).await?;
            report.graphs.push(GraphReport {
                engine: graph.engine,
                path,
                nodes: graph.stats.nodes,
                links: graph.stats.links,
            });
        }

        info!(graphs = report.graphs.len(), "Finished");
        Ok(report)
    }
}

/// Assemble and encode the graph of each engine in `engines`, in order.
///
/// # Errors
///
/// Returns `Error::EngineNotWalked` if `tree` has no table for one of the
/// engines, or the first encoding failure.
fn encode_graphs(tree: &Tree, engines: &[Engine]) -> Result<Vec<EncodedGraph>> {
    engines
        .iter()
        .map(|&engine| {
            let table = tree
                .versions(engine)
                .ok_or(Error::EngineNotWalked { engine })?;
            encode_graph(engine, &assemble(table))
        })
        .collect()
}
