//! Command execution logic.

use anyhow::{Context, Result};
use std::path::Path;

use super::args::{BlueGreenArgs, GenerateArgs};
use crate::app::{App, RunReport};
use crate::catalog::{Catalog, SnapshotCatalog};
use crate::config::Config;
use crate::domain::Engine;
use crate::eligibility::BlueGreenPolicy;
use crate::sink::JsonDirectorySink;

/// Execute the generate command
pub async fn execute_generate(args: &GenerateArgs, json: bool) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let config = resolve_config(args, &current_dir).await?;

    let catalog: Box<dyn Catalog> = match &args.snapshot {
        Some(path) => Box::new(load_snapshot(path).await?),
        None if args.aws => open_live_catalog(config.aws_profile.as_deref()).await?,
        None => anyhow::bail!("No catalog selected: pass --snapshot <FILE> or --aws"),
    };

    let sink = JsonDirectorySink::new(config.output_dir.clone());
    let app = App::new(catalog, config);
    let report = app
        .generate(&sink)
        .await
        .context("failed to generate upgrade graphs")?;

    print_report(&report, json)
}

/// Execute the blue-green command
pub async fn execute_blue_green(args: &BlueGreenArgs, json: bool) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let engine = Engine::from(args.engine);
    let version = args.engine_version.as_str();
    let supported = resolve_policy(args, &current_dir)
        .await?
        .is_supported(engine, version);

    if json {
        let value = serde_json::json!({
            "engine": engine,
            "version": version,
            "blueGreen": supported,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else if supported {
        println!("{engine} {version}: blue/green deployment supported");
    } else {
        println!("{engine} {version}: blue/green deployment not supported");
    }
    Ok(())
}

async fn resolve_policy(args: &BlueGreenArgs, current_dir: &Path) -> Result<BlueGreenPolicy> {
    let config = Config::discover(args.config.as_deref(), current_dir)
        .await
        .context("failed to load configuration")?;
    Ok(config.policy())
}

async fn resolve_config(args: &GenerateArgs, current_dir: &Path) -> Result<Config> {
    let mut config = Config::discover(args.config.as_deref(), current_dir)
        .await
        .context("failed to load configuration")?;

    if let Some(dir) = &args.output_dir {
        config.output_dir.clone_from(dir);
    }
    if !args.engines.is_empty() {
        config.engines = args.engines.iter().copied().map(Engine::from).collect();
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if let Some(profile) = &args.profile {
        config.aws_profile = Some(profile.clone());
    }

    config.validate()?;
    Ok(config)
}

async fn load_snapshot(path: &Path) -> Result<SnapshotCatalog> {
    SnapshotCatalog::load(path)
        .await
        .with_context(|| format!("failed to load catalog snapshot {}", path.display()))
}

#[cfg(feature = "aws")]
async fn open_live_catalog(profile: Option<&str>) -> Result<Box<dyn Catalog>> {
    Ok(Box::new(crate::catalog::RdsCatalog::from_env(profile).await))
}

#[cfg(not(feature = "aws"))]
#[allow(clippy::unused_async)]
async fn open_live_catalog(_profile: Option<&str>) -> Result<Box<dyn Catalog>> {
    anyhow::bail!("--aws requires rds-upgrade-paths to be built with the `aws` feature")
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for graph in &report.graphs {
        println!(
            "{}: {} versions, {} upgrade paths -> {}",
            graph.engine,
            graph.nodes,
            graph.links,
            graph.path.display()
        );
    }
    Ok(())
}
