//! RDS upgrade paths - per-engine upgrade graphs with blue/green support.
//!
//! This crate walks a paginated engine version catalog, resolves which
//! versions support blue/green deployments, and assembles one node/link
//! graph per engine for rendering.
//!
//! Pipeline: [`walker`] (versions) → [`collector`] (upgrade targets) →
//! [`eligibility`] (blue/green) → [`graph`] (nodes and links) → [`sink`].

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod catalog;
pub mod collector;
pub mod domain;
pub mod eligibility;
pub mod error;
pub mod graph;
pub mod sink;
pub mod version;
pub mod walker;

// Run orchestration and configuration
pub mod app;
pub mod config;

// Public CLI module (needed by binary)
pub mod cli;
