//! Error types for upgrade path generation.

use crate::domain::Engine;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single catalog query.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog backend rejected or failed the request.
    #[error("catalog request failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The continuation marker was not issued by this catalog.
    #[error("invalid continuation marker '{0}'")]
    InvalidMarker(String),

    /// A catalog snapshot could not be decoded.
    #[error("invalid catalog snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// A catalog snapshot could not be read.
    #[error("failed to read catalog snapshot: {0}")]
    Io(#[from] io::Error),
}

impl CatalogError {
    /// Wrap any backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// Failure to encode or persist an assembled graph.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the file failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// The error type for upgrade path generation.
#[derive(Debug, Error)]
pub enum Error {
    /// Listing the versions of an engine failed.
    #[error("failed to describe {engine} engine versions")]
    ListVersions {
        /// Engine being listed
        engine: Engine,
        /// Underlying catalog failure
        #[source]
        source: CatalogError,
    },

    /// Collecting the upgrade targets of a version failed.
    #[error("failed to describe valid upgrades for {engine} {version} version")]
    CollectTargets {
        /// Engine of the version
        engine: Engine,
        /// Version whose targets were being collected
        version: String,
        /// Underlying catalog failure
        #[source]
        source: CatalogError,
    },

    /// A configured engine has no version table in the walked tree.
    #[error("no version table built for {engine}")]
    EngineNotWalked {
        /// Engine missing from the tree
        engine: Engine,
    },

    /// Encoding a graph failed.
    #[error("failed to marshal {engine} graph")]
    Serialize {
        /// Engine whose graph failed to encode
        engine: Engine,
        /// Underlying failure
        #[source]
        source: SerializationError,
    },

    /// Writing a graph file failed.
    #[error("failed writing {engine} graph to {}", .path.display())]
    Write {
        /// Engine whose graph failed to write
        engine: Engine,
        /// Destination file
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: SerializationError,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized Result type for upgrade path generation.
pub type Result<T> = std::result::Result<T, Error>;
