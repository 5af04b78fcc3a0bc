//! Serialization of assembled graphs to JSON files.
//!
//! Graphs are encoded up front with [`encode_graph`] and then handed to a
//! [`GraphSink`]. [`JsonDirectorySink`] writes one `<engine>.json` file per
//! engine using the temp-file-then-rename pattern:
//!
//! 1. The encoded graph is written to `<engine>.json.tmp`
//! 2. The temporary file is flushed and closed
//! 3. The temporary file is renamed over the target path
//!
//! A failure at any step leaves the previous file, if any, untouched.

use crate::domain::{Engine, GraphElement};
use crate::error::{Error, Result, SerializationError};
use crate::graph::GraphStats;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// A graph encoded as a pretty-printed JSON array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedGraph {
    /// Engine the graph describes
    pub engine: Engine,

    /// UTF-8 JSON bytes
    pub bytes: Vec<u8>,

    /// Node and link counts
    pub stats: GraphStats,
}

/// Encode `elements` as a JSON array indented with two spaces.
///
/// # Errors
///
/// Returns `Error::Serialize` if encoding fails.
pub fn encode_graph(engine: Engine, elements: &[GraphElement]) -> Result<EncodedGraph> {
    let bytes = serde_json::to_vec_pretty(elements).map_err(|e| Error::Serialize {
        engine,
        source: SerializationError::Json(e),
    })?;
    Ok(EncodedGraph {
        engine,
        bytes,
        stats: GraphStats::of(elements),
    })
}

/// Destination for encoded graphs.
#[async_trait]
pub trait GraphSink: Send + Sync {
    /// Persist a graph, returning where it was written.
    ///
    /// # Errors
    ///
    /// Returns `Error::Write` if the graph cannot be persisted.
    async fn persist(&self, graph: &EncodedGraph) -> Result<PathBuf>;
}

/// Writes each engine's graph to `<dir>/<engine>.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonDirectorySink {
    dir: PathBuf,
}

impl JsonDirectorySink {
    /// Create a sink writing into `dir`, which is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `engine`'s graph.
    pub fn path_for(&self, engine: Engine) -> PathBuf {
        self.dir.join(format!("{}.json", engine.as_str()))
    }
}

#[async_trait]
impl GraphSink for JsonDirectorySink {
    async fn persist(&self, graph: &EncodedGraph) -> Result<PathBuf> {
        let path = self.path_for(graph.engine);
        write_atomic(&self.dir, &path, &graph.bytes)
            .await
            .map_err(|source| Error::Write {
                engine: graph.engine,
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

async fn write_atomic(
    dir: &Path,
    path: &Path,
    bytes: &[u8],
) -> std::result::Result<(), SerializationError> {
    tokio::fs::create_dir_all(dir).await?;

    let temp_path = make_temp_path(path);
    if let Err(e) = write_to_temp_file(&temp_path, bytes).await {
        // Best-effort cleanup of temp file
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e.into());
    }

    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e.into());
    }
    Ok(())
}

/// Appends `.tmp` to the file name, keeping any existing extension.
fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => std::ffi::OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

async fn write_to_temp_file(temp_path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(temp_path).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}
