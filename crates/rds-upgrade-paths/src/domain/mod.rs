//! Domain types for upgrade path graphs.
//!
//! This module contains the engine enumeration, the per-engine version tables
//! collected from the catalog, and the node/link records handed to the
//! graph renderer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Database engine family supported by the upgrade path generator.
///
/// The set is closed: the catalog walker only ever processes these engines,
/// and catalog records for anything else are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Engine {
    /// RDS for PostgreSQL
    Postgres,

    /// RDS for MySQL
    Mysql,

    /// RDS for MariaDB
    Mariadb,

    /// Aurora MySQL-compatible edition
    AuroraMysql,

    /// Aurora PostgreSQL-compatible edition
    AuroraPostgresql,
}

impl Engine {
    /// Every supported engine, in processing order.
    pub const ALL: [Engine; 5] = [
        Engine::Postgres,
        Engine::Mysql,
        Engine::Mariadb,
        Engine::AuroraMysql,
        Engine::AuroraPostgresql,
    ];

    /// The engine identifier used by the catalog and in output file names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Mariadb => "mariadb",
            Self::AuroraMysql => "aurora-mysql",
            Self::AuroraPostgresql => "aurora-postgresql",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an engine identifier outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported engine '{0}'")]
pub struct UnknownEngine(pub String);

impl FromStr for Engine {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|engine| engine.as_str() == s)
            .ok_or_else(|| UnknownEngine(s.to_string()))
    }
}

/// Upgrade facts for one version of one engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineVersion {
    /// Whether a blue/green deployment can be started from this version
    pub blue_green_supported: bool,

    /// Versions this one can be upgraded to, in catalog order
    pub upgrade_targets: Vec<String>,
}

/// All versions of a single engine, keyed by version string.
pub type VersionTable = BTreeMap<String, EngineVersion>;

/// Version tables for every processed engine.
///
/// Despite the name this is a forest of adjacency maps: a version may have
/// several targets and several versions may share a target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tree {
    /// Per-engine version tables
    pub engine_versions: BTreeMap<Engine, VersionTable>,
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Version table for an engine, if it was processed.
    pub fn versions(&self, engine: Engine) -> Option<&VersionTable> {
        self.engine_versions.get(&engine)
    }
}

/// Payload of a graph node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    /// The version this node stands for
    pub id: String,

    /// Whether the version supports blue/green deployments
    pub blue_green: bool,
}

/// A version node in the rendered graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Node payload
    pub data: NodeData,
}

impl Node {
    /// Create a node for a version.
    pub fn new(id: impl Into<String>, blue_green: bool) -> Self {
        Self {
            data: NodeData {
                id: id.into(),
                blue_green,
            },
        }
    }
}

/// Payload of a graph link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkData {
    /// Synthesized identifier, `<source>-<target>`
    pub id: String,

    /// Version being upgraded from
    pub source: String,

    /// Version being upgraded to
    pub target: String,
}

/// A directed upgrade edge in the rendered graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Link payload
    pub data: LinkData,
}

impl Link {
    /// Create a link from `source` to `target`.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            data: LinkData {
                id: format!("{source}-{target}"),
                source,
                target,
            },
        }
    }
}

/// One record of an assembled graph.
///
/// Serialized untagged: consumers tell nodes and links apart by shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphElement {
    /// A version node
    Node(Node),

    /// An upgrade link
    Link(Link),
}

impl GraphElement {
    /// Returns `true` if this element is a node.
    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }
}

impl From<Node> for GraphElement {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Link> for GraphElement {
    fn from(link: Link) -> Self {
        Self::Link(link)
    }
}
