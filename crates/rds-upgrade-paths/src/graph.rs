//! Projection of version tables into node/link records.

use crate::domain::{GraphElement, Link, Node, VersionTable};

/// Flatten a version table into graph records.
///
/// Each version yields one node followed by one link per upgrade target.
/// Consumers must not rely on the order of records.
pub fn assemble(table: &VersionTable) -> Vec<GraphElement> {
    let links: usize = table.values().map(|v| v.upgrade_targets.len()).sum();
    let mut elements: Vec<GraphElement> = Vec::with_capacity(table.len() + links);

    for (version, entry) in table {
        elements.push(Node::new(version.as_str(), entry.blue_green_supported).into());
        elements.extend(
            entry
                .upgrade_targets
                .iter()
                .map(|target| GraphElement::from(Link::new(version.as_str(), target.as_str()))),
        );
    }

    elements
}

/// Node and link counts of an assembled graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    /// Number of nodes
    pub nodes: usize,
    /// Number of links
    pub links: usize,
}

impl GraphStats {
    /// Count the nodes and links in `elements`.
    pub fn of(elements: &[GraphElement]) -> Self {
        let nodes = elements.iter().filter(|e| e.is_node()).count();
        Self {
            nodes,
            links: elements.len() - nodes,
        }
    }
}
