// SPDX-License-Identifier: MIT OR Apache-2.0
//! Serialized graph documents.
//!
//! A [`GraphDocument`] is the on-disk form of a [`NodeGraph`]: nodes with
//! their pin values, links in insertion order, and the ID counters. It is
//! written as RON or JSON and checked for structural consistency before
//! it becomes a live graph again.

use crate::graph::NodeGraph;
use crate::link::Link;
use crate::node::{Node, NodeId, NodeRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Current document format version
pub const GRAPH_FORMAT_VERSION: u32 = 1;

/// Serializable snapshot of a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Format version
    pub version: u32,
    /// Nodes in insertion order
    pub nodes: Vec<Node>,
    /// Links in insertion order
    pub links: Vec<Link>,
    /// Next node ID the graph would assign
    pub next_node_id: u32,
    /// Next link ID the graph would assign
    pub next_link_id: u32,
}

impl GraphDocument {
    /// Snapshot a graph
    pub fn from_graph(graph: &NodeGraph) -> Self {
        Self {
            version: GRAPH_FORMAT_VERSION,
            nodes: graph.nodes().cloned().collect(),
            links: graph.links().cloned().collect(),
            next_node_id: graph.next_node_id(),
            next_link_id: graph.next_link_id(),
        }
    }

    /// Validate the document and rebuild a live graph.
    ///
    /// ID counters are raised past every stored ID so that new nodes and
    /// links never reuse one.
    pub fn into_graph(self, registry: Arc<NodeRegistry>) -> Result<NodeGraph, DocumentError> {
        if self.version != GRAPH_FORMAT_VERSION {
            return Err(DocumentError::UnsupportedVersion(self.version));
        }

        let mut node_ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !node_ids.insert(node.id) {
                return Err(DocumentError::DuplicateNodeId(node.id));
            }
            if !registry.contains(&node.type_name) {
                tracing::warn!("{} has unregistered type '{}'", node.id, node.type_name);
            }
        }

        let mut link_ids = HashSet::with_capacity(self.links.len());
        for link in &self.links {
            if !link_ids.insert(link.id) {
                return Err(DocumentError::DuplicateLinkId(link.id.0));
            }
            if link.from_node == link.to_node {
                return Err(DocumentError::SelfLoop(link.from_node));
            }
            for end in [link.from_node, link.to_node] {
                if !node_ids.contains(&end) {
                    return Err(DocumentError::DanglingLink {
                        link: link.id.0,
                        node: end,
                    });
                }
            }
        }

        let max_node = self.nodes.iter().map(|n| n.id.0).max().unwrap_or(0);
        let max_link = self.links.iter().map(|l| l.id.0).max().unwrap_or(0);
        let next_node_id = self.next_node_id.max(max_node.saturating_add(1));
        let next_link_id = self.next_link_id.max(max_link.saturating_add(1));

        let graph =
            NodeGraph::from_parts(registry, self.nodes, self.links, next_node_id, next_link_id);
        if let Err(err) = graph.topological_order() {
            return Err(DocumentError::Cycle(err.0));
        }

        tracing::debug!(
            "Loaded graph with {} node(s) and {} link(s)",
            graph.node_count(),
            graph.link_count()
        );
        Ok(graph)
    }

    /// Serialize to RON format
    pub fn to_ron(&self) -> Result<String, DocumentError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Deserialize from RON format
    pub fn from_ron(s: &str) -> Result<Self, DocumentError> {
        Ok(ron::from_str(s)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(s: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Save to a file. `.json` files are written as JSON, anything else as RON.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let content = match DocumentFormat::from_path(path) {
            DocumentFormat::Json => self.to_json()?,
            DocumentFormat::Ron => self.to_ron()?,
        };
        std::fs::write(path, content)?;
        tracing::trace!("Saved graph document to {:?}", path);
        Ok(())
    }

    /// Load from a file, picking the format from the extension like [`Self::save`]
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        let document = match DocumentFormat::from_path(path) {
            DocumentFormat::Json => Self::from_json(&content)?,
            DocumentFormat::Ron => Self::from_ron(&content)?,
        };
        tracing::trace!("Loaded graph document from {:?}", path);
        Ok(document)
    }
}

enum DocumentFormat {
    Ron,
    Json,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Ron,
        }
    }
}

/// Document errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed RON
    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// RON serialization error
    #[error("RON serialization error: {0}")]
    RonSerialize(#[from] ron::Error),

    /// Malformed JSON, or JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Written by an incompatible format version
    #[error("Unsupported document version {0} (expected {GRAPH_FORMAT_VERSION})")]
    UnsupportedVersion(u32),

    /// Two nodes share an ID
    #[error("Duplicate node ID: {0}")]
    DuplicateNodeId(NodeId),

    /// Two links share an ID
    #[error("Duplicate link ID: {0}")]
    DuplicateLinkId(u32),

    /// A link references a missing node
    #[error("Link {link} references missing {node}")]
    DanglingLink {
        /// Link ID
        link: u32,
        /// Missing node
        node: NodeId,
    },

    /// A link connects a node to itself
    #[error("Self-loop on {0}")]
    SelfLoop(NodeId),

    /// The links form a cycle
    #[error("Links form a cycle through {0}")]
    Cycle(NodeId),
}
