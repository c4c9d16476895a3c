// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and links.

use crate::link::{Link, LinkId};
use crate::node::{Node, NodeId, NodeRegistry};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A node graph.
///
/// Nodes and links are kept in insertion order; removals preserve the
/// order of the survivors, which makes "first link into a pin" the
/// oldest surviving one.
#[derive(Debug, Clone)]
pub struct NodeGraph {
    /// Registry used to instantiate nodes
    registry: Arc<NodeRegistry>,
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Links between nodes
    links: IndexMap<LinkId, Link>,
    /// Next node ID to hand out
    next_node_id: u32,
    /// Next link ID to hand out
    next_link_id: u32,
}

impl NodeGraph {
    /// Create a new empty graph
    pub fn new(registry: Arc<NodeRegistry>) -> Self {
        Self {
            registry,
            nodes: IndexMap::new(),
            links: IndexMap::new(),
            next_node_id: 1,
            next_link_id: 1,
        }
    }

    /// Rebuild a graph from stored parts. Callers validate the parts.
    pub(crate) fn from_parts(
        registry: Arc<NodeRegistry>,
        nodes: Vec<Node>,
        links: Vec<Link>,
        next_node_id: u32,
        next_link_id: u32,
    ) -> Self {
        Self {
            registry,
            nodes: nodes.into_iter().map(|n| (n.id, n)).collect(),
            links: links.into_iter().map(|l| (l.id, l)).collect(),
            next_node_id,
            next_link_id,
        }
    }

    /// The registry this graph instantiates nodes from
    pub fn registry(&self) -> &Arc<NodeRegistry> {
        &self.registry
    }

    /// Next node ID that will be assigned
    pub fn next_node_id(&self) -> u32 {
        self.next_node_id
    }

    /// Next link ID that will be assigned
    pub fn next_link_id(&self) -> u32 {
        self.next_link_id
    }

    /// Add a node of a registered type.
    ///
    /// The type's pin templates are copied now, so later registry changes
    /// never reach existing nodes.
    pub fn add_node(&mut self, type_name: &str, position: [f32; 2]) -> Result<NodeId, GraphError> {
        let Some(node_type) = self.registry.get(type_name) else {
            tracing::warn!("Cannot add node of unknown type '{}'", type_name);
            return Err(GraphError::UnknownNodeType(type_name.to_string()));
        };

        let Some(next) = self.next_node_id.checked_add(1) else {
            tracing::warn!("Cannot add node of type '{}': node IDs exhausted", type_name);
            return Err(GraphError::IdsExhausted);
        };
        let id = NodeId(self.next_node_id);
        self.next_node_id = next;

        let node = node_type.instantiate(id, position);
        tracing::debug!("Added {} ({})", id, node.type_name);
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Remove a node and every link touching it
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        let node = self.nodes.shift_remove(&node_id)?;
        let before = self.links.len();
        self.links.retain(|_, l| !l.involves_node(node_id));
        tracing::debug!("Removed {} and {} link(s)", node_id, before - self.links.len());
        Some(node)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// First node (in insertion order) of the given type
    pub fn find_node_by_type(&self, type_name: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.type_name == type_name)
    }

    /// Add a link from an output pin to an input pin.
    ///
    /// Only structural checks are made here: both nodes exist, no self-loop,
    /// no cycle. Pin direction and type are checked by [`Self::can_connect`].
    /// Identical links are allowed and get their own IDs.
    pub fn add_link(
        &mut self,
        from_node: NodeId,
        from_pin: usize,
        to_node: NodeId,
        to_pin: usize,
    ) -> Result<LinkId, GraphError> {
        self.check_structure(from_node, to_node)?;

        let Some(next) = self.next_link_id.checked_add(1) else {
            tracing::warn!("Cannot link {} -> {}: link IDs exhausted", from_node, to_node);
            return Err(GraphError::IdsExhausted);
        };
        let id = LinkId(self.next_link_id);
        self.next_link_id = next;

        self.links.insert(id, Link::new(id, from_node, from_pin, to_node, to_pin));
        tracing::debug!("Linked {}:{} -> {}:{} as {}", from_node, from_pin, to_node, to_pin, id);
        Ok(id)
    }

    /// Validate and add a link, as the editor does for user-drawn links
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_pin: usize,
        to_node: NodeId,
        to_pin: usize,
    ) -> Result<LinkId, GraphError> {
        self.can_connect(from_node, from_pin, to_node, to_pin)?;
        self.add_link(from_node, from_pin, to_node, to_pin)
    }

    /// Full validation of a prospective link: structure, pin indices,
    /// direction and type compatibility
    pub fn can_connect(
        &self,
        from_node: NodeId,
        from_pin: usize,
        to_node: NodeId,
        to_pin: usize,
    ) -> Result<(), GraphError> {
        self.check_structure(from_node, to_node)?;

        let source = self.nodes.get(&from_node).ok_or(GraphError::NodeNotFound(from_node))?;
        let target = self.nodes.get(&to_node).ok_or(GraphError::NodeNotFound(to_node))?;

        let source_pin = source.output(from_pin).ok_or(GraphError::PinOutOfRange {
            node: from_node,
            pin: from_pin,
        })?;
        let target_pin = target.input(to_pin).ok_or(GraphError::PinOutOfRange {
            node: to_node,
            pin: to_pin,
        })?;

        if !source_pin.can_connect(target_pin) {
            return Err(GraphError::IncompatiblePins {
                from: source_pin.name.clone(),
                to: target_pin.name.clone(),
            });
        }

        Ok(())
    }

    fn check_structure(&self, from_node: NodeId, to_node: NodeId) -> Result<(), GraphError> {
        if from_node == to_node {
            return Err(GraphError::SelfLoop(from_node));
        }
        if !self.nodes.contains_key(&from_node) {
            return Err(GraphError::NodeNotFound(from_node));
        }
        if !self.nodes.contains_key(&to_node) {
            return Err(GraphError::NodeNotFound(to_node));
        }
        // A new edge from -> to closes a loop if `from` is already downstream of `to`
        if self.is_downstream(to_node, from_node) {
            return Err(GraphError::WouldCreateCycle { from: from_node, to: to_node });
        }
        Ok(())
    }

    /// Whether `target` can be reached from `start` by following links forward
    fn is_downstream(&self, start: NodeId, target: NodeId) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            stack.extend(self.links.values().filter(|l| l.from_node == current).map(|l| l.to_node));
        }
        false
    }

    /// Remove a link
    pub fn remove_link(&mut self, link_id: LinkId) -> Option<Link> {
        let link = self.links.shift_remove(&link_id)?;
        tracing::debug!("Removed {}", link_id);
        Some(link)
    }

    /// Get a link by ID
    pub fn link(&self, link_id: LinkId) -> Option<&Link> {
        self.links.get(&link_id)
    }

    /// Get all links, oldest first
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Get links involving a node
    pub fn links_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Link> {
        self.links.values().filter(move |l| l.involves_node(node_id))
    }

    /// The link feeding an input pin. With several candidates the oldest wins.
    pub fn input_link(&self, node_id: NodeId, pin: usize) -> Option<&Link> {
        self.links.values().find(|l| l.targets(node_id, pin))
    }

    /// Get the number of links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Remove all nodes and links. ID counters keep counting.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }

    /// Get nodes in dependency order, upstream first
    pub fn topological_order(&self) -> Result<Vec<NodeId>, CycleError> {
        let mut upstream: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for link in self.links.values() {
            upstream.entry(link.to_node).or_default().push(link.from_node);
        }

        let mut visited = HashSet::new();
        let mut temp_mark = HashSet::new();
        let mut order = Vec::with_capacity(self.nodes.len());

        for node_id in self.nodes.keys() {
            visit(*node_id, &upstream, &mut visited, &mut temp_mark, &mut order)?;
        }

        Ok(order)
    }

    /// Check whether the links form a cycle
    pub fn has_cycles(&self) -> bool {
        self.topological_order().is_err()
    }
}

fn visit(
    node_id: NodeId,
    upstream: &HashMap<NodeId, Vec<NodeId>>,
    visited: &mut HashSet<NodeId>,
    temp_mark: &mut HashSet<NodeId>,
    order: &mut Vec<NodeId>,
) -> Result<(), CycleError> {
    if visited.contains(&node_id) {
        return Ok(());
    }
    if !temp_mark.insert(node_id) {
        return Err(CycleError(node_id));
    }

    for dependency in upstream.get(&node_id).into_iter().flatten() {
        visit(*dependency, upstream, visited, temp_mark, order)?;
    }

    temp_mark.remove(&node_id);
    visited.insert(node_id);
    order.push(node_id);
    Ok(())
}

/// Error from a graph mutation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Type name not in the registry
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Pin index past the end of the node's pin list
    #[error("Pin {pin} out of range on {node}")]
    PinOutOfRange {
        /// Node holding the pin list
        node: NodeId,
        /// Requested index
        pin: usize,
    },

    /// Direction or type mismatch between the two pins
    #[error("Cannot connect '{from}' to '{to}'")]
    IncompatiblePins {
        /// Source pin name
        from: String,
        /// Target pin name
        to: String,
    },

    /// Self-loop not allowed
    #[error("Self-loop not allowed on {0}")]
    SelfLoop(NodeId),

    /// The link would close a cycle
    #[error("Linking {from} -> {to} would create a cycle")]
    WouldCreateCycle {
        /// Source node
        from: NodeId,
        /// Target node
        to: NodeId,
    },

    /// The ID counter has no unused values left
    #[error("No IDs left to assign")]
    IdsExhausted,
}

/// Error when graph contains a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Graph contains a cycle through {0}")]
pub struct CycleError(pub NodeId);
