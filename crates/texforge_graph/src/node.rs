// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions and the node type registry.

use crate::pin::Pin;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node, scoped to one graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Custom constructor for instances of a node type
pub type NodeFactory = fn(&NodeTypeDefinition, NodeId, [f32; 2]) -> Node;

/// Node type definition
#[derive(Debug, Clone)]
pub struct NodeTypeDefinition {
    /// Unique type name, the registry key
    pub name: String,
    /// Category shown in "add node" menus
    pub category: String,
    /// Input pin templates
    pub default_inputs: Vec<Pin>,
    /// Output pin templates
    pub default_outputs: Vec<Pin>,
    /// Optional constructor overriding the template copy
    pub factory: Option<NodeFactory>,
}

impl NodeTypeDefinition {
    /// Create a definition with no pins
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            default_inputs: Vec::new(),
            default_outputs: Vec::new(),
            factory: None,
        }
    }

    /// Set the input pin templates
    pub fn with_inputs(mut self, inputs: Vec<Pin>) -> Self {
        self.default_inputs = inputs;
        self
    }

    /// Set the output pin templates
    pub fn with_outputs(mut self, outputs: Vec<Pin>) -> Self {
        self.default_outputs = outputs;
        self
    }

    /// Set a custom instance constructor
    pub fn with_factory(mut self, factory: NodeFactory) -> Self {
        self.factory = Some(factory);
        self
    }

    /// `category/name`, or just the name when the category is empty
    pub fn full_name(&self) -> String {
        if self.category.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.category, self.name)
        }
    }

    /// Build a new instance of this type
    pub fn instantiate(&self, id: NodeId, position: [f32; 2]) -> Node {
        match self.factory {
            Some(factory) => factory(self, id, position),
            None => Node::new(self, id, position),
        }
    }
}

/// A node instance in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Registered type name
    pub type_name: String,
    /// Position in the graph canvas (layout only)
    pub position: [f32; 2],
    /// Input pins, seeded from the type's templates
    pub inputs: Vec<Pin>,
    /// Output pins, seeded from the type's templates
    pub outputs: Vec<Pin>,
}

impl Node {
    /// Create a new node by copying a type's pin templates
    pub fn new(node_type: &NodeTypeDefinition, id: NodeId, position: [f32; 2]) -> Self {
        Self {
            id,
            type_name: node_type.name.clone(),
            position,
            inputs: node_type.default_inputs.clone(),
            outputs: node_type.default_outputs.clone(),
        }
    }

    /// Get an input pin by index
    pub fn input(&self, index: usize) -> Option<&Pin> {
        self.inputs.get(index)
    }

    /// Get a mutable input pin by index, e.g. to edit its default value
    pub fn input_mut(&mut self, index: usize) -> Option<&mut Pin> {
        self.inputs.get_mut(index)
    }

    /// Get an output pin by index
    pub fn output(&self, index: usize) -> Option<&Pin> {
        self.outputs.get(index)
    }

    /// Find an input pin index by name
    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|p| p.name == name)
    }
}

/// Registry of available node types.
///
/// Populated once at startup, then shared read-only (usually as
/// `Arc<NodeRegistry>`) with every graph built from it.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    /// Registered node types by name, in registration order
    types: IndexMap<String, NodeTypeDefinition>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node type, replacing any earlier type with the same name
    pub fn register(&mut self, node_type: NodeTypeDefinition) {
        if let Some(old) = self.types.insert(node_type.name.clone(), node_type) {
            tracing::warn!("Node type '{}' registered twice, keeping the latest", old.name);
        }
    }

    /// Get a node type by name, or by `category/name`
    pub fn get(&self, name: &str) -> Option<&NodeTypeDefinition> {
        self.types
            .get(name)
            .or_else(|| self.types.values().find(|t| t.full_name() == name))
    }

    /// Check whether a type name resolves
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get all registered types
    pub fn types(&self) -> impl Iterator<Item = &NodeTypeDefinition> {
        self.types.values()
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.types.values().map(|t| t.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Get types by category
    pub fn types_in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a NodeTypeDefinition> + 'a {
        self.types.values().filter(move |t| t.category == category)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
