// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pull-based graph evaluation.
//!
//! [`Evaluator::evaluate`] resolves one output pin at one sample
//! coordinate by walking links backward. Each node type is handled by a
//! [`NodeFormula`] looked up by type name; formulas read their inputs
//! through [`FormulaInputs`], which recurses into upstream nodes at the
//! same sample coordinate or falls back to the pin's default value.
//!
//! Nothing is cached: evaluating the same graph twice at the same
//! coordinate repeats the whole walk and yields identical results.

use crate::graph::NodeGraph;
use crate::graphs::texture::TextureOp;
use crate::node::{Node, NodeId};
use crate::pin::{PinValue, WHITE};
use crate::settings::EvaluatorSettings;
use std::borrow::Cow;
use std::collections::HashMap;

/// Magenta, returned in place of a value that could not be computed
pub const ERROR_COLOR: [f32; 4] = [1.0, 0.0, 1.0, 1.0];

/// Per-type evaluation rule
pub trait NodeFormula: Send + Sync {
    /// Compute the value of `output_pin` for the node behind `inputs`
    fn evaluate(
        &self,
        inputs: &FormulaInputs<'_>,
        output_pin: usize,
    ) -> Result<PinValue, EvaluationError>;
}

/// Evaluates nodes of a graph at sample coordinates
pub struct Evaluator {
    /// Evaluation settings
    settings: EvaluatorSettings,
    /// Formulas by node type name
    formulas: HashMap<String, Box<dyn NodeFormula>>,
}

impl Evaluator {
    /// Create an evaluator knowing every built-in texture node
    pub fn new(settings: EvaluatorSettings) -> Self {
        let mut evaluator = Self::empty(settings);
        for op in TextureOp::ALL {
            evaluator.register_formula(op.type_name(), op);
        }
        evaluator
    }

    /// Create an evaluator with no formulas
    pub fn empty(settings: EvaluatorSettings) -> Self {
        Self {
            settings,
            formulas: HashMap::new(),
        }
    }

    /// Register (or replace) the formula for a node type
    pub fn register_formula(
        &mut self,
        type_name: impl Into<String>,
        formula: impl NodeFormula + 'static,
    ) {
        self.formulas.insert(type_name.into(), Box::new(formula));
    }

    /// Whether a formula exists for a node type
    pub fn has_formula(&self, type_name: &str) -> bool {
        self.formulas.contains_key(type_name)
    }

    /// Get the settings
    pub fn settings(&self) -> &EvaluatorSettings {
        &self.settings
    }

    /// Evaluate an output pin of a node at a sample coordinate
    pub fn evaluate(
        &self,
        graph: &NodeGraph,
        node_id: NodeId,
        output_pin: usize,
        sample: [f32; 2],
    ) -> Result<PinValue, EvaluationError> {
        self.evaluate_at_depth(graph, node_id, output_pin, sample, 0)
    }

    /// Like [`Self::evaluate`], with any failure replaced by [`ERROR_COLOR`]
    pub fn evaluate_or_sentinel(
        &self,
        graph: &NodeGraph,
        node_id: NodeId,
        output_pin: usize,
        sample: [f32; 2],
    ) -> PinValue {
        self.evaluate(graph, node_id, output_pin, sample)
            .unwrap_or(PinValue::Color(ERROR_COLOR))
    }

    fn evaluate_at_depth(
        &self,
        graph: &NodeGraph,
        node_id: NodeId,
        output_pin: usize,
        sample: [f32; 2],
        depth: u32,
    ) -> Result<PinValue, EvaluationError> {
        if depth > self.settings.max_depth {
            return Err(EvaluationError::RecursionLimit {
                depth: self.settings.max_depth,
            });
        }

        let node = graph.node(node_id).ok_or(EvaluationError::NodeNotFound(node_id))?;
        if output_pin >= node.outputs.len() {
            return Err(EvaluationError::PinOutOfRange {
                node: node_id,
                pin: output_pin,
            });
        }
        let formula = self
            .formulas
            .get(&node.type_name)
            .ok_or_else(|| EvaluationError::UnknownNodeType(node.type_name.clone()))?;

        let inputs = FormulaInputs {
            evaluator: self,
            graph,
            node,
            sample,
            depth,
        };
        formula.evaluate(&inputs, output_pin)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvaluatorSettings::default())
    }
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.formulas.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Evaluator")
            .field("settings", &self.settings)
            .field("formulas", &names)
            .finish()
    }
}

/// Input access for one node at one sample coordinate.
///
/// Every accessor follows the same rule: a linked input pin is evaluated
/// upstream (the oldest link wins), an unlinked one yields its default
/// value, and a pin missing from the node counts as an unset default.
pub struct FormulaInputs<'a> {
    evaluator: &'a Evaluator,
    graph: &'a NodeGraph,
    node: &'a Node,
    sample: [f32; 2],
    depth: u32,
}

impl<'a> FormulaInputs<'a> {
    /// The node being evaluated
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// The sample coordinate being evaluated
    pub fn sample(&self) -> [f32; 2] {
        self.sample
    }

    /// The evaluator's settings
    pub fn settings(&self) -> &'a EvaluatorSettings {
        &self.evaluator.settings
    }

    /// Whether an input pin has an incoming link
    pub fn is_connected(&self, pin: usize) -> bool {
        self.graph.input_link(self.node.id, pin).is_some()
    }

    fn resolve(
        &self,
        pin: usize,
        sample: [f32; 2],
    ) -> Result<Option<Cow<'a, PinValue>>, EvaluationError> {
        if let Some(link) = self.graph.input_link(self.node.id, pin) {
            let value = self.evaluator.evaluate_at_depth(
                self.graph,
                link.from_node,
                link.from_pin,
                sample,
                self.depth + 1,
            )?;
            return Ok(Some(Cow::Owned(value)));
        }
        Ok(self.node.input(pin).map(|p| Cow::Borrowed(&p.default_value)))
    }

    /// Resolve an input as a float, `0.0` when unset
    pub fn float(&self, pin: usize) -> Result<f32, EvaluationError> {
        Ok(self.resolve(pin, self.sample)?.map_or(0.0, |v| v.as_float()))
    }

    /// Resolve an input as a color, opaque white when unset
    pub fn color(&self, pin: usize) -> Result<[f32; 4], EvaluationError> {
        self.color_at(pin, self.sample)
    }

    /// Resolve an input as a color at another sample coordinate
    pub fn color_at(&self, pin: usize, sample: [f32; 2]) -> Result<[f32; 4], EvaluationError> {
        Ok(self.resolve(pin, sample)?.map_or(WHITE, |v| v.as_color()))
    }

    /// Resolve an input as a 2D vector, the sample coordinate when unset
    pub fn vec2(&self, pin: usize) -> Result<[f32; 2], EvaluationError> {
        Ok(self.resolve(pin, self.sample)?.map_or(self.sample, |v| v.as_vec2()))
    }

    /// Resolve a UV input. An unlinked pin left at `(0, 0)` means "use the
    /// current sample coordinate".
    pub fn uv(&self, pin: usize) -> Result<[f32; 2], EvaluationError> {
        let uv = self.vec2(pin)?;
        if uv == [0.0, 0.0] && !self.is_connected(pin) {
            return Ok(self.sample);
        }
        Ok(uv)
    }
}

/// Error during evaluation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// No formula for the node's type
    #[error("No formula for node type: {0}")]
    UnknownNodeType(String),

    /// Requested output pin does not exist
    #[error("Output pin {pin} out of range on {node}")]
    PinOutOfRange {
        /// Node being evaluated
        node: NodeId,
        /// Requested index
        pin: usize,
    },

    /// Evaluation went deeper than the configured limit
    #[error("Evaluation exceeded the depth limit of {depth}")]
    RecursionLimit {
        /// Configured limit
        depth: u32,
    },
}
