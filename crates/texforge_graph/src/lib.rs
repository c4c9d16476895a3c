// SPDX-License-Identifier: MIT OR Apache-2.0
//! Procedural texture node graphs for Texforge.
//!
//! This crate provides the core behind the texture editor:
//! - Typed pins, nodes and links
//! - A node type registry and the built-in texture node catalog
//! - A pull-based evaluator that resolves any output pin at any sample
//!   coordinate
//! - An image sampler that renders a graph's output node to RGBA
//!
//! ## Architecture
//!
//! A [`NodeGraph`] owns nodes and links and shares a read-only
//! [`NodeRegistry`]. The [`Evaluator`] never mutates the graph: it walks
//! links backward from the requested pin, applying one [`NodeFormula`]
//! per node type. Failures surface as [`EvaluationError`]s and become a
//! magenta pixel in [`ImageSampler`] output.
//!
//! Graphs persist as [`GraphDocument`]s in RON or JSON.

pub mod document;
pub mod evaluation;
pub mod graph;
pub mod graphs;
pub mod link;
pub mod node;
pub mod pin;
pub mod sampler;
pub mod settings;

pub use document::{DocumentError, GraphDocument};
pub use evaluation::{EvaluationError, Evaluator, FormulaInputs, NodeFormula, ERROR_COLOR};
pub use graph::{CycleError, GraphError, NodeGraph};
pub use graphs::texture::{create_texture_registry, TextureOp};
pub use link::{Link, LinkId};
pub use node::{Node, NodeId, NodeRegistry, NodeTypeDefinition};
pub use pin::{Pin, PinDirection, PinType, PinValue};
pub use sampler::{generate_image, ImageSampler, SampleError};
pub use settings::{EvaluatorSettings, SettingsError};
