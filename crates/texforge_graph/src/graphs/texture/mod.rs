// SPDX-License-Identifier: MIT OR Apache-2.0
//! Procedural texture graph.
//!
//! Provides the built-in catalog of texture nodes: generators, scalar
//! math, filters, color adjustments, blend modes and the output sink
//! that the image sampler renders from.

pub mod color;
pub mod noise;
mod ops;

pub use ops::TextureOp;

use crate::node::{NodeRegistry, NodeTypeDefinition};
use crate::pin::{Pin, PinType};

/// Type name of the sink node rendered by the image sampler
pub const OUTPUT_NODE_TYPE: &str = "Texture Output";

/// Create the texture graph node registry with all available node types
pub fn create_texture_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    // ========================================================================
    // Generators
    // ========================================================================

    registry.register(
        NodeTypeDefinition::new("Perlin Noise", "Generators")
            .with_inputs(vec![
                Pin::input("UV", PinType::Vec2),
                Pin::input("Scale", PinType::Float),
                Pin::input("Octaves", PinType::Float),
            ])
            .with_outputs(vec![Pin::output("Value", PinType::Float)]),
    );

    registry.register(
        NodeTypeDefinition::new("Checkerboard", "Generators")
            .with_inputs(vec![Pin::input("UV", PinType::Vec2), Pin::input("Scale", PinType::Float)])
            .with_outputs(vec![Pin::output("Pattern", PinType::Float)]),
    );

    registry.register(
        NodeTypeDefinition::new("Gradient", "Generators")
            .with_inputs(vec![
                Pin::input("UV", PinType::Vec2),
                Pin::input("ColorA", PinType::Color),
                Pin::input("ColorB", PinType::Color),
            ])
            .with_outputs(vec![Pin::output("Color", PinType::Color)]),
    );

    registry.register(
        NodeTypeDefinition::new("Solid Color", "Generators")
            .with_inputs(vec![Pin::input("Color", PinType::Color)])
            .with_outputs(vec![Pin::output("Color", PinType::Color)]),
    );

    registry.register(
        NodeTypeDefinition::new("Voronoi", "Generators")
            .with_inputs(vec![
                Pin::input("UV", PinType::Vec2),
                Pin::input("Scale", PinType::Float),
                Pin::input("Randomness", PinType::Float),
            ])
            .with_outputs(vec![Pin::output("Value", PinType::Float)]),
    );

    // Placeholder until image inputs are supported
    registry.register(
        NodeTypeDefinition::new("Texture Sample", "Generators")
            .with_inputs(vec![Pin::input("UV", PinType::Vec2), Pin::input("Path", PinType::String)])
            .with_outputs(vec![Pin::output("Color", PinType::Color)]),
    );

    // ========================================================================
    // Math
    // ========================================================================

    register_math(&mut registry, "Add", &["A", "B"]);
    register_math(&mut registry, "Multiply", &["A", "B"]);
    register_math(&mut registry, "Lerp", &["A", "B", "T"]);
    register_math(&mut registry, "Clamp", &["Value", "Min", "Max"]);
    register_math(&mut registry, "Remap", &["Value", "InMin", "InMax", "OutMin", "OutMax"]);
    register_math(&mut registry, "Power", &["Base", "Exponent"]);

    // ========================================================================
    // Filters
    // ========================================================================

    registry.register(
        NodeTypeDefinition::new("Blur", "Filters")
            .with_inputs(vec![
                Pin::input("Input", PinType::Color),
                Pin::input("Radius", PinType::Float),
            ])
            .with_outputs(vec![Pin::output("Color", PinType::Color)]),
    );

    registry.register(
        NodeTypeDefinition::new("Levels", "Filters")
            .with_inputs(vec![
                Pin::input("Input", PinType::Color),
                Pin::input("Min", PinType::Float),
                Pin::input("Max", PinType::Float),
                Pin::input("Gamma", PinType::Float),
            ])
            .with_outputs(vec![Pin::output("Color", PinType::Color)]),
    );

    registry.register(
        NodeTypeDefinition::new("Invert", "Filters")
            .with_inputs(vec![Pin::input("Input", PinType::Color)])
            .with_outputs(vec![Pin::output("Color", PinType::Color)]),
    );

    // ========================================================================
    // Color
    // ========================================================================

    registry.register(
        NodeTypeDefinition::new("HSV Adjust", "Color")
            .with_inputs(vec![
                Pin::input("Input", PinType::Color),
                Pin::input("H", PinType::Float),
                Pin::input("S", PinType::Float),
                Pin::input("V", PinType::Float),
            ])
            .with_outputs(vec![Pin::output("Color", PinType::Color)]),
    );

    registry.register(
        NodeTypeDefinition::new("Channel Split", "Color")
            .with_inputs(vec![Pin::input("Color", PinType::Color)])
            .with_outputs(vec![
                Pin::output("R", PinType::Float),
                Pin::output("G", PinType::Float),
                Pin::output("B", PinType::Float),
                Pin::output("A", PinType::Float),
            ]),
    );

    registry.register(
        NodeTypeDefinition::new("Channel Merge", "Color")
            .with_inputs(vec![
                Pin::input("R", PinType::Float),
                Pin::input("G", PinType::Float),
                Pin::input("B", PinType::Float),
                Pin::input("A", PinType::Float),
            ])
            .with_outputs(vec![Pin::output("Color", PinType::Color)]),
    );

    registry.register(
        NodeTypeDefinition::new("Colorize", "Color")
            .with_inputs(vec![
                Pin::input("Value", PinType::Float),
                Pin::input("Color", PinType::Color),
            ])
            .with_outputs(vec![Pin::output("Color", PinType::Color)]),
    );

    // ========================================================================
    // Blend
    // ========================================================================

    for name in ["Blend Multiply", "Blend Overlay", "Blend Screen", "Blend Add"] {
        registry.register(
            NodeTypeDefinition::new(name, "Blend")
                .with_inputs(vec![Pin::input("A", PinType::Color), Pin::input("B", PinType::Color)])
                .with_outputs(vec![Pin::output("Color", PinType::Color)]),
        );
    }

    // ========================================================================
    // Output
    // ========================================================================

    registry.register(
        NodeTypeDefinition::new(OUTPUT_NODE_TYPE, "Output")
            .with_inputs(vec![Pin::input("Color", PinType::Color)])
            .with_outputs(vec![Pin::output("Color", PinType::Color)]),
    );

    registry
}

/// Float inputs, one float `Result` output
fn register_math(registry: &mut NodeRegistry, name: &str, inputs: &[&str]) {
    registry.register(
        NodeTypeDefinition::new(name, "Math")
            .with_inputs(inputs.iter().map(|input| Pin::input(*input, PinType::Float)).collect())
            .with_outputs(vec![Pin::output("Result", PinType::Float)]),
    );
}
