// SPDX-License-Identifier: MIT OR Apache-2.0
//! Formulas for the built-in texture nodes.
//!
//! Every texture node produces a color. Math nodes work on the first
//! component of their inputs and broadcast the result to `(r, r, r, 1)`.

use super::{color, noise};
use crate::evaluation::{EvaluationError, FormulaInputs, NodeFormula};
use crate::pin::PinValue;

/// Mid-gray returned by `Texture Sample`, which does not load images
const TEXTURE_PLACEHOLDER: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

/// A built-in texture node operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureOp {
    /// `Perlin Noise`
    PerlinNoise,
    /// `Checkerboard`
    Checkerboard,
    /// `Gradient`
    Gradient,
    /// `Solid Color`
    SolidColor,
    /// `Voronoi`
    Voronoi,
    /// `Texture Sample`
    TextureSample,
    /// `Add`
    Add,
    /// `Multiply`
    Multiply,
    /// `Lerp`
    Lerp,
    /// `Clamp`
    Clamp,
    /// `Remap`
    Remap,
    /// `Power`
    Power,
    /// `Blur`
    Blur,
    /// `Levels`
    Levels,
    /// `Invert`
    Invert,
    /// `HSV Adjust`
    HsvAdjust,
    /// `Channel Split`
    ChannelSplit,
    /// `Channel Merge`
    ChannelMerge,
    /// `Colorize`
    Colorize,
    /// `Blend Multiply`
    BlendMultiply,
    /// `Blend Overlay`
    BlendOverlay,
    /// `Blend Screen`
    BlendScreen,
    /// `Blend Add`
    BlendAdd,
    /// `Texture Output`
    TextureOutput,
}

impl TextureOp {
    /// Every operation, in catalog order
    pub const ALL: [TextureOp; 24] = [
        Self::PerlinNoise,
        Self::Checkerboard,
        Self::Gradient,
        Self::SolidColor,
        Self::Voronoi,
        Self::TextureSample,
        Self::Add,
        Self::Multiply,
        Self::Lerp,
        Self::Clamp,
        Self::Remap,
        Self::Power,
        Self::Blur,
        Self::Levels,
        Self::Invert,
        Self::HsvAdjust,
        Self::ChannelSplit,
        Self::ChannelMerge,
        Self::Colorize,
        Self::BlendMultiply,
        Self::BlendOverlay,
        Self::BlendScreen,
        Self::BlendAdd,
        Self::TextureOutput,
    ];

    /// Registered node type name
    pub fn type_name(self) -> &'static str {
        match self {
            Self::PerlinNoise => "Perlin Noise",
            Self::Checkerboard => "Checkerboard",
            Self::Gradient => "Gradient",
            Self::SolidColor => "Solid Color",
            Self::Voronoi => "Voronoi",
            Self::TextureSample => "Texture Sample",
            Self::Add => "Add",
            Self::Multiply => "Multiply",
            Self::Lerp => "Lerp",
            Self::Clamp => "Clamp",
            Self::Remap => "Remap",
            Self::Power => "Power",
            Self::Blur => "Blur",
            Self::Levels => "Levels",
            Self::Invert => "Invert",
            Self::HsvAdjust => "HSV Adjust",
            Self::ChannelSplit => "Channel Split",
            Self::ChannelMerge => "Channel Merge",
            Self::Colorize => "Colorize",
            Self::BlendMultiply => "Blend Multiply",
            Self::BlendOverlay => "Blend Overlay",
            Self::BlendScreen => "Blend Screen",
            Self::BlendAdd => "Blend Add",
            Self::TextureOutput => "Texture Output",
        }
    }

    /// Look up an operation by node type name
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.type_name() == name)
    }

    /// Compute this operation's color for one node at one sample
    fn color(
        self,
        inputs: &FormulaInputs<'_>,
        output_pin: usize,
    ) -> Result<[f32; 4], EvaluationError> {
        let rgba = match self {
            // Generators
            Self::PerlinNoise => {
                let [u, v] = inputs.uv(0)?;
                let scale = positive_or(inputs.float(1)?, 4.0);
                let octaves = inputs.float(2)?;
                let octaves = if octaves > 0.0 { (octaves as u32).clamp(1, 8) } else { 4 };
                gray(noise::fbm(u * scale, v * scale, octaves))
            }
            Self::Checkerboard => {
                let [u, v] = inputs.uv(0)?;
                let scale = positive_or(inputs.float(1)?, 8.0);
                let cx = (u * scale).floor() as i64;
                let cy = (v * scale).floor() as i64;
                gray(if cx.wrapping_add(cy).rem_euclid(2) == 0 { 1.0 } else { 0.0 })
            }
            Self::Gradient => {
                let [u, _] = inputs.uv(0)?;
                let a = inputs.color(1)?;
                let b = inputs.color(2)?;
                let t = u.clamp(0.0, 1.0);
                zip(a, b, |a, b| lerp(a, b, t))
            }
            Self::SolidColor | Self::TextureOutput => inputs.color(0)?,
            Self::Voronoi => {
                let [u, v] = inputs.uv(0)?;
                let scale = positive_or(inputs.float(1)?, 4.0);
                let randomness = positive_or(inputs.float(2)?, 1.0);
                gray(noise::voronoi(u * scale, v * scale, randomness))
            }
            Self::TextureSample => TEXTURE_PLACEHOLDER,

            // Math
            Self::Add => gray(inputs.float(0)? + inputs.float(1)?),
            Self::Multiply => gray(inputs.float(0)? * inputs.float(1)?),
            Self::Lerp => {
                let a = inputs.float(0)?;
                let b = inputs.float(1)?;
                let t = inputs.float(2)?.clamp(0.0, 1.0);
                gray(lerp(a, b, t))
            }
            Self::Clamp => {
                let value = inputs.float(0)?;
                let lo = inputs.float(1)?;
                let mut hi = inputs.float(2)?;
                if hi <= lo {
                    hi = 1.0;
                }
                // `f32::clamp` panics when lo > hi, which a lo above 1 still allows
                gray(value.max(lo).min(hi))
            }
            Self::Remap => {
                let value = inputs.float(0)?;
                let in_min = inputs.float(1)?;
                let mut in_max = inputs.float(2)?;
                let out_min = inputs.float(3)?;
                let out_max = inputs.float(4)?;
                if (in_max - in_min).abs() < 1e-4 {
                    in_max = in_min + 1.0;
                }
                let t = (value - in_min) / (in_max - in_min);
                gray(out_min + t * (out_max - out_min))
            }
            Self::Power => {
                let base = inputs.float(0)?.max(0.0);
                let mut exponent = inputs.float(1)?;
                if exponent == 0.0 {
                    exponent = 1.0;
                }
                gray(base.powf(exponent))
            }

            // Filters
            Self::Blur => {
                let radius = inputs.float(1)?;
                if radius <= 0.0 {
                    return inputs.color(0);
                }
                let step = radius / inputs.settings().resolution.max(1) as f32;
                let [u, v] = inputs.sample();
                let mut sum = [0.0; 4];
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        let offset = [u + dx as f32 * step, v + dy as f32 * step];
                        sum = zip(sum, inputs.color_at(0, offset)?, |s, c| s + c);
                    }
                }
                sum.map(|s| s / 9.0)
            }
            Self::Levels => {
                let [r, g, b, a] = inputs.color(0)?;
                let mut lo = inputs.float(1)?;
                let mut hi = inputs.float(2)?;
                let mut gamma = inputs.float(3)?;
                if hi <= lo {
                    lo = 0.0;
                    hi = 1.0;
                }
                if gamma <= 0.0 {
                    gamma = 1.0;
                }
                let apply = |c: f32| ((c - lo) / (hi - lo)).clamp(0.0, 1.0).powf(1.0 / gamma);
                [apply(r), apply(g), apply(b), a]
            }
            Self::Invert => {
                let [r, g, b, a] = inputs.color(0)?;
                [1.0 - r, 1.0 - g, 1.0 - b, a]
            }

            // Color
            Self::HsvAdjust => {
                let [r, g, b, a] = inputs.color(0)?;
                let [h, s, v] = color::rgb_to_hsv([r, g, b]);
                let h = (h + inputs.float(1)?).rem_euclid(1.0);
                let s = (s + inputs.float(2)?).clamp(0.0, 1.0);
                let v = (v + inputs.float(3)?).clamp(0.0, 1.0);
                let [r, g, b] = color::hsv_to_rgb([h, s, v]);
                [r, g, b, a]
            }
            Self::ChannelSplit => {
                let rgba = inputs.color(0)?;
                gray(rgba[output_pin.min(3)])
            }
            Self::ChannelMerge => {
                let r = inputs.float(0)?;
                let g = inputs.float(1)?;
                let b = inputs.float(2)?;
                let a = inputs.float(3)?;
                [r, g, b, if a > 0.0 { a } else { 1.0 }]
            }
            Self::Colorize => {
                let value = inputs.float(0)?.clamp(0.0, 1.0);
                inputs.color(1)?.map(|c| c * value)
            }

            // Blend
            Self::BlendMultiply => zip(inputs.color(0)?, inputs.color(1)?, |a, b| a * b),
            Self::BlendScreen => blend_rgb(inputs, color::screen)?,
            Self::BlendOverlay => blend_rgb(inputs, color::overlay)?,
            Self::BlendAdd => {
                zip(inputs.color(0)?, inputs.color(1)?, |a, b| (a + b).clamp(0.0, 1.0))
            }
        };
        Ok(rgba)
    }
}

impl NodeFormula for TextureOp {
    fn evaluate(
        &self,
        inputs: &FormulaInputs<'_>,
        output_pin: usize,
    ) -> Result<PinValue, EvaluationError> {
        self.color(inputs, output_pin).map(PinValue::Color)
    }
}

fn gray(v: f32) -> [f32; 4] {
    [v, v, v, 1.0]
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Substitute a fallback for zero or negative parameters
fn positive_or(value: f32, fallback: f32) -> f32 {
    if value > 0.0 {
        value
    } else {
        fallback
    }
}

fn zip(a: [f32; 4], b: [f32; 4], f: impl Fn(f32, f32) -> f32) -> [f32; 4] {
    [f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2]), f(a[3], b[3])]
}

/// Blend RGB of inputs A and B per channel, keeping A's alpha
fn blend_rgb(
    inputs: &FormulaInputs<'_>,
    f: fn(f32, f32) -> f32,
) -> Result<[f32; 4], EvaluationError> {
    let [ar, ag, ab, aa] = inputs.color(0)?;
    let [br, bg, bb, _] = inputs.color(1)?;
    Ok([f(ar, br), f(ag, bg), f(ab, bb), aa])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::Evaluator;
    use crate::graph::NodeGraph;
    use crate::graphs::texture::create_texture_registry;
    use crate::node::NodeId;
    use std::sync::Arc;

    struct Fixture {
        graph: NodeGraph,
        evaluator: Evaluator,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                graph: NodeGraph::new(Arc::new(create_texture_registry())),
                evaluator: Evaluator::default(),
            }
        }

        fn node(&mut self, type_name: &str, inputs: &[(usize, PinValue)]) -> NodeId {
            let id = self.graph.add_node(type_name, [0.0, 0.0]).unwrap();
            let node = self.graph.node_mut(id).unwrap();
            for (pin, value) in inputs {
                node.input_mut(*pin).unwrap().default_value = value.clone();
            }
            id
        }

        fn eval(&self, node: NodeId, pin: usize, sample: [f32; 2]) -> [f32; 4] {
            match self.evaluator.evaluate(&self.graph, node, pin, sample).unwrap() {
                PinValue::Color(c) => c,
                other => panic!("expected a color, got {other:?}"),
            }
        }
    }

    fn assert_close(actual: [f32; 4], expected: [f32; 4]) {
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-5, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_type_names_round_trip() {
        for op in TextureOp::ALL {
            assert_eq!(TextureOp::from_type_name(op.type_name()), Some(op));
        }
        assert_eq!(TextureOp::from_type_name("Subtract"), None);
    }

    #[test]
    fn test_math_nodes() {
        let mut f = Fixture::new();
        let add = f.node("Add", &[(0, PinValue::Float(0.25)), (1, PinValue::Float(0.5))]);
        let mul = f.node("Multiply", &[(0, PinValue::Float(0.5)), (1, PinValue::Float(0.5))]);
        let lerp = f.node(
            "Lerp",
            &[(0, PinValue::Float(0.0)), (1, PinValue::Float(1.0)), (2, PinValue::Float(2.0))],
        );
        let power = f.node("Power", &[(0, PinValue::Float(-3.0)), (1, PinValue::Float(2.0))]);
        let identity_power = f.node("Power", &[(0, PinValue::Float(0.3))]);

        assert_close(f.eval(add, 0, [0.0, 0.0]), [0.75, 0.75, 0.75, 1.0]);
        assert_close(f.eval(mul, 0, [0.0, 0.0]), [0.25, 0.25, 0.25, 1.0]);
        // T clamps to 1
        assert_close(f.eval(lerp, 0, [0.0, 0.0]), [1.0, 1.0, 1.0, 1.0]);
        // Negative base floors at 0
        assert_close(f.eval(power, 0, [0.0, 0.0]), [0.0, 0.0, 0.0, 1.0]);
        // Exponent 0 is treated as 1
        assert_close(f.eval(identity_power, 0, [0.0, 0.0]), [0.3, 0.3, 0.3, 1.0]);
    }

    #[test]
    fn test_clamp_and_remap_guards() {
        let mut f = Fixture::new();
        // Max <= Min falls back to Max = 1
        let clamp = f.node("Clamp", &[(0, PinValue::Float(3.0)), (1, PinValue::Float(0.2))]);
        let clamp_low = f.node("Clamp", &[(0, PinValue::Float(-1.0)), (1, PinValue::Float(0.2))]);
        // Min above the fallback Max does not panic
        let clamp_high_min =
            f.node("Clamp", &[(0, PinValue::Float(0.5)), (1, PinValue::Float(2.0))]);
        // Degenerate input range is widened to [InMin, InMin + 1]
        let remap = f.node(
            "Remap",
            &[
                (0, PinValue::Float(0.5)),
                (3, PinValue::Float(10.0)),
                (4, PinValue::Float(20.0)),
            ],
        );

        assert_close(f.eval(clamp, 0, [0.0, 0.0]), [1.0, 1.0, 1.0, 1.0]);
        assert_close(f.eval(clamp_low, 0, [0.0, 0.0]), [0.2, 0.2, 0.2, 1.0]);
        assert_close(f.eval(clamp_high_min, 0, [0.0, 0.0]), [1.0, 1.0, 1.0, 1.0]);
        assert_close(f.eval(remap, 0, [0.0, 0.0]), [15.0, 15.0, 15.0, 1.0]);
    }

    #[test]
    fn test_checkerboard_parity() {
        let mut f = Fixture::new();
        let checker = f.node("Checkerboard", &[(1, PinValue::Float(2.0))]);
        assert_close(f.eval(checker, 0, [0.1, 0.1]), [1.0, 1.0, 1.0, 1.0]);
        assert_close(f.eval(checker, 0, [0.6, 0.1]), [0.0, 0.0, 0.0, 1.0]);
        assert_close(f.eval(checker, 0, [0.6, 0.6]), [1.0, 1.0, 1.0, 1.0]);
        // Parity stays consistent across the origin
        assert_close(f.eval(checker, 0, [-0.1, 0.1]), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_explicit_uv_overrides_sample() {
        let mut f = Fixture::new();
        let checker = f.node(
            "Checkerboard",
            &[(0, PinValue::Vec2([0.6, 0.1])), (1, PinValue::Float(2.0))],
        );
        assert_close(f.eval(checker, 0, [0.1, 0.1]), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_gradient_and_texture_sample() {
        let mut f = Fixture::new();
        let gradient = f.node(
            "Gradient",
            &[
                (1, PinValue::Color([0.0, 0.0, 0.0, 1.0])),
                (2, PinValue::Color([1.0, 0.5, 0.0, 1.0])),
            ],
        );
        let sample = f.node("Texture Sample", &[(1, PinValue::String("brick.png".into()))]);

        assert_close(f.eval(gradient, 0, [0.5, 0.9]), [0.5, 0.25, 0.0, 1.0]);
        assert_close(f.eval(gradient, 0, [1.5, 0.0]), [1.0, 0.5, 0.0, 1.0]);
        assert_close(f.eval(sample, 0, [0.3, 0.3]), TEXTURE_PLACEHOLDER);
    }

    #[test]
    fn test_noise_generators_are_gray_in_range() {
        let mut f = Fixture::new();
        let perlin = f.node("Perlin Noise", &[(2, PinValue::Float(20.0))]);
        let voronoi = f.node("Voronoi", &[]);
        for i in 0..16 {
            let sample = [i as f32 / 15.0, 1.0 - i as f32 / 15.0];
            for node in [perlin, voronoi] {
                let [r, g, b, a] = f.eval(node, 0, sample);
                assert!((0.0..=1.0).contains(&r));
                assert_eq!((r, r, 1.0), (g, b, a));
            }
        }
    }

    #[test]
    fn test_generator_parameter_fallbacks() {
        let mut f = Fixture::new();
        let perlin = f.node("Perlin Noise", &[]);
        let negative = f.node(
            "Perlin Noise",
            &[(1, PinValue::Float(-2.0)), (2, PinValue::Float(-1.0))],
        );
        let many_octaves = f.node("Perlin Noise", &[(2, PinValue::Float(20.0))]);
        let fractional_octaves = f.node("Perlin Noise", &[(2, PinValue::Float(0.5))]);
        let voronoi = f.node("Voronoi", &[(2, PinValue::Float(0.0))]);
        let checker = f.node("Checkerboard", &[]);

        let [u, v] = [0.3, 0.7];
        // Scale falls back to 4, octaves to 4
        let expected = gray(noise::fbm(u * 4.0, v * 4.0, 4));
        assert_eq!(f.eval(perlin, 0, [u, v]), expected);
        assert_eq!(f.eval(negative, 0, [u, v]), expected);
        // Octaves clamp to [1, 8]
        assert_eq!(f.eval(many_octaves, 0, [u, v]), gray(noise::fbm(u * 4.0, v * 4.0, 8)));
        assert_eq!(
            f.eval(fractional_octaves, 0, [u, v]),
            gray(noise::fbm(u * 4.0, v * 4.0, 1))
        );
        // Scale 4, randomness falls back to 1
        assert_eq!(f.eval(voronoi, 0, [u, v]), gray(noise::voronoi(u * 4.0, v * 4.0, 1.0)));
        // Scale falls back to 8: 0.2 lands in cell 1, 0.25 in cell 2
        assert_eq!(f.eval(checker, 0, [0.2, 0.0]), gray(0.0));
        assert_eq!(f.eval(checker, 0, [0.25, 0.0]), gray(1.0));
    }

    #[test]
    fn test_huge_scales_stay_in_range() {
        let mut f = Fixture::new();
        let voronoi = f.node("Voronoi", &[(1, PinValue::Float(1.0e10))]);
        let checker = f.node("Checkerboard", &[(1, PinValue::Float(1.0e30))]);
        let perlin = f.node("Perlin Noise", &[(1, PinValue::Float(1.0e10))]);
        for node in [voronoi, checker, perlin] {
            let [r, ..] = f.eval(node, 0, [0.5, 0.5]);
            assert!((0.0..=1.0).contains(&r), "value {r} out of range");
        }
    }

    #[test]
    fn test_filters() {
        let mut f = Fixture::new();
        let invert = f.node("Invert", &[(0, PinValue::Color([0.2, 0.4, 0.6, 0.5]))]);
        let levels = f.node(
            "Levels",
            &[
                (0, PinValue::Color([0.5, 0.25, 1.0, 0.5])),
                (1, PinValue::Float(0.25)),
                (2, PinValue::Float(0.75)),
                (3, PinValue::Float(1.0)),
            ],
        );
        let gamma = f.node(
            "Levels",
            &[(0, PinValue::Color([0.25, 0.25, 0.25, 1.0])), (3, PinValue::Float(0.5))],
        );
        let unblurred = f.node("Blur", &[(0, PinValue::Color([0.1, 0.2, 0.3, 0.4]))]);

        assert_close(f.eval(invert, 0, [0.0, 0.0]), [0.8, 0.6, 0.4, 0.5]);
        assert_close(f.eval(levels, 0, [0.0, 0.0]), [0.5, 0.0, 1.0, 0.5]);
        // Gamma 0.5 squares the normalized value
        assert_close(f.eval(gamma, 0, [0.0, 0.0]), [0.0625, 0.0625, 0.0625, 1.0]);
        // Radius 0 passes the input through
        assert_close(f.eval(unblurred, 0, [0.0, 0.0]), [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_blur_averages_neighborhood() {
        let mut f = Fixture::new();
        let gradient = f.node(
            "Gradient",
            &[
                (1, PinValue::Color([0.0, 0.0, 0.0, 1.0])),
                (2, PinValue::Color([1.0, 1.0, 1.0, 1.0])),
            ],
        );
        let blur = f.node("Blur", &[(1, PinValue::Float(8.0))]);
        f.graph.add_link(gradient, 0, blur, 0).unwrap();

        // A linear ramp averages back to its center value
        let [r, ..] = f.eval(blur, 0, [0.5, 0.5]);
        assert!((r - 0.5).abs() < 1e-5);
        // At the edge the left taps clamp to black
        let [r, ..] = f.eval(blur, 0, [0.0, 0.5]);
        assert!((r - 8.0 / 256.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_color_nodes() {
        let mut f = Fixture::new();
        let shift = f.node(
            "HSV Adjust",
            &[(0, PinValue::Color([1.0, 0.0, 0.0, 0.5])), (1, PinValue::Float(1.0 / 3.0))],
        );
        let wrap = f.node(
            "HSV Adjust",
            &[(0, PinValue::Color([1.0, 0.0, 0.0, 1.0])), (1, PinValue::Float(-1.0 / 3.0))],
        );
        let desaturate = f.node(
            "HSV Adjust",
            &[(0, PinValue::Color([1.0, 0.0, 0.0, 1.0])), (2, PinValue::Float(-2.0))],
        );
        let split = f.node("Channel Split", &[(0, PinValue::Color([0.1, 0.2, 0.3, 0.4]))]);
        let merge = f.node(
            "Channel Merge",
            &[(0, PinValue::Float(0.1)), (1, PinValue::Float(0.2)), (2, PinValue::Float(0.3))],
        );
        let colorize = f.node(
            "Colorize",
            &[(0, PinValue::Float(0.5)), (1, PinValue::Color([1.0, 0.5, 0.0, 1.0]))],
        );

        assert_close(f.eval(shift, 0, [0.0, 0.0]), [0.0, 1.0, 0.0, 0.5]);
        assert_close(f.eval(wrap, 0, [0.0, 0.0]), [0.0, 0.0, 1.0, 1.0]);
        assert_close(f.eval(desaturate, 0, [0.0, 0.0]), [1.0, 1.0, 1.0, 1.0]);
        assert_close(f.eval(split, 1, [0.0, 0.0]), [0.2, 0.2, 0.2, 1.0]);
        assert_close(f.eval(split, 3, [0.0, 0.0]), [0.4, 0.4, 0.4, 1.0]);
        // Alpha left at 0 means opaque
        assert_close(f.eval(merge, 0, [0.0, 0.0]), [0.1, 0.2, 0.3, 1.0]);
        assert_close(f.eval(colorize, 0, [0.0, 0.0]), [0.5, 0.25, 0.0, 0.5]);
    }

    #[test]
    fn test_blend_nodes() {
        let a = PinValue::Color([0.25, 0.75, 0.5, 0.5]);
        let b = PinValue::Color([0.5, 0.5, 1.0, 1.0]);
        let mut f = Fixture::new();
        let pair = [(0, a), (1, b)];
        let multiply = f.node("Blend Multiply", &pair);
        let screen = f.node("Blend Screen", &pair);
        let overlay = f.node("Blend Overlay", &pair);
        let add = f.node("Blend Add", &pair);

        assert_close(f.eval(multiply, 0, [0.0, 0.0]), [0.125, 0.375, 0.5, 0.5]);
        assert_close(f.eval(screen, 0, [0.0, 0.0]), [0.625, 0.875, 1.0, 0.5]);
        assert_close(f.eval(overlay, 0, [0.0, 0.0]), [0.25, 0.75, 1.0, 0.5]);
        assert_close(f.eval(add, 0, [0.0, 0.0]), [0.75, 1.0, 1.0, 1.0]);
    }
}
