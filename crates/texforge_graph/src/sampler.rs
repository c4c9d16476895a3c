// SPDX-License-Identifier: MIT OR Apache-2.0
//! Render a texture graph into an RGBA image.
//!
//! Every pixel is evaluated independently from the graph's output node;
//! nothing is cached between pixels.

use crate::evaluation::{Evaluator, ERROR_COLOR};
use crate::graph::NodeGraph;
use crate::graphs::texture::OUTPUT_NODE_TYPE;
use crate::node::NodeId;
use crate::settings::EvaluatorSettings;
use image::{Rgba, RgbaImage};
use std::sync::atomic::{AtomicBool, Ordering};

/// Renders graphs pixel by pixel
#[derive(Debug, Default)]
pub struct ImageSampler {
    evaluator: Evaluator,
}

impl ImageSampler {
    /// Create a sampler with the built-in texture formulas
    pub fn new(settings: EvaluatorSettings) -> Self {
        Self::with_evaluator(Evaluator::new(settings))
    }

    /// Create a sampler around a custom evaluator
    pub fn with_evaluator(evaluator: Evaluator) -> Self {
        Self { evaluator }
    }

    /// The evaluator used for every pixel
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Render the graph at the configured resolution
    pub fn generate(&self, graph: &NodeGraph) -> RgbaImage {
        let never = AtomicBool::new(false);
        match self.render(graph, &never) {
            Ok(image) => image,
            Err(SampleError::Cancelled) => RgbaImage::new(0, 0),
        }
    }

    /// Render the graph, giving up between rows once `cancel` is set
    pub fn generate_cancellable(
        &self,
        graph: &NodeGraph,
        cancel: &AtomicBool,
    ) -> Result<RgbaImage, SampleError> {
        self.render(graph, cancel)
    }

    fn render(&self, graph: &NodeGraph, cancel: &AtomicBool) -> Result<RgbaImage, SampleError> {
        let resolution = self.evaluator.settings().resolution;

        let Some(output) = graph.find_node_by_type(OUTPUT_NODE_TYPE).map(|n| n.id) else {
            tracing::warn!("Graph has no '{}' node, rendering error color", OUTPUT_NODE_TYPE);
            return Ok(RgbaImage::from_pixel(resolution, resolution, Rgba(to_rgba8(ERROR_COLOR))));
        };

        let mut image = RgbaImage::new(resolution, resolution);
        let mut failed = 0usize;
        for y in 0..resolution {
            if cancel.load(Ordering::Relaxed) {
                tracing::debug!("Rendering cancelled at row {}", y);
                return Err(SampleError::Cancelled);
            }
            for x in 0..resolution {
                let rgba = self.sample_pixel(graph, output, [x, y], resolution, &mut failed);
                image.put_pixel(x, y, Rgba(rgba));
            }
        }

        if failed > 0 {
            let total = u64::from(resolution).pow(2);
            tracing::warn!("{} of {} pixel(s) failed to evaluate", failed, total);
        }
        Ok(image)
    }

    fn sample_pixel(
        &self,
        graph: &NodeGraph,
        output: NodeId,
        [x, y]: [u32; 2],
        resolution: u32,
        failed: &mut usize,
    ) -> [u8; 4] {
        let uv = [pixel_to_uv(x, resolution), pixel_to_uv(y, resolution)];
        match self.evaluator.evaluate(graph, output, 0, uv) {
            Ok(value) => to_rgba8(value.as_color()),
            Err(err) => {
                if *failed == 0 {
                    tracing::debug!("First failing pixel ({}, {}): {}", x, y, err);
                }
                *failed += 1;
                to_rgba8(ERROR_COLOR)
            }
        }
    }
}

/// Render a graph with default settings at the given resolution
pub fn generate_image(graph: &NodeGraph, resolution: u32) -> RgbaImage {
    ImageSampler::new(EvaluatorSettings::with_resolution(resolution)).generate(graph)
}

/// Clamp a color to `[0, 1]` and quantize it to 8 bits per channel
pub fn to_rgba8(color: [f32; 4]) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8)
}

/// Map a pixel index to `[0, 1]`; a single-pixel image samples at 0
fn pixel_to_uv(index: u32, resolution: u32) -> f32 {
    if resolution <= 1 {
        return 0.0;
    }
    index as f32 / (resolution - 1) as f32
}

/// Image rendering errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    /// The cancel flag was raised mid-render
    #[error("Rendering was cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::texture::create_texture_registry;
    use crate::pin::PinValue;
    use std::sync::Arc;

    const WHITE_PIXEL: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const MAGENTA_PIXEL: Rgba<u8> = Rgba([255, 0, 255, 255]);

    fn graph() -> NodeGraph {
        NodeGraph::new(Arc::new(create_texture_registry()))
    }

    fn set_input(graph: &mut NodeGraph, node: NodeId, pin: usize, value: PinValue) {
        graph.node_mut(node).unwrap().input_mut(pin).unwrap().default_value = value;
    }

    #[test]
    fn test_checkerboard_corners() {
        let mut graph = graph();
        let checker = graph.add_node("Checkerboard", [0.0, 0.0]).unwrap();
        let output = graph.add_node("Texture Output", [200.0, 0.0]).unwrap();
        set_input(&mut graph, checker, 1, PinValue::Float(8.0));
        graph.add_link(checker, 0, output, 0).unwrap();

        let image = generate_image(&graph, 2);
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(*image.get_pixel(0, 0), WHITE_PIXEL);
        assert_eq!(*image.get_pixel(1, 1), WHITE_PIXEL);
    }

    #[test]
    fn test_values_clamp_before_quantizing() {
        let mut graph = graph();
        let add = graph.add_node("Add", [0.0, 0.0]).unwrap();
        let output = graph.add_node("Texture Output", [0.0, 0.0]).unwrap();
        set_input(&mut graph, add, 0, PinValue::Float(2.0));
        set_input(&mut graph, add, 1, PinValue::Float(3.0));
        graph.add_link(add, 0, output, 0).unwrap();

        let image = generate_image(&graph, 1);
        assert_eq!(image.dimensions(), (1, 1));
        assert_eq!(*image.get_pixel(0, 0), WHITE_PIXEL);
    }

    #[test]
    fn test_missing_output_node_is_magenta() {
        let mut graph = graph();
        graph.add_node("Perlin Noise", [0.0, 0.0]).unwrap();
        for resolution in [1, 3, 8] {
            let image = generate_image(&graph, resolution);
            assert_eq!(image.dimensions(), (resolution, resolution));
            assert!(image.pixels().all(|p| *p == MAGENTA_PIXEL));
        }
    }

    #[test]
    fn test_duplicate_link_removal() {
        let mut graph = graph();
        let red = graph.add_node("Solid Color", [0.0, 0.0]).unwrap();
        let blue = graph.add_node("Solid Color", [0.0, 100.0]).unwrap();
        let output = graph.add_node("Texture Output", [200.0, 0.0]).unwrap();
        set_input(&mut graph, red, 0, PinValue::Color([1.0, 0.0, 0.0, 1.0]));
        set_input(&mut graph, blue, 0, PinValue::Color([0.0, 0.0, 1.0, 1.0]));
        let first = graph.add_link(red, 0, output, 0).unwrap();
        graph.add_link(blue, 0, output, 0).unwrap();

        assert_eq!(*generate_image(&graph, 2).get_pixel(1, 0), Rgba([255, 0, 0, 255]));
        graph.remove_link(first);
        assert_eq!(*generate_image(&graph, 2).get_pixel(1, 0), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_failed_pixels_become_magenta() {
        let mut graph = graph();
        let mut previous = graph.add_node("Invert", [0.0, 0.0]).unwrap();
        for _ in 0..4 {
            let next = graph.add_node("Invert", [0.0, 0.0]).unwrap();
            graph.add_link(previous, 0, next, 0).unwrap();
            previous = next;
        }
        let output = graph.add_node("Texture Output", [0.0, 0.0]).unwrap();
        graph.add_link(previous, 0, output, 0).unwrap();

        let sampler = ImageSampler::new(EvaluatorSettings {
            resolution: 2,
            max_depth: 2,
        });
        let image = sampler.generate(&graph);
        assert!(image.pixels().all(|p| *p == MAGENTA_PIXEL));
    }

    #[test]
    fn test_uv_spans_unit_square() {
        let mut graph = graph();
        let gradient = graph.add_node("Gradient", [0.0, 0.0]).unwrap();
        let output = graph.add_node("Texture Output", [0.0, 0.0]).unwrap();
        set_input(&mut graph, gradient, 1, PinValue::Color([0.0, 0.0, 0.0, 1.0]));
        graph.add_link(gradient, 0, output, 0).unwrap();

        let image = generate_image(&graph, 5);
        assert_eq!(image.get_pixel(0, 2).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(2, 2).0, [127, 127, 127, 255]);
        assert_eq!(image.get_pixel(4, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_zero_resolution_is_empty() {
        let mut graph = graph();
        graph.add_node("Texture Output", [0.0, 0.0]).unwrap();
        let image = generate_image(&graph, 0);
        assert_eq!(image.dimensions(), (0, 0));
    }

    #[test]
    fn test_cancellation() {
        let mut graph = graph();
        graph.add_node("Texture Output", [0.0, 0.0]).unwrap();
        let sampler = ImageSampler::new(EvaluatorSettings::with_resolution(4));

        let cancel = AtomicBool::new(true);
        assert!(matches!(
            sampler.generate_cancellable(&graph, &cancel),
            Err(SampleError::Cancelled)
        ));

        cancel.store(false, Ordering::Relaxed);
        let image = sampler.generate_cancellable(&graph, &cancel).unwrap();
        assert!(image.pixels().all(|p| *p == WHITE_PIXEL));
    }

    #[test]
    fn test_quantization() {
        assert_eq!(to_rgba8([0.0, 0.5, 1.0, 2.0]), [0, 127, 255, 255]);
        assert_eq!(to_rgba8([-1.0, 0.999, 0.25, 0.0]), [0, 254, 63, 0]);
    }
}
