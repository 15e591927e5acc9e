//! Measurement surfaces: the live container a page is built in

use crate::document::BlockNode;
use crate::layout::font::{FontMetrics, Typography};
use crate::layout::line_break::LineBreaker;
use serde::{Deserialize, Serialize};

/// Size of the visible reading area in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A container whose rendered content height can be read back after
/// every mutation.
///
/// Each `content_height` call may force a synchronous reflow on the host, so
/// callers keep the number of reads low.
pub trait MeasureSurface {
    /// Remove every node from the container
    fn clear(&mut self);

    /// Append a rendered copy of `node`
    fn push(&mut self, node: &BlockNode);

    /// Remove the most recently appended node
    fn pop(&mut self);

    /// Rendered height of everything currently in the container
    fn content_height(&mut self) -> f32;

    /// The viewport changed size
    fn set_viewport(&mut self, _viewport: Viewport) {}

    /// Font size or family changed
    fn set_typography(&mut self, _typography: &Typography) {}
}

impl<S: MeasureSurface + ?Sized> MeasureSurface for Box<S> {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn push(&mut self, node: &BlockNode) {
        (**self).push(node)
    }

    fn pop(&mut self) {
        (**self).pop()
    }

    fn content_height(&mut self) -> f32 {
        (**self).content_height()
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        (**self).set_viewport(viewport)
    }

    fn set_typography(&mut self, typography: &Typography) {
        (**self).set_typography(typography)
    }
}

/// Native surface that measures blocks with font metrics and the line breaker
#[derive(Debug, Clone)]
pub struct MetricsSurface {
    content_width: f32,
    metrics: FontMetrics,
    breaker: LineBreaker,
    /// Height of each stacked block
    stack: Vec<f32>,
}

impl MetricsSurface {
    pub fn new(content_width: f32, metrics: FontMetrics) -> Self {
        Self {
            content_width,
            metrics,
            breaker: LineBreaker::new(),
            stack: Vec::new(),
        }
    }

    /// Surface sized to a viewport with metrics derived from a typography
    pub fn for_typography(viewport: Viewport, typography: &Typography) -> Self {
        Self::new(viewport.width, FontMetrics::for_typography(typography))
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    /// Number of blocks currently stacked
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Height of a single block rendered alone
    pub fn block_height(&self, node: &BlockNode) -> f32 {
        self.breaker
            .layout_block(node, self.content_width, &self.metrics)
            .height
    }
}

impl MeasureSurface for MetricsSurface {
    fn clear(&mut self) {
        self.stack.clear();
    }

    fn push(&mut self, node: &BlockNode) {
        let height = self.block_height(node);
        self.stack.push(height);
    }

    fn pop(&mut self) {
        self.stack.pop();
    }

    fn content_height(&mut self) -> f32 {
        self.stack.iter().sum()
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.content_width = viewport.width;
    }

    fn set_typography(&mut self, typography: &Typography) {
        self.metrics = FontMetrics::for_typography(typography);
    }
}
