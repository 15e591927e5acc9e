//! Line breaking algorithm

use crate::document::{BlockKind, BlockNode};
use crate::layout::font::FontMetrics;
use std::ops::Range;
use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

/// Height of a gap marker, in line heights
pub const GAP_LINES: f32 = 0.6;

/// Layout result for one block
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLayout {
    /// Byte range of each wrapped line
    pub lines: Vec<Range<usize>>,
    /// Total height including spacing after the block
    pub height: f32,
}

impl BlockLayout {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Greedy line breaker over grapheme clusters
#[derive(Debug, Default, Clone, Copy)]
pub struct LineBreaker;

impl LineBreaker {
    pub fn new() -> Self {
        Self
    }

    /// Layout a block node into wrapped lines and compute its height
    pub fn layout_block(
        &self,
        node: &BlockNode,
        max_width: f32,
        metrics: &FontMetrics,
    ) -> BlockLayout {
        if node.kind == BlockKind::Gap {
            return BlockLayout {
                lines: Vec::new(),
                height: metrics.line_height * GAP_LINES,
            };
        }

        let scale = node.kind.line_height_multiplier();
        let lines = self.break_lines(&node.text, max_width, metrics, scale);
        let line_height = metrics.line_height * scale;
        let height = lines.len() as f32 * line_height
            + node.kind.spacing_after() * metrics.line_height;

        BlockLayout { lines, height }
    }

    /// Break text into lines no wider than `max_width`.
    ///
    /// Breaks only at UAX #14 opportunities unless a single word is wider than
    /// the line, in which case it is broken at a grapheme boundary. Trailing
    /// whitespace hangs past the edge. An empty text still occupies one line.
    pub fn break_lines(
        &self,
        text: &str,
        max_width: f32,
        metrics: &FontMetrics,
        scale: f32,
    ) -> Vec<Range<usize>> {
        let mut lines = Vec::new();
        let opportunities: Vec<(usize, BreakOpportunity)> = linebreaks(text).collect();
        let mut next_op = 0;

        let mut line_start: usize = 0;
        let mut x: f32 = 0.0;
        let mut last_break: Option<(usize, f32)> = None;

        for (byte_idx, grapheme) in text.grapheme_indices(true) {
            // Opportunities inside the previous cluster snap to this boundary
            while next_op < opportunities.len() && opportunities[next_op].0 <= byte_idx {
                let (pos, op) = opportunities[next_op];
                next_op += 1;
                if pos <= line_start {
                    continue;
                }
                match op {
                    BreakOpportunity::Mandatory => {
                        lines.push(line_start..byte_idx);
                        line_start = byte_idx;
                        x = 0.0;
                        last_break = None;
                    }
                    BreakOpportunity::Allowed => last_break = Some((byte_idx, x)),
                }
            }

            let is_space = grapheme.chars().all(char::is_whitespace);
            let cluster_width = if grapheme.chars().all(char::is_control) {
                0.0
            } else if grapheme == "\t" {
                metrics.default_width * 4.0 * scale
            } else {
                grapheme.chars().map(|c| metrics.width(c)).sum::<f32>() * scale
            };

            while !is_space && x + cluster_width > max_width && byte_idx > line_start {
                match last_break.take() {
                    Some((break_offset, break_x)) if break_offset > line_start => {
                        lines.push(line_start..break_offset);
                        line_start = break_offset;
                        x -= break_x;
                    }
                    _ => {
                        // Emergency break at current position
                        lines.push(line_start..byte_idx);
                        line_start = byte_idx;
                        x = 0.0;
                    }
                }
            }

            x += cluster_width;
        }

        if line_start < text.len() || lines.is_empty() {
            lines.push(line_start..text.len());
        }

        lines
    }
}
