//! Core layout engine: flows block nodes into viewport-sized pages

use crate::document::{BlockNode, Flow};
use crate::layout::pagination::{LayoutStats, Page, Pagination};
use crate::layout::split::{split_to_fit, Split};
use crate::layout::surface::MeasureSurface;
use std::collections::VecDeque;

/// Surface wrapper counting height reads
struct CountingSurface<'a, S: MeasureSurface + ?Sized> {
    inner: &'a mut S,
    probes: usize,
}

impl<S: MeasureSurface + ?Sized> MeasureSurface for CountingSurface<'_, S> {
    fn clear(&mut self) {
        self.inner.clear();
    }

    fn push(&mut self, node: &BlockNode) {
        self.inner.push(node);
    }

    fn pop(&mut self) {
        self.inner.pop();
    }

    fn content_height(&mut self) -> f32 {
        self.probes += 1;
        self.inner.content_height()
    }
}

/// Page under construction, mirrored node for node in the surface
struct PageBuilder {
    pages: Vec<Page>,
    current: Page,
    forced_overflows: usize,
}

impl PageBuilder {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Page::new(0),
            forced_overflows: 0,
        }
    }

    fn place<S: MeasureSurface + ?Sized>(&mut self, surface: &mut S, node: BlockNode) {
        surface.push(&node);
        self.current.nodes.push(node);
    }

    /// Close the current page and start an empty one
    fn finish_page<S: MeasureSurface + ?Sized>(&mut self, surface: &mut S) {
        let next = Page::new(self.pages.len() + 1);
        let done = std::mem::replace(&mut self.current, next);
        self.pages.push(done);
        surface.clear();
    }

    fn into_pages(mut self) -> (Vec<Page>, usize) {
        if !self.current.is_empty() {
            self.pages.push(self.current);
        }
        (self.pages, self.forced_overflows)
    }
}

/// Full, non-incremental paginator.
///
/// Each pass discards previous output and rebuilds pages and the anchor index
/// together from the source flow.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutEngine;

impl LayoutEngine {
    pub fn new() -> Self {
        Self
    }

    /// Lay out `flow` into pages no taller than `viewport_height`.
    ///
    /// Never fails. A node that cannot fit even on an empty page is placed
    /// alone on an overfull page rather than dropped.
    pub fn layout<S: MeasureSurface + ?Sized>(
        &self,
        flow: &Flow,
        surface: &mut S,
        viewport_height: f32,
    ) -> Pagination {
        let mut surface = CountingSurface {
            inner: surface,
            probes: 0,
        };
        surface.clear();

        let mut queue: VecDeque<BlockNode> = flow.nodes().iter().cloned().collect();
        let mut builder = PageBuilder::new();
        let mut splits = 0;

        while let Some(node) = queue.pop_front() {
            surface.push(&node);
            if surface.content_height() <= viewport_height {
                builder.current.nodes.push(node);
                continue;
            }
            surface.pop();

            if node.is_splittable() {
                if let Some(Split { fit, rest }) = split_to_fit(&node, &mut surface, viewport_height)
                {
                    splits += 1;
                    builder.place(&mut surface, fit);
                    builder.finish_page(&mut surface);
                    queue.push_front(rest);
                    continue;
                }
            }

            if !builder.current.is_empty() {
                // First node of a fresh page, measured (and split) again there
                builder.finish_page(&mut surface);
                queue.push_front(node);
                continue;
            }

            log::warn!(
                "block overflows an empty page, placing it alone [page={} text_len={}]",
                builder.pages.len(),
                node.text.len()
            );
            builder.forced_overflows += 1;
            builder.place(&mut surface, node);
            builder.finish_page(&mut surface);
        }

        let probes = surface.probes;
        surface.clear();

        let (pages, forced_overflows) = builder.into_pages();
        let stats = LayoutStats {
            nodes: flow.len(),
            probes,
            splits,
            forced_overflows,
        };
        let pagination = Pagination::from_pages(pages, viewport_height, stats);

        log::debug!(
            "layout pass [nodes={} pages={} probes={} splits={} forced={} height={}]",
            stats.nodes,
            pagination.page_count(),
            stats.probes,
            stats.splits,
            stats.forced_overflows,
            viewport_height
        );

        pagination
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::AnchorId;
    use crate::layout::font::FontMetrics;
    use crate::layout::surface::MetricsSurface;

    /// 10 chars per line, 10px per line, 5px paragraph spacing
    fn surface() -> MetricsSurface {
        MetricsSurface::new(80.0, FontMetrics::monospace(8.0, 10.0))
    }

    fn page_heights(pagination: &Pagination) -> Vec<f32> {
        let mut probe = surface();
        pagination
            .pages()
            .iter()
            .map(|page| {
                probe.clear();
                for node in &page.nodes {
                    probe.push(node);
                }
                probe.content_height()
            })
            .collect()
    }

    #[test]
    fn test_empty_flow_yields_one_empty_page() {
        let pagination = LayoutEngine::new().layout(&Flow::default(), &mut surface(), 100.0);
        assert_eq!(pagination.page_count(), 1);
        assert!(pagination.pages()[0].is_empty());
    }

    #[test]
    fn test_no_split_needed() {
        let flow = Flow::new(vec![
            BlockNode::paragraph("one"),
            BlockNode::paragraph("two"),
            BlockNode::paragraph("three"),
        ]);
        let pagination = LayoutEngine::new().layout(&flow, &mut surface(), 500.0);

        assert_eq!(pagination.page_count(), 1);
        assert_eq!(pagination.pages()[0].nodes.len(), 3);
        assert_eq!(pagination.stats().splits, 0);
    }

    #[test]
    fn test_forced_split_of_long_paragraph() {
        // 500 chars = 50 lines = 505px alone; 305px holds 30 lines
        let text: String = ('a'..='z').cycle().take(500).collect();
        let flow = Flow::new(vec![BlockNode::paragraph(text.clone())]);
        let pagination = LayoutEngine::new().layout(&flow, &mut surface(), 305.0);

        assert_eq!(pagination.page_count(), 2);
        let first = &pagination.pages()[0].nodes;
        let second = &pagination.pages()[1].nodes;
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(first[0].text, &text[..300]);
        assert_eq!(second[0].text, &text[300..]);
        assert!(second[0].continued);
        assert_eq!(format!("{}{}", first[0].text, second[0].text), text);
    }

    #[test]
    fn test_rest_fragment_is_split_again() {
        let text: String = ('a'..='z').cycle().take(1000).collect();
        let flow = Flow::new(vec![BlockNode::paragraph(text.clone())]);
        let pagination = LayoutEngine::new().layout(&flow, &mut surface(), 105.0);

        // 10 lines per page, 100 lines of text
        assert_eq!(pagination.page_count(), 10);
        let joined: String = pagination.pages().iter().map(Page::text).collect();
        assert_eq!(joined, text);
        assert!(page_heights(&pagination).iter().all(|h| *h <= 105.0));
    }

    #[test]
    fn test_heading_moves_to_next_page_whole() {
        let flow = Flow::new(vec![
            BlockNode::paragraph("x".repeat(30)),      // 35px
            BlockNode::heading(3, "chapter", "toc-1"), // 13 + 7.5 = 20.5px
        ]);
        let pagination = LayoutEngine::new().layout(&flow, &mut surface(), 50.0);

        assert_eq!(pagination.page_count(), 2);
        assert_eq!(pagination.pages()[1].nodes[0].text, "chapter");
        assert_eq!(
            pagination.anchors().page_of(&AnchorId::new("toc-1")),
            Some(1)
        );
    }

    #[test]
    fn test_oversized_heading_gets_own_page() {
        let flow = Flow::new(vec![
            BlockNode::heading(1, "a very long heading title indeed", "toc-1"),
            BlockNode::paragraph("after"),
        ]);
        let pagination = LayoutEngine::new().layout(&flow, &mut surface(), 20.0);

        assert_eq!(pagination.page_count(), 2);
        assert_eq!(pagination.pages()[0].nodes.len(), 1);
        assert!(pagination.pages()[0].nodes[0].kind.is_heading());
        assert_eq!(pagination.pages()[1].text(), "after");
        assert_eq!(pagination.stats().forced_overflows, 1);
    }

    #[test]
    fn test_heading_after_content_starts_page_even_if_oversized() {
        let flow = Flow::new(vec![
            BlockNode::paragraph("intro"),
            BlockNode::heading(1, "a very long heading title indeed", "toc-1"),
        ]);
        let pagination = LayoutEngine::new().layout(&flow, &mut surface(), 20.0);

        assert_eq!(pagination.page_count(), 2);
        assert_eq!(pagination.pages()[0].text(), "intro");
        assert!(pagination.pages()[1].nodes[0].kind.is_heading());
        assert_eq!(pagination.stats().forced_overflows, 1);
    }

    #[test]
    fn test_unsplittable_paragraph_on_filled_page_retries_on_fresh_page() {
        // After the first paragraph only 5px remain, too little for one line
        let flow = Flow::new(vec![
            BlockNode::paragraph("x".repeat(30)),
            BlockNode::paragraph("y".repeat(40)),
        ]);
        let pagination = LayoutEngine::new().layout(&flow, &mut surface(), 40.0);

        assert_eq!(pagination.pages()[0].text(), "x".repeat(30));
        assert_eq!(pagination.pages()[1].text(), "y".repeat(30));
        assert_eq!(pagination.pages()[2].text(), "y".repeat(10));
        assert!(page_heights(&pagination).iter().all(|h| *h <= 40.0));
    }

    #[test]
    fn test_paragraph_that_cannot_split_is_forced_whole() {
        let flow = Flow::new(vec![BlockNode::paragraph("z".repeat(50))]);
        let pagination = LayoutEngine::new().layout(&flow, &mut surface(), 8.0);

        assert_eq!(pagination.page_count(), 1);
        assert_eq!(pagination.pages()[0].text(), "z".repeat(50));
        assert_eq!(pagination.stats().forced_overflows, 1);
    }

    #[test]
    fn test_source_flow_is_untouched() {
        let flow = Flow::new(vec![BlockNode::paragraph("w".repeat(200)).with_anchor("p-1")]);
        let before = flow.nodes().to_vec();
        let _ = LayoutEngine::new().layout(&flow, &mut surface(), 55.0);
        assert_eq!(flow.nodes(), &before[..]);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let flow = Flow::new(vec![
            BlockNode::heading(2, "卷上", "toc-1"),
            BlockNode::paragraph("天地玄黄".repeat(40)),
            BlockNode::gap(),
            BlockNode::heading(2, "卷中", "toc-2"),
            BlockNode::paragraph("宇宙洪荒".repeat(25)),
        ]);
        let mut surface = surface();
        let first = LayoutEngine::new().layout(&flow, &mut surface, 120.0);
        let second = LayoutEngine::new().layout(&flow, &mut surface, 120.0);

        assert_eq!(first.page_count(), second.page_count());
        assert_eq!(first.anchors(), second.anchors());
        assert_eq!(first.pages(), second.pages());
    }

    #[test]
    fn test_probe_count_is_logarithmic() {
        let text = "q".repeat(4096);
        let flow = Flow::new(vec![BlockNode::paragraph(text)]);
        let pagination = LayoutEngine::new().layout(&flow, &mut surface(), 1005.0);

        // 1000 chars per page: 4 splits, then the 96 char tail fits
        assert_eq!(pagination.page_count(), 5);
        assert_eq!(pagination.stats().splits, 4);
        // One append probe plus at most 13 search probes per page
        assert!(pagination.stats().probes <= 5 * 14);
    }
}
