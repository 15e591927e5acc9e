//! Property-based invariant tests for measured pagination.
//!
//! For any flow and viewport:
//!
//! 1. Layout always yields at least one page.
//! 2. Pages joined back together reproduce the flow's text in order.
//! 3. Only a page holding a single node that cannot be split exceeds the
//!    viewport height.
//! 4. Every page but the last is full: its first follower would overflow it.
//! 5. Every anchor in the flow resolves to the page that contains it.
//! 6. Laying out the same flow twice gives the same pages.
//! 7. Navigation keeps the current page inside `0..page_count`.

use flow_pager::layout::{split_to_fit, FontMetrics};
use flow_pager::{
    AnchorId, BlockNode, Flow, LayoutEngine, MeasureSurface, MetricsSurface, Page, Pager,
    PagerConfig, Pagination, TapZone, Viewport,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn surface(width: f32) -> MetricsSurface {
    MetricsSurface::new(width, FontMetrics::monospace(8.0, 10.0))
}

fn node_strategy() -> impl Strategy<Value = BlockNode> {
    prop_oneof![
        6 => "[a-z ]{0,160}".prop_map(|text| BlockNode::paragraph(text)),
        2 => ("[a-z]{1,12}", 1u8..=4).prop_map(|(title, level)| BlockNode::heading(level, title, "")),
        1 => "[a-z ]{0,40}".prop_map(|text| {
            let mut node = BlockNode::paragraph(text);
            node.keep_together = true;
            node
        }),
        1 => Just(BlockNode::gap()),
    ]
}

/// Flows with unique anchors on every heading
fn flow_strategy() -> impl Strategy<Value = Flow> {
    prop::collection::vec(node_strategy(), 0..40).prop_map(|nodes| {
        let nodes = nodes
            .into_iter()
            .enumerate()
            .map(|(i, node)| {
                if node.kind.is_heading() {
                    node.with_anchor(format!("a-{}", i))
                } else {
                    node
                }
            })
            .collect();
        Flow::new(nodes)
    })
}

fn layout(flow: &Flow, width: f32, height: f32) -> Pagination {
    LayoutEngine::new().layout(flow, &mut surface(width), height)
}

/// Merge continued fragments back into their source nodes
fn rejoined_texts(pagination: &Pagination) -> Vec<String> {
    let mut texts: Vec<String> = Vec::new();
    for node in pagination.pages().iter().flat_map(|page| &page.nodes) {
        match texts.last_mut() {
            Some(last) if node.continued => last.push_str(&node.text),
            _ => texts.push(node.text.clone()),
        }
    }
    texts
}

/// Stacked height of `nodes` on a fresh surface
fn stacked_height<'a>(width: f32, nodes: impl IntoIterator<Item = &'a BlockNode>) -> f32 {
    let mut probe = surface(width);
    for node in nodes {
        probe.push(node);
    }
    probe.content_height()
}

/// A lone node the engine had to place whole on an overfull page
fn is_forced(page: &Page, width: f32, height: f32) -> bool {
    match page.nodes.as_slice() {
        [node] => {
            !node.is_splittable() || split_to_fit(node, &mut surface(width), height).is_none()
        }
        _ => false,
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Page count, coverage and height bound
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_covers_flow_within_height(
        flow in flow_strategy(),
        width in 40.0f32..300.0,
        height in 20.0f32..400.0,
    ) {
        let pagination = layout(&flow, width, height);
        prop_assert!(pagination.page_count() >= 1);

        let source: Vec<String> = flow.nodes().iter().map(|n| n.text.clone()).collect();
        prop_assert_eq!(rejoined_texts(&pagination), source);

        for page in pagination.pages() {
            let measured = stacked_height(width, &page.nodes);
            prop_assert!(
                measured <= height || is_forced(page, width, height),
                "page {} measures {} > {}",
                page.index,
                measured,
                height
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Every page but the last is full
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pages_before_the_last_are_full(
        flow in flow_strategy(),
        width in 40.0f32..300.0,
        height in 20.0f32..400.0,
    ) {
        let pagination = layout(&flow, width, height);
        for pair in pagination.pages().windows(2) {
            let (page, next) = (&pair[0], &pair[1]);
            let follower = &next.nodes[0];
            let measured = stacked_height(width, page.nodes.iter().chain([follower]));
            prop_assert!(
                measured > height,
                "page {} still had room for the next node ({} <= {})",
                page.index,
                measured,
                height
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Anchor completeness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_anchor_resolves_to_its_page(
        flow in flow_strategy(),
        height in 20.0f32..400.0,
    ) {
        let pagination = layout(&flow, 120.0, height);
        let anchors: Vec<AnchorId> = flow.anchors().cloned().collect();
        prop_assert_eq!(pagination.anchors().len(), anchors.len());

        for anchor in &anchors {
            let page = pagination.anchors().page_of(anchor);
            prop_assert!(page.is_some(), "anchor {} missing", anchor);
            let page = page.unwrap_or_default();
            prop_assert!(pagination.pages()[page].contains_anchor(anchor));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_idempotent(flow in flow_strategy(), height in 20.0f32..400.0) {
        let engine = LayoutEngine::new();
        let mut surface = surface(100.0);
        let first = engine.layout(&flow, &mut surface, height);
        let second = engine.layout(&flow, &mut surface, height);
        prop_assert_eq!(first.pages(), second.pages());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Navigation clamp
// ═════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
enum Step {
    Next,
    Previous,
    GoTo(usize),
    Tap(bool),
    Drag(f32),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Next),
        Just(Step::Previous),
        (0usize..100).prop_map(Step::GoTo),
        any::<bool>().prop_map(Step::Tap),
        (-200.0f32..200.0).prop_map(Step::Drag),
    ]
}

proptest! {
    #[test]
    fn navigation_stays_in_range(
        flow in flow_strategy(),
        steps in prop::collection::vec(step_strategy(), 0..60),
    ) {
        let viewport = Viewport::new(120.0, 90.0);
        let mut pager = Pager::new(
            Some(surface(120.0)),
            flow,
            viewport,
            PagerConfig::default(),
            0.0,
        );
        let total = pager.page_count();

        for step in steps {
            match step {
                Step::Next => pager.next(),
                Step::Previous => pager.previous(),
                Step::GoTo(index) => pager.go_to(index, true),
                Step::Tap(forward) => pager.tap(if forward { TapZone::Next } else { TapZone::Previous }),
                Step::Drag(delta) => {
                    pager.pointer_down(60.0);
                    pager.pointer_move(60.0 + delta);
                    pager.pointer_up(Some(60.0 + delta));
                }
            }
            prop_assert!(pager.current_page() < total);
            let (current, shown_total) = pager.indicator();
            prop_assert_eq!(current, pager.current_page() + 1);
            prop_assert_eq!(shown_total, total);
        }
    }
}
