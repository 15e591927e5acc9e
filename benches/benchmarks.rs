//! Benchmarks for the pagination core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flow_pager::layout::{split_to_fit, FontMetrics, LineBreaker};
use flow_pager::{
    BlockNode, DisplayList, Flow, LayoutEngine, MetricsSurface, Pager, PagerConfig, Viewport,
};

fn default_viewport() -> Viewport {
    Viewport::new(360.0, 640.0)
}

fn surface() -> MetricsSurface {
    MetricsSurface::new(360.0, FontMetrics::monospace(9.0, 18.0))
}

fn chapter_flow(chapters: usize) -> Flow {
    let mut nodes = Vec::new();
    for chapter in 0..chapters {
        nodes.push(BlockNode::heading(
            3,
            format!("Chapter {}", chapter),
            format!("toc-{}", chapter),
        ));
        for para in 0..12 {
            nodes.push(BlockNode::paragraph(
                format!(
                    "Paragraph {} contains enough text to span multiple lines and test the line breaking algorithm. ",
                    para
                )
                .repeat(1 + para % 4),
            ));
        }
    }
    Flow::new(nodes)
}

fn bench_break_lines(c: &mut Criterion) {
    c.bench_function("break_lines_paragraph", |b| {
        let metrics = FontMetrics::monospace(9.0, 18.0);
        let breaker = LineBreaker::new();
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);

        b.iter(|| {
            black_box(breaker.break_lines(black_box(&text), 360.0, &metrics, 1.0));
        });
    });
}

fn bench_split_long_paragraph(c: &mut Criterion) {
    c.bench_function("split_long_paragraph", |b| {
        let mut surface = surface();
        let node = BlockNode::paragraph("word ".repeat(2000));

        b.iter(|| {
            black_box(split_to_fit(&node, &mut surface, 640.0));
        });
    });
}

fn bench_layout_small(c: &mut Criterion) {
    c.bench_function("layout_small_flow", |b| {
        let flow = chapter_flow(1);
        let engine = LayoutEngine::new();
        let mut surface = surface();

        b.iter(|| {
            black_box(engine.layout(&flow, &mut surface, 640.0));
        });
    });
}

fn bench_layout_medium(c: &mut Criterion) {
    c.bench_function("layout_medium_flow", |b| {
        let flow = chapter_flow(20);
        let engine = LayoutEngine::new();
        let mut surface = surface();

        b.iter(|| {
            black_box(engine.layout(&flow, &mut surface, 640.0));
        });
    });
}

fn bench_build_display_list(c: &mut Criterion) {
    c.bench_function("build_display_list", |b| {
        let pager = Pager::new(
            Some(surface()),
            chapter_flow(5),
            default_viewport(),
            PagerConfig::default(),
            0.0,
        );

        b.iter(|| {
            black_box(DisplayList::build(pager.pagination(), pager.version()).to_json());
        });
    });
}

fn bench_navigation_cycle(c: &mut Criterion) {
    c.bench_function("navigation_cycle", |b| {
        let mut pager = Pager::new(
            Some(surface()),
            chapter_flow(5),
            default_viewport(),
            PagerConfig::default(),
            0.0,
        );

        b.iter(|| {
            pager.next();
            pager.go_to_anchor(black_box("#toc-3"));
            pager.previous();
            black_box(pager.take_patches());
        });
    });
}

criterion_group!(
    benches,
    bench_break_lines,
    bench_split_long_paragraph,
    bench_layout_small,
    bench_layout_medium,
    bench_build_display_list,
    bench_navigation_cycle,
);

criterion_main!(benches);
