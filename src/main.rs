//! Flow-Pager CLI (for testing purposes only)
//! The main interface is through WASM bindings.

use flow_pager::{BlockNode, Flow, MetricsSurface, Pager, PagerConfig, Typography, Viewport};

fn sample_flow() -> Flow {
    let mut nodes = Vec::new();
    for chapter in 1..=5 {
        nodes.push(BlockNode::heading(
            3,
            format!("Chapter {}", chapter),
            format!("toc-{}", chapter),
        ));
        for para in 0..6 {
            nodes.push(BlockNode::paragraph(format!(
                "Paragraph {} of chapter {} carries enough prose to wrap across several lines \
                 and occasionally spill over the bottom of a page. ",
                para, chapter
            )
            .repeat(3)));
        }
        nodes.push(BlockNode::gap());
    }
    Flow::new(nodes)
}

fn main() {
    println!("Flow-Pager Reading Core");
    println!("=======================");
    println!();

    let viewport = Viewport::new(360.0, 640.0);
    let config = PagerConfig::default();
    let surface = MetricsSurface::for_typography(viewport, &config.typography);
    let mut pager = Pager::new(Some(surface), sample_flow(), viewport, config, 0.0);

    let stats = pager.pagination().stats();
    println!(
        "{} nodes -> {} pages ({} splits, {} probes)",
        stats.nodes,
        pager.page_count(),
        stats.splits,
        stats.probes
    );
    for toc in pager.table_of_contents() {
        if let Some(page) = toc.page {
            println!("  {:<12} page {}", toc.entry.title, page + 1);
        }
    }

    pager.go_to_anchor("#toc-3");
    let (current, total) = pager.indicator();
    println!();
    println!("after #toc-3: {} / {}", current, total);

    pager.set_typography(Typography {
        font_size_px: 24.0,
        ..Typography::default()
    });
    println!("at 24px: {} pages", pager.page_count());
    println!();
    println!("For the browser build: wasm-pack build --target web");
}
