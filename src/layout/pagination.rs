//! Pages and the anchor index produced by a layout pass

use crate::document::{AnchorId, BlockNode};
use rustc_hash::FxHashMap;

/// A bounded-height run of block copies
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    /// Page index (0-based)
    pub index: usize,
    /// Node copies, possibly ending or starting with a split fragment
    pub nodes: Vec<BlockNode>,
}

impl Page {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            nodes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Concatenated text of the page
    pub fn text(&self) -> String {
        self.nodes.iter().map(|n| n.text.as_str()).collect()
    }

    /// Check if this page holds the node carrying `anchor`
    pub fn contains_anchor(&self, anchor: &AnchorId) -> bool {
        self.nodes.iter().any(|n| n.anchor.as_ref() == Some(anchor))
    }
}

/// Identifier to page lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorIndex {
    pages: FxHashMap<AnchorId, usize>,
}

impl AnchorIndex {
    /// Scan every page for anchored node copies
    pub fn build(pages: &[Page]) -> Self {
        let mut index = FxHashMap::default();
        for page in pages {
            for anchor in page.nodes.iter().filter_map(|n| n.anchor.as_ref()) {
                // First occurrence wins if the source repeats an id
                index.entry(anchor.clone()).or_insert(page.index);
            }
        }
        Self { pages: index }
    }

    pub fn page_of(&self, anchor: &AnchorId) -> Option<usize> {
        self.pages.get(anchor).copied()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AnchorId, usize)> + '_ {
        self.pages.iter().map(|(a, p)| (a, *p))
    }
}

/// Counters recorded during one layout pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    pub nodes: usize,
    /// Height reads on the surface
    pub probes: usize,
    pub splits: usize,
    /// Pages holding a node that overflows the viewport on its own
    pub forced_overflows: usize,
}

/// Result of a layout pass: pages and anchor index, always built together
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pages: Vec<Page>,
    anchors: AnchorIndex,
    viewport_height: f32,
    stats: LayoutStats,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::from_pages(Vec::new(), 0.0, LayoutStats::default())
    }
}

impl Pagination {
    /// Assemble pages and rebuild the anchor index.
    ///
    /// An empty page list becomes a single empty page.
    pub fn from_pages(mut pages: Vec<Page>, viewport_height: f32, stats: LayoutStats) -> Self {
        if pages.is_empty() {
            pages.push(Page::new(0));
        }
        for (index, page) in pages.iter_mut().enumerate() {
            page.index = index;
        }
        let anchors = AnchorIndex::build(&pages);
        Self {
            pages,
            anchors,
            viewport_height,
            stats,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Total page count (never zero)
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn anchors(&self) -> &AnchorIndex {
        &self.anchors
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn stats(&self) -> LayoutStats {
        self.stats
    }
}
