//! Document model: the read-only flow of block nodes

mod block;

pub use block::{AnchorId, Attribute, BlockKind, BlockNode};

use serde::{Deserialize, Serialize};

/// Entry of the table of contents built from anchored headings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocEntry {
    pub anchor: AnchorId,
    pub title: String,
    pub level: u8,
}

/// Ordered block sequence as delivered by the content pipeline.
///
/// The flow is source material only. Layout works on clones.
#[derive(Debug, Clone, Default)]
pub struct Flow {
    nodes: Vec<BlockNode>,
}

impl Flow {
    pub fn new(nodes: Vec<BlockNode>) -> Self {
        Self { nodes }
    }

    /// Parse a JSON array of block descriptors
    pub fn from_json(json: &str) -> Result<Self, crate::PagerError> {
        let nodes: Vec<BlockNode> =
            serde_json::from_str(json).map_err(|e| crate::PagerError::Blocks(e.to_string()))?;
        Ok(Self::new(nodes))
    }

    pub fn nodes(&self) -> &[BlockNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every identifier present in the flow, in document order
    pub fn anchors(&self) -> impl Iterator<Item = &AnchorId> + '_ {
        self.nodes.iter().filter_map(|n| n.anchor.as_ref())
    }

    /// Concatenated text of all nodes
    pub fn text(&self) -> String {
        self.nodes.iter().map(|n| n.text.as_str()).collect()
    }

    /// Headings carrying an anchor, in document order
    pub fn table_of_contents(&self) -> Vec<TocEntry> {
        self.nodes
            .iter()
            .filter_map(|node| match (node.kind, &node.anchor) {
                (BlockKind::Heading { level }, Some(anchor)) => Some(TocEntry {
                    anchor: anchor.clone(),
                    title: node.text.trim().to_string(),
                    level,
                }),
                _ => None,
            })
            .collect()
    }
}

impl From<Vec<BlockNode>> for Flow {
    fn from(nodes: Vec<BlockNode>) -> Self {
        Self::new(nodes)
    }
}
