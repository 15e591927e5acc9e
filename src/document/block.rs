//! Block-level nodes of a flowing document

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Stable identifier of an anchorable block (chapter or section id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorId(pub String);

impl AnchorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a location fragment such as `#toc-3` or `toc-3`.
    ///
    /// Returns `None` for empty or malformed ids (whitespace inside the id),
    /// which callers treat as a silent no-op.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let id = fragment.trim();
        let id = id.strip_prefix('#').unwrap_or(id);
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return None;
        }
        Some(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fragment form used for location updates
    pub fn to_fragment(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of block element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BlockKind {
    /// Regular paragraph
    #[default]
    Paragraph,
    /// Heading with level (1-6)
    Heading {
        #[serde(default = "default_heading_level")]
        level: u8,
    },
    /// Blank-line separator
    Gap,
}

fn default_heading_level() -> u8 {
    3
}

impl BlockKind {
    /// Get the line height multiplier for this block kind
    pub fn line_height_multiplier(&self) -> f32 {
        match self {
            BlockKind::Paragraph | BlockKind::Gap => 1.0,
            BlockKind::Heading { level } => match level {
                1 => 1.5,
                2 => 1.4,
                3 => 1.3,
                _ => 1.2,
            },
        }
    }

    /// Get the spacing after this block (in line heights)
    pub fn spacing_after(&self) -> f32 {
        match self {
            BlockKind::Paragraph => 0.5,
            BlockKind::Heading { .. } => 0.75,
            BlockKind::Gap => 0.0,
        }
    }

    /// Check if this is a heading
    pub fn is_heading(&self) -> bool {
        matches!(self, BlockKind::Heading { .. })
    }

    /// Check if this is a gap marker
    pub fn is_gap(&self) -> bool {
        matches!(self, BlockKind::Gap)
    }
}

/// One `name="value"` attribute carried over to every rendered copy
pub type Attribute = (String, String);

/// An atomic unit of flowing content.
///
/// Nodes are immutable input to layout. The engine clones them, and splitting
/// produces new nodes rather than editing the source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockNode {
    #[serde(flatten)]
    pub kind: BlockKind,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<AnchorId>,
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub attributes: SmallVec<[Attribute; 2]>,
    /// Forces a paragraph to be placed whole
    #[serde(default, skip_serializing_if = "is_false")]
    pub keep_together: bool,
    /// Set on the tail fragments of a split paragraph
    #[serde(default, skip_serializing_if = "is_false")]
    pub continued: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl BlockNode {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn heading(level: u8, text: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Heading {
                level: level.clamp(1, 6),
            },
            text: text.into(),
            anchor: Some(AnchorId::new(anchor)),
            ..Self::default()
        }
    }

    pub fn gap() -> Self {
        Self {
            kind: BlockKind::Gap,
            ..Self::default()
        }
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(AnchorId::new(anchor));
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Headings and gaps are never split; paragraphs unless pinned.
    pub fn is_splittable(&self) -> bool {
        matches!(self.kind, BlockKind::Paragraph) && !self.keep_together
    }

    /// Clone this node with different text.
    ///
    /// Kind and attributes are preserved. The anchor is dropped so a fragment
    /// never duplicates an identifier; callers reattach it where needed.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            kind: self.kind,
            text: text.into(),
            anchor: None,
            attributes: self.attributes.clone(),
            keep_together: self.keep_together,
            continued: self.continued,
        }
    }
}
