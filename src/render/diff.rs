//! Patch protocol from the pager to the rendering host

use crate::document::AnchorId;
use crate::input::PagingMode;
use serde::Serialize;

/// A single patch operation for the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderPatch {
    /// Every page was rebuilt; the host re-renders them from `Pager::pages`
    #[serde(rename_all = "camelCase")]
    PagesRebuilt { total: usize },
    /// Move the page track to `-page * 100% + drag_px`.
    ///
    /// With `animate` false the transition is suppressed for this update only.
    #[serde(rename_all = "camelCase")]
    Transform {
        page: usize,
        offset_percent: f32,
        drag_px: f32,
        animate: bool,
    },
    /// Page indicator, 1-based
    #[serde(rename_all = "camelCase")]
    Indicator { current: usize, total: usize },
    /// Toggle the transient highlight of an anchored element
    #[serde(rename_all = "camelCase")]
    Highlight { anchor: AnchorId, active: bool },
    /// Replace the location fragment without adding a history entry
    #[serde(rename_all = "camelCase")]
    ReplaceFragment { fragment: String },
    /// Switch the visual class driving page turns
    #[serde(rename_all = "camelCase")]
    ModeChanged { mode: PagingMode },
}

impl RenderPatch {
    /// Transform bringing `page` into view, shifted by an in-progress drag
    pub fn transform(page: usize, drag_px: f32, animate: bool) -> Self {
        RenderPatch::Transform {
            page,
            offset_percent: 0.0 - page as f32 * 100.0,
            drag_px,
            animate,
        }
    }
}

/// Batch of patches accumulated since the host last drained them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderDiff {
    /// Layout generation the patches refer to
    pub version: u64,
    pub patches: Vec<RenderPatch>,
}

impl RenderDiff {
    /// Create empty diff
    pub fn new(version: u64) -> Self {
        Self {
            version,
            patches: Vec::new(),
        }
    }

    /// Add a patch
    pub fn add_patch(&mut self, patch: RenderPatch) {
        self.patches.push(patch);
    }

    /// Check if there are any patches
    pub fn has_patches(&self) -> bool {
        !self.patches.is_empty()
    }

    /// Get patch count
    pub fn patch_count(&self) -> usize {
        self.patches.len()
    }

    /// Drain the batch, leaving an empty one at the same version
    pub fn take(&mut self) -> RenderDiff {
        let version = self.version;
        std::mem::replace(self, RenderDiff::new(version))
    }

    /// Latest indicator in the batch, if any
    pub fn last_indicator(&self) -> Option<(usize, usize)> {
        self.patches.iter().rev().find_map(|p| match p {
            RenderPatch::Indicator { current, total } => Some((*current, *total)),
            _ => None,
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::warn!("failed to serialize patch batch: {}", e);
            String::from("{\"version\":0,\"patches\":[]}")
        })
    }
}
