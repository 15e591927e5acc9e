//! Page index tracking and the transforms that bring a page into view

use crate::document::AnchorId;
use crate::layout::AnchorIndex;
use crate::render::{RenderDiff, RenderPatch};

/// How long an anchor jump keeps its target highlighted
pub const DEFAULT_HIGHLIGHT_MS: f64 = 1200.0;

/// Highlight waiting for its timer to run out
#[derive(Debug, Clone, PartialEq)]
pub struct PendingHighlight {
    pub anchor: AnchorId,
    pub expires_at_ms: f64,
}

/// Current/total page state. `current` is always a valid index.
#[derive(Debug, Clone)]
pub struct Transport {
    current: usize,
    total: usize,
    highlight_ms: f64,
    highlight: Option<PendingHighlight>,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT_MS)
    }
}

impl Transport {
    pub fn new(highlight_ms: f64) -> Self {
        Self {
            current: 0,
            total: 1,
            highlight_ms,
            highlight: None,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Page indicator pair: 1-based current page and total
    pub fn indicator(&self) -> (usize, usize) {
        (self.current + 1, self.total)
    }

    pub fn highlight(&self) -> Option<&PendingHighlight> {
        self.highlight.as_ref()
    }

    /// Adopt a fresh layout: back to page 0 with a snap, no slide
    pub fn reset(&mut self, total: usize, out: &mut RenderDiff) {
        self.total = total.max(1);
        self.end_highlight(out);
        self.go_to(0, false, out);
    }

    /// Clamp `index` into range, make it current and move the track there
    pub fn go_to(&mut self, index: usize, animate: bool, out: &mut RenderDiff) -> usize {
        self.current = index.min(self.total - 1);
        out.add_patch(RenderPatch::transform(self.current, 0.0, animate));
        self.push_indicator(out);
        self.current
    }

    pub fn next(&mut self, out: &mut RenderDiff) -> usize {
        if self.current + 1 >= self.total {
            log::debug!("next ignored on last page [page={}]", self.current);
        }
        self.go_to(self.current + 1, true, out)
    }

    pub fn previous(&mut self, out: &mut RenderDiff) -> usize {
        if self.current == 0 {
            log::debug!("previous ignored on first page");
        }
        self.go_to(self.current.saturating_sub(1), true, out)
    }

    /// Re-render the track at `base_page` shifted by a live drag delta
    pub fn track_drag(&self, base_page: usize, delta_px: f32, out: &mut RenderDiff) {
        out.add_patch(RenderPatch::transform(base_page, delta_px, false));
    }

    /// Jump to the page holding `fragment` (with or without a leading `#`).
    ///
    /// Unknown or malformed ids are ignored. On success the target is
    /// highlighted and the location fragment replaced.
    pub fn go_to_anchor(
        &mut self,
        fragment: &str,
        anchors: &AnchorIndex,
        now_ms: f64,
        out: &mut RenderDiff,
    ) -> bool {
        let Some(anchor) = AnchorId::from_fragment(fragment) else {
            log::debug!("ignoring malformed anchor {:?}", fragment);
            return false;
        };
        let Some(page) = anchors.page_of(&anchor) else {
            log::debug!("ignoring unknown anchor [anchor={}]", anchor);
            return false;
        };

        self.go_to(page, true, out);

        self.end_highlight(out);
        out.add_patch(RenderPatch::Highlight {
            anchor: anchor.clone(),
            active: true,
        });
        out.add_patch(RenderPatch::ReplaceFragment {
            fragment: anchor.to_fragment(),
        });
        self.highlight = Some(PendingHighlight {
            anchor,
            expires_at_ms: now_ms + self.highlight_ms,
        });
        true
    }

    /// Clear the highlight once its duration has elapsed
    pub fn expire_highlight(&mut self, now_ms: f64, out: &mut RenderDiff) {
        if matches!(&self.highlight, Some(h) if now_ms >= h.expires_at_ms) {
            self.end_highlight(out);
        }
    }

    fn end_highlight(&mut self, out: &mut RenderDiff) {
        if let Some(done) = self.highlight.take() {
            out.add_patch(RenderPatch::Highlight {
                anchor: done.anchor,
                active: false,
            });
        }
    }

    fn push_indicator(&self, out: &mut RenderDiff) {
        let (current, total) = self.indicator();
        out.add_patch(RenderPatch::Indicator { current, total });
    }
}
