//! Debounced viewport resizes

use crate::layout::Viewport;

/// Default quiet period before a resize triggers re-layout
pub const DEFAULT_RESIZE_DEBOUNCE_MS: f64 = 150.0;

/// A scheduled re-layout that has not fired yet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingRelayout {
    pub viewport: Viewport,
    pub due_at_ms: f64,
}

/// Coalesces bursts of resize events into one trailing re-layout.
///
/// Each new event cancels the pending timer and schedules a fresh one.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    quiet_ms: f64,
    pending: Option<PendingRelayout>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_DEBOUNCE_MS)
    }
}

impl ResizeDebouncer {
    pub fn new(quiet_ms: f64) -> Self {
        Self {
            quiet_ms,
            pending: None,
        }
    }

    /// Record a resize, replacing any pending one
    pub fn schedule(&mut self, now_ms: f64, viewport: Viewport) {
        if let Some(superseded) = self.pending.take() {
            log::trace!(
                "resize superseded [due_at={} width={} height={}]",
                superseded.due_at_ms,
                superseded.viewport.width,
                superseded.viewport.height
            );
        }
        self.pending = Some(PendingRelayout {
            viewport,
            due_at_ms: now_ms + self.quiet_ms,
        });
    }

    /// Fire the pending re-layout once its quiet period has elapsed
    pub fn poll(&mut self, now_ms: f64) -> Option<Viewport> {
        match self.pending {
            Some(pending) if now_ms >= pending.due_at_ms => {
                self.pending = None;
                Some(pending.viewport)
            }
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<&PendingRelayout> {
        self.pending.as_ref()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
