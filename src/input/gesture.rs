//! Drag and swipe gesture state machine

use crate::PagerError;
use serde::{Deserialize, Serialize};

/// Enabled page-turn interaction style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PagingMode {
    /// Continuous horizontal slide
    #[default]
    Slide,
    /// Simulated page turn
    SimulatedBook,
    /// Tap zones and keys only, no dragging
    TapOnly,
}

impl PagingMode {
    pub fn from_name(name: &str) -> Result<Self, PagerError> {
        match name {
            "slide" => Ok(PagingMode::Slide),
            "simulated-book" | "book" => Ok(PagingMode::SimulatedBook),
            "tap-only" | "tap" => Ok(PagingMode::TapOnly),
            other => Err(PagerError::UnknownMode(other.to_string())),
        }
    }

    /// Whether pointer and touch drags move the page track
    pub fn allows_drag(self) -> bool {
        !matches!(self, PagingMode::TapOnly)
    }

    /// Visual class the rendering layer applies to the track
    pub fn css_class(self) -> &'static str {
        match self {
            PagingMode::Slide => "mode-slide",
            PagingMode::SimulatedBook => "mode-book",
            PagingMode::TapOnly => "mode-tap",
        }
    }
}

/// Distance a release must cover to turn the page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SwipeThreshold {
    /// Floor in pixels
    pub min_px: f32,
    /// Fraction of the viewport width
    pub viewport_ratio: f32,
}

impl Default for SwipeThreshold {
    fn default() -> Self {
        Self {
            min_px: 40.0,
            viewport_ratio: 0.1,
        }
    }
}

impl SwipeThreshold {
    pub fn release_distance(&self, viewport_width: f32) -> f32 {
        self.min_px.max(viewport_width * self.viewport_ratio)
    }
}

/// What a completed input asks the transport to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    Next,
    Previous,
    /// Return to the current page
    SnapBack,
}

/// In-progress drag record
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub active: bool,
    pub start_x: f32,
    /// Page whose transform the drag offsets
    pub base_page: usize,
    pub last_delta: f32,
}

/// Turns pointer/touch down, move and up into navigation intents
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    mode: PagingMode,
    threshold: SwipeThreshold,
    drag: DragState,
}

impl GestureController {
    pub fn new(mode: PagingMode, threshold: SwipeThreshold) -> Self {
        Self {
            mode,
            threshold,
            drag: DragState::default(),
        }
    }

    pub fn mode(&self) -> PagingMode {
        self.mode
    }

    /// Switch modes; a drag in progress is abandoned
    pub fn set_mode(&mut self, mode: PagingMode) {
        self.mode = mode;
        self.cancel();
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    /// Start tracking. Ignored in tap-only mode.
    pub fn pointer_down(&mut self, x: f32, current_page: usize) -> bool {
        if !self.mode.allows_drag() {
            return false;
        }
        self.drag = DragState {
            active: true,
            start_x: x,
            base_page: current_page,
            last_delta: 0.0,
        };
        true
    }

    /// Page the gesture started on and the raw delta from its start, to be
    /// rendered 1:1 without animation
    pub fn pointer_move(&mut self, x: f32) -> Option<(usize, f32)> {
        if !self.drag.active {
            return None;
        }
        self.drag.last_delta = x - self.drag.start_x;
        Some((self.drag.base_page, self.drag.last_delta))
    }

    /// Finish the gesture.
    ///
    /// Without a release coordinate (touch end) the last tracked delta is used.
    /// Dragging content left past the threshold advances.
    pub fn pointer_up(&mut self, x: Option<f32>, viewport_width: f32) -> Option<NavIntent> {
        if !self.drag.active {
            return None;
        }
        let delta = x.map_or(self.drag.last_delta, |x| x - self.drag.start_x);
        self.drag = DragState::default();

        let distance = self.threshold.release_distance(viewport_width);
        let intent = if delta < -distance {
            NavIntent::Next
        } else if delta > distance {
            NavIntent::Previous
        } else {
            NavIntent::SnapBack
        };
        Some(intent)
    }

    pub fn cancel(&mut self) {
        self.drag = DragState::default();
    }
}
