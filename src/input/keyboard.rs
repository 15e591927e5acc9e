//! Discrete inputs: arrow keys and tap zones

use crate::input::gesture::NavIntent;

/// Keys the pager reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` value; other keys are ignored
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(NavKey::Left),
            "ArrowRight" | "Right" => Some(NavKey::Right),
            _ => None,
        }
    }

    pub fn intent(self) -> NavIntent {
        match self {
            NavKey::Left => NavIntent::Previous,
            NavKey::Right => NavIntent::Next,
        }
    }
}

/// The two tap targets flanking the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapZone {
    Previous,
    Next,
}

impl TapZone {
    /// Zone under a tap at `x`: left half goes back, right half forward
    pub fn at(x: f32, viewport_width: f32) -> Self {
        if x < viewport_width / 2.0 {
            TapZone::Previous
        } else {
            TapZone::Next
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "prev" | "previous" => Some(TapZone::Previous),
            "next" => Some(TapZone::Next),
            _ => None,
        }
    }

    pub fn intent(self) -> NavIntent {
        match self {
            TapZone::Previous => NavIntent::Previous,
            TapZone::Next => NavIntent::Next,
        }
    }
}
