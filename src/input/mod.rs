//! Gesture and input controller

mod gesture;
mod keyboard;
mod resize;

pub use gesture::{DragState, GestureController, NavIntent, PagingMode, SwipeThreshold};
pub use keyboard::{NavKey, TapZone};
pub use resize::{PendingRelayout, ResizeDebouncer, DEFAULT_RESIZE_DEBOUNCE_MS};
