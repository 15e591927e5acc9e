//! Render output: patch protocol and page snapshots

mod diff;
mod display;

pub use diff::{RenderDiff, RenderPatch};
pub use display::{DisplayList, PageView, TocView};
