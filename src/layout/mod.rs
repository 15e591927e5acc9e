//! Layout engine: measured pagination with paragraph splitting

mod engine;
pub mod font;
mod line_break;
mod pagination;
mod split;
mod surface;

pub use engine::LayoutEngine;
pub use font::{FontFamily, FontMetrics, Typography};
pub use line_break::{BlockLayout, LineBreaker, GAP_LINES};
pub use pagination::{AnchorIndex, LayoutStats, Page, Pagination};
pub use split::{split_to_fit, Split};
pub use surface::{MeasureSurface, MetricsSurface, Viewport};
