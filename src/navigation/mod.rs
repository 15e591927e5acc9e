//! Navigation: current page, transforms and anchor jumps

mod transport;

pub use transport::{PendingHighlight, Transport, DEFAULT_HIGHLIGHT_MS};
