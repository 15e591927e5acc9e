//! Errors surfaced to the host.
//!
//! Layout and navigation never fail; only host-supplied input (configuration
//! and block descriptors) is validated.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerError {
    /// Configuration JSON could not be parsed
    Config(String),
    /// A configuration value is out of its accepted range
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
    /// Block descriptor JSON could not be parsed
    Blocks(String),
    /// Unknown paging mode name
    UnknownMode(String),
    /// Unknown reading font family name
    UnknownFont(String),
    /// Unknown tap zone name
    UnknownTapZone(String),
}

impl fmt::Display for PagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PagerError::Config(msg) => write!(f, "invalid pager config: {}", msg),
            PagerError::InvalidConfig { field, reason } => {
                write!(f, "invalid pager config [field={}]: {}", field, reason)
            }
            PagerError::Blocks(msg) => write!(f, "invalid block descriptors: {}", msg),
            PagerError::UnknownMode(name) => write!(f, "unknown paging mode: {}", name),
            PagerError::UnknownFont(name) => write!(f, "unknown font family: {}", name),
            PagerError::UnknownTapZone(name) => write!(f, "unknown tap zone: {}", name),
        }
    }
}

impl std::error::Error for PagerError {}
