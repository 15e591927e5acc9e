//! Pager configuration

use crate::input::{PagingMode, SwipeThreshold, DEFAULT_RESIZE_DEBOUNCE_MS};
use crate::layout::Typography;
use crate::navigation::DEFAULT_HIGHLIGHT_MS;
use crate::PagerError;
use serde::{Deserialize, Serialize};

/// Options recognised by the pager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PagerConfig {
    /// Enabled gesture affordances and page-turn visual class
    pub paging_mode: PagingMode,
    /// Fragment id consumed once at startup
    pub starting_anchor: Option<String>,
    /// Quiet period before a resize re-lays out
    pub resize_debounce_ms: f64,
    /// Duration of the anchor jump highlight
    pub highlight_ms: f64,
    pub swipe: SwipeThreshold,
    pub typography: Typography,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            paging_mode: PagingMode::default(),
            starting_anchor: None,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            highlight_ms: DEFAULT_HIGHLIGHT_MS,
            swipe: SwipeThreshold::default(),
            typography: Typography::default(),
        }
    }
}

impl PagerConfig {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, PagerError> {
        let config: PagerConfig =
            serde_json::from_str(json).map_err(|e| PagerError::Config(e.to_string()))?;
        config.validate()
    }

    /// Check ranges; typography is clamped rather than rejected
    pub fn validate(mut self) -> Result<Self, PagerError> {
        check_duration("resizeDebounceMs", self.resize_debounce_ms)?;
        check_duration("highlightMs", self.highlight_ms)?;
        if !self.swipe.min_px.is_finite() || self.swipe.min_px < 0.0 {
            return Err(PagerError::InvalidConfig {
                field: "swipe.minPx",
                reason: format!("must be finite and >= 0, got {}", self.swipe.min_px),
            });
        }
        if !(0.0..=1.0).contains(&self.swipe.viewport_ratio) {
            return Err(PagerError::InvalidConfig {
                field: "swipe.viewportRatio",
                reason: format!("must be within 0..=1, got {}", self.swipe.viewport_ratio),
            });
        }
        self.typography = self.typography.clamped();
        Ok(self)
    }
}

fn check_duration(field: &'static str, value: f64) -> Result<(), PagerError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PagerError::InvalidConfig {
            field,
            reason: format!("must be finite and >= 0, got {}", value),
        })
    }
}
