//! Font metrics and reading typography

use serde::{Deserialize, Serialize};

/// Smallest reading font size in pixels
pub const MIN_FONT_SIZE: f32 = 14.0;
/// Largest reading font size in pixels
pub const MAX_FONT_SIZE: f32 = 24.0;
/// Reading font size used until the host picks one
pub const DEFAULT_FONT_SIZE: f32 = 18.0;

/// Reading font family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Serif,
    Sans,
}

impl FontFamily {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "serif" => Some(FontFamily::Serif),
            "sans" | "sans-serif" => Some(FontFamily::Sans),
            _ => None,
        }
    }
}

/// Live display preferences that change rendered block heights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Typography {
    pub font_size_px: f32,
    pub family: FontFamily,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_size_px: DEFAULT_FONT_SIZE,
            family: FontFamily::Serif,
        }
    }
}

impl Typography {
    /// Clamp the font size into the supported range
    pub fn clamped(self) -> Self {
        let font_size_px = if self.font_size_px.is_finite() {
            self.font_size_px.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
        } else {
            DEFAULT_FONT_SIZE
        };
        Self {
            font_size_px,
            ..self
        }
    }
}

/// Metrics needed for text layout
#[derive(Debug, Clone)]
pub struct FontMetrics {
    /// Line height in logical pixels
    pub line_height: f32,
    /// Width of ASCII characters (0-127)
    pub char_widths: Vec<f32>,
    /// Default width for non-ASCII characters
    pub default_width: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::for_typography(&Typography::default())
    }
}

impl FontMetrics {
    pub fn new(line_height: f32, char_widths: Vec<f32>, default_width: f32) -> Self {
        Self {
            line_height,
            char_widths,
            default_width,
        }
    }

    /// Fixed-pitch metrics, mostly for tests
    pub fn monospace(char_width: f32, line_height: f32) -> Self {
        Self::new(line_height, vec![char_width; 128], char_width)
    }

    /// Approximate metrics for a reading typography.
    ///
    /// Non-ASCII text is treated as full-width (CJK), ASCII as proportional.
    pub fn for_typography(typography: &Typography) -> Self {
        let size = typography.font_size_px;
        let ascii_ratio = match typography.family {
            FontFamily::Serif => 0.55,
            FontFamily::Sans => 0.52,
        };
        let line_ratio = match typography.family {
            FontFamily::Serif => 1.8,
            FontFamily::Sans => 1.7,
        };

        let char_widths = (0u8..128)
            .map(|b| match b {
                b' ' => size * 0.28,
                b'i' | b'l' | b'j' | b'!' | b'.' | b',' | b'\'' => size * 0.3,
                b'm' | b'w' | b'M' | b'W' => size * 0.85,
                _ if b.is_ascii_uppercase() => size * (ascii_ratio + 0.12),
                _ => size * ascii_ratio,
            })
            .collect();

        Self {
            line_height: size * line_ratio,
            char_widths,
            default_width: size,
        }
    }

    /// Get width of a character
    pub fn width(&self, c: char) -> f32 {
        if c.is_ascii() {
            if let Some(w) = self.char_widths.get(c as usize) {
                return *w;
            }
        }
        self.default_width
    }
}
