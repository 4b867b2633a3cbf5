//! Board styling: square and overlay colors, glyph set, board size
//!
//! Stylesheets are TOML documents. Every section and key is optional; missing
//! values fall back to the built-in defaults shown in [`DEFAULT_STYLESHEET`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::board::DEFAULT_BOARD_SIZE;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid stylesheet value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// How pieces are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSet {
    /// Solid Unicode chess symbols, filled with the piece color
    #[default]
    Unicode,
    /// Uppercase piece letters (K, Q, R, B, N, P)
    Letters,
}

/// The built-in stylesheet, in the same format user stylesheets use.
pub const DEFAULT_STYLESHEET: &str = r##"
[board]
size = 320.0
glyphs = "unicode"

[colors]
light-square = "#f0d9b5"
dark-square = "#b58863"
white-piece = "#ffffff"
black-piece = "#000000"
piece-stroke = "#000000"
highlight = "#ffeb3b"
arrow = "#15781b"

[overlay]
highlight-opacity = 0.5
arrow-opacity = 0.8
arrow-width = 8.0
"##;

/// Resolved style for rendering a board
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Board side in pixels; also the SVG viewBox size
    pub board_size: f64,
    pub glyphs: GlyphSet,
    /// Font family for piece glyphs, if any
    pub font_family: Option<String>,
    /// Color mappings: token name -> color
    pub colors: BTreeMap<String, String>,
    pub highlight_opacity: f64,
    pub arrow_opacity: f64,
    pub arrow_width: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    board: Option<TomlBoard>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
    overlay: Option<TomlOverlay>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TomlBoard {
    size: Option<f64>,
    glyphs: Option<GlyphSet>,
    font_family: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TomlOverlay {
    highlight_opacity: Option<f64>,
    arrow_opacity: Option<f64>,
    arrow_width: Option<f64>,
}

fn default_colors() -> BTreeMap<String, String> {
    [
        ("light-square", "#f0d9b5"),
        ("dark-square", "#b58863"),
        ("white-piece", "#ffffff"),
        ("black-piece", "#000000"),
        ("piece-stroke", "#000000"),
        ("highlight", "#ffeb3b"),
        ("arrow", "#15781b"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string, layered over the defaults
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;
        let mut sheet = Self::default();

        sheet.name = parsed.metadata.and_then(|m| m.name);
        if let Some(board) = parsed.board {
            if let Some(size) = board.size {
                sheet.board_size = size;
            }
            if let Some(glyphs) = board.glyphs {
                sheet.glyphs = glyphs;
            }
            sheet.font_family = board.font_family;
        }
        sheet.colors.extend(parsed.colors);
        if let Some(overlay) = parsed.overlay {
            if let Some(v) = overlay.highlight_opacity {
                sheet.highlight_opacity = v;
            }
            if let Some(v) = overlay.arrow_opacity {
                sheet.arrow_opacity = v;
            }
            if let Some(v) = overlay.arrow_width {
                sheet.arrow_width = v;
            }
        }

        sheet.validate()?;
        Ok(sheet)
    }

    fn validate(&self) -> Result<(), StylesheetError> {
        if !(self.board_size.is_finite() && self.board_size > 0.0) {
            return Err(StylesheetError::InvalidValue {
                key: "board.size",
                reason: format!("must be a positive number, got {}", self.board_size),
            });
        }
        for (key, value) in [
            ("overlay.highlight-opacity", self.highlight_opacity),
            ("overlay.arrow-opacity", self.arrow_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(StylesheetError::InvalidValue {
                    key,
                    reason: format!("must be between 0 and 1, got {}", value),
                });
            }
        }
        if !(self.arrow_width.is_finite() && self.arrow_width > 0.0) {
            return Err(StylesheetError::InvalidValue {
                key: "overlay.arrow-width",
                reason: format!("must be a positive number, got {}", self.arrow_width),
            });
        }
        Ok(())
    }

    /// Resolve a color token to a concrete value
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a color token, falling back to the built-in palette and then
    /// to black.
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }
        default_colors()
            .remove(token)
            .unwrap_or_else(|| "#000000".to_string())
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self {
            name: None,
            board_size: DEFAULT_BOARD_SIZE,
            glyphs: GlyphSet::Unicode,
            font_family: None,
            colors: default_colors(),
            highlight_opacity: 0.5,
            arrow_opacity: 0.8,
            arrow_width: 8.0,
        }
    }
}
