//! fen-diagram - render chess diagrams from compact notation to SVG
//!
//! A directive names a position in FEN, which side sits at the bottom, and
//! optional square highlights and arrows:
//!
//! ```text
//! rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR@white@e2-e4 g7
//! ```
//!
//! # Example
//!
//! ```rust
//! use fen_diagram::render;
//!
//! let result = render("8/8/8/8/8/8/8/8@black@e2-e4").unwrap().unwrap();
//! assert!(result.svg.contains(r#"viewBox="0 0 320 320""#));
//! assert!(result.key.to_string().starts_with("chess-"));
//! ```

pub mod board;
pub mod error;
pub mod notation;
pub mod renderer;
pub mod slot;
pub mod stylesheet;

pub use board::{BoardState, FenError, Orientation, Square, SquareError};
pub use error::NotationError;
pub use notation::{decode, Annotation, Codec, Diagram, DirectiveCodec, Grammar, LegacyCodec};
pub use renderer::{render_svg, DrawOp, Renderer, RendererOptions, Scene, SvgConfig};
pub use slot::{KeyScope, SlotKey};
pub use stylesheet::Stylesheet;

use thiserror::Error;
use tracing::{debug, error};

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error while decoding the notation
    #[error(transparent)]
    Notation(#[from] NotationError),

    /// The FEN placement does not describe an 8x8 board
    #[error(transparent)]
    Fen(#[from] FenError),

    /// An annotation names a square off the board
    #[error(transparent)]
    Square(#[from] SquareError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Colors, glyphs and board size
    pub stylesheet: Stylesheet,
    /// What the slot key is computed over
    pub key_scope: KeyScope,
    /// Force a notation; `None` detects it from the text
    pub grammar: Option<Grammar>,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Set the slot key scope
    pub fn with_key_scope(mut self, scope: KeyScope) -> Self {
        self.key_scope = scope;
        self
    }

    /// Force a notation instead of detecting it
    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = Some(grammar);
        self
    }
}

/// A rendered diagram ready to be placed in a host slot
#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    /// Identity of the slot this fragment belongs to
    pub key: SlotKey,
    /// Self-contained SVG fragment
    pub svg: String,
}

/// Remove a leading `chess ` or `:chess ` type tag from a directive payload.
pub fn strip_type_tag(payload: &str) -> &str {
    let trimmed = payload.trim_start();
    trimmed
        .strip_prefix(":chess ")
        .or_else(|| trimmed.strip_prefix("chess "))
        .unwrap_or(payload)
}

/// Render a directive to SVG with default configuration
///
/// Returns `Ok(None)` when the directive is deliberately skipped (an
/// unknown orientation in the single-line notation).
pub fn render(directive: &str) -> Result<Option<RenderResult>, RenderError> {
    render_with_config(directive, &RenderConfig::default())
}

/// Render a directive to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use fen_diagram::{render_with_config, KeyScope, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_svg(SvgConfig::default().with_pretty_print(false))
///     .with_key_scope(KeyScope::Diagram);
///
/// let result = render_with_config("chess 8/8/8/8/8/8/8/8@white@d4", &config)
///     .unwrap()
///     .unwrap();
/// assert!(!result.svg.contains('\n'));
/// ```
pub fn render_with_config(
    directive: &str,
    config: &RenderConfig,
) -> Result<Option<RenderResult>, RenderError> {
    let text = strip_type_tag(directive);
    let grammar = config.grammar.unwrap_or_else(|| Grammar::detect(text));

    let Some(diagram) = grammar.decode(text)? else {
        return Ok(None);
    };
    debug!(
        ?grammar,
        fen = diagram.fen(),
        orientation = diagram.orientation().as_str(),
        annotations = diagram.annotations().len(),
        "decoded chess diagram"
    );

    let renderer = Renderer::from_diagram(&diagram, config.stylesheet.clone());
    let svg = renderer.to_svg(&config.svg);
    let key = SlotKey::for_diagram(&diagram, config.key_scope);

    Ok(Some(RenderResult { key, svg }))
}

/// Host boundary: render a directive, logging and swallowing any failure.
///
/// Never panics on bad input; a failed or skipped directive yields `None`
/// and the host leaves the slot empty.
pub fn render_slot(directive: &str, config: &RenderConfig) -> Option<RenderResult> {
    match render_with_config(directive, config) {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, directive, "chess diagram rendering failed");
            None
        }
    }
}
