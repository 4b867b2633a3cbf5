//! Single-line directive notation: `<fen>@<orientation>@<annotations>`

use crate::board::{BoardState, Orientation};
use crate::notation::diagram::Diagram;
use crate::notation::grammar::parse_annotation;
use crate::notation::{words, Codec};
use crate::RenderError;

/// Codec for the `@`-separated directive form.
///
/// Orientation and annotations are optional. An orientation other than
/// `white` or `black` abandons the decode without an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveCodec;

impl Codec for DirectiveCodec {
    fn decode(&self, text: &str) -> Result<Option<Diagram>, RenderError> {
        let mut fields = text.split('@');
        let fen = fields.next().unwrap_or_default();
        let orientation = fields.next().unwrap_or_default();
        let tokens = fields.next().unwrap_or_default();
        let tokens_at = fen.len() + orientation.len() + 2;

        let orientation = match orientation.trim() {
            "" => Orientation::White,
            keyword => match Orientation::from_keyword(keyword) {
                Some(orientation) => orientation,
                None => return Ok(None),
            },
        };

        let fen = fen.trim();
        let board = BoardState::from_fen(fen)?;

        let annotations = words(tokens, tokens_at)
            .map(|(at, token)| parse_annotation(token, at))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Diagram::from_parts(
            fen.to_string(),
            board,
            orientation,
            annotations,
        )))
    }

    fn encode(&self, diagram: &Diagram) -> String {
        let tokens = diagram
            .annotations()
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        match (diagram.orientation(), tokens.is_empty()) {
            (Orientation::White, true) => diagram.fen().to_string(),
            (orientation, true) => format!("{}@{}", diagram.fen(), orientation.as_str()),
            (orientation, false) => {
                format!("{}@{}@{}", diagram.fen(), orientation.as_str(), tokens)
            }
        }
    }
}
