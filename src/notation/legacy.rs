//! Multi-line legacy notation
//!
//! ```text
//! fen: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR
//! orientation: black
//! annotations: He4 Ae2-e4
//! ```
//!
//! The `fen: ` prefix is optional. Annotation tokens carry a one-letter
//! sigil: `H` for a highlight, `A` for an arrow. Tokens with any other sigil
//! are dropped.

use tracing::debug;

use crate::board::{BoardState, Orientation};
use crate::error::NotationError;
use crate::notation::diagram::{Annotation, Diagram};
use crate::notation::grammar::parse_annotation;
use crate::notation::{words, Codec};
use crate::RenderError;

const FEN_PREFIX: &str = "fen: ";
const ORIENTATION_PREFIX: &str = "orientation: ";
const ANNOTATIONS_PREFIX: &str = "annotations: ";

/// Codec for the line-based `fen:` / `orientation:` / `annotations:` form.
///
/// Unlike [`DirectiveCodec`](super::DirectiveCodec), an unknown orientation
/// here is reported as [`NotationError::InvalidOrientation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyCodec;

impl Codec for LegacyCodec {
    fn decode(&self, text: &str) -> Result<Option<Diagram>, RenderError> {
        let mut lines = lines_with_offsets(text);
        let (_, first) = lines.next().unwrap_or((0, ""));
        let fen = first.strip_prefix(FEN_PREFIX).unwrap_or(first).trim();

        let mut orientation = Orientation::White;
        let mut annotations = Vec::new();
        for (at, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(value) = line.strip_prefix(ORIENTATION_PREFIX) {
                let value_at = at + ORIENTATION_PREFIX.len() + (value.len() - value.trim_start().len());
                let value = value.trim();
                orientation = Orientation::from_keyword(value).ok_or_else(|| {
                    NotationError::InvalidOrientation {
                        value: value.to_string(),
                        span: value_at..value_at + value.len(),
                    }
                })?;
            } else if let Some(tokens) = line.strip_prefix(ANNOTATIONS_PREFIX) {
                for (token_at, token) in words(tokens, at + ANNOTATIONS_PREFIX.len()) {
                    if let Some(annotation) = decode_token(token, token_at)? {
                        annotations.push(annotation);
                    }
                }
            }
        }

        let board = BoardState::from_fen(fen)?;
        Ok(Some(Diagram::from_parts(
            fen.to_string(),
            board,
            orientation,
            annotations,
        )))
    }

    fn encode(&self, diagram: &Diagram) -> String {
        let mut out = format!(
            "{}{}\n{}{}",
            FEN_PREFIX,
            diagram.fen(),
            ORIENTATION_PREFIX,
            diagram.orientation().as_str()
        );
        if !diagram.annotations().is_empty() {
            let tokens = diagram
                .annotations()
                .iter()
                .map(|a| match a {
                    Annotation::Highlight(_) => format!("H{}", a),
                    Annotation::Arrow { .. } => format!("A{}", a),
                })
                .collect::<Vec<_>>()
                .join(" ");
            out.push('\n');
            out.push_str(ANNOTATIONS_PREFIX);
            out.push_str(&tokens);
        }
        out
    }
}

/// Decode one sigil-prefixed token; `Ok(None)` for an unknown sigil.
fn decode_token(token: &str, at: usize) -> Result<Option<Annotation>, NotationError> {
    let Some(sigil) = token.chars().next() else {
        return Ok(None);
    };
    let body = &token[sigil.len_utf8()..];
    let body_at = at + sigil.len_utf8();

    match sigil {
        'H' => match parse_annotation(body, body_at)? {
            highlight @ Annotation::Highlight(_) => Ok(Some(highlight)),
            Annotation::Arrow { .. } => Err(NotationError::InvalidSquare {
                square: body.to_string(),
                span: body_at..body_at + body.len(),
            }),
        },
        'A' => match parse_annotation(body, body_at)? {
            arrow @ Annotation::Arrow { .. } => Ok(Some(arrow)),
            Annotation::Highlight(_) => Err(NotationError::Syntax {
                span: body_at..body_at + body.len(),
                message: "arrow needs two squares joined by '-'".to_string(),
                expected: vec!["'-'".to_string()],
            }),
        },
        _ => {
            let dropped = NotationError::UnknownAnnotationSigil {
                sigil,
                span: at..at + sigil.len_utf8(),
            };
            debug!(token, reason = %dropped, "dropping legacy annotation");
            Ok(None)
        }
    }
}

/// Split on `\n`, trimming a trailing `\r`, with each line's byte offset.
fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split('\n').map(move |line| {
        let at = offset;
        offset += line.len() + 1;
        (at, line.strip_suffix('\r').unwrap_or(line))
    })
}
