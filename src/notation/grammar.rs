//! Annotation token parser using chumsky
//!
//! Both notations share this grammar for a single annotation token:
//! `<square>` is a highlight, `<square>-<square>` is an arrow.

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::board::Square;
use crate::error::NotationError;
use crate::notation::diagram::Annotation;
use crate::notation::lexer::{Span, Token};

/// One side of an annotation before coordinate validation
#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Square(Square),
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
struct AnnotationSyntax {
    start: (Operand, Span),
    end: Option<(Operand, Span)>,
}

/// Parse one whitespace-free annotation token.
///
/// `offset` is the byte position of `text` inside the full directive, so
/// error spans point into the directive rather than the token.
pub fn parse_annotation(text: &str, offset: usize) -> Result<Annotation, NotationError> {
    let len = text.len();
    let token_iter = crate::notation::lexer::lex(text).map(|(tok, span)| (tok, span.into()));
    let token_stream = Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    let syntax = annotation_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| {
            errs.into_iter()
                .next()
                .map(NotationError::from)
                .unwrap_or_else(|| NotationError::Syntax {
                    span: 0..len,
                    message: "empty annotation".to_string(),
                    expected: vec![],
                })
                .offset(offset)
        })?;

    let start = resolve(syntax.start, offset)?;
    match syntax.end {
        None => Ok(Annotation::Highlight(start)),
        Some(end) => Ok(Annotation::Arrow {
            start,
            end: resolve(end, offset)?,
        }),
    }
}

fn resolve((operand, span): (Operand, Span), offset: usize) -> Result<Square, NotationError> {
    match operand {
        Operand::Square(square) => Ok(square),
        Operand::Invalid(square) => Err(NotationError::InvalidSquare { square, span }.offset(offset)),
    }
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn annotation_parser<'a, I>() -> impl Parser<'a, I, AnnotationSyntax, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let operand = select! {
        Token::Square(sq) => Operand::Square(sq),
        Token::Word(w) => Operand::Invalid(w),
    }
    .map_with(|op, e| (op, span_range(&e.span())));

    operand
        .clone()
        .then(just(Token::Dash).ignore_then(operand).or_not())
        .then_ignore(end())
        .map(|(start, end)| AnnotationSyntax { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_highlight() {
        assert_eq!(
            parse_annotation("g7", 0).unwrap(),
            Annotation::Highlight(sq("g7"))
        );
    }

    #[test]
    fn test_arrow() {
        assert_eq!(
            parse_annotation("e2-e4", 0).unwrap(),
            Annotation::Arrow {
                start: sq("e2"),
                end: sq("e4")
            }
        );
    }

    #[test]
    fn test_invalid_square_span_is_offset() {
        let err = parse_annotation("e2-z9", 30).unwrap_err();
        assert_eq!(
            err,
            NotationError::InvalidSquare {
                square: "z9".to_string(),
                span: 33..35
            }
        );
    }

    #[test]
    fn test_invalid_highlight() {
        let err = parse_annotation("i1", 0).unwrap_err();
        assert!(matches!(err, NotationError::InvalidSquare { ref square, .. } if square == "i1"));
    }

    #[test]
    fn test_dangling_dash_is_syntax_error() {
        let err = parse_annotation("e2-", 5).unwrap_err();
        assert!(matches!(err, NotationError::Syntax { .. }));
        assert!(err.span().start >= 5);
    }

    #[test]
    fn test_three_squares_is_syntax_error() {
        let err = parse_annotation("a1-b2-c3", 0).unwrap_err();
        assert!(matches!(err, NotationError::Syntax { .. }));
    }

    #[test]
    fn test_leading_dash_is_syntax_error() {
        let err = parse_annotation("-e4", 0).unwrap_err();
        assert!(matches!(err, NotationError::Syntax { .. }));
    }
}
