//! Error types for decoding diagram notation

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::notation::lexer::Token;

/// Byte range in the directive text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotationError {
    #[error("invalid orientation '{value}' (expected 'white' or 'black')")]
    InvalidOrientation { value: String, span: Span },

    #[error("invalid square '{square}' (expected a file a-h followed by a rank 1-8)")]
    InvalidSquare { square: String, span: Span },

    #[error("unknown annotation sigil '{sigil}'")]
    UnknownAnnotationSigil { sigil: char, span: Span },

    #[error("syntax error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl NotationError {
    pub fn span(&self) -> &Span {
        match self {
            Self::InvalidOrientation { span, .. }
            | Self::InvalidSquare { span, .. }
            | Self::UnknownAnnotationSigil { span, .. }
            | Self::Syntax { span, .. } => span,
        }
    }

    /// Shift the span by `offset` bytes, for errors raised on a substring.
    pub(crate) fn offset(mut self, offset: usize) -> Self {
        let span = match &mut self {
            Self::InvalidOrientation { span, .. }
            | Self::InvalidSquare { span, .. }
            | Self::UnknownAnnotationSigil { span, .. }
            | Self::Syntax { span, .. } => span,
        };
        *span = span.start + offset..span.end + offset;
        self
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = self.span().clone();
        let label = match self {
            Self::Syntax {
                message, expected, ..
            } if !expected.is_empty() => {
                format!("{}\nExpected: {}", message, expected.join(", "))
            }
            other => other.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(label)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for NotationError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => match found {
                Some(tok) => format!("Unexpected {}", format_token(tok)),
                None => "Unexpected end of annotation".to_string(),
            },
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of annotation".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("'{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        NotationError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::Square(sq) => format!("square {}", sq),
        Token::Dash => "'-'".to_string(),
        Token::Word(w) => format!("'{}'", w),
    }
}
