//! Lexer for annotation tokens using logos

use logos::Logos;

use crate::board::Square;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    #[regex(r"[a-h][1-8]", |lex| lex.slice().parse::<Square>().ok(), priority = 10)]
    Square(Square),

    #[token("-")]
    Dash,

    // Anything else up to the next dash or blank; reported as a bad square.
    #[regex(r"[^ \t\n\r\-]+", |lex| lex.slice().to_string(), priority = 1)]
    Word(String),
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}
