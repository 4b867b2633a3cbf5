//! Textual notations for chess diagrams
//!
//! Two codecs read and write the same [`Diagram`] model:
//!
//! - [`DirectiveCodec`]: `<fen>@<orientation>@<annotations>` on one line
//! - [`LegacyCodec`]: the older `fen:` / `orientation:` / `annotations:` block
//!
//! They share one annotation grammar ([`grammar`]) over the tokens produced by
//! [`lexer`], and differ only in field layout and in how an unknown
//! orientation is treated.

pub mod diagram;
mod directive;
pub mod grammar;
mod legacy;
pub mod lexer;

pub use diagram::{Annotation, Diagram};
pub use directive::DirectiveCodec;
pub use legacy::LegacyCodec;

use crate::RenderError;

/// A textual encoding of [`Diagram`]
pub trait Codec {
    /// Decode notation text. `Ok(None)` means the text was deliberately
    /// skipped and no diagram should be produced.
    fn decode(&self, text: &str) -> Result<Option<Diagram>, RenderError>;

    /// Write the canonical text for `diagram` in this notation.
    fn encode(&self, diagram: &Diagram) -> String;
}

/// Which notation a piece of text is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    Directive,
    Legacy,
}

impl Grammar {
    /// Multi-line text, or text opening with `fen:`, is legacy notation.
    pub fn detect(text: &str) -> Self {
        if text.trim_end().contains('\n') || text.trim_start().starts_with("fen:") {
            Grammar::Legacy
        } else {
            Grammar::Directive
        }
    }

    pub fn codec(self) -> &'static dyn Codec {
        match self {
            Grammar::Directive => &DirectiveCodec,
            Grammar::Legacy => &LegacyCodec,
        }
    }

    pub fn decode(self, text: &str) -> Result<Option<Diagram>, RenderError> {
        self.codec().decode(text)
    }

    pub fn encode(self, diagram: &Diagram) -> String {
        self.codec().encode(diagram)
    }
}

/// Decode text in whichever notation it appears to be written in.
pub fn decode(text: &str) -> Result<Option<Diagram>, RenderError> {
    Grammar::detect(text).decode(text)
}

/// Whitespace-separated words of `text` with their byte offsets, where
/// `base` is the offset of `text` itself. Empty words are skipped.
pub(crate) fn words(text: &str, base: usize) -> impl Iterator<Item = (usize, &str)> + '_ {
    let mut offset = base;
    text.split(|c: char| c.is_ascii_whitespace())
        .filter_map(move |word| {
            let at = offset;
            offset += word.len() + 1;
            (!word.is_empty()).then_some((at, word))
        })
}
