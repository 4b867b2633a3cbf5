//! The typed diagram model both notations decode into

use std::fmt;

use crate::board::{BoardState, FenError, Orientation, Square};

/// A visual overlay on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Annotation {
    Highlight(Square),
    Arrow { start: Square, end: Square },
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::Highlight(square) => write!(f, "{}", square),
            Annotation::Arrow { start, end } => write!(f, "{}-{}", start, end),
        }
    }
}

/// A decoded render request: position, orientation and overlays in
/// encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    fen: String,
    board: BoardState,
    orientation: Orientation,
    annotations: Vec<Annotation>,
}

impl Diagram {
    pub fn new(
        fen: impl Into<String>,
        orientation: Orientation,
        annotations: Vec<Annotation>,
    ) -> Result<Self, FenError> {
        let fen = fen.into();
        let board = BoardState::from_fen(&fen)?;
        Ok(Self {
            fen,
            board,
            orientation,
            annotations,
        })
    }

    /// Assemble from a board the caller already parsed out of `fen`.
    pub(crate) fn from_parts(
        fen: String,
        board: BoardState,
        orientation: Orientation,
        annotations: Vec<Annotation>,
    ) -> Self {
        Self {
            fen,
            board,
            orientation,
            annotations,
        }
    }

    /// The FEN text exactly as it appeared in the notation.
    pub fn fen(&self) -> &str {
        &self.fen
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
