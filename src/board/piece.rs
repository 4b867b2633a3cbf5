//! Piece kinds and colors

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Lowercase FEN letter for this kind.
    pub fn letter(self) -> char {
        use PieceKind::*;
        match self {
            Pawn => 'p',
            Knight => 'n',
            Bishop => 'b',
            Rook => 'r',
            Queen => 'q',
            King => 'k',
        }
    }

    /// Solid Unicode chess symbol; the renderer colors it per side.
    pub fn symbol(self) -> char {
        use PieceKind::*;
        match self {
            King => '\u{265A}',
            Queen => '\u{265B}',
            Rook => '\u{265C}',
            Bishop => '\u{265D}',
            Knight => '\u{265E}',
            Pawn => '\u{265F}',
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        use PieceKind::*;
        match c {
            'p' => Some(Pawn),
            'n' => Some(Knight),
            'b' => Some(Bishop),
            'r' => Some(Rook),
            'q' => Some(Queen),
            'k' => Some(King),
            _ => None,
        }
    }
}

/// An occupied cell: kind plus color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Decode a FEN piece letter; uppercase is white, lowercase black.
    pub fn from_fen_char(c: char) -> Option<Self> {
        let kind = PieceKind::from_letter(c.to_ascii_lowercase())?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self { kind, color })
    }

    pub fn fen_char(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }
}
