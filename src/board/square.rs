//! Algebraic squares

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A coordinate that does not name one of the 64 board squares
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid square '{text}' (expected a file a-h followed by a rank 1-8)")]
pub struct SquareError {
    pub text: String,
}

impl SquareError {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A board square, stored as zero-based file (a = 0) and rank (1 = 0) indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Build a square from zero-based indices; `None` if either is off the board.
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Zero-based file index, `a` = 0.
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Zero-based rank index, rank `1` = 0.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.rank) as char
    }

    /// Light squares are those whose file index plus rank index, counted
    /// down from the eighth rank, is even. a8 and h1 are light.
    pub fn is_light(self) -> bool {
        (self.file + (7 - self.rank)) % 2 == 0
    }

    /// All 64 squares in FEN order: rank 8 to rank 1, file a to h.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8)
            .rev()
            .flat_map(|rank| (0..8u8).map(move |file| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Ok(Square {
                file: file - b'a',
                rank: rank - b'1',
            }),
            _ => Err(SquareError::new(s)),
        }
    }
}
