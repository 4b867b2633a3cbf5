//! FEN piece-placement decoding and encoding

use thiserror::Error;

use super::piece::Piece;
use super::square::Square;

/// A FEN placement field that does not describe an 8x8 board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("malformed FEN: expected 8 ranks, found {found}")]
    RankCount { found: usize },

    #[error("malformed FEN: rank {rank} covers {files} files instead of 8")]
    RankWidth { rank: u8, files: usize },

    #[error("malformed FEN: unexpected character '{found}' in rank {rank}")]
    UnexpectedChar { rank: u8, found: char },
}

/// Occupancy of all 64 squares
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardState {
    /// Indexed `[rank][file]`, rank 1 first.
    cells: [[Option<Piece>; 8]; 8],
}

impl BoardState {
    /// An empty board.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a FEN string. Only the piece-placement field is read; side to
    /// move, castling rights and the clocks are ignored.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let placement = fen.split_whitespace().next().unwrap_or("");
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount { found: ranks.len() });
        }

        let mut board = Self::empty();
        for (row, text) in ranks.iter().enumerate() {
            // The first FEN rank is the eighth.
            let rank = 7 - row as u8;
            let mut file = 0usize;
            for c in text.chars() {
                match c {
                    '1'..='8' => file += c as usize - '0' as usize,
                    _ => {
                        let piece = Piece::from_fen_char(c).ok_or(FenError::UnexpectedChar {
                            rank: rank + 1,
                            found: c,
                        })?;
                        if file < 8 {
                            board.cells[rank as usize][file] = Some(piece);
                        }
                        file += 1;
                    }
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth {
                    rank: rank + 1,
                    files: file,
                });
            }
        }
        Ok(board)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.rank() as usize][square.file() as usize]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.rank() as usize][square.file() as usize] = piece;
    }

    /// Occupied squares in FEN order (rank 8 to 1, file a to h).
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Encode the board as a FEN placement field, merging adjacent empty
    /// squares into a single digit.
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(71);
        for rank in (0..8).rev() {
            let mut empty = 0u8;
            for file in 0..8 {
                match self.cells[rank][file] {
                    Some(piece) => {
                        if empty > 0 {
                            out.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push((b'0' + empty) as char);
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::piece::{Color, PieceKind};
    use pretty_assertions::assert_eq;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_board() {
        let board = BoardState::from_fen("8/8/8/8/8/8/8/8").unwrap();
        assert_eq!(board.pieces().count(), 0);
        assert_eq!(board, BoardState::empty());
    }

    #[test]
    fn test_start_position() {
        let board = BoardState::from_fen(START).unwrap();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(
            board.piece_at(sq("e1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.piece_at(sq("d8")),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(
            board.piece_at(sq("g7")),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert_eq!(board.piece_at(sq("e4")), None);
    }

    #[test]
    fn test_trailing_fields_ignored() {
        let full = format!("{START} w KQkq - 0 1");
        assert_eq!(
            BoardState::from_fen(&full).unwrap(),
            BoardState::from_fen(START).unwrap()
        );
    }

    #[test]
    fn test_short_rank_is_malformed() {
        let err = BoardState::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN").unwrap_err();
        assert_eq!(err, FenError::RankWidth { rank: 1, files: 7 });
        assert!(err.to_string().starts_with("malformed FEN"));
    }

    #[test]
    fn test_long_rank_is_malformed() {
        let err = BoardState::from_fen("8/8/8/8/8/8/8/44p").unwrap_err();
        assert_eq!(err, FenError::RankWidth { rank: 1, files: 9 });
    }

    #[test]
    fn test_wrong_rank_count() {
        assert_eq!(
            BoardState::from_fen("8/8/8/8/8/8/8").unwrap_err(),
            FenError::RankCount { found: 7 }
        );
        assert_eq!(
            BoardState::from_fen("8/8/8/8/8/8/8/8/8").unwrap_err(),
            FenError::RankCount { found: 9 }
        );
        assert_eq!(
            BoardState::from_fen("").unwrap_err(),
            FenError::RankCount { found: 1 }
        );
    }

    #[test]
    fn test_unexpected_characters() {
        assert_eq!(
            BoardState::from_fen("8/8/8/8/8/8/8/7x").unwrap_err(),
            FenError::UnexpectedChar { rank: 1, found: 'x' }
        );
        assert_eq!(
            BoardState::from_fen("9/8/8/8/8/8/8/8").unwrap_err(),
            FenError::UnexpectedChar { rank: 8, found: '9' }
        );
        assert_eq!(
            BoardState::from_fen("08/8/8/8/8/8/8/8").unwrap_err(),
            FenError::UnexpectedChar { rank: 8, found: '0' }
        );
    }

    #[test]
    fn test_placement_round_trips() {
        for fen in [
            START,
            "8/8/8/8/8/8/8/8",
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR",
            "4k3/8/8/3pP3/8/8/8/4K2R",
            "k7/7p/8/8/8/8/P7/7K",
        ] {
            assert_eq!(BoardState::from_fen(fen).unwrap().placement(), fen);
        }
    }

    #[test]
    fn test_placement_merges_split_digits() {
        let board = BoardState::from_fen("8/8/8/8/8/8/8/44").unwrap();
        assert_eq!(board.placement(), "8/8/8/8/8/8/8/8");
    }

    #[test]
    fn test_set_and_read_back() {
        let mut board = BoardState::empty();
        let knight = Piece::new(PieceKind::Knight, Color::White);
        board.set(sq("f3"), Some(knight));
        assert_eq!(board.piece_at(sq("f3")), Some(knight));
        assert_eq!(board.placement(), "8/8/8/8/8/5N2/8/8");
    }
}
