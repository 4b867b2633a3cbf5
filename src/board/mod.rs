//! Board model: squares, pieces, FEN placement and pixel geometry

pub mod geometry;
pub mod piece;
pub mod position;
pub mod square;

pub use geometry::{BoardGeometry, Orientation, Point, Rect, DEFAULT_BOARD_SIZE};
pub use piece::{Color, Piece, PieceKind};
pub use position::{BoardState, FenError};
pub use square::{Square, SquareError};
