//! Mapping between board squares and pixel cells

use super::square::Square;

/// Default board side in pixels.
pub const DEFAULT_BOARD_SIZE: f64 = 320.0;

/// Which side of the board sits at the bottom of the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    White,
    Black,
}

impl Orientation {
    /// Parse the notation keyword (`white` / `black`).
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "white" => Some(Orientation::White),
            "black" => Some(Orientation::Black),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::White => "white",
            Orientation::Black => "black",
        }
    }
}

/// A 2D point in image coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open containment: the right and bottom edges belong to the
    /// neighbouring cell.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// True when the interiors overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// The single square-to-pixel mapping every visual layer goes through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    size: f64,
    orientation: Orientation,
}

impl BoardGeometry {
    pub fn new(size: f64, orientation: Orientation) -> Self {
        Self { size, orientation }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn cell_size(&self) -> f64 {
        self.size / 8.0
    }

    /// Grid column and row (0..8, from the top-left) of a square.
    fn grid_position(&self, square: Square) -> (u8, u8) {
        let (file, rank) = (square.file(), square.rank());
        match self.orientation {
            Orientation::White => (file, 7 - rank),
            Orientation::Black => (7 - file, rank),
        }
    }

    /// Top-left pixel of a square's cell.
    pub fn origin(&self, square: Square) -> Point {
        let (col, row) = self.grid_position(square);
        let cell = self.cell_size();
        Point::new(col as f64 * cell, row as f64 * cell)
    }

    pub fn cell(&self, square: Square) -> Rect {
        let origin = self.origin(square);
        let cell = self.cell_size();
        Rect::new(origin.x, origin.y, cell, cell)
    }

    pub fn center(&self, square: Square) -> Point {
        self.cell(square).center()
    }

    /// Inverse mapping: which square's cell contains a pixel.
    pub fn square_at(&self, point: Point) -> Option<Square> {
        if !(0.0..self.size).contains(&point.x) || !(0.0..self.size).contains(&point.y) {
            return None;
        }
        let cell = self.cell_size();
        let col = ((point.x / cell) as u8).min(7);
        let row = ((point.y / cell) as u8).min(7);
        match self.orientation {
            Orientation::White => Square::new(col, 7 - row),
            Orientation::Black => Square::new(7 - col, row),
        }
    }
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE, Orientation::White)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_white_corners() {
        let geo = BoardGeometry::new(320.0, Orientation::White);
        assert_eq!(geo.origin(sq("a8")), Point::new(0.0, 0.0));
        assert_eq!(geo.origin(sq("h8")), Point::new(280.0, 0.0));
        assert_eq!(geo.origin(sq("a1")), Point::new(0.0, 280.0));
        assert_eq!(geo.origin(sq("h1")), Point::new(280.0, 280.0));
    }

    #[test]
    fn test_black_corners() {
        let geo = BoardGeometry::new(320.0, Orientation::Black);
        assert_eq!(geo.origin(sq("h1")), Point::new(0.0, 0.0));
        assert_eq!(geo.origin(sq("a1")), Point::new(280.0, 0.0));
        assert_eq!(geo.origin(sq("h8")), Point::new(0.0, 280.0));
        assert_eq!(geo.origin(sq("a8")), Point::new(280.0, 280.0));
    }

    #[test]
    fn test_centers() {
        let geo = BoardGeometry::default();
        assert_eq!(geo.center(sq("e2")), Point::new(180.0, 260.0));
        assert_eq!(geo.center(sq("e4")), Point::new(180.0, 180.0));
    }

    #[test]
    fn test_cells_are_disjoint_and_cover_board() {
        for orientation in [Orientation::White, Orientation::Black] {
            let geo = BoardGeometry::new(320.0, orientation);
            let cells: Vec<_> = Square::all().map(|s| geo.cell(s)).collect();
            for (i, a) in cells.iter().enumerate() {
                for b in &cells[i + 1..] {
                    assert!(!a.intersects(b));
                }
            }
            let area: f64 = cells.iter().map(|c| c.width * c.height).sum();
            assert_eq!(area, 320.0 * 320.0);
        }
    }

    #[test]
    fn test_black_is_rotation_of_white() {
        let white = BoardGeometry::new(320.0, Orientation::White);
        let black = BoardGeometry::new(320.0, Orientation::Black);
        for square in Square::all() {
            let w = white.center(square);
            let b = black.center(square);
            assert_eq!(b, Point::new(320.0 - w.x, 320.0 - w.y));
        }
    }

    #[test]
    fn test_square_at_inverts_cell() {
        for orientation in [Orientation::White, Orientation::Black] {
            let geo = BoardGeometry::new(320.0, orientation);
            for square in Square::all() {
                assert_eq!(geo.square_at(geo.center(square)), Some(square));
                assert_eq!(geo.square_at(geo.origin(square)), Some(square));
            }
        }
    }

    #[test]
    fn test_square_at_outside() {
        let geo = BoardGeometry::default();
        assert_eq!(geo.square_at(Point::new(-1.0, 10.0)), None);
        assert_eq!(geo.square_at(Point::new(320.0, 10.0)), None);
    }

    #[test]
    fn test_orientation_keywords() {
        assert_eq!(Orientation::from_keyword("white"), Some(Orientation::White));
        assert_eq!(Orientation::from_keyword("black"), Some(Orientation::Black));
        assert_eq!(Orientation::from_keyword("purple"), None);
        assert_eq!(Orientation::from_keyword("White"), None);
        assert_eq!(Orientation::Black.as_str(), "black");
    }
}
