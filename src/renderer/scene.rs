//! Board renderer: builds an ordered list of draw operations
//!
//! A [`Renderer`] is bound to one position. Annotations are appended in the
//! order they arrive, and [`Renderer::draw`] turns the whole state into a
//! [`Scene`] without modifying it, so it can be called any number of times.

use crate::board::{
    BoardGeometry, BoardState, FenError, Orientation, Piece, Point, Rect, Square, SquareError,
};
use crate::notation::{Annotation, Diagram};
use crate::stylesheet::Stylesheet;

use super::svg::render_svg;
use super::SvgConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Light,
    Dark,
}

/// One primitive drawing instruction, in final pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Square {
        square: Square,
        cell: Rect,
        shade: Shade,
    },
    Piece {
        square: Square,
        piece: Piece,
        cell: Rect,
    },
    Highlight {
        square: Square,
        cell: Rect,
    },
    Arrow {
        start: Square,
        end: Square,
        from: Point,
        to: Point,
    },
}

/// The ordered draw operations for one board; later ops paint over earlier
/// ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Board side in pixels
    pub size: f64,
    pub ops: Vec<DrawOp>,
}

impl Scene {
    pub fn has_arrows(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, DrawOp::Arrow { .. }))
    }
}

/// Construction options for [`Renderer::new`]
#[derive(Debug, Clone, Default)]
pub struct RendererOptions {
    pub orientation: Orientation,
    pub style: Stylesheet,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    board: BoardState,
    geometry: BoardGeometry,
    annotations: Vec<Annotation>,
    style: Stylesheet,
}

impl Renderer {
    /// Bind a renderer to the position in `fen`.
    pub fn new(fen: &str, options: RendererOptions) -> Result<Self, FenError> {
        let board = BoardState::from_fen(fen)?;
        Ok(Self {
            board,
            geometry: BoardGeometry::new(options.style.board_size, options.orientation),
            annotations: Vec::new(),
            style: options.style,
        })
    }

    /// Build a renderer carrying every annotation of a decoded diagram.
    pub fn from_diagram(diagram: &Diagram, style: Stylesheet) -> Self {
        Self {
            board: diagram.board().clone(),
            geometry: BoardGeometry::new(style.board_size, diagram.orientation()),
            annotations: diagram.annotations().to_vec(),
            style,
        }
    }

    /// Mark a square, e.g. `highlight("g7")`.
    pub fn highlight(&mut self, square: &str) -> Result<&mut Self, SquareError> {
        let square = square.parse()?;
        Ok(self.annotate(Annotation::Highlight(square)))
    }

    /// Draw an arrow between two squares. Nothing is added unless both parse.
    pub fn add_arrow(&mut self, start: &str, end: &str) -> Result<&mut Self, SquareError> {
        let start = start.parse()?;
        let end = end.parse()?;
        Ok(self.annotate(Annotation::Arrow { start, end }))
    }

    /// Append an already validated annotation.
    pub fn annotate(&mut self, annotation: Annotation) -> &mut Self {
        self.annotations.push(annotation);
        self
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn style(&self) -> &Stylesheet {
        &self.style
    }

    /// Produce the scene: 64 squares, then pieces, then annotations in
    /// encounter order.
    pub fn draw(&self) -> Scene {
        let geo = &self.geometry;
        let mut ops = Vec::with_capacity(64 + 32 + self.annotations.len());

        ops.extend(Square::all().map(|square| DrawOp::Square {
            square,
            cell: geo.cell(square),
            shade: if square.is_light() {
                Shade::Light
            } else {
                Shade::Dark
            },
        }));

        ops.extend(self.board.pieces().map(|(square, piece)| DrawOp::Piece {
            square,
            piece,
            cell: geo.cell(square),
        }));

        ops.extend(self.annotations.iter().map(|annotation| match *annotation {
            Annotation::Highlight(square) => DrawOp::Highlight {
                square,
                cell: geo.cell(square),
            },
            Annotation::Arrow { start, end } => DrawOp::Arrow {
                start,
                end,
                from: geo.center(start),
                to: geo.center(end),
            },
        }));

        Scene {
            size: geo.size(),
            ops,
        }
    }

    /// Draw and serialize to SVG with this renderer's stylesheet.
    pub fn to_svg(&self, config: &SvgConfig) -> String {
        render_svg(&self.draw(), config, &self.style)
    }
}
