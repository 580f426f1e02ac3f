use serde::{Deserialize, Serialize};

use crate::PieceCollisionError;

use super::{
    board::Board,
    shape::{Shape, ShapeKind},
};

/// The falling piece: its kind, current orientation, and anchor.
///
/// Pieces are values. Movement and rotation return new `Piece` instances,
/// which are only committed after the board accepts them.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PiecePosition, ShapeKind};
///
/// let board = Board::new(10, 20).unwrap();
/// let piece = Piece::new(ShapeKind::T, PiecePosition::SPAWN);
///
/// let moved = piece.left().within(&board).unwrap();
/// assert_eq!(moved.position(), PiecePosition::new(2, 0));
///
/// // Rotation keeps the anchor; the upright line occupies column 6.
/// let upright = Piece::new(ShapeKind::I, PiecePosition::SPAWN).rotated_clockwise();
/// assert!(upright.within(&board).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    shape: Shape,
    position: PiecePosition,
}

impl Piece {
    /// Creates a piece in its catalog orientation at `position`.
    #[must_use]
    pub fn new(kind: ShapeKind, position: PiecePosition) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            position,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.moved_to(self.position.left())
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.moved_to(self.position.right())
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.moved_to(self.position.down())
    }

    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        Self {
            shape: self.shape.rotated_clockwise(),
            ..*self
        }
    }

    #[must_use]
    pub fn rotated_counter_clockwise(&self) -> Self {
        Self {
            shape: self.shape.rotated_counter_clockwise(),
            ..*self
        }
    }

    /// Checks the piece against `board` without modifying it.
    #[must_use]
    pub fn fits(&self, board: &Board) -> bool {
        board.is_placement_valid(&self.shape, self.position.x, self.position.y)
    }

    /// Returns the piece if it fits on `board`.
    ///
    /// Use on a candidate produced by a move or rotation; on error the
    /// candidate is discarded and the previous piece stays in effect.
    pub fn within(self, board: &Board) -> Result<Self, PieceCollisionError> {
        if self.fits(board) {
            Ok(self)
        } else {
            Err(PieceCollisionError)
        }
    }

    pub(crate) fn stamp_onto(&self, board: &mut Board) {
        board.stamp(&self.shape, self.position.x, self.position.y);
    }

    pub(crate) fn unstamp_from(&self, board: &mut Board) {
        board.unstamp(&self.shape, self.position.x, self.position.y);
    }

    fn moved_to(&self, position: PiecePosition) -> Self {
        Self { position, ..*self }
    }
}

/// Anchor of a piece: the board coordinate of its bounding box's top-left corner.
///
/// - X increases rightward (columns)
/// - Y increases downward (rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PiecePosition {
    pub x: i32,
    pub y: i32,
}

impl Default for PiecePosition {
    fn default() -> Self {
        Self::SPAWN
    }
}

impl PiecePosition {
    /// Where new pieces appear: column 3 of the top row.
    pub const SPAWN: Self = Self::new(3, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn left(self) -> Self {
        Self::new(self.x - 1, self.y)
    }

    #[must_use]
    pub const fn right(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        Self::new(self.x, self.y + 1)
    }
}
