use serde::{Deserialize, Serialize};

use crate::BoardSizeError;

use super::{shape::Shape, snapshot::BoardSnapshot};

/// A single cell of the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, derive_more::IsVariant,
)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty,
    Filled,
}

/// Grid of committed cells.
///
/// `Board` is the single authority on collisions: every movement, rotation,
/// and gravity step is accepted only if [`Board::is_placement_valid`] holds.
/// Coordinates are `(x, y)` with `x` the column and `y` the row, `(0, 0)` at
/// the top-left. Anchors are signed because a 4×4 bounding box may hang over
/// the left or top edge as long as its filled cells do not.
///
/// The board does not know about the falling piece. The session stamps the
/// piece in and erases it again around every tick.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, ShapeKind};
///
/// let mut board = Board::new(10, 20).unwrap();
/// let line = ShapeKind::I.shape();
///
/// assert!(board.is_placement_valid(&line, 3, 19));
/// assert!(!board.is_placement_valid(&line, 7, 19));
///
/// board.stamp(&line, 3, 19);
/// assert!(!board.is_placement_valid(&line, 0, 19));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl Board {
    pub const DEFAULT_WIDTH: usize = 10;
    pub const DEFAULT_HEIGHT: usize = 20;

    /// Creates an empty board.
    ///
    /// Both dimensions must be positive.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardSizeError> {
        if width == 0 || height == 0 {
            return Err(BoardSizeError { width, height });
        }
        Ok(Self {
            width,
            height,
            rows: vec![vec![Cell::Empty; width]; height],
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at `(x, y)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y)?.get(x).copied()
    }

    /// Marks a single cell as filled.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the board.
    pub fn fill_cell(&mut self, x: usize, y: usize) {
        self.rows[y][x] = Cell::Filled;
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y].iter().all(Cell::is_filled)
    }

    /// Checks whether `shape` anchored at `(x, y)` fits on the board.
    ///
    /// Every filled cell of the shape must land inside the board on an empty
    /// cell. A shape without filled cells always fits.
    #[must_use]
    pub fn is_placement_valid(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape.filled_cells().all(|(dx, dy)| {
            self.position(x, y, dx, dy)
                .is_some_and(|(bx, by)| self.rows[by][bx].is_empty())
        })
    }

    /// Fills every cell covered by `shape` anchored at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if a filled cell of the shape falls outside the board. Callers
    /// must check [`Self::is_placement_valid`] first.
    pub fn stamp(&mut self, shape: &Shape, x: i32, y: i32) {
        debug_assert!(
            self.is_placement_valid(shape, x, y),
            "stamping an invalid placement at ({x}, {y})"
        );
        for (dx, dy) in shape.filled_cells() {
            let (bx, by) = self
                .position(x, y, dx, dy)
                .expect("stamped cell must lie inside the board");
            self.rows[by][bx] = Cell::Filled;
        }
    }

    /// Empties every cell covered by `shape` anchored at `(x, y)`.
    ///
    /// Cells that fall outside the board are skipped.
    pub fn unstamp(&mut self, shape: &Shape, x: i32, y: i32) {
        for (dx, dy) in shape.filled_cells() {
            if let Some((bx, by)) = self.position(x, y, dx, dy) {
                self.rows[by][bx] = Cell::Empty;
            }
        }
    }

    /// Removes full rows and returns how many were removed.
    ///
    /// Rows are scanned bottom to top. Each full row is dropped and an empty
    /// row is inserted at the top; the same index is then examined again,
    /// since it now holds the row that used to sit above.
    pub fn compact_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height;
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.rows.remove(y - 1);
                self.rows.insert(0, vec![Cell::Empty; self.width]);
                cleared += 1;
                continue;
            }
            y -= 1;
        }
        cleared
    }

    /// Copies the current grid for a renderer.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::new(
            self.width,
            self.height,
            self.rows.iter().flatten().copied().collect(),
        )
    }

    fn position(&self, x: i32, y: i32, dx: usize, dy: usize) -> Option<(usize, usize)> {
        Some((
            offset(x, dx, self.width)?,
            offset(y, dy, self.height)?,
        ))
    }
}

fn offset(anchor: i32, delta: usize, limit: usize) -> Option<usize> {
    let delta = i32::try_from(delta).ok()?;
    let pos = usize::try_from(anchor.checked_add(delta)?).ok()?;
    (pos < limit).then_some(pos)
}
