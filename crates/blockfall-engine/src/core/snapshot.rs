use std::fmt;

use super::board::Cell;

/// Read-only copy of the board handed to renderers.
///
/// Cells are stored row-major. Taking a snapshot has no effect on the game.
///
/// The `Display` implementation draws one row per line, `#` for filled cells
/// and `.` for empty ones:
///
/// ```
/// use blockfall_engine::Board;
///
/// let mut board = Board::new(3, 2).unwrap();
/// board.fill_cell(1, 1);
///
/// assert_eq!(board.snapshot().to_string(), ". . .\n. # .");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl BoardSnapshot {
    pub(crate) fn new(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, cell) in row.iter().enumerate() {
                if x > 0 {
                    f.write_str(" ")?;
                }
                f.write_str(if cell.is_filled() { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}
