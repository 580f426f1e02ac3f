use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Side length of the bounding box every shape and rotation fits in.
pub const SHAPE_SIZE: usize = 4;

/// One orientation of a piece as a 4×4 occupancy mask.
///
/// `cells[row][col]` is `true` where the piece has a block. Rotations always
/// stay inside the same 4×4 box, so a piece keeps its anchor while rotating.
///
/// # Example
///
/// ```
/// use blockfall_engine::ShapeKind;
///
/// let line = ShapeKind::I.shape();
/// let upright = line.rotated_clockwise();
///
/// assert!(upright.is_filled(0, 3));
/// assert!(upright.is_filled(3, 3));
/// assert_eq!(upright.rotated_counter_clockwise(), line);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    cells: [[bool; SHAPE_SIZE]; SHAPE_SIZE],
}

impl Shape {
    pub const EMPTY: Self = Self::new([[false; SHAPE_SIZE]; SHAPE_SIZE]);

    #[must_use]
    pub const fn new(cells: [[bool; SHAPE_SIZE]; SHAPE_SIZE]) -> Self {
        Self { cells }
    }

    /// Returns whether the cell at `(row, col)` of the bounding box is occupied.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not less than [`SHAPE_SIZE`].
    #[must_use]
    pub const fn is_filled(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    /// Returns the occupied cells as `(dx, dy)` offsets from the anchor.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(dx, &filled)| filled.then_some((dx, dy)))
        })
    }

    /// Rotates the mask 90° clockwise: `rotated[j][3 - i] = cells[i][j]`.
    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        let mut rotated = [[false; SHAPE_SIZE]; SHAPE_SIZE];
        let mut i = 0;
        while i < SHAPE_SIZE {
            let mut j = 0;
            while j < SHAPE_SIZE {
                rotated[j][SHAPE_SIZE - 1 - i] = self.cells[i][j];
                j += 1;
            }
            i += 1;
        }
        Self::new(rotated)
    }

    /// Rotates the mask 90° counterclockwise: `rotated[3 - j][i] = cells[i][j]`.
    #[must_use]
    pub const fn rotated_counter_clockwise(&self) -> Self {
        let mut rotated = [[false; SHAPE_SIZE]; SHAPE_SIZE];
        let mut i = 0;
        while i < SHAPE_SIZE {
            let mut j = 0;
            while j < SHAPE_SIZE {
                rotated[SHAPE_SIZE - 1 - j][i] = self.cells[i][j];
                j += 1;
            }
            i += 1;
        }
        Self::new(rotated)
    }
}

/// Enum representing the type of piece.
///
/// Discriminants are the catalog indices used by [`shape_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// Line piece.
    I = 0,
    /// Square piece.
    O = 1,
    /// L-piece.
    L = 2,
    /// Reverse L-piece.
    J = 3,
    /// S-piece.
    S = 4,
    /// Z-piece.
    Z = 5,
    /// T-piece.
    T = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::from_index(rng.random_range(0..ShapeKind::LEN))
    }
}

impl ShapeKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::T,
    ];

    /// Returns the kind stored at `index` in the catalog.
    ///
    /// # Panics
    ///
    /// Panics if `index >= ShapeKind::LEN`.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the spawn orientation of this piece.
    #[must_use]
    pub const fn shape(self) -> Shape {
        SHAPES[self as usize]
    }
}

/// Returns the number of distinct piece types in the catalog.
#[must_use]
pub const fn shape_count() -> usize {
    ShapeKind::LEN
}

/// Returns the catalog shape at `index`.
///
/// # Panics
///
/// Panics if `index >= shape_count()`. An out-of-range index is a caller bug
/// and is never clamped.
#[must_use]
pub fn shape_at(index: usize) -> &'static Shape {
    &SHAPES[index]
}

const SHAPES: [Shape; ShapeKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    [
        // I-piece
        Shape::new([[C, C, C, C], EEEE, EEEE, EEEE]),
        // O-piece
        Shape::new([[E, C, C, E], [E, C, C, E], EEEE, EEEE]),
        // L-piece
        Shape::new([[C, E, E, E], [C, E, E, E], [C, C, E, E], EEEE]),
        // J-piece
        Shape::new([[E, C, E, E], [E, C, E, E], [C, C, E, E], EEEE]),
        // S-piece
        Shape::new([[E, E, C, C], [E, C, C, E], EEEE, EEEE]),
        // Z-piece
        Shape::new([[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
        // T-piece
        Shape::new([[C, C, C, E], [E, C, E, E], EEEE, EEEE]),
    ]
};
