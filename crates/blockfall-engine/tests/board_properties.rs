use blockfall_engine::{Board, Cell, SHAPE_SIZE, Shape};
use proptest::prelude::*;

/// Any 4×4 mask, bit `row * 4 + col` set where the cell is filled.
fn shape() -> impl Strategy<Value = Shape> {
    any::<u16>().prop_map(|mask| {
        let mut cells = [[false; SHAPE_SIZE]; SHAPE_SIZE];
        for (row, cells_row) in cells.iter_mut().enumerate() {
            for (col, cell) in cells_row.iter_mut().enumerate() {
                *cell = mask & (1 << (row * SHAPE_SIZE + col)) != 0;
            }
        }
        Shape::new(cells)
    })
}

/// Boards from 1×1 up to 12×24 with roughly a quarter of the cells filled.
fn board() -> impl Strategy<Value = Board> {
    (1_usize..=12, 1_usize..=24)
        .prop_flat_map(|(width, height)| {
            (
                Just(width),
                Just(height),
                prop::collection::vec(prop::bool::weighted(0.25), width * height),
            )
        })
        .prop_map(|(width, height, filled)| {
            let mut board = Board::new(width, height).unwrap();
            for (i, _) in filled.iter().enumerate().filter(|(_, f)| **f) {
                board.fill_cell(i % width, i / width);
            }
            board
        })
}

fn anchor() -> impl Strategy<Value = (i32, i32)> {
    (-5_i32..16, -5_i32..28)
}

/// Board coordinates of every filled cell of `shape` at `(x, y)`, or `None`
/// for cells left of or above the board.
fn landing_cells(shape: &Shape, x: i32, y: i32) -> Vec<Option<(usize, usize)>> {
    shape
        .filled_cells()
        .map(|(dx, dy)| {
            let bx = usize::try_from(x + i32::try_from(dx).unwrap()).ok()?;
            let by = usize::try_from(y + i32::try_from(dy).unwrap()).ok()?;
            Some((bx, by))
        })
        .collect()
}

/// Keeps only the cells of `shape` that land in bounds on empty cells.
fn fitting_part(board: &Board, shape: &Shape, x: i32, y: i32) -> Shape {
    let mut cells = [[false; SHAPE_SIZE]; SHAPE_SIZE];
    for (dx, dy) in shape.filled_cells() {
        let bx = usize::try_from(x + i32::try_from(dx).unwrap()).ok();
        let by = usize::try_from(y + i32::try_from(dy).unwrap()).ok();
        if let (Some(bx), Some(by)) = (bx, by) {
            cells[dy][dx] = board.cell(bx, by) == Some(Cell::Empty);
        }
    }
    Shape::new(cells)
}

proptest! {
    #[test]
    fn test_placement_valid_iff_every_cell_lands_in_bounds_on_empty(
        board in board(),
        shape in shape(),
        (x, y) in anchor(),
    ) {
        let expected = landing_cells(&shape, x, y)
            .into_iter()
            .all(|pos| pos.and_then(|(bx, by)| board.cell(bx, by)) == Some(Cell::Empty));
        prop_assert_eq!(board.is_placement_valid(&shape, x, y), expected);
    }

    #[test]
    fn test_stamp_then_unstamp_restores_board(
        board in board(),
        shape in shape(),
        (x, y) in anchor(),
    ) {
        let shape = fitting_part(&board, &shape, x, y);
        prop_assert!(board.is_placement_valid(&shape, x, y));

        let mut stamped = board.clone();
        stamped.stamp(&shape, x, y);
        for pos in landing_cells(&shape, x, y) {
            let (bx, by) = pos.unwrap();
            prop_assert_eq!(stamped.cell(bx, by), Some(Cell::Filled));
        }

        stamped.unstamp(&shape, x, y);
        prop_assert_eq!(stamped, board);
    }

    #[test]
    fn test_four_clockwise_rotations_are_identity(shape in shape()) {
        let rotated = shape
            .rotated_clockwise()
            .rotated_clockwise()
            .rotated_clockwise()
            .rotated_clockwise();
        prop_assert_eq!(rotated, shape);
    }

    #[test]
    fn test_counter_clockwise_undoes_clockwise(shape in shape()) {
        prop_assert_eq!(shape.rotated_clockwise().rotated_counter_clockwise(), shape);
        prop_assert_eq!(shape.rotated_counter_clockwise().rotated_clockwise(), shape);
    }

    #[test]
    fn test_rotation_preserves_cell_count(shape in shape()) {
        let count = shape.filled_cells().count();
        prop_assert_eq!(shape.rotated_clockwise().filled_cells().count(), count);
        prop_assert_eq!(shape.rotated_counter_clockwise().filled_cells().count(), count);
    }
}
