//! Placement predicate shared by movement, rotation and drops.

use crate::board::Board;
use crate::pieces::get_shape;
use crate::types::{Coord, Rotation, Shape};

/// Can `shape` in `rotation` sit with its anchor at `anchor`?
///
/// Fails when any of the four cells is off the grid, or lands on a locked
/// cell that is not part of `own` (the piece's footprint before the move).
/// Projection-only cells never block. Anchors whose offsets overflow `i8`
/// are off the grid.
pub fn can_place(
    board: &Board,
    shape: Shape,
    rotation: Rotation,
    anchor: Coord,
    own: &[Coord],
) -> bool {
    get_shape(shape, rotation).iter().all(|&(dr, dc)| {
        let (Some(row), Some(col)) = (anchor.0.checked_add(dr), anchor.1.checked_add(dc)) else {
            return false;
        };
        if !board.contains(row, col) {
            return false;
        }
        !board.is_placed(row, col) || own.contains(&(row, col))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::absolute_cells;
    use crate::types::Rgb;

    const GRAY: Rgb = Rgb::new(90, 90, 90);

    #[test]
    fn rejects_cells_off_the_grid() {
        let board = Board::new();
        // T north spans cols anchor-1..=anchor+1 and rows anchor-1..=anchor.
        assert!(can_place(&board, Shape::T, Rotation::North, (1, 1), &[]));
        assert!(!can_place(&board, Shape::T, Rotation::North, (1, 0), &[]));
        assert!(!can_place(&board, Shape::T, Rotation::North, (0, 4), &[]));
        assert!(!can_place(&board, Shape::T, Rotation::North, (23, 4), &[]));
        assert!(!can_place(&board, Shape::T, Rotation::North, (5, 9), &[]));
    }

    #[test]
    fn anchors_at_the_i8_limit_are_rejected() {
        let board = Board::new();
        assert!(!can_place(&board, Shape::T, Rotation::East, (127, 0), &[]));
        assert!(!can_place(&board, Shape::I, Rotation::North, (20, 126), &[]));
        assert!(!can_place(&board, Shape::T, Rotation::North, (-128, 4), &[]));
    }

    #[test]
    fn locked_cells_block() {
        let mut board = Board::new();
        board.place(10, 4, GRAY).unwrap();
        assert!(!can_place(&board, Shape::O, Rotation::North, (10, 4), &[]));
        assert!(can_place(&board, Shape::O, Rotation::North, (9, 4), &[]));
    }

    #[test]
    fn own_footprint_never_blocks() {
        let mut board = Board::new();
        let own = absolute_cells(Shape::S, Rotation::North, (10, 4));
        for &(row, col) in &own {
            board.place(row, col, GRAY).unwrap();
        }
        assert!(can_place(&board, Shape::S, Rotation::North, (10, 4), &own));
        assert!(!can_place(&board, Shape::S, Rotation::North, (10, 4), &[]));
    }

    #[test]
    fn projected_cells_do_not_block() {
        let mut board = Board::new();
        let cells = absolute_cells(Shape::I, Rotation::North, (12, 4));
        board.project_current(&cells, GRAY).unwrap();
        assert!(can_place(&board, Shape::I, Rotation::East, (12, 4), &[]));
    }
}
