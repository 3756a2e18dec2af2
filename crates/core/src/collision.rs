//! Collision checks for candidate placements.
//!
//! A cell is illegal when its column is off the board, its row is below the
//! bottom row, or it sits on an occupied cell. Cells above the board (negative
//! rows) are only checked against the column bounds, so a pair may hang
//! partially above the visible grid.

use crate::board::Board;
use crate::types::Position;

/// Whether a single cell would collide with the walls, floor or stack.
#[inline]
pub fn cell_collides(board: &Board, pos: Position) -> bool {
    if pos.x < 0 || pos.x as u8 >= board.width() {
        return true;
    }
    if pos.y >= 0 && pos.y as u8 >= board.height() {
        return true;
    }
    pos.y >= 0 && board.is_occupied(pos.x, pos.y)
}

/// Whether any of `cells` collides. No side effects.
pub fn collides<I>(board: &Board, cells: I) -> bool
where
    I: IntoIterator<Item = Position>,
{
    cells.into_iter().any(|pos| cell_collides(board, pos))
}

/// Inverse of [`collides`].
pub fn fits<I>(board: &Board, cells: I) -> bool
where
    I: IntoIterator<Item = Position>,
{
    !collides(board, cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i8, y: i8) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn walls_and_floor_collide() {
        let board = Board::new(6, 12, 5);
        assert!(collides(&board, [p(-1, 0)]));
        assert!(collides(&board, [p(6, 0)]));
        assert!(collides(&board, [p(0, 12)]));
        assert!(!collides(&board, [p(0, 11), p(5, 0)]));
    }

    #[test]
    fn occupied_cells_collide_only_on_board() {
        let mut board = Board::new(6, 12, 5);
        board.set(2, 0, 3);
        assert!(collides(&board, [p(2, 0)]));
        assert!(!collides(&board, [p(2, -1)]));
        assert!(fits(&board, [p(2, -1), p(2, -2)]));
    }

    #[test]
    fn negative_rows_still_check_columns() {
        let board = Board::new(6, 12, 5);
        assert!(collides(&board, [p(-1, -1)]));
        assert!(collides(&board, [p(6, -3)]));
    }

    #[test]
    fn empty_input_fits() {
        let board = Board::new(6, 12, 5);
        assert!(fits(&board, std::iter::empty()));
    }
}
