//! Gravity resolution - per-column compaction.
//!
//! Every column is compacted toward the bottom row with a two-pointer sweep,
//! keeping the top-to-bottom order of its occupied cells. Empties collect at
//! the top. Applying it twice is the same as applying it once.

use crate::board::Board;
use crate::types::EMPTY;

/// Return a compacted copy of `board`. The input is not touched.
pub fn compacted(board: &Board) -> Board {
    let mut out = board.clone();
    compact_in_place(&mut out);
    out
}

/// Compact `board` in place; the caller only observes the finished grid.
pub(crate) fn compact_in_place(board: &mut Board) {
    let height = board.height() as i8;
    for x in 0..board.width() as i8 {
        // Scan from bottom to top, moving each occupied cell to the write row.
        let mut write_y = height - 1;
        for read_y in (0..height).rev() {
            let Some(cell) = board.get(x, read_y) else {
                continue;
            };
            if cell == EMPTY {
                continue;
            }
            if write_y != read_y {
                board.set(x, write_y, cell);
                board.set(x, read_y, EMPTY);
            }
            write_y -= 1;
        }
    }
}

/// Whether no occupied cell has an empty cell below it.
pub fn is_settled(board: &Board) -> bool {
    let height = board.height() as i8;
    (0..board.width() as i8).all(|x| {
        let mut seen_filled = false;
        (0..height).all(|y| {
            let filled = board.is_occupied(x, y);
            // Once a filled cell is seen going down, no empty may follow.
            let ok = !(seen_filled && !filled);
            seen_filled |= filled;
            ok
        })
    })
}
