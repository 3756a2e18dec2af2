//! Group finder - connected same-color regions.
//!
//! Scans the board in row-major order and flood fills each unvisited occupied
//! cell with an explicit worklist. The visited set lives only for the duration
//! of one call, so the function is side-effect free. Regions smaller than the
//! threshold are dropped.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{Cell, Position, EMPTY};

/// A maximal 4-connected region of one color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub color: Cell,
    /// Cells in visit order
    pub cells: Vec<Position>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }
}

/// On-board orthogonal neighbours of `pos`.
pub fn neighbors(board: &Board, pos: Position) -> ArrayVec<Position, 4> {
    let mut out = ArrayVec::new();
    for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
        let next = pos.offset(dx, dy);
        if board.in_bounds(next.x, next.y) {
            out.push(next);
        }
    }
    out
}

/// Find every region of at least `threshold` same-colored cells.
pub fn find_groups(board: &Board, threshold: usize) -> Vec<Group> {
    let width = board.width() as usize;
    let mut visited = vec![false; board.cells().len()];
    let mut stack: Vec<Position> = Vec::new();
    let mut groups = Vec::new();

    for y in 0..board.height() as i8 {
        for x in 0..board.width() as i8 {
            let idx = y as usize * width + x as usize;
            let color = board.cells()[idx];
            if visited[idx] || color == EMPTY {
                continue;
            }

            visited[idx] = true;
            stack.push(Position::new(x, y));
            let mut cells = Vec::new();

            while let Some(pos) = stack.pop() {
                cells.push(pos);
                for next in neighbors(board, pos) {
                    let ni = next.y as usize * width + next.x as usize;
                    if !visited[ni] && board.cells()[ni] == color {
                        visited[ni] = true;
                        stack.push(next);
                    }
                }
            }

            if cells.len() >= threshold {
                groups.push(Group { color, cells });
            }
        }
    }

    groups
}
