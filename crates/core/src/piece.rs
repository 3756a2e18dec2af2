//! The falling pair: an axis cell plus a satellite that orbits it.

use crate::board::Board;
use crate::collision::collides;
use crate::types::{Cell, Orientation, Position};

/// One colored cell of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceCell {
    pub pos: Position,
    pub color: Cell,
}

/// Active falling pair
///
/// The satellite always sits at `axis + orientation.offset()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair {
    pub axis: PieceCell,
    pub satellite: PieceCell,
    pub orientation: Orientation,
}

impl Pair {
    /// Orientation of a freshly spawned pair: satellite one row below the axis.
    pub const SPAWN_ORIENTATION: Orientation = Orientation::Down;

    /// Create a pair with the axis at `(column, 0)` and the satellite at `(column, 1)`.
    pub fn spawn(column: i8, axis_color: Cell, satellite_color: Cell) -> Self {
        Self::new(Position::new(column, 0), axis_color, satellite_color, Self::SPAWN_ORIENTATION)
    }

    pub fn new(axis: Position, axis_color: Cell, satellite_color: Cell, orientation: Orientation) -> Self {
        let (dx, dy) = orientation.offset();
        Self {
            axis: PieceCell {
                pos: axis,
                color: axis_color,
            },
            satellite: PieceCell {
                pos: axis.offset(dx, dy),
                color: satellite_color,
            },
            orientation,
        }
    }

    /// Both cell positions, axis first
    pub fn positions(&self) -> [Position; 2] {
        [self.axis.pos, self.satellite.pos]
    }

    /// Both cells, axis first
    pub fn cells(&self) -> [PieceCell; 2] {
        [self.axis, self.satellite]
    }

    /// Satellite offset from the axis
    pub fn satellite_offset(&self) -> (i8, i8) {
        (
            self.satellite.pos.x - self.axis.pos.x,
            self.satellite.pos.y - self.axis.pos.y,
        )
    }

    /// The same pair moved by `(dx, dy)`
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            axis: PieceCell {
                pos: self.axis.pos.offset(dx, dy),
                ..self.axis
            },
            satellite: PieceCell {
                pos: self.satellite.pos.offset(dx, dy),
                ..self.satellite
            },
            orientation: self.orientation,
        }
    }

    /// The pair after one clockwise step of the satellite around the axis
    pub fn rotated_cw(&self) -> Self {
        Self::new(
            self.axis.pos,
            self.axis.color,
            self.satellite.color,
            self.orientation.rotate_cw(),
        )
    }

    /// Check if both cells are at legal positions on the board
    pub fn is_valid(&self, board: &Board) -> bool {
        !collides(board, self.positions())
    }

    /// Check if the pair is resting on something
    pub fn is_grounded(&self, board: &Board) -> bool {
        collides(board, self.translated(0, 1).positions())
    }

    /// Rows the pair can fall before the next step would collide
    pub fn drop_distance(&self, board: &Board) -> i8 {
        let mut distance = 0;
        while !collides(board, self.translated(0, distance + 1).positions()) {
            distance += 1;
        }
        distance
    }
}
