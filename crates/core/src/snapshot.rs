use serde::{Deserialize, Serialize};

use crate::piece::Pair;
use crate::types::{Cell, ChainPhase, Orientation, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub axis: Position,
    pub axis_color: Cell,
    pub satellite: Position,
    pub satellite_color: Cell,
    pub orientation: Orientation,
}

impl From<Pair> for ActiveSnapshot {
    fn from(value: Pair) -> Self {
        Self {
            axis: value.axis.pos,
            axis_color: value.axis.color,
            satellite: value.satellite.pos,
            satellite_color: value.satellite.color,
            orientation: value.orientation,
        }
    }
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Rows top to bottom
    pub board: Vec<Vec<Cell>>,
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<ActiveSnapshot>,
    pub next: (Cell, Cell),
    pub score: u32,
    pub chain: u32,
    /// Cells shown as vanishing during `SettlingPause`
    pub clearing: Vec<Position>,
    pub cleared_count: u32,
    pub phase: ChainPhase,
    pub dropping: bool,
    pub paused: bool,
    pub game_over: bool,
    pub episode_id: u32,
    pub piece_id: u32,
    pub seed: u32,
}

impl GameSnapshot {
    /// Whether movement commands would currently be accepted
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused && !self.dropping && self.active.is_some()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            board: Vec::new(),
            active: None,
            ghost: None,
            next: (0, 0),
            score: 0,
            chain: 0,
            clearing: Vec::new(),
            cleared_count: 0,
            phase: ChainPhase::Idle,
            dropping: false,
            paused: false,
            game_over: false,
            episode_id: 0,
            piece_id: 0,
            seed: 0,
        }
    }
}
