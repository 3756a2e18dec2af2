//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data, usable from the core logic, a presentation layer,
//! or a headless driver alike.
//!
//! # Board Dimensions
//!
//! Reference playfield:
//!
//! - **Width**: 6 columns (indexed 0-5)
//! - **Height**: 12 rows (indexed 0-11, row 0 is the top)
//! - **Spawn column**: 2 (axis at row 0, satellite at row 1)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Suggested fixed timestep (~60 FPS) |
//! | `GRAVITY_INTERVAL_MS` | 800 | Automatic move-down period |
//! | `LOCK_SETTLE_MS` | 200 | Delay between lock and the first resolving pass |
//! | `CLEAR_ANIMATION_MS` | 400 | Window during which a removal set is shown |
//! | `CHAIN_SETTLE_MS` | 300 | Delay between compaction and the next resolving pass |
//!
//! # Examples
//!
//! ```
//! use puyo_engine_types::{Command, Orientation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let o = Orientation::Down;
//! assert_eq!(o.rotate_cw(), Orientation::Left);
//! assert_eq!(o.offset(), (0, 1));
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 6);
//! assert_eq!(BOARD_HEIGHT, 12);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (6 columns)
pub const BOARD_WIDTH: u8 = 6;

/// Board height in cells (12 rows)
pub const BOARD_HEIGHT: u8 = 12;

/// Number of distinct colors in the palette
pub const COLOR_COUNT: u8 = 5;

/// Minimum group size that gets removed
pub const CLEAR_THRESHOLD: usize = 4;

/// Column where new pairs appear
pub const SPAWN_COLUMN: i8 = 2;

/// Points per removed cell before the chain bonus
pub const POINTS_PER_CELL: u32 = 10;

/// Suggested fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Automatic move-down period
pub const GRAVITY_INTERVAL_MS: u32 = 800;

/// Delay between a lock and the first resolving pass
pub const LOCK_SETTLE_MS: u32 = 200;

/// How long a removal set stays visible before it is zeroed out
pub const CLEAR_ANIMATION_MS: u32 = 400;

/// Delay between a post-clear compaction and the next resolving pass
pub const CHAIN_SETTLE_MS: u32 = 300;

/// A cell on the game board
///
/// - `0` ([`EMPTY`]): empty cell
/// - `1..=K`: one of the K palette colors
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// Column/row coordinate. Row 0 is the top row; negative rows sit above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Translate by a column/row delta
    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Where the satellite sits relative to the axis
///
/// The rotation cycle goes: Up → Right → Down → Left → Up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use puyo_engine_types::Orientation;
    ///
    /// assert_eq!(Orientation::Up.rotate_cw(), Orientation::Right);
    /// assert_eq!(Orientation::Right.rotate_cw(), Orientation::Down);
    /// assert_eq!(Orientation::Down.rotate_cw(), Orientation::Left);
    /// assert_eq!(Orientation::Left.rotate_cw(), Orientation::Up);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Orientation::Up => Orientation::Right,
            Orientation::Right => Orientation::Down,
            Orientation::Down => Orientation::Left,
            Orientation::Left => Orientation::Up,
        }
    }

    /// Rotation index 0-3
    pub fn index(&self) -> u8 {
        match self {
            Orientation::Up => 0,
            Orientation::Right => 1,
            Orientation::Down => 2,
            Orientation::Left => 3,
        }
    }

    /// Inverse of [`Orientation::index`], taken modulo 4
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Orientation::Up,
            1 => Orientation::Right,
            2 => Orientation::Down,
            _ => Orientation::Left,
        }
    }

    /// Satellite offset `(dx, dy)` from the axis
    pub fn offset(&self) -> (i8, i8) {
        match self {
            Orientation::Up => (0, -1),
            Orientation::Right => (1, 0),
            Orientation::Down => (0, 1),
            Orientation::Left => (-1, 0),
        }
    }
}

/// Player commands that can be applied to a session
///
/// These come from whatever input binding the presentation layer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Move the pair one column left
    MoveLeft,
    /// Move the pair one column right
    MoveRight,
    /// Move the pair one row down, locking it if it cannot move
    MoveDown,
    /// Rotate the satellite clockwise around the axis
    Rotate,
    /// Drop to the lowest legal row and lock
    HardDrop,
    /// Toggle pause state
    Pause,
    /// Discard the session and start over
    Reset,
}

impl Command {
    /// Parse command from string
    ///
    /// # Examples
    ///
    /// ```
    /// use puyo_engine_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "movedown" => Some(Command::MoveDown),
            "rotate" => Some(Command::Rotate),
            "harddrop" => Some(Command::HardDrop),
            "pause" => Some(Command::Pause),
            "reset" => Some(Command::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::MoveDown => "moveDown",
            Command::Rotate => "rotate",
            Command::HardDrop => "hardDrop",
            Command::Pause => "pause",
            Command::Reset => "reset",
        }
    }
}

/// Chain engine state
///
/// `Idle` while a pair is under player control; every other phase means a
/// resolution is in flight and movement is suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainPhase {
    #[default]
    Idle,
    Locking,
    Resolving,
    SettlingPause,
    Done,
}

/// Events emitted by the session, drained by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoreEvent {
    /// A new pair entered the board.
    Spawned { piece_id: u32 },
    /// The active pair was merged into the board.
    Locked { piece_id: u32 },
    /// A resolving pass found groups; `cells` are about to be removed.
    Cleared {
        chain: u32,
        count: u32,
        cells: Vec<Position>,
    },
    /// The chain ended and the score changed by `score_delta`.
    ChainFinished {
        chain: u32,
        total_cleared: u32,
        score_delta: u32,
    },
    Paused { paused: bool },
    GameOver { score: u32 },
    Reset { episode_id: u32 },
}
