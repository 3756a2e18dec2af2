//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management and chain
//! resolution for the falling-pair puzzle. It has **zero dependencies** on UI,
//! input devices, networking or storage, which makes it:
//!
//! - **Deterministic**: the same seed produces the same color stream
//! - **Testable**: every rule is reachable from plain function calls
//! - **Portable**: can run under a terminal, a browser host, or headless
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid of cell colors
//! - [`collision`]: legality of a candidate placement
//! - [`gravity`]: per-column compaction
//! - [`groups`]: connected same-color regions at or above the clear threshold
//! - [`piece`]: the falling axis/satellite pair
//! - [`chain`]: lock → resolve → clear → compact state machine
//! - [`scoring`]: chain bonus and score delta
//! - [`rng`]: seeded color source
//! - [`config`]: dimensions, palette size and timing
//! - [`snapshot`]: serializable view for presentation layers
//! - [`session`]: top-level orchestrator with the command API
//!
//! # Game Rules
//!
//! - A pair spawns with the axis at `(spawn_column, 0)` and the satellite
//!   directly below it.
//! - Moves and rotations that would collide are silently rejected.
//! - A pair that cannot move down locks; its cells fall independently.
//! - Groups of four or more same-colored 4-connected cells are removed, the
//!   board compacts, and the search repeats; each repetition is one chain step.
//! - Chain score is `cleared × 10 × bonus`, bonus `1` for a single step and
//!   `2^(chain - 1)` above that.
//!
//! # Example
//!
//! ```
//! use puyo_engine_core::{GameConfig, GameSession};
//! use puyo_engine_types::Command;
//!
//! let mut session = GameSession::new(GameConfig::default());
//! session.spawn_if_needed();
//!
//! session.apply_command(Command::MoveRight);
//! session.apply_command(Command::Rotate);
//! session.apply_command(Command::HardDrop);
//!
//! // The lock started a chain resolution; run it to completion.
//! assert!(session.dropping());
//! session.finish_chain();
//! assert!(!session.dropping());
//! assert!(session.active().is_some());
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::tick`](session::GameSession::tick) every frame with the
//! elapsed time. Gravity fires every `gravity_interval_ms`; a running chain
//! advances one phase each time its phase timer expires.

pub mod board;
pub mod chain;
pub mod collision;
pub mod config;
pub mod gravity;
pub mod groups;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use puyo_engine_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use chain::{ChainEngine, ChainOutcome, ChainStep, ClearEvent};
pub use collision::{collides, fits};
pub use config::GameConfig;
pub use gravity::compacted;
pub use groups::{find_groups, Group};
pub use piece::{Pair, PieceCell};
pub use rng::{ColorSource, SimpleRng};
pub use scoring::{chain_bonus, chain_score};
pub use session::GameSession;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
