//! Chain engine - the lock → resolve → clear → compact state machine.
//!
//! ```text
//!  Idle ──lock()──▶ Locking ──▶ Resolving ──groups──▶ SettlingPause
//!                                  │  ▲                     │
//!                                  │  └──── clear+compact ──┘
//!                                  └──no groups──▶ Done ──finish()──▶ Idle
//! ```
//!
//! `lock()` performs `Locking` atomically and leaves the engine in
//! `Resolving`. Each [`ChainEngine::step`] call performs exactly one further
//! transition, so the owner decides how long every phase stays visible.

use log::debug;

use crate::board::Board;
use crate::gravity::compact_in_place;
use crate::groups::find_groups;
use crate::piece::Pair;
use crate::scoring::chain_score;
use crate::types::{ChainPhase, Position};

/// Cells removed by one resolving pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearEvent {
    /// Chain step this clear belongs to (1-based)
    pub chain: u32,
    pub cells: Vec<Position>,
}

impl ClearEvent {
    pub fn count(&self) -> u32 {
        self.cells.len() as u32
    }
}

/// Result of a finished chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainOutcome {
    pub chain: u32,
    pub total_cleared: u32,
    pub score_delta: u32,
}

/// What a single [`ChainEngine::step`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainStep {
    /// Nothing to do; no chain in flight.
    Idle,
    /// Groups were found; the removal set is waiting in `SettlingPause`.
    Cleared(ClearEvent),
    /// The removal set was zeroed and the board compacted.
    Compacted,
    /// No more groups; the chain is over.
    Finished(ChainOutcome),
}

#[derive(Debug, Clone, Default)]
pub struct ChainEngine {
    phase: ChainPhase,
    chain: u32,
    total_cleared: u32,
    removal: Vec<Position>,
}

impl ChainEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ChainPhase {
        self.phase
    }

    /// True from lock until [`ChainEngine::finish`]
    pub fn is_active(&self) -> bool {
        self.phase != ChainPhase::Idle
    }

    /// Clearing passes so far in the current (or last) chain
    pub fn chain(&self) -> u32 {
        self.chain
    }

    pub fn total_cleared(&self) -> u32 {
        self.total_cleared
    }

    /// Cells pending removal; empty outside `SettlingPause`
    pub fn removal(&self) -> &[Position] {
        &self.removal
    }

    /// Merge `pair` into `board` and start resolving.
    ///
    /// Cells above the board are dropped. The board is compacted before this
    /// returns, since the two halves of a pair fall independently.
    pub fn lock(&mut self, board: &mut Board, pair: &Pair) {
        self.phase = ChainPhase::Locking;
        for cell in pair.cells() {
            if cell.pos.y >= 0 {
                board.set(cell.pos.x, cell.pos.y, cell.color);
            }
        }
        compact_in_place(board);

        self.chain = 0;
        self.total_cleared = 0;
        self.removal.clear();
        self.phase = ChainPhase::Resolving;
    }

    /// Perform one transition.
    pub fn step(&mut self, board: &mut Board, threshold: usize) -> ChainStep {
        match self.phase {
            // lock() never returns while still in Locking.
            ChainPhase::Idle | ChainPhase::Locking | ChainPhase::Done => ChainStep::Idle,
            ChainPhase::Resolving => {
                let groups = find_groups(board, threshold);
                if groups.is_empty() {
                    self.phase = ChainPhase::Done;
                    return ChainStep::Finished(ChainOutcome {
                        chain: self.chain,
                        total_cleared: self.total_cleared,
                        score_delta: chain_score(self.total_cleared, self.chain),
                    });
                }

                self.chain += 1;
                // Groups from one scan are disjoint, so concatenation is the union.
                self.removal = groups.into_iter().flat_map(|g| g.cells).collect();
                self.total_cleared += self.removal.len() as u32;
                self.phase = ChainPhase::SettlingPause;
                debug!(
                    "chain {}: clearing {} cells ({} total)",
                    self.chain,
                    self.removal.len(),
                    self.total_cleared
                );

                ChainStep::Cleared(ClearEvent {
                    chain: self.chain,
                    cells: self.removal.clone(),
                })
            }
            ChainPhase::SettlingPause => {
                board.clear_cells(&self.removal);
                compact_in_place(board);
                self.removal.clear();
                self.phase = ChainPhase::Resolving;
                ChainStep::Compacted
            }
        }
    }

    /// Return to `Idle` once the owner has consumed the outcome.
    pub fn finish(&mut self) {
        self.phase = ChainPhase::Idle;
        self.removal.clear();
    }

    /// Drop any in-flight chain and counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
