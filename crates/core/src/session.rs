//! Game session - owns the complete game state
//!
//! This module ties together the board, the falling pair, the color source,
//! the chain engine and scoring. It is the only way to mutate a game: the
//! presentation layer issues commands, calls [`GameSession::tick`] with the
//! elapsed time, and reads snapshots and events back.

use std::collections::VecDeque;

use anyhow::{ensure, Result};
use log::{debug, info, trace};

use crate::board::Board;
use crate::chain::{ChainEngine, ChainOutcome, ChainStep};
use crate::config::GameConfig;
use crate::piece::Pair;
use crate::rng::ColorSource;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Cell, ChainPhase, Command, CoreEvent, Position};

/// Pending events kept when nobody drains them; the oldest are dropped first.
pub const MAX_PENDING_EVENTS: usize = 256;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    active: Option<Pair>,
    colors: ColorSource,
    engine: ChainEngine,
    score: u32,
    /// Size of the most recent removal set (reset on lock).
    cleared_count: u32,
    paused: bool,
    game_over: bool,
    gravity_timer_ms: u32,
    /// Time left before the chain engine takes its next step.
    phase_timer_ms: u32,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Monotonic id for spawned pairs (increments only on successful spawn).
    piece_id: u32,
    /// Pending events, bounded by `MAX_PENDING_EVENTS`.
    events: VecDeque<CoreEvent>,
}

impl GameSession {
    /// Create a fresh session. No pair is spawned until
    /// [`GameSession::spawn_if_needed`] or the first [`GameSession::tick`].
    ///
    /// `config` must pass [`GameConfig::validate`]; use
    /// [`GameSession::try_new`] for untrusted input.
    pub fn new(config: GameConfig) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid session config: {:?}",
            config
        );
        let board = Board::new(config.width, config.height, config.colors);
        let colors = ColorSource::new(config.seed, config.colors);

        Self {
            config,
            board,
            active: None,
            colors,
            engine: ChainEngine::new(),
            score: 0,
            cleared_count: 0,
            paused: false,
            game_over: false,
            gravity_timer_ms: 0,
            phase_timer_ms: 0,
            episode_id: 0,
            piece_id: 0,
            events: VecDeque::new(),
        }
    }

    /// Like [`GameSession::new`], rejecting an invalid config.
    pub fn try_new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Start from an existing board (puzzles, replays, tests).
    pub fn with_board(config: GameConfig, board: Board) -> Result<Self> {
        config.validate()?;
        ensure!(
            board.width() == config.width && board.height() == config.height,
            "session: board is {}x{}, config expects {}x{}",
            board.width(),
            board.height(),
            config.width,
            config.height
        );
        // Re-check every cell against the configured palette.
        let board = Board::from_rows(&board.to_rows(), config.colors)?;

        let mut session = Self::new(config);
        session.board = board;
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Pair> {
        self.active
    }

    /// Colors of the pair that spawns next
    pub fn next_colors(&self) -> (Cell, Cell) {
        self.colors.peek()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Clearing passes of the current chain, or of the last one until the next lock
    pub fn chain_count(&self) -> u32 {
        self.engine.chain()
    }

    /// Cells about to vanish; non-empty only during `SettlingPause`
    pub fn clearing(&self) -> &[Position] {
        self.engine.removal()
    }

    pub fn cleared_count(&self) -> u32 {
        self.cleared_count
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// True while a chain resolution is in flight
    pub fn dropping(&self) -> bool {
        self.engine.is_active()
    }

    pub fn phase(&self) -> ChainPhase {
        self.engine.phase()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    /// Take and clear the pending events, oldest first.
    ///
    /// Observers should drain every frame; only the latest
    /// [`MAX_PENDING_EVENTS`] are kept otherwise.
    pub fn take_events(&mut self) -> Vec<CoreEvent> {
        self.events.drain(..).collect()
    }

    fn emit(&mut self, event: CoreEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        self.board.write_rows(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost = self.ghost().map(ActiveSnapshot::from);
        out.next = self.colors.peek();
        out.score = self.score;
        out.chain = self.engine.chain();
        out.clearing.clear();
        out.clearing.extend_from_slice(self.engine.removal());
        out.cleared_count = self.cleared_count;
        out.phase = self.engine.phase();
        out.dropping = self.dropping();
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
        out.seed = self.colors.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Where the active pair would lock after a hard drop
    pub fn ghost(&self) -> Option<Pair> {
        let active = self.active?;
        Some(active.translated(0, active.drop_distance(&self.board)))
    }

    /// Spawn a pair when none is active, the game is running, and no chain is
    /// resolving. Returns true if a pair was created.
    pub fn spawn_if_needed(&mut self) -> bool {
        if self.active.is_some() || self.game_over || self.dropping() {
            return false;
        }
        self.spawn_piece()
    }

    fn spawn_piece(&mut self) -> bool {
        let (axis_color, satellite_color) = self.colors.draw();
        let pair = Pair::spawn(self.config.spawn_column, axis_color, satellite_color);

        if !pair.is_valid(&self.board) {
            self.active = None;
            self.game_over = true;
            info!("game over: spawn blocked, final score {}", self.score);
            self.emit(CoreEvent::GameOver { score: self.score });
            return false;
        }

        self.active = Some(pair);
        self.piece_id = self.piece_id.wrapping_add(1);
        self.gravity_timer_ms = 0;
        debug!(
            "spawned pair {} colors ({}, {})",
            self.piece_id, axis_color, satellite_color
        );
        self.emit(CoreEvent::Spawned {
            piece_id: self.piece_id,
        });
        true
    }

    /// Movement is ignored while paused, over, or resolving.
    fn accepts_input(&self) -> bool {
        !self.paused && !self.game_over && !self.dropping()
    }

    /// Try to move the active pair one column in the direction of `dir`
    pub fn move_horizontal(&mut self, dir: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if !self.accepts_input() || dir == 0 {
            return false;
        }

        let moved = active.translated(dir.signum(), 0);
        if moved.is_valid(&self.board) {
            self.active = Some(moved);
            return true;
        }
        trace!("move {} rejected", dir.signum());
        false
    }

    /// Move the pair down one row, locking it if it cannot move.
    ///
    /// Returns false only when the command was ignored.
    pub fn move_down(&mut self) -> bool {
        if self.active.is_none() || !self.accepts_input() {
            return false;
        }
        self.step_down();
        true
    }

    /// Returns true if the pair moved, false if it locked (or there was none).
    fn step_down(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.translated(0, 1);
        if moved.is_valid(&self.board) {
            self.active = Some(moved);
            return true;
        }

        self.lock_active();
        false
    }

    /// Rotate the satellite clockwise around the axis.
    ///
    /// A freshly spawned pair has its satellite below, so the first turn
    /// moves it to the left of the axis.
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if !self.accepts_input() {
            return false;
        }

        let rotated = active.rotated_cw();
        if rotated.is_valid(&self.board) {
            self.active = Some(rotated);
            return true;
        }
        trace!("rotation to {:?} rejected", rotated.orientation);
        false
    }

    /// Drop the active pair to the bottom and lock it
    pub fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if !self.accepts_input() {
            return false;
        }

        let distance = active.drop_distance(&self.board);
        self.active = Some(active.translated(0, distance));
        self.lock_active();
        true
    }

    /// Toggle pause; returns the new state. An in-flight chain keeps running.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.emit(CoreEvent::Paused {
            paused: self.paused,
        });
        self.paused
    }

    /// Discard all state. The color stream continues where it left off.
    pub fn reset(&mut self) {
        let next_episode = self.episode_id.wrapping_add(1);
        let colors = self.colors.clone();

        *self = Self::new(self.config.clone());
        self.colors = colors;
        self.episode_id = next_episode;
        debug!("reset to episode {}", next_episode);
        self.emit(CoreEvent::Reset {
            episode_id: next_episode,
        });
    }

    /// Lock the active pair onto the board and hand over to the chain engine
    fn lock_active(&mut self) {
        let Some(pair) = self.active.take() else {
            return;
        };

        self.engine.lock(&mut self.board, &pair);
        self.cleared_count = 0;
        self.gravity_timer_ms = 0;
        self.phase_timer_ms = self.config.lock_settle_ms;
        debug!("pair {} locked", self.piece_id);
        self.emit(CoreEvent::Locked {
            piece_id: self.piece_id,
        });
    }

    /// Perform exactly one chain transition, ignoring the phase timer.
    pub fn advance(&mut self) -> ChainStep {
        let step = self.engine.step(&mut self.board, self.config.clear_threshold);

        match &step {
            ChainStep::Idle => {}
            ChainStep::Cleared(ev) => {
                self.cleared_count = ev.count();
                self.phase_timer_ms = self.config.clear_animation_ms;
                self.emit(CoreEvent::Cleared {
                    chain: ev.chain,
                    count: ev.count(),
                    cells: ev.cells.clone(),
                });
            }
            ChainStep::Compacted => {
                self.phase_timer_ms = self.config.chain_settle_ms;
            }
            ChainStep::Finished(outcome) => {
                self.score = self.score.saturating_add(outcome.score_delta);
                if outcome.chain > 0 {
                    info!(
                        "{}-chain cleared {} cells for {} points",
                        outcome.chain, outcome.total_cleared, outcome.score_delta
                    );
                    self.emit(CoreEvent::ChainFinished {
                        chain: outcome.chain,
                        total_cleared: outcome.total_cleared,
                        score_delta: outcome.score_delta,
                    });
                }
                self.engine.finish();
                self.phase_timer_ms = 0;
                if !self.game_over {
                    self.spawn_piece();
                }
            }
        }

        step
    }

    /// Run the current chain to completion without waiting on timers.
    pub fn finish_chain(&mut self) -> Option<ChainOutcome> {
        let mut outcome = None;
        while self.dropping() {
            if let ChainStep::Finished(o) = self.advance() {
                outcome = Some(o);
            }
        }
        outcome
    }

    /// Main game tick - update timers, resolve chains and apply gravity.
    ///
    /// Returns true if the board or the active pair changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over {
            return false;
        }

        // Chains run to completion regardless of pause.
        if self.dropping() {
            self.phase_timer_ms = self.phase_timer_ms.saturating_sub(elapsed_ms);
            let mut changed = false;
            while self.dropping() && self.phase_timer_ms == 0 {
                self.advance();
                changed = true;
            }
            return changed;
        }

        if self.paused {
            return false;
        }

        if self.active.is_none() {
            return self.spawn_if_needed();
        }

        self.gravity_timer_ms = self.gravity_timer_ms.saturating_add(elapsed_ms);
        if self.gravity_timer_ms >= self.config.gravity_interval_ms {
            self.gravity_timer_ms = 0;
            self.step_down();
            return true;
        }

        false
    }

    /// Apply a command
    pub fn apply_command(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_horizontal(-1),
            Command::MoveRight => self.move_horizontal(1),
            Command::MoveDown => self.move_down(),
            Command::Rotate => self.rotate(),
            Command::HardDrop => self.hard_drop(),
            Command::Pause => {
                self.toggle_pause();
                true
            }
            Command::Reset => {
                self.reset();
                true
            }
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
