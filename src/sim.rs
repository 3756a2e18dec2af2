//! Headless simulation: argument parsing, a seeded random player, and the
//! run loop behind the `puyo-sim` binary.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::Serialize;

use crate::core::{GameConfig, GameSession, SimpleRng};
use crate::types::{Command, CoreEvent, TICK_MS};

/// Safety valve for the chain loop; a chain never needs this many frames.
const MAX_CHAIN_TICKS: u32 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimArgs {
    pub pieces: u32,
    pub seed: Option<u32>,
    pub config_path: Option<PathBuf>,
    pub json: bool,
}

impl Default for SimArgs {
    fn default() -> Self {
        Self {
            pieces: 100,
            seed: None,
            config_path: None,
            json: false,
        }
    }
}

pub const USAGE: &str = "usage: puyo-sim [--pieces N] [--seed S] [--config FILE.toml] [--json]";

/// Parse command-line arguments (without the program name).
///
/// Returns `Ok(None)` when help was requested.
pub fn parse_sim_args(args: &[String]) -> Result<Option<SimArgs>> {
    let mut out = SimArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(None),
            "--pieces" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("sim: missing value for --pieces"))?;
                out.pieces = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("sim: invalid --pieces value: {}", v))?;
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("sim: missing value for --seed"))?;
                out.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("sim: invalid --seed value: {}", v))?,
                );
            }
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("sim: missing value for --config"))?;
                out.config_path = Some(PathBuf::from(v));
            }
            "--json" => out.json = true,
            other => {
                return Err(anyhow!("sim: unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(Some(out))
}

/// Resolve the session config: TOML file if given, else the environment,
/// then the `--seed` override.
pub fn load_config(args: &SimArgs) -> Result<GameConfig> {
    let mut config = match &args.config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("sim: cannot read {}", path.display()))?;
            GameConfig::from_toml_str(&text)
                .with_context(|| format!("sim: bad config in {}", path.display()))?
        }
        None => GameConfig::from_env(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

/// Plays uniformly random placements.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: SimpleRng,
}

impl RandomPlayer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Rotate, shift, then hard-drop the active pair. Returns false if there
    /// was nothing to place.
    pub fn place(&mut self, session: &mut GameSession) -> bool {
        if session.active().is_none() {
            return false;
        }

        for _ in 0..self.rng.next_range(4) {
            session.apply_command(Command::Rotate);
        }

        let width = session.board().width() as u32;
        let target = self.rng.next_range(width) as i8;
        let x = session.active().map_or(target, |p| p.axis.pos.x);
        let (command, steps) = if target < x {
            (Command::MoveLeft, x - target)
        } else {
            (Command::MoveRight, target - x)
        };
        for _ in 0..steps {
            if !session.apply_command(command) {
                break;
            }
        }

        session.apply_command(Command::HardDrop)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimReport {
    pub seed: u32,
    pub pieces_placed: u32,
    pub score: u32,
    pub longest_chain: u32,
    pub total_cleared: u32,
    pub chains: u32,
    pub simulated_ms: u64,
    pub game_over: bool,
}

impl SimReport {
    fn record(&mut self, event: &CoreEvent) {
        match event {
            CoreEvent::Locked { .. } => self.pieces_placed += 1,
            CoreEvent::ChainFinished {
                chain,
                total_cleared,
                ..
            } => {
                self.chains += 1;
                self.longest_chain = self.longest_chain.max(*chain);
                self.total_cleared += total_cleared;
            }
            CoreEvent::GameOver { .. } => self.game_over = true,
            _ => {}
        }
    }
}

/// Play up to `pieces` pairs and return the final session with its report.
///
/// Chains are resolved by ticking the session in `TICK_MS` frames, so phase
/// timing matches an interactive run.
pub fn run(config: GameConfig, pieces: u32) -> (GameSession, SimReport) {
    let seed = config.seed;
    let mut player = RandomPlayer::new(seed.rotate_left(16) ^ 0x5bd1_e995);
    let mut session = GameSession::new(config);
    let mut report = SimReport {
        seed,
        ..SimReport::default()
    };

    session.spawn_if_needed();
    while report.pieces_placed < pieces && !session.game_over() {
        if !player.place(&mut session) {
            break;
        }

        let mut frames = 0u32;
        while session.dropping() && frames < MAX_CHAIN_TICKS {
            session.tick(TICK_MS);
            report.simulated_ms += u64::from(TICK_MS);
            frames += 1;
        }

        for event in session.take_events() {
            debug!("{:?}", event);
            report.record(&event);
        }
    }

    report.score = session.score();
    info!(
        "placed {} pairs, score {}, longest chain {}{}",
        report.pieces_placed,
        report.score,
        report.longest_chain,
        if report.game_over { " (game over)" } else { "" }
    );
    (session, report)
}
