//! Session configuration
//!
//! Defaults reproduce the reference game: a 6x12 board, five colors, groups of
//! four, gravity every 800ms and a 200/400/300ms chain rhythm.
//!
//! # Environment Variables
//!
//! [`GameConfig::from_env`] overrides any default it finds:
//!
//! - `PUYO_WIDTH`, `PUYO_HEIGHT`: board dimensions
//! - `PUYO_COLORS`: palette size
//! - `PUYO_CLEAR_THRESHOLD`: minimum group size
//! - `PUYO_SPAWN_COLUMN`: column new pairs appear in
//! - `PUYO_GRAVITY_MS`, `PUYO_LOCK_SETTLE_MS`, `PUYO_CLEAR_ANIMATION_MS`,
//!   `PUYO_CHAIN_SETTLE_MS`: timing
//! - `PUYO_SEED`: color stream seed

use anyhow::{ensure, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, CHAIN_SETTLE_MS, CLEAR_ANIMATION_MS, CLEAR_THRESHOLD, COLOR_COUNT,
    GRAVITY_INTERVAL_MS, LOCK_SETTLE_MS, SPAWN_COLUMN,
};

/// Largest supported board side; positions are stored as `i8`.
pub const MAX_BOARD_SIDE: u8 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    pub colors: u8,
    pub clear_threshold: usize,
    pub spawn_column: i8,
    pub gravity_interval_ms: u32,
    pub lock_settle_ms: u32,
    pub clear_animation_ms: u32,
    pub chain_settle_ms: u32,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            colors: COLOR_COUNT,
            clear_threshold: CLEAR_THRESHOLD,
            spawn_column: SPAWN_COLUMN,
            gravity_interval_ms: GRAVITY_INTERVAL_MS,
            lock_settle_ms: LOCK_SETTLE_MS,
            clear_animation_ms: CLEAR_ANIMATION_MS,
            chain_settle_ms: CHAIN_SETTLE_MS,
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an arbitrary key lookup.
    ///
    /// Values that fail to parse are ignored. If the result does not pass
    /// [`GameConfig::validate`], the defaults are returned instead.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
            default: T,
        ) -> T {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        }

        let d = Self::default();
        let config = Self {
            width: parse(&lookup, "PUYO_WIDTH", d.width),
            height: parse(&lookup, "PUYO_HEIGHT", d.height),
            colors: parse(&lookup, "PUYO_COLORS", d.colors),
            clear_threshold: parse(&lookup, "PUYO_CLEAR_THRESHOLD", d.clear_threshold),
            spawn_column: parse(&lookup, "PUYO_SPAWN_COLUMN", d.spawn_column),
            gravity_interval_ms: parse(&lookup, "PUYO_GRAVITY_MS", d.gravity_interval_ms),
            lock_settle_ms: parse(&lookup, "PUYO_LOCK_SETTLE_MS", d.lock_settle_ms),
            clear_animation_ms: parse(&lookup, "PUYO_CLEAR_ANIMATION_MS", d.clear_animation_ms),
            chain_settle_ms: parse(&lookup, "PUYO_CHAIN_SETTLE_MS", d.chain_settle_ms),
            seed: parse(&lookup, "PUYO_SEED", d.seed),
        };

        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("{:#}; using defaults", e);
                d
            }
        }
    }

    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).context("config: invalid TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Same timing rules, but every phase advances on the next tick.
    pub fn without_delays(mut self) -> Self {
        self.lock_settle_ms = 0;
        self.clear_animation_ms = 0;
        self.chain_settle_ms = 0;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_BOARD_SIDE).contains(&self.width),
            "config: width {} outside 1..={}",
            self.width,
            MAX_BOARD_SIDE
        );
        // A spawned pair occupies rows 0 and 1.
        ensure!(
            (2..=MAX_BOARD_SIDE).contains(&self.height),
            "config: height {} outside 2..={}",
            self.height,
            MAX_BOARD_SIDE
        );
        ensure!(
            (1..=254).contains(&self.colors),
            "config: colors {} outside 1..=254",
            self.colors
        );
        ensure!(self.clear_threshold >= 1, "config: clear_threshold must be at least 1");
        ensure!(
            self.spawn_column >= 0 && (self.spawn_column as u8) < self.width,
            "config: spawn_column {} outside board of width {}",
            self.spawn_column,
            self.width
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 6);
        assert_eq!(config.height, 12);
        assert_eq!(config.spawn_column, 2);
    }

    #[test]
    fn lookup_overrides_and_ignores_garbage() {
        let vars: HashMap<&str, &str> = [
            ("PUYO_WIDTH", "8"),
            ("PUYO_SEED", " 42 "),
            ("PUYO_COLORS", "many"),
        ]
        .into_iter()
        .collect();
        let config = GameConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.width, 8);
        assert_eq!(config.seed, 42);
        assert_eq!(config.colors, GameConfig::default().colors);
    }

    #[test]
    fn lookup_falls_back_to_defaults_when_invalid() {
        let config = GameConfig::from_lookup(|k| (k == "PUYO_WIDTH").then(|| "0".to_string()));
        assert_eq!(config, GameConfig::default());

        let config = GameConfig::from_lookup(|k| match k {
            "PUYO_WIDTH" => Some("3".to_string()),
            "PUYO_SPAWN_COLUMN" => Some("5".to_string()),
            _ => None,
        });
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad = [
            GameConfig {
                width: 0,
                ..GameConfig::default()
            },
            GameConfig {
                height: 1,
                ..GameConfig::default()
            },
            GameConfig {
                colors: 0,
                ..GameConfig::default()
            },
            GameConfig {
                clear_threshold: 0,
                ..GameConfig::default()
            },
            GameConfig {
                spawn_column: 6,
                ..GameConfig::default()
            },
            GameConfig {
                width: 100,
                ..GameConfig::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{:?}", config);
        }
    }

    #[test]
    fn toml_partial_document() {
        let config = GameConfig::from_toml_str("width = 8\nseed = 7\n").unwrap();
        assert_eq!(config.width, 8);
        assert_eq!(config.seed, 7);
        assert_eq!(config.height, 12);
    }

    #[test]
    fn toml_rejects_invalid_config() {
        assert!(GameConfig::from_toml_str("spawn_column = 9").is_err());
        assert!(GameConfig::from_toml_str("width = \"wide\"").is_err());
    }

    #[test]
    fn without_delays_zeroes_phase_timers() {
        let config = GameConfig::default().without_delays();
        assert_eq!(config.lock_settle_ms, 0);
        assert_eq!(config.clear_animation_ms, 0);
        assert_eq!(config.chain_settle_ms, 0);
        assert_eq!(config.gravity_interval_ms, GRAVITY_INTERVAL_MS);
    }
}
