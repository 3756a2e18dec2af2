//! Falling-pair puzzle engine (workspace facade crate).
//!
//! Re-exports `puyo_engine::{core,types}` so binaries, tests and benches use one
//! import path while the implementation lives in dedicated crates under `crates/`.

pub mod sim;

pub use puyo_engine_core as core;
pub use puyo_engine_types as types;
