//! Core engine types: players, randomness, configuration, errors.
//!
//! These are the building blocks every other module depends on. They
//! hold no game flow of their own.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedSource};
pub use config::{BoardConfig, BoardRules, EventThresholds, GameConfig, MAX_BOARD_CELLS, MAX_PLAYERS};
pub use error::{EngineResult, GameError};
