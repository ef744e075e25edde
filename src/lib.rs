//! # rust-quizboard
//!
//! Rules engine for a turn-based quiz board game: players roll a die,
//! walk a serpentine path, answer a question, and on a right answer
//! trigger whatever the landing cell holds. First to the End cell wins.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Free**: The engine never renders, plays audio or
//!    waits on timers. It emits [`GameEvent`]s and waits in an explicit
//!    [`Phase`] whenever a person has to decide something.
//!
//! 2. **Injected Randomness**: Board typing, question choice and dice all
//!    draw from one [`RandomSource`]. A scripted source makes a whole game
//!    reproducible.
//!
//! 3. **Configuration Over Convention**: Grid size, zone policy, effect
//!    magnitudes and player bounds live in [`GameConfig`].
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, errors
//! - `board`: cells, serpentine layout, zoned generation
//! - `questions`: question pools, groups, no-repeat selection
//! - `turn`: active player, turn lock, freeze skips, extra turns
//! - `events`: notifications and the presentation sink
//! - `resolution`: cell effects, shields, attacks
//! - `engine`: the driver-facing facade
//!
//! ## Example
//!
//! ```
//! use rust_quizboard::{AlwaysBlock, EngineBuilder, Outcome};
//!
//! let mut engine = EngineBuilder::new().player_count(2).seed(1).build().unwrap();
//! let mut outcome = engine.roll(3).unwrap();
//! if let Outcome::QuestionPosed { .. } = outcome {
//!     outcome = engine.answer_question(true).unwrap();
//! }
//! if let Outcome::AwaitingShieldDecision(_) = outcome {
//!     engine.settle_decisions(&mut AlwaysBlock).unwrap();
//! }
//! assert!(!engine.turn().is_locked());
//! ```

pub mod core;
pub mod board;
pub mod questions;
pub mod turn;
pub mod events;
pub mod resolution;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, Player, PlayerMap,
    GameRng, GameRngState, RandomSource, ScriptedSource,
    GameConfig, BoardConfig, BoardRules, EventThresholds,
    GameError, EngineResult,
};

pub use crate::board::{Board, Cell, CellType, GridPos, generate_board};

pub use crate::questions::{
    GroupId, Question, QuestionId, QuestionPool,
    QuestionGroup, QuestionLibrary, QuestionProvider,
};

pub use crate::turn::{TurnAdvance, TurnState};

pub use crate::events::{EventKind, GameEvent, NullSink, PresentationSink};

pub use crate::resolution::{
    ResolutionStatus, ShieldPrompt, Threat,
    ShieldDecider, AlwaysBlock, NeverBlock,
};

pub use crate::engine::{Engine, EngineBuilder, GameSnapshot, Outcome, Phase, TurnView};
