//! Engine error taxonomy.
//!
//! Every variant is locally recoverable: a facade operation that returns
//! an error leaves the engine exactly as it was before the call. Nothing
//! here is fatal, and no driver input can make the engine panic.

use thiserror::Error;

use super::player::PlayerId;

/// Errors reported by engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Requested player count falls outside the configured bounds.
    #[error("invalid player count {requested}: must be between {min} and {max}")]
    InvalidPlayerCount {
        /// The count that was asked for.
        requested: i64,
        /// Lowest accepted count.
        min: usize,
        /// Highest accepted count.
        max: usize,
    },

    /// A roll arrived while another turn is still resolving.
    #[error("{active} is still resolving a turn")]
    ReentrantRoll {
        /// The player whose turn is in flight.
        active: PlayerId,
    },

    /// The active question pool has no questions.
    ///
    /// The question gate recovers from this by posing a placeholder
    /// question, so facade calls never return it.
    #[error("question group `{group}` has no questions")]
    EmptyQuestionPool {
        /// Group the pool was loaded from.
        group: String,
    },

    /// The game already has a winner.
    #[error("game is over, {winner} won")]
    GameOver {
        /// The winning player.
        winner: PlayerId,
    },

    /// Dice value outside `1..=faces`.
    #[error("dice value {value} is not between 1 and {faces}")]
    InvalidDiceValue {
        /// Reported value.
        value: u32,
        /// Number of faces on the configured die.
        faces: u32,
    },

    /// An answer was submitted while no question is pending.
    #[error("no question is awaiting an answer")]
    NotAwaitingAnswer,

    /// A shield decision was submitted while none is pending.
    #[error("no shield decision is pending")]
    NotAwaitingDecision,

    /// A shield decision was submitted for the wrong player.
    #[error("shield decision expected from {expected}, got {got}")]
    UnexpectedDecision {
        /// Player the engine is waiting on.
        expected: PlayerId,
        /// Player named in the call.
        got: PlayerId,
    },

    /// The question provider has no group with this id.
    #[error("unknown question group `{0}`")]
    UnknownGroup(String),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A hand-built board violates the board invariants.
    #[error("invalid board: {0}")]
    InvalidBoard(String),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::InvalidPlayerCount { requested: 5, min: 1, max: 4 };
        assert_eq!(err.to_string(), "invalid player count 5: must be between 1 and 4");

        let err = GameError::ReentrantRoll { active: PlayerId::new(2) };
        assert_eq!(err.to_string(), "Player 2 is still resolving a turn");

        let err = GameError::UnexpectedDecision {
            expected: PlayerId::new(3),
            got: PlayerId::new(1),
        };
        assert_eq!(err.to_string(), "shield decision expected from Player 3, got Player 1");
    }
}
