//! Owned, serializable views of a game for presentation and saving.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{Player, PlayerId};
use crate::turn::TurnState;

use super::Phase;

/// Turn bookkeeping visible to presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnView {
    pub active: PlayerId,
    /// Where the active player stood when the turn began.
    pub last_position: usize,
    pub locked: bool,
    pub player_count: usize,
}

impl From<&TurnState> for TurnView {
    fn from(turn: &TurnState) -> Self {
        Self {
            active: turn.active(),
            last_position: turn.last_position(),
            locked: turn.is_locked(),
            player_count: turn.player_count(),
        }
    }
}

/// Everything a renderer needs, detached from the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub players: Vec<Player>,
    pub turn: TurnView,
    pub phase: Phase,
}

impl GameSnapshot {
    /// Player standing on the given cell, lowest seat first.
    #[must_use]
    pub fn occupants(&self, cell: usize) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.position == cell)
            .map(|p| p.id)
            .collect()
    }
}
