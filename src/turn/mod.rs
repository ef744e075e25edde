//! Turn state: who moves next, and the players themselves.
//!
//! `TurnState` is the only owner of [`Player`] data. Every change to a
//! position, freeze or shield goes through the crate-private mutators
//! here, so no other component can bypass the turn lock.
//!
//! ## Lock
//!
//! `locked` is set by [`TurnState::start_turn`] and cleared only by
//! [`TurnState::end_turn`]. While it is set no second roll is accepted.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{EngineResult, GameError, Player, PlayerId, PlayerMap};

/// How a turn started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnStart {
    /// The active player may move.
    Ready(PlayerId),
    /// The active player was frozen; the freeze is consumed and the turn
    /// already ended.
    Skipped {
        player: PlayerId,
        next: PlayerId,
    },
}

/// Result of ending a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnAdvance {
    /// Who rolls next.
    pub next: PlayerId,
    /// The same player keeps the dice.
    pub extra_turn: bool,
}

/// Whose turn it is, the lock, and all players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    players: PlayerMap<Player>,
    active: PlayerId,
    last_position: usize,
    locked: bool,
    extra_turn_pending: bool,
    consecutive_extra_turns: u32,
    max_extra_turns: Option<u32>,
}

impl TurnState {
    /// Fresh players on Start, seat 1 to move.
    #[must_use]
    pub fn new(player_count: usize, max_extra_turns: Option<u32>) -> Self {
        Self {
            players: PlayerMap::new(player_count, Player::new),
            active: PlayerId::new(1),
            last_position: 0,
            locked: false,
            extra_turn_pending: false,
            consecutive_extra_turns: 0,
            max_extra_turns,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.active
    }

    #[must_use]
    pub fn last_position(&self) -> usize {
        self.last_position
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// All players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.players.values()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> &Player {
        &self.players[self.active]
    }

    /// Every player except `attacker`, in seat order.
    pub fn opponents_of(&self, attacker: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .map(|(id, _)| id)
            .filter(move |&id| id != attacker)
    }

    /// Lock the turn for the active player.
    ///
    /// A frozen player thaws and the turn ends immediately.
    pub fn start_turn(&mut self) -> EngineResult<TurnStart> {
        if self.locked {
            return Err(GameError::ReentrantRoll { active: self.active });
        }
        self.locked = true;

        let player = self.active;
        let p = &mut self.players[player];
        self.last_position = p.position;
        if p.frozen {
            p.frozen = false;
            debug!(%player, "frozen, skipping turn");
            let advance = self.end_turn();
            return Ok(TurnStart::Skipped { player, next: advance.next });
        }

        debug!(%player, from = self.last_position, "turn started");
        Ok(TurnStart::Ready(player))
    }

    /// Record that the active player earned another roll.
    pub(crate) fn grant_extra_turn(&mut self) {
        self.extra_turn_pending = true;
    }

    /// Release the lock and pick the next player.
    ///
    /// A pending extra turn keeps the same player, unless the configured
    /// cap on consecutive extra turns has been reached.
    pub fn end_turn(&mut self) -> TurnAdvance {
        self.locked = false;

        let pending = std::mem::take(&mut self.extra_turn_pending);
        let within_cap = self
            .max_extra_turns
            .map_or(true, |cap| self.consecutive_extra_turns < cap);

        let extra_turn = pending && within_cap;
        if extra_turn {
            self.consecutive_extra_turns += 1;
        } else {
            self.consecutive_extra_turns = 0;
            self.active = self.active.next(self.player_count());
        }

        debug!(next = %self.active, extra_turn, "turn ended");
        TurnAdvance {
            next: self.active,
            extra_turn,
        }
    }

    /// Put the active player back where the turn began, then end the turn.
    pub fn revert_and_end_turn(&mut self) -> TurnAdvance {
        let last = self.last_position;
        self.players[self.active].position = last;
        self.end_turn()
    }

    /// Release the lock without passing the turn, used when the game ends.
    pub(crate) fn finish(&mut self) {
        self.locked = false;
        self.extra_turn_pending = false;
    }

    /// Move a player to `position`, returning the signed change.
    pub(crate) fn set_position(&mut self, id: PlayerId, position: usize) -> i64 {
        let p = &mut self.players[id];
        let delta = position as i64 - p.position as i64;
        p.position = position;
        delta
    }

    pub(crate) fn freeze(&mut self, id: PlayerId) {
        self.players[id].frozen = true;
    }

    pub(crate) fn grant_shield(&mut self, id: PlayerId) {
        self.players[id].has_shield = true;
    }

    /// Spend a player's shield. Returns `false` if there was none.
    pub(crate) fn consume_shield(&mut self, id: PlayerId) -> bool {
        std::mem::take(&mut self.players[id].has_shield)
    }
}
