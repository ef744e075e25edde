//! Game event notifications.
//!
//! Every observable change the engine makes is announced as a
//! [`GameEvent`]: to the host's [`PresentationSink`] (rendering, audio)
//! and to an append-only history kept in the engine.
//!
//! ## Design Philosophy
//!
//! Sinks only ever see events by shared reference and have no handle on
//! the engine, so presentation can observe a game but never steer it.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::CellType;
use crate::core::PlayerId;

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Token walked the rolled distance.
    Moved,
    /// Frozen player sat out the turn.
    TurnSkipped,
    /// Wrong answer sent the token back to where the turn began.
    Reverted,
    /// A cell's effect was applied to the landing player.
    CellResolved(CellType),
    /// A shield cancelled the given effect.
    ShieldBlocked(CellType),
    /// An attack pushed this victim back.
    AttackHit {
        attacker: PlayerId,
    },
    /// The player reached the End cell.
    Won,
}

/// A notification for presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,
    /// Player the event is about.
    pub player: PlayerId,
    /// Signed change of that player's position.
    pub position_delta: i64,
}

impl GameEvent {
    #[must_use]
    pub const fn new(kind: EventKind, player: PlayerId, position_delta: i64) -> Self {
        Self {
            kind,
            player,
            position_delta,
        }
    }

    /// The cell type this event concerns, if any.
    #[must_use]
    pub fn cell_type(&self) -> Option<CellType> {
        match self.kind {
            EventKind::CellResolved(kind) | EventKind::ShieldBlocked(kind) => Some(kind),
            EventKind::AttackHit { .. } => Some(CellType::Attack),
            _ => None,
        }
    }
}

/// Receives event notifications.
pub trait PresentationSink {
    fn notify(&mut self, event: &GameEvent);
}

/// Discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn notify(&mut self, _event: &GameEvent) {}
}

impl<F: FnMut(&GameEvent)> PresentationSink for F {
    fn notify(&mut self, event: &GameEvent) {
        self(event);
    }
}

/// Fans events out to the sink and the history.
pub(crate) struct EventLog {
    history: Vector<GameEvent>,
    sink: Box<dyn PresentationSink>,
}

impl EventLog {
    pub(crate) fn new(sink: Box<dyn PresentationSink>) -> Self {
        Self {
            history: Vector::new(),
            sink,
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.sink.notify(&event);
        self.history.push_back(event);
    }

    pub(crate) fn history(&self) -> &Vector<GameEvent> {
        &self.history
    }

    pub(crate) fn clear(&mut self) {
        self.history.clear();
    }

    pub(crate) fn set_sink(&mut self, sink: Box<dyn PresentationSink>) {
        self.sink = sink;
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}
