//! Event resolution: what a correctly answered landing does.
//!
//! Resolution runs synchronously until it either finishes the turn, ends
//! the game, or needs a shield decision. In the last case it hands back a
//! suspended continuation that the engine stores and later resumes with
//! the decision; nothing here keeps closures or recurses.
//!
//! ## Suspension points
//!
//! - A shielded player lands on Bad or Freeze: spend the shield?
//! - An Attack reaches a shielded victim: spend the shield?
//!
//! Attack victims are processed strictly one at a time, in seat order.

mod attack;
mod decision;
mod resolver;

pub use decision::{AlwaysBlock, NeverBlock, ShieldDecider};

pub(crate) use resolver::{EventResolver, ResolverContext, Step, Suspended};

use serde::{Deserialize, Serialize};

use crate::board::CellType;
use crate::core::PlayerId;
use crate::turn::TurnAdvance;

/// What a shield would be spent against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Threat {
    /// The player landed on a negative cell.
    Trap(CellType),
    /// Another player's Attack.
    Attack {
        attacker: PlayerId,
    },
}

/// A pending shield decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldPrompt {
    /// Who decides, and whose shield is at stake.
    pub player: PlayerId,
    pub threat: Threat,
    /// Cells the player loses by declining.
    pub retreat: usize,
}

/// Status returned once resolution finishes without suspending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatus {
    /// The turn is over.
    Complete(TurnAdvance),
    /// The player reached the End cell.
    GameOver(PlayerId),
}
