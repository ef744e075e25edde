//! Multi-victim attack resolution.
//!
//! An Attack hits every other player. Victims are queued in seat order
//! and drained front to back; a shielded victim pauses the queue until
//! the engine supplies their decision, then the queue carries on from
//! the next victim.

use smallvec::SmallVec;
use tracing::debug;

use crate::board::CellType;
use crate::core::PlayerId;
use crate::events::{EventKind, GameEvent};

use super::resolver::{ResolverContext, Step, Suspended};
use super::{ResolutionStatus, ShieldPrompt, Threat};

/// Victims of one Attack and how far through them we are.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AttackQueue {
    attacker: PlayerId,
    victims: SmallVec<[PlayerId; 4]>,
    next: usize,
}

impl AttackQueue {
    pub(crate) fn new(attacker: PlayerId, victims: impl IntoIterator<Item = PlayerId>) -> Self {
        Self {
            attacker,
            victims: victims.into_iter().collect(),
            next: 0,
        }
    }

    pub(crate) fn prompt(&self, victim: PlayerId, retreat: usize) -> ShieldPrompt {
        ShieldPrompt {
            player: victim,
            threat: Threat::Attack { attacker: self.attacker },
            retreat,
        }
    }

    /// Victims not yet reached.
    pub(crate) fn remaining(&self) -> &[PlayerId] {
        &self.victims[self.next.min(self.victims.len())..]
    }

    /// Resolve victims until one needs a decision or none remain.
    pub(crate) fn run(mut self, ctx: &mut ResolverContext<'_>) -> Step {
        while let Some(&victim) = self.victims.get(self.next) {
            self.next += 1;
            let shielded = ctx.turn.player(victim).is_some_and(|p| p.has_shield);
            if shielded {
                debug!(%victim, remaining = self.remaining().len(), "attack waiting on shield decision");
                return Step::Suspend(Suspended::Attack { queue: self, victim });
            }
            self.hit(ctx, victim);
        }

        Step::Finished(ResolutionStatus::Complete(ctx.turn.end_turn()))
    }

    /// Apply `victim`'s decision, then keep draining.
    pub(crate) fn decide(self, ctx: &mut ResolverContext<'_>, victim: PlayerId, use_shield: bool) -> Step {
        if use_shield && ctx.turn.consume_shield(victim) {
            ctx.log.emit(GameEvent::new(EventKind::ShieldBlocked(CellType::Attack), victim, 0));
        } else {
            self.hit(ctx, victim);
        }
        self.run(ctx)
    }

    fn hit(&self, ctx: &mut ResolverContext<'_>, victim: PlayerId) {
        let Some(position) = ctx.turn.player(victim).map(|p| p.position) else {
            return;
        };
        let target = position.saturating_sub(ctx.config.attack_steps);
        let delta = ctx.turn.set_position(victim, target);
        ctx.log.emit(GameEvent::new(
            EventKind::AttackHit { attacker: self.attacker },
            victim,
            delta,
        ));
    }
}
