//! Cell effect resolution.

use tracing::{debug, info};

use crate::board::{Board, CellType};
use crate::core::{GameConfig, PlayerId};
use crate::events::{EventKind, EventLog, GameEvent};
use crate::turn::TurnState;

use super::attack::AttackQueue;
use super::{ResolutionStatus, ShieldPrompt, Threat};

/// Mutable view of the game that resolution works on.
pub(crate) struct ResolverContext<'a> {
    pub board: &'a mut Board,
    pub turn: &'a mut TurnState,
    pub config: &'a GameConfig,
    pub log: &'a mut EventLog,
}

/// Where resolution stopped.
#[derive(Debug)]
pub(crate) enum Step {
    Finished(ResolutionStatus),
    Suspend(Suspended),
}

/// Resolution paused on a shield decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Suspended {
    /// Shielded player on a Bad or Freeze cell.
    Trap {
        player: PlayerId,
        cell: usize,
    },
    /// Attack paused on a shielded victim.
    Attack {
        queue: AttackQueue,
        victim: PlayerId,
    },
}

impl Suspended {
    /// Prompt describing this pause to the driver.
    pub(crate) fn prompt(&self, board: &Board, config: &GameConfig) -> ShieldPrompt {
        match self {
            Suspended::Trap { player, cell } => {
                let kind = board.kind_at(*cell);
                let retreat = if kind == CellType::Bad { config.bad_steps } else { 0 };
                ShieldPrompt {
                    player: *player,
                    threat: Threat::Trap(kind),
                    retreat,
                }
            }
            Suspended::Attack { queue, victim } => queue.prompt(*victim, config.attack_steps),
        }
    }
}

/// Applies landing effects for the active player.
pub(crate) struct EventResolver;

impl EventResolver {
    /// Resolve the cell at `cell` after a correct answer.
    pub(crate) fn resolve(ctx: &mut ResolverContext<'_>, cell: usize) -> Step {
        let player = ctx.turn.active();
        let kind = ctx.board.kind_at(cell);
        debug!(%player, cell, %kind, "resolving cell");

        match kind {
            CellType::Normal | CellType::Start => {
                ctx.board.reveal(cell, false);
                ctx.log.emit(GameEvent::new(EventKind::CellResolved(kind), player, 0));
                Self::end_turn(ctx)
            }

            CellType::Lucky => {
                ctx.board.reveal(cell, false);
                let steps = ctx.config.lucky_steps;
                Self::advance(ctx, player, steps, kind)
            }

            CellType::Bad | CellType::Freeze => {
                ctx.board.reveal(cell, false);
                let shielded = ctx.turn.player(player).is_some_and(|p| p.has_shield);
                if shielded {
                    Step::Suspend(Suspended::Trap { player, cell })
                } else {
                    Self::apply_negative(ctx, player, kind)
                }
            }

            CellType::Shield => {
                ctx.board.reveal(cell, false);
                let shielded = ctx.turn.player(player).is_some_and(|p| p.has_shield);
                if shielded {
                    // Shields do not stack; the spare one becomes movement.
                    let steps = ctx.config.lucky_steps;
                    Self::advance(ctx, player, steps, kind)
                } else {
                    ctx.turn.grant_shield(player);
                    ctx.log.emit(GameEvent::new(EventKind::CellResolved(kind), player, 0));
                    Self::end_turn(ctx)
                }
            }

            CellType::WarpWin => {
                ctx.board.reveal(cell, false);
                let delta = ctx.turn.set_position(player, ctx.board.last_index());
                ctx.log.emit(GameEvent::new(EventKind::CellResolved(kind), player, delta));
                Self::win(ctx, player)
            }

            CellType::Again => {
                ctx.board.reveal(cell, false);
                ctx.turn.grant_extra_turn();
                ctx.log.emit(GameEvent::new(EventKind::CellResolved(kind), player, 0));
                Self::end_turn(ctx)
            }

            CellType::Attack => {
                ctx.board.reveal(cell, false);
                ctx.log.emit(GameEvent::new(EventKind::CellResolved(kind), player, 0));
                let victims: Vec<PlayerId> = ctx.turn.opponents_of(player).collect();
                AttackQueue::new(player, victims).run(ctx)
            }

            CellType::End => Self::win(ctx, player),
        }
    }

    /// Continue a suspended resolution with the driver's decision.
    pub(crate) fn resume(ctx: &mut ResolverContext<'_>, suspended: Suspended, use_shield: bool) -> Step {
        match suspended {
            Suspended::Trap { player, cell } => {
                let kind = ctx.board.kind_at(cell);
                if use_shield && ctx.turn.consume_shield(player) {
                    ctx.board.reveal(cell, true);
                    ctx.log.emit(GameEvent::new(EventKind::ShieldBlocked(kind), player, 0));
                    Self::end_turn(ctx)
                } else {
                    Self::apply_negative(ctx, player, kind)
                }
            }
            Suspended::Attack { queue, victim } => queue.decide(ctx, victim, use_shield),
        }
    }

    fn apply_negative(ctx: &mut ResolverContext<'_>, player: PlayerId, kind: CellType) -> Step {
        let delta = match kind {
            CellType::Bad => {
                let position = ctx.turn.player(player).map_or(0, |p| p.position);
                let target = position.saturating_sub(ctx.config.bad_steps);
                ctx.turn.set_position(player, target)
            }
            CellType::Freeze => {
                ctx.turn.freeze(player);
                0
            }
            _ => 0,
        };
        ctx.log.emit(GameEvent::new(EventKind::CellResolved(kind), player, delta));
        Self::end_turn(ctx)
    }

    /// Move forward `steps` (clamped at End); reaching End wins.
    fn advance(ctx: &mut ResolverContext<'_>, player: PlayerId, steps: usize, kind: CellType) -> Step {
        let position = ctx.turn.player(player).map_or(0, |p| p.position);
        let target = ctx.board.clamp(position as i64 + steps as i64);
        let delta = ctx.turn.set_position(player, target);
        ctx.log.emit(GameEvent::new(EventKind::CellResolved(kind), player, delta));

        if target == ctx.board.last_index() {
            Self::win(ctx, player)
        } else {
            Self::end_turn(ctx)
        }
    }

    pub(crate) fn win(ctx: &mut ResolverContext<'_>, player: PlayerId) -> Step {
        ctx.turn.finish();
        ctx.log.emit(GameEvent::new(EventKind::Won, player, 0));
        info!(%player, "game won");
        Step::Finished(ResolutionStatus::GameOver(player))
    }

    fn end_turn(ctx: &mut ResolverContext<'_>) -> Step {
        Step::Finished(ResolutionStatus::Complete(ctx.turn.end_turn()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullSink;

    struct Fixture {
        board: Board,
        turn: TurnState,
        config: GameConfig,
        log: EventLog,
    }

    impl Fixture {
        fn new(players: usize, interior: &[CellType]) -> Self {
            let mut kinds = vec![CellType::Start];
            kinds.extend_from_slice(interior);
            kinds.push(CellType::End);
            Self {
                board: Board::from_kinds(kinds, 8).unwrap(),
                turn: TurnState::new(players, None),
                config: GameConfig::new(players),
                log: EventLog::new(Box::new(NullSink)),
            }
        }

        fn ctx(&mut self) -> ResolverContext<'_> {
            ResolverContext {
                board: &mut self.board,
                turn: &mut self.turn,
                config: &self.config,
                log: &mut self.log,
            }
        }

        /// Start player 1's turn standing on `cell`.
        fn land(&mut self, cell: usize) -> Step {
            self.turn.start_turn().unwrap();
            let active = self.turn.active();
            self.turn.set_position(active, cell);
            EventResolver::resolve(&mut self.ctx(), cell)
        }

        fn pos(&self, seat: u8) -> usize {
            self.turn.player(PlayerId::new(seat)).unwrap().position
        }
    }

    fn completed(step: &Step) -> bool {
        matches!(step, Step::Finished(ResolutionStatus::Complete(_)))
    }

    #[test]
    fn test_normal_reveals_and_ends_turn() {
        let mut fx = Fixture::new(2, &[CellType::Normal]);
        let step = fx.land(1);
        assert!(completed(&step));
        assert!(fx.board.cells()[1].revealed);
        assert_eq!(fx.turn.active(), PlayerId::new(2));
    }

    #[test]
    fn test_lucky_moves_forward() {
        let mut fx = Fixture::new(2, &[CellType::Lucky, CellType::Normal, CellType::Normal, CellType::Normal]);
        assert!(completed(&fx.land(1)));
        assert_eq!(fx.pos(1), 3);
    }

    #[test]
    fn test_lucky_into_end_wins() {
        let mut fx = Fixture::new(2, &[CellType::Normal, CellType::Lucky]);
        let step = fx.land(2);
        assert!(matches!(step, Step::Finished(ResolutionStatus::GameOver(p)) if p == PlayerId::new(1)));
        assert_eq!(fx.pos(1), 3);
        assert!(!fx.turn.is_locked());
    }

    #[test]
    fn test_bad_without_shield_retreats() {
        let mut fx = Fixture::new(2, &[CellType::Normal, CellType::Normal, CellType::Bad]);
        assert!(completed(&fx.land(3)));
        assert_eq!(fx.pos(1), 1);
    }

    #[test]
    fn test_bad_floors_at_start() {
        let mut fx = Fixture::new(2, &[CellType::Bad]);
        assert!(completed(&fx.land(1)));
        assert_eq!(fx.pos(1), 0);
    }

    #[test]
    fn test_freeze_without_shield() {
        let mut fx = Fixture::new(2, &[CellType::Freeze]);
        assert!(completed(&fx.land(1)));
        assert!(fx.turn.player(PlayerId::new(1)).unwrap().frozen);
    }

    #[test]
    fn test_shielded_trap_suspends_then_blocks() {
        let mut fx = Fixture::new(2, &[CellType::Freeze]);
        fx.turn.grant_shield(PlayerId::new(1));

        let Step::Suspend(suspended) = fx.land(1) else {
            panic!("expected a shield decision");
        };
        let prompt = suspended.prompt(&fx.board, &fx.config);
        assert_eq!(prompt.threat, Threat::Trap(CellType::Freeze));
        assert_eq!(prompt.player, PlayerId::new(1));

        let step = EventResolver::resume(&mut fx.ctx(), suspended, true);
        assert!(completed(&step));
        let p1 = fx.turn.player(PlayerId::new(1)).unwrap();
        assert!(!p1.has_shield);
        assert!(!p1.frozen);
        assert!(fx.board.cells()[1].blocked);
        assert_eq!(fx.turn.active(), PlayerId::new(2));
    }

    #[test]
    fn test_shielded_trap_declined_keeps_shield() {
        let mut fx = Fixture::new(2, &[CellType::Normal, CellType::Bad]);
        fx.turn.grant_shield(PlayerId::new(1));

        let Step::Suspend(suspended) = fx.land(2) else {
            panic!("expected a shield decision");
        };
        assert_eq!(suspended.prompt(&fx.board, &fx.config).retreat, 2);

        assert!(completed(&EventResolver::resume(&mut fx.ctx(), suspended, false)));
        assert_eq!(fx.pos(1), 0);
        assert!(fx.turn.player(PlayerId::new(1)).unwrap().has_shield);
        assert!(!fx.board.cells()[2].blocked);
    }

    #[test]
    fn test_shield_cell_grants_then_converts() {
        let mut fx = Fixture::new(1, &[CellType::Shield, CellType::Normal, CellType::Normal, CellType::Normal]);
        assert!(completed(&fx.land(1)));
        assert!(fx.turn.player(PlayerId::new(1)).unwrap().has_shield);
        assert_eq!(fx.pos(1), 1);

        // Second landing with a shield already held: +2, shield unchanged.
        assert!(completed(&fx.land(1)));
        assert_eq!(fx.pos(1), 3);
        assert!(fx.turn.player(PlayerId::new(1)).unwrap().has_shield);
    }

    #[test]
    fn test_warp_win() {
        let mut fx = Fixture::new(2, &[CellType::WarpWin, CellType::Normal, CellType::Normal]);
        let step = fx.land(1);
        assert!(matches!(step, Step::Finished(ResolutionStatus::GameOver(_))));
        assert_eq!(fx.pos(1), 4);
    }

    #[test]
    fn test_again_keeps_active_player() {
        let mut fx = Fixture::new(3, &[CellType::Again]);
        let step = fx.land(1);
        let Step::Finished(ResolutionStatus::Complete(advance)) = step else {
            panic!("expected turn to end");
        };
        assert!(advance.extra_turn);
        assert_eq!(fx.turn.active(), PlayerId::new(1));
        assert!(!fx.turn.is_locked());
    }

    #[test]
    fn test_attack_hits_unshielded_immediately() {
        let mut fx = Fixture::new(3, &[CellType::Attack, CellType::Normal, CellType::Normal,
                                      CellType::Normal, CellType::Normal]);
        fx.turn.set_position(PlayerId::new(2), 5);
        fx.turn.set_position(PlayerId::new(3), 1);

        assert!(completed(&fx.land(1)));
        assert_eq!(fx.pos(2), 3);
        assert_eq!(fx.pos(3), 0);
        assert_eq!(fx.turn.active(), PlayerId::new(2));
    }

    #[test]
    fn test_attack_suspends_per_shielded_victim_in_order() {
        let mut fx = Fixture::new(4, &[CellType::Attack, CellType::Normal, CellType::Normal, CellType::Normal]);
        for seat in 2..=4 {
            fx.turn.set_position(PlayerId::new(seat), 4);
        }
        fx.turn.grant_shield(PlayerId::new(2));
        fx.turn.grant_shield(PlayerId::new(4));

        let Step::Suspend(first) = fx.land(1) else {
            panic!("expected decision for player 2");
        };
        assert_eq!(first.prompt(&fx.board, &fx.config).player, PlayerId::new(2));
        assert_eq!(fx.pos(3), 4, "later victims wait for earlier decisions");

        let Step::Suspend(second) = EventResolver::resume(&mut fx.ctx(), first, false) else {
            panic!("expected decision for player 4");
        };
        assert_eq!(second.prompt(&fx.board, &fx.config).player, PlayerId::new(4));
        assert_eq!(fx.pos(2), 2);
        assert_eq!(fx.pos(3), 2);

        assert!(completed(&EventResolver::resume(&mut fx.ctx(), second, true)));
        assert_eq!(fx.pos(4), 4);
        assert!(!fx.turn.player(PlayerId::new(4)).unwrap().has_shield);
        assert!(fx.turn.player(PlayerId::new(2)).unwrap().has_shield);
        assert_eq!(fx.turn.active(), PlayerId::new(2));
    }

    #[test]
    fn test_attack_alone_just_ends_turn() {
        let mut fx = Fixture::new(1, &[CellType::Attack]);
        assert!(completed(&fx.land(1)));
        assert_eq!(fx.turn.active(), PlayerId::new(1));
    }
}
