//! Engine facade: the operations a driver calls.
//!
//! A driver (UI, bot, test harness) advances the game with discrete
//! calls. Between calls the engine sits in one [`Phase`]:
//!
//! ```text
//! AwaitingRoll --roll--> AwaitingAnswer --answer(wrong)--> AwaitingRoll
//!                              |
//!                        answer(right)
//!                              v
//!                   AwaitingShieldDecision* --decide--> AwaitingRoll | GameOver
//! ```
//!
//! Rolling, moving, reverting and resolving happen inside a single call.
//! At most one suspension (question or shield decision) is ever pending,
//! and the turn lock stays held from the roll until the turn ends.
//!
//! Rejected calls return a [`GameError`] and leave the engine untouched.

mod builder;
mod snapshot;

pub use builder::{EngineBuilder, DEFAULT_GROUP};
pub use snapshot::{GameSnapshot, TurnView};

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::{generate_board, Board};
use crate::core::{EngineResult, GameConfig, GameError, GameRng, Player, PlayerId, RandomSource};
use crate::events::{EventKind, EventLog, GameEvent, PresentationSink};
use crate::questions::{GroupId, Question, QuestionPool, QuestionProvider};
use crate::resolution::{
    EventResolver, ResolutionStatus, ResolverContext, ShieldDecider, ShieldPrompt, Step, Suspended,
};
use crate::turn::{TurnAdvance, TurnStart, TurnState};

/// Where the game is waiting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The active player may roll.
    AwaitingRoll,
    /// A question is posed; waiting on `answer_question`.
    AwaitingAnswer {
        player: PlayerId,
        cell: usize,
        question: Question,
    },
    /// Waiting on `decide_shield`.
    AwaitingShieldDecision(ShieldPrompt),
    /// Someone reached the End cell.
    GameOver {
        winner: PlayerId,
    },
}

/// What a driver call led to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The token moved and a question must be answered.
    QuestionPosed {
        player: PlayerId,
        from: usize,
        to: usize,
        question: Question,
    },
    /// A shield decision is needed before resolution can continue.
    AwaitingShieldDecision(ShieldPrompt),
    /// The turn finished.
    TurnEnded(TurnAdvance),
    /// The active player was frozen and sat the turn out.
    TurnSkipped {
        player: PlayerId,
        next: PlayerId,
    },
    /// The game is over.
    GameOver {
        winner: PlayerId,
    },
}

/// One game session.
///
/// Owns the board, the players (through [`TurnState`]), the active
/// question pool and the injected randomness.
pub struct Engine<R: RandomSource = GameRng> {
    config: GameConfig,
    board: Board,
    fixed_board: Option<Board>,
    turn: TurnState,
    pool: QuestionPool,
    rng: R,
    log: EventLog,
    phase: Phase,
    suspended: Option<Suspended>,
}

impl<R: RandomSource> Engine<R> {
    /// Assemble an engine and start a game. Used by [`EngineBuilder`].
    fn assemble(
        config: GameConfig,
        fixed_board: Option<Board>,
        pool: QuestionPool,
        rng: R,
        sink: Box<dyn PresentationSink>,
    ) -> EngineResult<Self> {
        config.validate()?;
        let player_count = config.player_count;
        let mut engine = Self {
            board: fixed_board.clone().unwrap_or_else(|| Board::from_cells(Vec::new())),
            turn: TurnState::new(player_count, config.max_extra_turns),
            config,
            fixed_board,
            pool,
            rng,
            log: EventLog::new(sink),
            phase: Phase::AwaitingRoll,
            suspended: None,
        };
        engine.reset_game(player_count)?;
        Ok(engine)
    }

    // === Driver operations ===

    /// Start a new game with `player_count` players.
    ///
    /// Rebuilds the board and the players, seat 1 to move. Clears the
    /// event history and the pool's drawn ids. An out-of-range count is
    /// rejected and nothing changes.
    pub fn reset_game(&mut self, player_count: usize) -> EngineResult<()> {
        let requested = i64::try_from(player_count).unwrap_or(i64::MAX);
        let count = self.config.check_player_count(requested)?;

        self.config.player_count = count;
        self.board = match &self.fixed_board {
            Some(board) => {
                let mut board = board.clone();
                board.conceal_all();
                board
            }
            None => generate_board(&self.config.board, &mut self.rng),
        };
        self.turn = TurnState::new(count, self.config.max_extra_turns);
        self.pool.reset_used();
        self.log.clear();
        self.phase = Phase::AwaitingRoll;
        self.suspended = None;

        info!(players = count, cells = self.board.len(), "game reset");
        Ok(())
    }

    /// Add or remove players and restart.
    ///
    /// Rejected, with no state change, if the result leaves the allowed
    /// range. Returns the new player count.
    pub fn change_player_count(&mut self, delta: i64) -> EngineResult<usize> {
        let requested = (self.turn.player_count() as i64).saturating_add(delta);
        let count = self.config.check_player_count(requested).inspect_err(|err| {
            warn!(%err, "player count change rejected");
        })?;
        self.reset_game(count)?;
        Ok(count)
    }

    /// Roll with a die value the driver already has.
    pub fn roll(&mut self, dice: u32) -> EngineResult<Outcome> {
        self.ensure_can_roll()?;
        let faces = self.config.dice_faces;
        if !(1..=faces).contains(&dice) {
            return Err(GameError::InvalidDiceValue { value: dice, faces });
        }

        let player = match self.turn.start_turn()? {
            TurnStart::Skipped { player, next } => {
                self.log.emit(GameEvent::new(EventKind::TurnSkipped, player, 0));
                return Ok(Outcome::TurnSkipped { player, next });
            }
            TurnStart::Ready(player) => player,
        };

        let from = self.turn.last_position();
        let to = self.board.clamp(from as i64 + i64::from(dice));
        let delta = self.turn.set_position(player, to);
        self.log.emit(GameEvent::new(EventKind::Moved, player, delta));
        debug!(%player, dice, from, to, "moved");

        if to == self.board.last_index() {
            let step = EventResolver::win(&mut self.context(), player);
            return Ok(self.settle(step));
        }

        let question = self.pool.next_question(&mut self.rng);
        self.phase = Phase::AwaitingAnswer {
            player,
            cell: to,
            question: question.clone(),
        };
        Ok(Outcome::QuestionPosed {
            player,
            from,
            to,
            question,
        })
    }

    /// Roll using the engine's own randomness.
    pub fn roll_dice(&mut self) -> EngineResult<Outcome> {
        self.ensure_can_roll()?;
        let faces = self.config.dice_faces;
        let dice = self.rng.index(faces as usize) as u32 + 1;
        self.roll(dice)
    }

    /// Report whether the posed question was answered correctly.
    ///
    /// Wrong: the player goes back to where the turn began and the turn
    /// ends with no cell effect. Right: the cell's effect resolves.
    pub fn answer_question(&mut self, correct: bool) -> EngineResult<Outcome> {
        let Phase::AwaitingAnswer { player, cell, .. } = self.phase else {
            warn!("answer without a pending question");
            return Err(GameError::NotAwaitingAnswer);
        };

        if !correct {
            let back = self.turn.last_position() as i64 - self.turn.active_player().position as i64;
            let advance = self.turn.revert_and_end_turn();
            self.log.emit(GameEvent::new(EventKind::Reverted, player, back));
            self.phase = Phase::AwaitingRoll;
            return Ok(Outcome::TurnEnded(advance));
        }

        let step = EventResolver::resolve(&mut self.context(), cell);
        Ok(self.settle(step))
    }

    /// Answer the pending shield decision for `player`.
    pub fn decide_shield(&mut self, player: PlayerId, use_shield: bool) -> EngineResult<Outcome> {
        let Phase::AwaitingShieldDecision(prompt) = self.phase else {
            return Err(GameError::NotAwaitingDecision);
        };
        if prompt.player != player {
            return Err(GameError::UnexpectedDecision {
                expected: prompt.player,
                got: player,
            });
        }
        let Some(suspended) = self.suspended.take() else {
            return Err(GameError::NotAwaitingDecision);
        };

        debug!(%player, use_shield, "shield decision");
        let step = EventResolver::resume(&mut self.context(), suspended, use_shield);
        Ok(self.settle(step))
    }

    /// Answer every pending shield decision through `decider`.
    ///
    /// Returns the outcome of the last decision.
    pub fn settle_decisions(&mut self, decider: &mut impl ShieldDecider) -> EngineResult<Outcome> {
        let mut outcome = None;
        while let Phase::AwaitingShieldDecision(prompt) = self.phase {
            let use_shield = decider.decide(&prompt);
            outcome = Some(self.decide_shield(prompt.player, use_shield)?);
        }
        outcome.ok_or(GameError::NotAwaitingDecision)
    }

    /// Switch to another question group. Drawn ids start over.
    pub fn select_group(&mut self, provider: &impl QuestionProvider, group: &GroupId) -> EngineResult<()> {
        let pool = provider
            .pool(group)
            .ok_or_else(|| GameError::UnknownGroup(group.0.clone()))?;
        self.replace_pool(pool);
        Ok(())
    }

    /// Install a pool directly, for hosts that manage their own store.
    pub fn replace_pool(&mut self, mut pool: QuestionPool) {
        pool.reset_used();
        debug!(group = %pool.group(), questions = pool.len(), "question group selected");
        self.pool = pool;
    }

    /// Route notifications to a new sink.
    pub fn set_sink(&mut self, sink: Box<dyn PresentationSink>) {
        self.log.set_sink(sink);
    }

    // === Read-only views ===

    /// Owned copy of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            players: self.turn.players().to_vec(),
            turn: TurnView::from(&self.turn),
            phase: self.phase.clone(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.turn.players()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.turn.player(id)
    }

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The active pool, including drawn ids, for hosts that persist it.
    #[must_use]
    pub fn question_pool(&self) -> &QuestionPool {
        &self.pool
    }

    /// Every notification since the last reset.
    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        self.log.history()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// The injected randomness, e.g. to checkpoint a `GameRng`.
    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    // === Internals ===

    fn ensure_can_roll(&self) -> EngineResult<()> {
        if let Phase::GameOver { winner } = self.phase {
            return Err(GameError::GameOver { winner });
        }
        if self.turn.is_locked() {
            let err = GameError::ReentrantRoll { active: self.turn.active() };
            warn!(%err, "roll ignored");
            return Err(err);
        }
        Ok(())
    }

    fn context(&mut self) -> ResolverContext<'_> {
        ResolverContext {
            board: &mut self.board,
            turn: &mut self.turn,
            config: &self.config,
            log: &mut self.log,
        }
    }

    /// Record where resolution stopped and report it.
    fn settle(&mut self, step: Step) -> Outcome {
        match step {
            Step::Finished(ResolutionStatus::Complete(advance)) => {
                self.phase = Phase::AwaitingRoll;
                Outcome::TurnEnded(advance)
            }
            Step::Finished(ResolutionStatus::GameOver(winner)) => {
                self.phase = Phase::GameOver { winner };
                Outcome::GameOver { winner }
            }
            Step::Suspend(suspended) => {
                let prompt = suspended.prompt(&self.board, &self.config);
                self.suspended = Some(suspended);
                self.phase = Phase::AwaitingShieldDecision(prompt);
                Outcome::AwaitingShieldDecision(prompt)
            }
        }
    }
}

impl<R: RandomSource + std::fmt::Debug> std::fmt::Debug for Engine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("phase", &self.phase)
            .field("turn", &self.turn)
            .field("cells", &self.board.len())
            .field("group", self.pool.group())
            .field("rng", &self.rng)
            .field("log", &self.log)
            .finish_non_exhaustive()
    }
}
