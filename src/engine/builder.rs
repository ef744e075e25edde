//! Engine construction.

use crate::board::Board;
use crate::core::{EngineResult, GameConfig, GameRng, RandomSource};
use crate::events::{NullSink, PresentationSink};
use crate::questions::{GroupId, QuestionPool};

use super::Engine;

/// Group id of the pool an engine starts with when none is given.
pub const DEFAULT_GROUP: &str = "default";

/// Builder for creating an [`Engine`].
///
/// ```
/// use rust_quizboard::engine::EngineBuilder;
///
/// let engine = EngineBuilder::new().player_count(3).seed(7).build().unwrap();
/// assert_eq!(engine.players().len(), 3);
/// assert_eq!(engine.board().len(), 48);
/// ```
pub struct EngineBuilder {
    config: GameConfig,
    fixed_board: Option<Board>,
    pool: QuestionPool,
    sink: Box<dyn PresentationSink>,
    seed: u64,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            fixed_board: None,
            pool: QuestionPool::empty(GroupId::new(DEFAULT_GROUP)),
            sink: Box::new(NullSink),
            seed: 0,
        }
    }
}

impl EngineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration. Keeps nothing from earlier calls
    /// to [`player_count`](Self::player_count).
    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Players seated at the first game. Checked on build.
    #[must_use]
    pub fn player_count(mut self, count: usize) -> Self {
        self.config.player_count = count;
        self
    }

    /// Play every game on this board instead of generating one.
    #[must_use]
    pub fn fixed_board(mut self, board: Board) -> Self {
        self.fixed_board = Some(board);
        self
    }

    /// Starting question pool.
    #[must_use]
    pub fn questions(mut self, pool: QuestionPool) -> Self {
        self.pool = pool;
        self
    }

    #[must_use]
    pub fn sink(mut self, sink: impl PresentationSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Seed for the default [`GameRng`].
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build with a seeded [`GameRng`] and start the first game.
    pub fn build(self) -> EngineResult<Engine<GameRng>> {
        let rng = GameRng::new(self.seed);
        self.build_with_rng(rng)
    }

    /// Build with a caller-supplied randomness source.
    pub fn build_with_rng<R: RandomSource>(self, rng: R) -> EngineResult<Engine<R>> {
        Engine::assemble(self.config, self.fixed_board, self.pool, rng, self.sink)
    }
}

impl std::fmt::Debug for EngineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineBuilder")
            .field("config", &self.config)
            .field("fixed_board", &self.fixed_board.is_some())
            .field("group", self.pool.group())
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
