//! Property-based tests for board generation and game flow.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use rust_quizboard::{
    generate_board, BoardConfig, CellType, Engine, EngineBuilder, GameConfig, GameRng, Outcome,
    Phase, PlayerId, Question, QuestionPool, GroupId,
};

/// One driver input, interpreted according to the current phase.
#[derive(Clone, Debug)]
enum Input {
    Roll(u32),
    Answer(bool),
    Decide(bool),
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        (1u32..=6).prop_map(Input::Roll),
        any::<bool>().prop_map(Input::Answer),
        any::<bool>().prop_map(Input::Decide),
    ]
}

fn engine(players: usize, seed: u64, questions: usize) -> Engine<GameRng> {
    let pool = QuestionPool::new(
        GroupId::new("prop"),
        (0..questions).map(|i| Question::new(format!("q{i}"), "?", "!")).collect(),
    );
    EngineBuilder::new()
        .player_count(players)
        .questions(pool)
        .seed(seed)
        .build()
        .unwrap()
}

/// Feed an input; inputs that do not fit the phase are adapted to it.
fn step(engine: &mut Engine<GameRng>, input: &Input) -> Option<Outcome> {
    let outcome = match (engine.phase().clone(), input) {
        (Phase::GameOver { .. }, _) => return None,
        (Phase::AwaitingRoll, Input::Roll(d)) => engine.roll(*d),
        (Phase::AwaitingRoll, _) => engine.roll_dice(),
        (Phase::AwaitingAnswer { .. }, Input::Answer(correct)) => engine.answer_question(*correct),
        (Phase::AwaitingAnswer { .. }, _) => engine.answer_question(true),
        (Phase::AwaitingShieldDecision(prompt), Input::Decide(block)) => {
            engine.decide_shield(prompt.player, *block)
        }
        (Phase::AwaitingShieldDecision(prompt), _) => engine.decide_shield(prompt.player, true),
    };
    Some(outcome.unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every reset seats fresh players with seat 1 to move.
    #[test]
    fn prop_reset_seats_fresh_players(players in 1usize..=4, seed in any::<u64>()) {
        let mut engine = engine(2, seed, 0);
        engine.reset_game(players).unwrap();

        prop_assert_eq!(engine.players().len(), players);
        for (i, p) in engine.players().iter().enumerate() {
            prop_assert_eq!(p.id, PlayerId::new(i as u8 + 1));
            prop_assert_eq!(p.position, 0);
            prop_assert!(!p.frozen);
            prop_assert!(!p.has_shield);
        }
        prop_assert_eq!(engine.turn().active(), PlayerId::new(1));
    }

    /// Generated boards run from Start to End with zone-bound specials.
    #[test]
    fn prop_generated_board_shape(rows in 1usize..10, columns in 2usize..10, seed in any::<u64>()) {
        let config = BoardConfig::default().with_grid(rows, columns);
        let board = generate_board(&config, &mut GameRng::new(seed));
        let len = config.length();
        let early_end = config.rules.early_zone_end(len);
        let late_start = config.rules.late_zone_start(len);

        prop_assert_eq!(board.len(), len);
        prop_assert_eq!(board.kind_at(0), CellType::Start);
        prop_assert_eq!(board.kind_at(len - 1), CellType::End);
        for cell in &board.cells()[1..len - 1] {
            prop_assert!(!cell.kind.is_terminal());
            if cell.kind == CellType::Shield {
                prop_assert!(cell.index <= early_end);
            }
            if cell.kind == CellType::WarpWin {
                prop_assert!(cell.index >= late_start);
            }
            prop_assert!(!cell.revealed);
        }
    }

    /// Across arbitrary play, no token leaves the board, drawn ids stay
    /// bounded, and the lock is held exactly while a suspension is pending.
    #[test]
    fn prop_play_invariants(
        players in 1usize..=4,
        seed in any::<u64>(),
        questions in 0usize..6,
        inputs in prop::collection::vec(input(), 1..200),
    ) {
        let mut engine = engine(players, seed, questions);
        let last = engine.board().last_index();

        for input in &inputs {
            let Some(outcome) = step(&mut engine, input) else { break };

            for p in engine.players() {
                prop_assert!(p.position <= last);
            }
            prop_assert!(engine.question_pool().used_count() <= engine.question_pool().len());

            let pending = matches!(
                engine.phase(),
                Phase::AwaitingAnswer { .. } | Phase::AwaitingShieldDecision(_)
            );
            prop_assert_eq!(engine.turn().is_locked(), pending);

            if let Outcome::GameOver { winner } = outcome {
                prop_assert_eq!(engine.player(winner).unwrap().position, last);
                prop_assert_eq!(engine.winner(), Some(winner));
            }
        }
    }

    /// Only Again keeps the active player; every other resolved landing
    /// passes the turn to the next seat.
    #[test]
    fn prop_turn_rotation(
        players in 1usize..=4,
        seed in any::<u64>(),
        inputs in prop::collection::vec(input(), 1..200),
    ) {
        let mut engine = engine(players, seed, 3);

        for input in &inputs {
            let landing = match engine.phase() {
                Phase::AwaitingAnswer { player, cell, .. } => {
                    Some((*player, engine.board().kind_at(*cell)))
                }
                _ => None,
            };
            let decided = match engine.phase() {
                Phase::AwaitingShieldDecision(_) => Some(engine.turn().active()),
                _ => None,
            };

            let Some(outcome) = step(&mut engine, input) else { break };
            let Outcome::TurnEnded(advance) = outcome else { continue };

            if let Some((player, kind)) = landing {
                let answered_right = match input {
                    Input::Answer(correct) => *correct,
                    _ => true,
                };
                if kind == CellType::Again && answered_right {
                    prop_assert_eq!(advance.next, player);
                    prop_assert!(advance.extra_turn);
                } else {
                    prop_assert_eq!(advance.next, player.next(players));
                    prop_assert!(!advance.extra_turn);
                }
            }
            if let Some(player) = decided {
                prop_assert_eq!(advance.next, player.next(players));
            }
        }
    }

    /// Dice values outside the die are rejected without touching state.
    #[test]
    fn prop_invalid_dice_rejected(seed in any::<u64>(), dice in 7u32..1000) {
        let mut engine = engine(2, seed, 1);
        let before = engine.snapshot();
        prop_assert!(engine.roll(dice).is_err());
        prop_assert!(engine.roll(0).is_err());
        prop_assert_eq!(engine.snapshot(), before);
    }

    /// Player-count changes either land in range or change nothing.
    #[test]
    fn prop_change_player_count(start in 1usize..=4, delta in -6i64..=6) {
        let mut engine = engine(start, 1, 0);
        let before = engine.snapshot();
        let requested = start as i64 + delta;

        match engine.change_player_count(delta) {
            Ok(count) => {
                prop_assert!((1..=4).contains(&requested));
                prop_assert_eq!(count as i64, requested);
                prop_assert_eq!(engine.players().len(), count);
            }
            Err(_) => {
                prop_assert!(!(1..=4).contains(&requested));
                prop_assert_eq!(engine.snapshot(), before);
            }
        }
    }
}

#[test]
fn test_default_config_generates_classic_board() {
    let config = GameConfig::default();
    let board = generate_board(&config.board, &mut GameRng::new(2024));
    assert_eq!(board.len(), 48);
    assert_eq!(board.cells()[8].pos.row, 2);
}
