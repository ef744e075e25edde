//! Question gate tests: no-repeat draws, pool exhaustion, group switching.

use rustc_hash::FxHashSet;

use rust_quizboard::{
    Board, CellType, Engine, EngineBuilder, GameError, GameRng, GroupId, Outcome, Question,
    QuestionGroup, QuestionId, QuestionLibrary, QuestionPool,
};

fn pool(group: &str, n: usize) -> QuestionPool {
    let questions = (0..n)
        .map(|i| Question::new(format!("{group}-{i}"), format!("Question {i}?"), "yes"))
        .collect();
    QuestionPool::new(GroupId::new(group), questions)
}

/// One player on a long board of Normal cells; wrong answers keep them on Start.
fn engine_with(pool: QuestionPool) -> Engine<GameRng> {
    let kinds = [CellType::Start]
        .into_iter()
        .chain([CellType::Normal; 30])
        .chain([CellType::End]);
    EngineBuilder::new()
        .player_count(1)
        .fixed_board(Board::from_kinds(kinds, 8).unwrap())
        .questions(pool)
        .seed(17)
        .build()
        .unwrap()
}

fn ask(engine: &mut Engine<GameRng>) -> QuestionId {
    let Outcome::QuestionPosed { question, .. } = engine.roll(1).unwrap() else {
        panic!("expected a question");
    };
    engine.answer_question(false).unwrap();
    question.id
}

#[test]
fn test_each_pass_draws_every_question_once() {
    let mut engine = engine_with(pool("g", 5));

    for _ in 0..3 {
        let pass: FxHashSet<QuestionId> = (0..5).map(|_| ask(&mut engine)).collect();
        assert_eq!(pass.len(), 5);
    }
}

#[test]
fn test_used_never_exceeds_pool() {
    let mut engine = engine_with(pool("g", 3));

    let mut counts = Vec::new();
    for _ in 0..7 {
        ask(&mut engine);
        counts.push(engine.question_pool().used_count());
    }
    assert_eq!(counts, vec![1, 2, 3, 1, 2, 3, 1]);
}

#[test]
fn test_cleared_pool_can_redraw() {
    let mut engine = engine_with(pool("g", 2));
    let first = ask(&mut engine);
    let second = ask(&mut engine);
    assert_ne!(first, second);

    let third = ask(&mut engine);
    assert!(third == first || third == second);
    assert!(engine.question_pool().is_used(&third));
}

#[test]
fn test_empty_pool_poses_placeholder() {
    let mut engine = engine_with(QuestionPool::empty(GroupId::new("none")));

    let Outcome::QuestionPosed { question, .. } = engine.roll(2).unwrap() else {
        panic!("expected a question");
    };
    assert!(question.is_placeholder());

    // Placeholder answers still gate the cell.
    assert!(matches!(engine.answer_question(true).unwrap(), Outcome::TurnEnded(_)));
    assert_eq!(engine.player(rust_quizboard::PlayerId::new(1)).unwrap().position, 2);
    assert_eq!(engine.question_pool().used_count(), 0);
}

#[test]
fn test_reset_clears_used() {
    let mut engine = engine_with(pool("g", 4));
    ask(&mut engine);
    ask(&mut engine);
    assert_eq!(engine.question_pool().used_count(), 2);

    engine.reset_game(1).unwrap();
    assert_eq!(engine.question_pool().used_count(), 0);
    assert_eq!(engine.question_pool().len(), 4);
}

#[test]
fn test_group_switch() {
    let library = QuestionLibrary::new()
        .with_group(pool_group("history", 3))
        .with_group(pool_group("science", 2));

    let mut engine = engine_with(pool("start", 1));
    engine.select_group(&library, &GroupId::new("history")).unwrap();
    let drawn = ask(&mut engine);
    assert!(drawn.as_str().starts_with("history-"));

    engine.select_group(&library, &GroupId::new("science")).unwrap();
    assert_eq!(engine.question_pool().used_count(), 0);
    let drawn = ask(&mut engine);
    assert!(drawn.as_str().starts_with("science-"));

    assert_eq!(
        engine.select_group(&library, &GroupId::new("art")),
        Err(GameError::UnknownGroup("art".to_string()))
    );
    assert_eq!(engine.question_pool().group(), &GroupId::new("science"));
    assert_eq!(engine.question_pool().used_count(), 1);
}

fn pool_group(id: &str, n: usize) -> QuestionGroup {
    (0..n).fold(QuestionGroup::new(id, id.to_uppercase()), |group, i| {
        group.with_question(Question::new(format!("{id}-{i}"), format!("{id} {i}?"), "yes"))
    })
}

#[test]
fn test_replace_pool_persists_through_reset() {
    let mut engine = engine_with(pool("a", 1));
    engine.replace_pool(pool("b", 2));
    engine.reset_game(1).unwrap();
    assert_eq!(engine.question_pool().group(), &GroupId::new("b"));
}
