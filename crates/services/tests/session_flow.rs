use std::sync::Arc;

use services::{EngineConfig, Phase, SessionEngine, TickOutcome};
use trivia_core::model::{Difficulty, Question, QuestionId, Selection, Theme, ThemeId};

/// Theme with `easy` multiple-choice questions and `hard` true-false questions.
fn build_theme(easy: usize, hard: usize) -> Arc<Theme> {
    let mut questions = Vec::new();
    for i in 0..easy {
        questions.push(
            Question::multiple_choice(
                QuestionId::new(format!("easy-{i}")),
                format!("Easy {i}"),
                Difficulty::Easy,
                vec!["w".into(), "x".into(), "y".into(), "z".into()],
                i % 4,
            )
            .unwrap(),
        );
    }
    for i in 0..hard {
        questions.push(
            Question::true_false(
                QuestionId::new(format!("hard-{i}")),
                format!("Hard {i}"),
                Difficulty::Hard,
                i % 2 == 0,
            )
            .unwrap(),
        );
    }
    Arc::new(Theme::new(ThemeId::new("flow"), "Flow", "🌊", "", questions).unwrap())
}

fn engine() -> SessionEngine {
    SessionEngine::with_seed(EngineConfig::default(), 2024)
}

fn correct_answer(engine: &SessionEngine) -> Option<Selection> {
    engine.current_question().map(Question::correct_selection)
}

fn wrong_answer(engine: &SessionEngine) -> Option<Selection> {
    match engine.current_question()?.correct_selection() {
        Selection::Index(i) => Some(Selection::Index(i + 1)),
        Selection::Bool(b) => Some(Selection::Bool(!b)),
    }
}

#[test]
fn start_with_enough_questions_selects_ten() {
    let mut engine = engine();
    engine.start_game(build_theme(14, 2), Difficulty::Easy);

    assert_eq!(engine.questions().len(), 10);
    assert_eq!(engine.phase(), Phase::Playing);
    assert_eq!(engine.time_left(), 30);
    assert_eq!(engine.current_index(), 0);
    assert!(engine.answers().is_empty());
    assert!(
        engine
            .questions()
            .iter()
            .all(|q| q.difficulty() == Difficulty::Easy)
    );
}

#[test]
fn thirty_silent_seconds_auto_submit_no_answer() {
    let mut engine = engine();
    engine.start_game(build_theme(14, 0), Difficulty::Easy);
    let first_id = engine.questions()[0].id().clone();

    for expected in (1..30).rev() {
        assert_eq!(
            engine.tick(),
            TickOutcome::Counted {
                time_left: expected
            }
        );
    }
    let outcome = engine.tick();
    assert!(matches!(outcome, TickOutcome::Expired(ref o) if !o.is_complete));

    let first = &engine.answers()[0];
    assert_eq!(first.question_id, first_id);
    assert_eq!(first.selected_answer, None);
    assert!(!first.correct);
    assert_eq!(engine.current_index(), 1);
    assert_eq!(engine.time_left(), 30);
}

#[test]
fn five_ticks_take_five_seconds_off() {
    let mut engine = engine();
    engine.start_game(build_theme(3, 0), Difficulty::Easy);
    for _ in 0..5 {
        engine.tick();
    }
    assert_eq!(engine.time_left(), 25);
    assert!(engine.answers().is_empty());
}

#[test]
fn all_correct_three_question_session_scores_three() {
    let mut engine = engine();
    engine.start_game(build_theme(3, 0), Difficulty::Easy);
    assert_eq!(engine.questions().len(), 3);

    while engine.phase() == Phase::Playing {
        engine.submit_answer(correct_answer(&engine)).unwrap();
    }

    assert_eq!(engine.phase(), Phase::Reviewing);
    assert_eq!(engine.score(), 3);
    let review = engine.review().unwrap();
    assert_eq!(review.percent, 100);
    assert_eq!(review.mistakes().count(), 0);
}

#[test]
fn short_pool_ends_after_its_last_question() {
    let mut engine = engine();
    engine.start_game(build_theme(12, 4), Difficulty::Hard);
    assert_eq!(engine.questions().len(), 4);

    for n in 1..=4 {
        assert_eq!(engine.phase(), Phase::Playing);
        let outcome = engine.submit_answer(Some(Selection::Bool(true))).unwrap();
        assert_eq!(outcome.is_complete, n == 4);
    }
    assert_eq!(engine.phase(), Phase::Reviewing);
    assert_eq!(engine.answers().len(), 4);
}

#[test]
fn index_and_answers_advance_in_lockstep() {
    let mut engine = engine();
    engine.start_game(build_theme(10, 0), Difficulty::Easy);
    let total = engine.questions().len();

    let mut previous = engine.current_index();
    for step in 0..total {
        assert_eq!(engine.answers().len(), engine.current_index());
        if step % 3 == 0 {
            // let the countdown run out on every third question
            while engine.answers().len() == step {
                engine.tick();
            }
        } else {
            engine.submit_answer(wrong_answer(&engine)).unwrap();
        }
        if engine.phase() == Phase::Playing {
            assert_eq!(engine.current_index(), previous + 1);
            previous = engine.current_index();
        }
    }

    assert_eq!(engine.phase(), Phase::Reviewing);
    assert_eq!(engine.answers().len(), total);
    let ids: Vec<_> = engine.answers().iter().map(|a| &a.question_id).collect();
    let expected: Vec<_> = engine.questions().iter().map(Question::id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn wrong_and_missing_answers_score_zero() {
    let mut engine = engine();
    engine.start_game(build_theme(6, 0), Difficulty::Easy);

    engine.submit_answer(None).unwrap();
    engine.submit_answer(Some(Selection::Bool(true))).unwrap();
    engine.submit_answer(Some(Selection::Index(99))).unwrap();
    while engine.phase() == Phase::Playing {
        engine.submit_answer(wrong_answer(&engine)).unwrap();
    }

    assert_eq!(engine.score(), 0);
    assert_eq!(engine.snapshot().score, 0);
    assert!(engine.answers().iter().all(|a| !a.correct));
}

#[test]
fn score_counts_correct_records() {
    let mut engine = engine();
    engine.start_game(build_theme(5, 0), Difficulty::Easy);

    engine.submit_answer(correct_answer(&engine)).unwrap();
    engine.submit_answer(wrong_answer(&engine)).unwrap();
    engine.submit_answer(correct_answer(&engine)).unwrap();

    let correct = engine.answers().iter().filter(|a| a.correct).count();
    assert_eq!(engine.score(), correct);
    assert_eq!(engine.score(), 2);
}

#[test]
fn reset_is_idempotent_from_any_phase() {
    let idle = engine().snapshot();

    let mut engine = engine();
    engine.reset_game();
    engine.reset_game();
    assert_eq!(engine.snapshot(), idle);

    engine.start_game(build_theme(3, 0), Difficulty::Easy);
    engine.tick();
    engine.reset_game();
    assert_eq!(engine.snapshot(), idle);
    assert!(engine.countdown().is_none());
    assert_eq!(engine.tick(), TickOutcome::Ignored);

    engine.start_game(build_theme(1, 0), Difficulty::Easy);
    engine.submit_answer(None).unwrap();
    assert_eq!(engine.phase(), Phase::Reviewing);
    engine.reset_game();
    engine.reset_game();
    assert_eq!(engine.snapshot(), idle);
}

#[test]
fn reviewing_ignores_further_ticks() {
    let mut engine = engine();
    engine.start_game(build_theme(1, 0), Difficulty::Easy);
    for _ in 0..30 {
        engine.tick();
    }
    assert_eq!(engine.phase(), Phase::Reviewing);
    let frozen = engine.snapshot();

    for _ in 0..90 {
        assert_eq!(engine.tick(), TickOutcome::Ignored);
    }
    assert_eq!(engine.snapshot(), frozen);
    assert_eq!(engine.answers().len(), 1);
}

#[test]
fn custom_config_changes_count_and_timer() {
    let config = EngineConfig::new(3, 5).unwrap();
    let mut engine = SessionEngine::with_seed(config, 9);
    engine.start_game(build_theme(8, 0), Difficulty::Easy);
    assert_eq!(engine.questions().len(), 3);
    assert_eq!(engine.time_left(), 5);

    for _ in 0..5 {
        engine.tick();
    }
    assert_eq!(engine.current_index(), 1);
    assert_eq!(engine.time_left(), 5);
}

#[test]
fn same_seed_same_questions() {
    let theme = build_theme(20, 0);
    let mut a = SessionEngine::with_seed(EngineConfig::default(), 77);
    let mut b = SessionEngine::with_seed(EngineConfig::default(), 77);
    a.start_game(Arc::clone(&theme), Difficulty::Easy);
    b.start_game(theme, Difficulty::Easy);
    assert_eq!(a.questions(), b.questions());
}
