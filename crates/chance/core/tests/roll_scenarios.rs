use std::sync::{Arc, Mutex};

use chance_core::events::keys;
use chance_core::{
    ChanceEngine, DeterministicStream, Difficulty, Haste, HasteSideEffect, RollEvent,
    RollEventKind, RollType, Seed, StreamState, feedback,
};

type Seen = Arc<Mutex<Vec<RollEvent>>>;

fn observe(engine: &ChanceEngine, kind: RollEventKind) -> Seen {
    let seen = Seen::default();
    let sink = Arc::clone(&seen);
    engine.dispatcher().register_fn(kind, move |event| {
        sink.lock().unwrap().push(event.clone());
        Ok(())
    });
    seen
}

/// First seed whose opening four dice all show `face`.
fn seed_opening_with(face: i64) -> Seed {
    (1..10_000_000)
        .find(|&seed| {
            DeterministicStream::peek_at(seed, 0, 1, 6, 4)
                .iter()
                .all(|&value| value == face)
        })
        .expect("some seed opens with four identical faces")
}

#[test]
fn resetting_a_stream_replays_its_dice() {
    let mut stream = DeterministicStream::new(42);
    let first: Vec<i64> = stream.draws(1, 6).take(10).collect();
    stream.reset();
    let second: Vec<i64> = stream.draws(1, 6).take(10).collect();

    assert_eq!(first, second);
    assert!(first.iter().all(|value| (1..=6).contains(value)));
}

#[test]
fn peek_at_matches_replay_from_seed() {
    let mut stream = DeterministicStream::new(12345);
    stream.set_position(3);
    let replayed: Vec<i64> = (0..5).map(|_| stream.next_in_range(1, 6)).collect();

    assert_eq!(DeterministicStream::peek_at(12345, 3, 1, 6, 5), replayed);
}

#[test]
fn saved_state_reproduces_a_session() {
    let engine = ChanceEngine::new(314);
    engine.roll_nd(6).unwrap();
    let saved: StreamState = engine.state().to_string().parse().unwrap();
    let expected: Vec<_> = (0..5).map(|_| engine.roll_nd(3).unwrap()).collect();

    let resumed = ChanceEngine::new(0);
    resumed.restore(saved);
    let replayed: Vec<_> = (0..5).map(|_| resumed.roll_nd(3).unwrap()).collect();

    assert_eq!(expected, replayed);
}

#[test]
fn four_ones_are_outstanding() {
    let text = feedback::describe(&[1, 1, 1, 1], 4, RollType::Standard);
    assert!(text.starts_with("Outstanding! All 4 dice show 1!"), "{text}");
}

#[test]
fn digit_pair_without_doubles() {
    assert_eq!(RollType::DigitPair.total(&[3, 5]), 35);
    let text = feedback::describe(&[3, 5], 35, RollType::DigitPair);
    assert!(!text.contains("Doubles"), "{text}");
}

#[test]
fn extra_hasty_dangerous_task_reports_dice_count() {
    let engine = ChanceEngine::new(99);
    let seen = observe(&engine, RollEventKind::DangerousHaste);

    let outcome = engine
        .task(
            Difficulty::Average,
            Some(Haste::ExtraHasty),
            HasteSideEffect::Dangerous,
        )
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(outcome.dice().len(), 4);
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].metadata.count(keys::DICE_COUNT), Some(4));
    assert_eq!(
        seen[0].metadata.side_effect(keys::SIDE_EFFECT),
        Some(HasteSideEffect::Dangerous)
    );
    assert_eq!(seen[0].outcome.as_ref(), Some(&outcome));
}

#[test]
fn destructive_haste_only_reaches_its_own_handlers() {
    let engine = ChanceEngine::new(7);
    let dangerous = observe(&engine, RollEventKind::DangerousHaste);
    let destructive = observe(&engine, RollEventKind::DestructiveHaste);

    engine
        .task(Difficulty::Difficult, None, HasteSideEffect::Destructive)
        .unwrap();

    assert!(dangerous.lock().unwrap().is_empty());
    assert_eq!(destructive.lock().unwrap().len(), 1);
}

#[test]
fn cleared_dispatcher_reaches_no_handler() {
    let engine = ChanceEngine::new(99);
    let seen = observe(&engine, RollEventKind::DangerousHaste);
    engine.dispatcher().clear(None);

    engine
        .task(
            Difficulty::Average,
            Some(Haste::ExtraHasty),
            HasteSideEffect::Dangerous,
        )
        .unwrap();

    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn four_ones_raise_critical_success() {
    let engine = ChanceEngine::new(seed_opening_with(1));
    let success = observe(&engine, RollEventKind::CriticalSuccess);
    let failure = observe(&engine, RollEventKind::CriticalFailure);

    let outcome = engine.roll_nd(4).unwrap();

    assert_eq!(outcome.dice(), [1, 1, 1, 1]);
    assert_eq!(outcome.total(), 4);
    let success = success.lock().unwrap();
    assert_eq!(success.len(), 1);
    assert_eq!(success[0].metadata.flag(keys::ALL_ONES), Some(true));
    assert!(failure.lock().unwrap().is_empty());
}

#[test]
fn four_sixes_raise_critical_failure() {
    let engine = ChanceEngine::new(seed_opening_with(6));
    let failure = observe(&engine, RollEventKind::CriticalFailure);

    let outcome = engine.roll_nd(4).unwrap();

    assert_eq!(outcome.dice(), [6, 6, 6, 6]);
    let failure = failure.lock().unwrap();
    assert_eq!(failure.len(), 1);
    assert_eq!(failure[0].metadata.flag(keys::ALL_SIXES), Some(true));
}

#[test]
fn leading_six_alone_is_not_a_critical_failure() {
    let seed = (1..10_000_000)
        .find(|&seed| {
            let dice = DeterministicStream::peek_at(seed, 0, 1, 6, 4);
            dice[0] == 6 && dice.iter().any(|&value| value != 6)
        })
        .expect("some seed opens with a six");
    let engine = ChanceEngine::new(seed);
    let failure = observe(&engine, RollEventKind::CriticalFailure);

    let outcome = engine.roll_nd(4).unwrap();

    assert_eq!(outcome.dice()[0], 6);
    assert!(failure.lock().unwrap().is_empty());
}

#[test]
fn failing_handler_keeps_the_outcome() {
    let engine = ChanceEngine::new(21);
    engine
        .dispatcher()
        .register_fn(RollEventKind::DangerousHaste, |_| Err("player fainted".into()));
    let expected = DeterministicStream::peek_at(21, 0, 1, 6, 2);

    let err = engine
        .task(Difficulty::Average, None, HasteSideEffect::Dangerous)
        .unwrap_err();

    let drawn: Vec<i64> = err.outcome().dice().iter().map(|&d| i64::from(d)).collect();
    assert_eq!(drawn, expected);
    assert!(err.to_string().contains("player fainted"));
    assert_eq!(engine.state().position, 2);
}
