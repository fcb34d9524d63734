//! Daily New-Family Limit Journeys
//!
//! A capped student meets only a few new families per UTC day.

use std::collections::HashSet;

use factdrill_core::{Attempt, QuizFormat, Storage, introduced_on_day};
use factdrill_e2e_tests::{TestDataFactory, TestStoreManager};

/// Answer `count` items correctly, one minute apart, returning the families seen
fn drill(
    session: &mut factdrill_e2e_tests::harness::TestSession,
    clock: &factdrill_core::ManualClock,
    count: usize,
) -> HashSet<String> {
    let mut seen = HashSet::new();
    for _ in 0..count {
        let Some(item) = session.next_item().unwrap() else {
            break;
        };
        seen.insert(item.family_id.clone());
        session.submit_answer(&item.family_id, item.format, true).unwrap();
        clock.advance(60_000);
    }
    seen
}

#[test]
fn test_cap_holds_within_a_day() {
    let db = TestStoreManager::new_temp();
    db.save_config(TestDataFactory::capped_config(&[2, 3, 4], &[QuizFormat::Mul], 3));
    let start = TestDataFactory::noon(2026, 3, 10);
    let (mut session, clock) = db.session(17, start);
    session.initialize().unwrap();

    let seen = drill(&mut session, &clock, 30);
    assert_eq!(seen.len(), 3);
    assert_eq!(db.attempt_count(), 30);

    let log = db.storage.all_attempts().unwrap();
    assert_eq!(introduced_on_day(&log, start), 3);
}

#[test]
fn test_cap_refills_the_next_day() {
    let db = TestStoreManager::new_temp();
    db.save_config(TestDataFactory::capped_config(&[2, 3, 4], &[QuizFormat::Mul], 3));
    let day_one = TestDataFactory::noon(2026, 3, 10);
    let (mut session, clock) = db.session(3, day_one);
    session.initialize().unwrap();

    let first_day = drill(&mut session, &clock, 12);
    assert_eq!(first_day.len(), 3);

    clock.set(TestDataFactory::noon(2026, 3, 11));
    let second_day = drill(&mut session, &clock, 20);
    let all: HashSet<_> = first_day.union(&second_day).collect();
    assert_eq!(all.len(), 6);
}

#[test]
fn test_zero_limit_is_uncapped() {
    let db = TestStoreManager::new_temp();
    db.save_config(TestDataFactory::capped_config(&[6], &[QuizFormat::Mul], 0));
    let (mut session, clock) = db.session(8, TestDataFactory::noon(2026, 3, 10));
    session.initialize().unwrap();

    assert_eq!(drill(&mut session, &clock, 10).len(), 10);
}

#[test]
fn test_spent_cap_with_nothing_to_review() {
    let db = TestStoreManager::new_temp();
    let now = TestDataFactory::noon(2026, 3, 10);
    // Two families introduced this morning under a different table selection
    db.seed_attempts([
        Attempt::new("9x9", QuizFormat::Mul, true, now - 3_600_000),
        Attempt::new("8x9", QuizFormat::Mul, true, now - 3_500_000),
    ]);
    db.save_config(TestDataFactory::capped_config(&[2], &[QuizFormat::Mul], 2));

    let (mut session, _) = db.session(1, now);
    session.initialize().unwrap();
    assert!(session.next_item().unwrap().is_none());
}

#[test]
fn test_raising_the_cap_takes_effect_at_next_batch() {
    let db = TestStoreManager::new_temp();
    db.save_config(TestDataFactory::capped_config(&[2], &[QuizFormat::Mul], 1));
    let (mut session, clock) = db.session(21, TestDataFactory::noon(2026, 3, 10));
    session.initialize().unwrap();

    assert_eq!(drill(&mut session, &clock, 4).len(), 1);

    db.save_config(TestDataFactory::capped_config(&[2], &[QuizFormat::Mul], 4));
    let seen = drill(&mut session, &clock, 12);
    assert!(seen.len() > 1);
    assert!(seen.len() <= 4);
}
