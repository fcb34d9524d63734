//! Quiz Session Journeys
//!
//! A student drilling through a session against a real SQLite store.

use std::collections::HashSet;

use factdrill_core::{
    Attempt, Clock, EngineError, FactFamily, MasteryLevel, MasteryReport, QuizFormat, QuizItem, Storage,
    generate_fact_families,
};
use factdrill_e2e_tests::{TestDataFactory, TestStoreManager};

const START: i64 = 1_773_144_000_000; // 2026-03-10T12:00:00Z

/// Every rendered item must be arithmetically consistent with its family
fn assert_item_consistent(item: &QuizItem) {
    let family: FactFamily = item.family_id.parse().expect("canonical family id");
    let (a, b, p) = (family.factor1(), family.factor2(), family.product());
    match item.format {
        QuizFormat::Mul | QuizFormat::DivMissDividend => assert_eq!(item.answer, p),
        QuizFormat::MulMiss | QuizFormat::Div | QuizFormat::DivMissDivisor => {
            assert!(item.answer == a || item.answer == b, "{:?}", item)
        }
    }
    assert!(item.prompt.contains('?'));
}

// ============================================================================
// JOURNEYS
// ============================================================================

#[test]
fn test_next_item_requires_initialize() {
    let db = TestStoreManager::new_temp();
    let (mut session, _) = db.session(1, START);
    assert!(matches!(session.next_item(), Err(EngineError::NotInitialized)));
}

#[test]
fn test_mul_only_drill_asks_only_mul() {
    let db = TestStoreManager::new_temp();
    db.save_config(TestDataFactory::config(&[2], &[QuizFormat::Mul]));
    let (mut session, clock) = db.session(11, START);
    session.initialize().unwrap();

    for _ in 0..25 {
        let item = session.next_item().unwrap().unwrap();
        assert_eq!(item.format, QuizFormat::Mul);
        assert_item_consistent(&item);
        let correct = item.check(&TestDataFactory::right_answer(&item)).unwrap();
        session.submit_answer(&item.family_id, item.format, correct).unwrap();
        clock.advance(5_000);
    }

    assert_eq!(db.attempt_count(), 25);
    assert!(db.storage.all_attempts().unwrap().iter().all(|a| a.correct));
}

#[test]
fn test_streak_unlocks_harder_formats() {
    let db = TestStoreManager::new_temp();
    db.save_config(TestDataFactory::config(&[3], &QuizFormat::ALL));
    let (mut session, clock) = db.session(23, START);
    session.initialize().unwrap();

    let mut formats = HashSet::new();
    for _ in 0..60 {
        let item = session.next_item().unwrap().unwrap();
        assert_item_consistent(&item);
        formats.insert(item.format);
        session.submit_answer(&item.family_id, item.format, true).unwrap();
        clock.advance(60_000);
    }

    assert!(formats.len() > 1, "only saw {:?}", formats);

    let families = generate_fact_families([3]);
    let report = MasteryReport::from_attempts(&families, &session.all_attempts().unwrap(), clock.now_ms());
    assert_eq!(report.untried, 0);
    assert_eq!(report.struggling, 0);
    assert_eq!(report.total_attempts, 60);
    assert_eq!(report.accuracy(), 1.0);
}

#[test]
fn test_every_miss_leaves_families_struggling() {
    let db = TestStoreManager::new_temp();
    db.save_config(TestDataFactory::config(&[5], &[QuizFormat::Mul, QuizFormat::Div]));
    let (mut session, clock) = db.session(5, START);
    session.initialize().unwrap();

    for _ in 0..10 {
        let item = session.next_item().unwrap().unwrap();
        let correct = item.check(&TestDataFactory::wrong_answer(&item)).unwrap();
        assert!(!correct);
        session.submit_answer(&item.family_id, item.format, correct).unwrap();
        clock.advance(1_000);
    }

    let families = generate_fact_families([5]);
    let report = MasteryReport::from_attempts(&families, &db.storage.all_attempts().unwrap(), clock.now_ms());
    assert_eq!(report.struggling, 10);
    assert!(report.families.iter().all(|row| row.level == MasteryLevel::Struggling));
}

#[test]
fn test_missed_family_comes_back_first() {
    let db = TestStoreManager::new_temp();
    db.save_config(TestDataFactory::config(&[4], &[QuizFormat::Mul]));
    let (mut session, clock) = db.session(99, START);
    session.initialize().unwrap();

    let mut missed = String::new();
    for i in 0..10 {
        let item = session.next_item().unwrap().unwrap();
        let correct = i != 0;
        if !correct {
            missed = item.family_id.clone();
        }
        session.submit_answer(&item.family_id, item.format, correct).unwrap();
        clock.advance(2_000);
    }

    clock.advance(120_000);
    assert_eq!(session.next_item().unwrap().unwrap().family_id, missed);
}

#[test]
fn test_mastered_families_wait_their_turn() {
    let db = TestStoreManager::new_temp();
    db.save_config(TestDataFactory::config(&[1], &[QuizFormat::Mul]));
    // Every 1x? family mastered a minute ago except 1x7, missed a minute ago
    for family in generate_fact_families([1]) {
        let id = family.id();
        if id == "1x7" {
            db.seed_attempts([Attempt::new(&id, QuizFormat::Mul, false, START - 60_000)]);
        } else {
            db.seed_attempts(TestDataFactory::mastered(&id, START - 60_000));
        }
    }

    let (mut session, _) = db.session(4, START);
    session.initialize().unwrap();
    assert_eq!(session.next_item().unwrap().unwrap().family_id, "1x7");
}

#[test]
fn test_empty_selection_has_nothing_to_ask() {
    let db = TestStoreManager::new_temp();
    db.save_config(TestDataFactory::config(&[], &[QuizFormat::Mul]));
    let (mut session, _) = db.session(0, START);
    session.initialize().unwrap();
    assert!(session.next_item().unwrap().is_none());
}
