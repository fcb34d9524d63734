//! Persistence Journeys
//!
//! Practice survives closing the app; reset and export behave.

use factdrill_core::{Attempt, QuizFormat, Session, Storage, UserConfig};
use factdrill_e2e_tests::{TestDataFactory, TestStoreManager};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const START: i64 = 1_773_144_000_000;

#[test]
fn test_attempts_survive_reopen() {
    let db = TestStoreManager::new_temp();
    db.save_config(TestDataFactory::config(&[7], &[QuizFormat::Mul]));
    let (mut session, clock) = db.session(2, START);
    session.initialize().unwrap();

    let mut missed = String::new();
    for i in 0..10 {
        let item = session.next_item().unwrap().unwrap();
        let correct = i != 3;
        if !correct {
            missed = item.family_id.clone();
        }
        session.submit_answer(&item.family_id, item.format, correct).unwrap();
        clock.advance(1_000);
    }
    drop(session);

    let reopened = db.reopen();
    let log = reopened.all_attempts().unwrap();
    assert_eq!(log.len(), 10);
    assert_eq!(log.iter().filter(|a| !a.correct).count(), 1);
    assert!(log.windows(2).all(|pair| pair[0].timestamp <= pair[1].timestamp));

    // A fresh session on the reopened store picks up where the student left off
    let clock = factdrill_core::ManualClock::new(START + 300_000);
    let mut session = Session::with_random(reopened, ChaCha8Rng::seed_from_u64(6)).with_clock(clock);
    session.initialize().unwrap();
    assert_eq!(session.next_item().unwrap().unwrap().family_id, missed);
}

#[test]
fn test_config_survives_reopen() {
    let db = TestStoreManager::new_temp();
    let config = TestDataFactory::capped_config(&[3, 8], &[QuizFormat::Div, QuizFormat::MulMiss], 5);
    db.save_config(config.clone());

    assert_eq!(db.reopen().user_config().unwrap(), config);
}

#[test]
fn test_fresh_store_uses_default_config() {
    let db = TestStoreManager::new_temp();
    assert_eq!(db.storage.user_config().unwrap(), UserConfig::default());
}

#[test]
fn test_reset_starts_over() {
    let db = TestStoreManager::new_temp();
    db.save_config(TestDataFactory::config(&[2], &[QuizFormat::Mul]));
    db.seed_attempts(TestDataFactory::mastered("2x2", START - 1_000));
    assert_eq!(db.attempt_count(), 2);

    db.storage.clear_all_attempts().unwrap();
    assert_eq!(db.attempt_count(), 0);
    assert_eq!(db.reopen().all_attempts().unwrap().len(), 0);

    let (mut session, _) = db.session(9, START);
    session.initialize().unwrap();
    let first_batch: std::collections::HashSet<String> = (0..10)
        .map(|_| session.next_item().unwrap().unwrap().family_id)
        .collect();
    assert_eq!(first_batch.len(), 10);
}

#[test]
fn test_export_shape() {
    let db = TestStoreManager::new_temp();
    db.seed_attempts([
        Attempt::new("3x4", QuizFormat::MulMiss, true, START),
        Attempt::new("6x6", QuizFormat::DivMissDivisor, false, START + 1),
    ]);

    let json = serde_json::to_value(db.storage.all_attempts().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"familyId": "3x4", "format": "MUL_MISS", "timestamp": START, "correct": true},
            {"familyId": "6x6", "format": "DIV_MISS_DIVISOR", "timestamp": START + 1, "correct": false}
        ])
    );

    let back: Vec<Attempt> = serde_json::from_value(json).unwrap();
    assert_eq!(back, db.storage.all_attempts().unwrap());
}

#[test]
fn test_store_file_lives_in_temp_dir() {
    let db = TestStoreManager::new_temp();
    assert!(db.path().exists());
    assert_eq!(db.storage.path(), Some(db.path().as_path()));
}
