//! Quiz Session
//!
//! Stateful orchestrator over storage, scheduler, and difficulty selector.
//!
//! ## Lifecycle:
//! - `initialize()`: load config, build the family set, compute the first batch
//! - `next_item()`: pop the next family from the batch, refreshing it from the
//!   latest log when exhausted, then pick a format and render a prompt
//! - `submit_answer()`: append an attempt; nothing in memory is updated
//!
//! A batch is never re-scored while it is being consumed. Config changes to
//! the table selection take effect on the next `initialize()`; enabled
//! formats and the daily cap are re-read from storage as they are needed.

use std::collections::HashMap;

use rand::rngs::ThreadRng;

use crate::clock::{Clock, SystemClock};
use crate::error::{EngineError, Result};
use crate::facts::{FactFamily, generate_fact_families};
use crate::mastery::{Attempt, derive_family_stats};
use crate::quiz::{QuizFormat, QuizItem, render_quiz_item, select_format_for_mastery};
use crate::random::{RandomSource, system_source};
use crate::scheduler::{NewFamilyLimit, select_capped_batch};
use crate::storage::Storage;

/// Families drawn per batch
pub const BATCH_SIZE: usize = 10;

/// Session tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Families per batch (at least 1)
    pub batch_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            batch_size: BATCH_SIZE,
        }
    }
}

struct SessionState {
    all_family_ids: Vec<String>,
    family_map: HashMap<String, FactFamily>,
    batch: Vec<String>,
    batch_index: usize,
}

/// A drill session over a [`Storage`] collaborator
pub struct Session<S, R = ThreadRng> {
    storage: S,
    random: R,
    clock: Box<dyn Clock>,
    config: SessionConfig,
    state: Option<SessionState>,
}

impl<S: Storage> Session<S, ThreadRng> {
    /// Session using the system RNG and wall clock
    pub fn new(storage: S) -> Self {
        Self::with_random(storage, system_source())
    }
}

impl<S: Storage, R: RandomSource> Session<S, R> {
    /// Session drawing from a caller-supplied random source
    pub fn with_random(storage: S, random: R) -> Self {
        Self {
            storage,
            random,
            clock: Box::new(SystemClock),
            config: SessionConfig::default(),
            state: None,
        }
    }

    /// Replace the clock used to stamp attempts and score families
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = SessionConfig {
            batch_size: config.batch_size.max(1),
        };
        self
    }

    /// Load config, regenerate the family set, and compute the first batch.
    ///
    /// Safe to call again after the config changes; the cursor restarts.
    pub fn initialize(&mut self) -> Result<()> {
        let config = self.storage.user_config()?;
        let families = generate_fact_families(config.selected_tables.iter().copied());

        let all_family_ids: Vec<String> = families.iter().map(FactFamily::id).collect();
        let family_map: HashMap<String, FactFamily> = families
            .into_iter()
            .map(|family| (family.id(), family))
            .collect();

        tracing::debug!(
            tables = ?config.selected_tables,
            families = all_family_ids.len(),
            "Initializing session"
        );

        self.state = Some(SessionState {
            all_family_ids,
            family_map,
            batch: Vec::new(),
            batch_index: 0,
        });
        self.refresh_batch(config.new_family_limit())
    }

    /// Whether `initialize` has run
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Next question, or `None` when there is nothing to ask.
    ///
    /// `None` means the configured family set is empty, or the daily cap is
    /// spent and no tried family is left to review.
    pub fn next_item(&mut self) -> Result<Option<QuizItem>> {
        let state = self.state.as_ref().ok_or(EngineError::NotInitialized)?;
        if state.all_family_ids.is_empty() {
            return Ok(None);
        }

        if state.batch_index >= state.batch.len() {
            let limit = self.storage.user_config()?.new_family_limit();
            self.refresh_batch(limit)?;
        }

        let state = self.state.as_mut().ok_or(EngineError::NotInitialized)?;
        let Some(family_id) = state.batch.get(state.batch_index).cloned() else {
            return Ok(None);
        };
        state.batch_index += 1;
        let Some(family) = state.family_map.get(&family_id).copied() else {
            tracing::warn!("Batch named unknown family {}", family_id);
            return Ok(None);
        };

        let stats = derive_family_stats(&self.storage.attempts(&family_id)?);
        let enabled_formats = self.storage.user_config()?.enabled_formats;
        let format =
            select_format_for_mastery(stats.effective_successes, &enabled_formats, &mut self.random);

        tracing::debug!(
            family = %family_id,
            effective_successes = stats.effective_successes,
            %format,
            "Selected format"
        );

        Ok(Some(render_quiz_item(&family, format, &mut self.random)))
    }

    /// Record an answer, stamped with the session clock
    pub fn submit_answer(&self, family_id: &str, format: QuizFormat, correct: bool) -> Result<()> {
        let attempt = Attempt::new(family_id, format, correct, self.clock.now_ms());
        self.storage.save_attempt(attempt)?;
        Ok(())
    }

    /// The full attempt log, for stats displays
    pub fn all_attempts(&self) -> Result<Vec<Attempt>> {
        Ok(self.storage.all_attempts()?)
    }

    /// The storage collaborator
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn refresh_batch(&mut self, limit: NewFamilyLimit) -> Result<()> {
        let now = self.clock.now_ms();
        let attempts = self.storage.all_attempts()?;
        let state = self.state.as_mut().ok_or(EngineError::NotInitialized)?;

        state.batch = select_capped_batch(
            &state.all_family_ids,
            &attempts,
            self.config.batch_size,
            now,
            limit,
            &mut self.random,
        );
        state.batch_index = 0;

        tracing::debug!(batch = ?state.batch, "Refreshed batch");
        Ok(())
    }
}
