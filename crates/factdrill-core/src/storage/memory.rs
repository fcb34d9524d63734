//! In-memory storage

use std::sync::Mutex;

use super::{Result, Storage, StorageError};
use crate::config::UserConfig;
use crate::mastery::Attempt;

/// Attempt log and config held in process memory
#[derive(Debug, Default)]
pub struct MemoryStorage {
    attempts: Mutex<Vec<Attempt>>,
    config: Mutex<Option<UserConfig>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing log
    pub fn with_attempts(attempts: Vec<Attempt>) -> Self {
        Self {
            attempts: Mutex::new(attempts),
            config: Mutex::new(None),
        }
    }

    /// Start from a saved config
    pub fn with_config(self, config: UserConfig) -> Self {
        Self {
            config: Mutex::new(Some(config)),
            ..self
        }
    }

    fn log(&self) -> Result<std::sync::MutexGuard<'_, Vec<Attempt>>> {
        self.attempts
            .lock()
            .map_err(|_| StorageError::Init("Attempt log lock poisoned".into()))
    }
}

impl Storage for MemoryStorage {
    fn attempts(&self, family_id: &str) -> Result<Vec<Attempt>> {
        Ok(self
            .log()?
            .iter()
            .filter(|attempt| attempt.family_id == family_id)
            .cloned()
            .collect())
    }

    fn all_attempts(&self) -> Result<Vec<Attempt>> {
        Ok(self.log()?.clone())
    }

    fn save_attempt(&self, attempt: Attempt) -> Result<()> {
        self.log()?.push(attempt);
        Ok(())
    }

    fn clear_all_attempts(&self) -> Result<()> {
        self.log()?.clear();
        Ok(())
    }

    fn user_config(&self) -> Result<UserConfig> {
        let config = self
            .config
            .lock()
            .map_err(|_| StorageError::Init("Config lock poisoned".into()))?;
        Ok(config.clone().unwrap_or_default().sanitized())
    }

    fn save_user_config(&self, config: UserConfig) -> Result<()> {
        let mut stored = self
            .config
            .lock()
            .map_err(|_| StorageError::Init("Config lock poisoned".into()))?;
        *stored = Some(config);
        Ok(())
    }
}
