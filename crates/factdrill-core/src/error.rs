//! Engine errors

use crate::storage::StorageError;

/// Errors surfaced by the quiz session
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Storage collaborator failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// `next_item` called before `initialize`
    #[error("Session not initialized: call initialize() first")]
    NotInitialized,
}

/// Engine result type
pub type Result<T> = std::result::Result<T, EngineError>;
