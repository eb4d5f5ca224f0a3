//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Corrupt board store at {path}: {reason}")]
    CorruptStore { path: String, reason: String },
}

impl Error {
    /// A referenced board or task does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BoardNotFound(_) | Self::TaskNotFound(_))
    }

    /// Caller input failed validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Durable state could not be written or read back
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::CorruptStore { .. })
    }
}
