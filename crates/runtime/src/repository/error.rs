//! Error types raised by repository implementations.

use thiserror::Error;

use werewolf_core::RecordError;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("match repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted data for match {code}: {source}")]
    CorruptedData {
        code: String,
        #[source]
        source: RecordError,
    },

    #[error("match {code} already exists")]
    AlreadyExists { code: String },

    #[error("match code {code:?} cannot be used as a storage key")]
    InvalidKey { code: String },

    #[error("match {code} not found")]
    NotFound { code: String },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
