//! Unified error types surfaced by the match service.
//!
//! Boundary errors (unknown code, name taken, join or start after the match
//! began) are reported by the service itself. Engine rejections pass through
//! unchanged as [`ServiceError::Match`].
use thiserror::Error;

use werewolf_core::MatchError;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("game {code} not found")]
    NotFound { code: String },

    #[error("already joined game {code}")]
    AlreadyJoined { code: String },

    #[error("name {name} already taken")]
    NameTaken { name: String },

    #[error("game {code} has already started")]
    AlreadyStarted { code: String },

    #[error("you need at least {required} players to start a game (have {joined})")]
    NotEnoughPlayers { required: usize, joined: usize },

    /// Every generated code was already taken.
    #[error("no free match code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl ServiceError {
    /// Stable identifier for boundary layers and tests.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound { .. } => "NOT_FOUND",
            ServiceError::AlreadyJoined { .. } => "ALREADY_JOINED",
            ServiceError::NameTaken { .. } => "NAME_TAKEN",
            ServiceError::AlreadyStarted { .. } => "ALREADY_STARTED",
            ServiceError::NotEnoughPlayers { .. } => "NOT_ENOUGH_PLAYERS",
            ServiceError::CodeSpaceExhausted { .. } => "CODE_SPACE_EXHAUSTED",
            ServiceError::Match(e) => e.error_code(),
            ServiceError::Repository(_) => "STORAGE_FAILURE",
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound { code } => ServiceError::NotFound { code },
            other => ServiceError::Repository(other),
        }
    }
}
