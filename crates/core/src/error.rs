//! Validation failures surfaced by the match engine.
//!
//! Every variant is a local, non-transient rejection of the caller's request.
//! The engine checks all preconditions before touching state, so a returned
//! error always means the match is exactly as it was before the call.

use crate::state::Activity;

/// Errors raised by [`crate::Match`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// Name is already taken by another player in this match.
    #[error("name {name} has already been taken")]
    DuplicateName { name: String },

    /// Name is empty after trimming.
    #[error("player name must not be empty")]
    EmptyName,

    #[error("you need at least {required} players to start a game (have {joined})")]
    NotEnoughPlayers { required: usize, joined: usize },

    #[error("the game has finished")]
    GameFinished,

    /// The activity does not accept actions or queries.
    #[error("activity {activity} does not exist")]
    UnknownActivity { activity: Activity },

    #[error("current activity is {current}, not {requested}")]
    WrongActivity {
        requested: Activity,
        current: Activity,
    },

    /// Roster operation attempted after the match left `waiting`.
    #[error("cannot {operation} while activity is {current}")]
    InvalidActivity {
        operation: &'static str,
        current: Activity,
    },

    #[error("expected {field} field in action")]
    MissingField { field: &'static str },

    #[error("{field} value is not a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("player {name} does not exist")]
    PlayerNotFound { name: String },

    #[error("player {name} is dead")]
    PlayerDead { name: String },

    #[error("player {name} is not a wolf")]
    NotAWolf { name: String },
}

impl MatchError {
    /// Stable identifier for boundary layers and tests.
    pub const fn error_code(&self) -> &'static str {
        use MatchError::*;
        match self {
            DuplicateName { .. } => "MATCH_DUPLICATE_NAME",
            EmptyName => "MATCH_EMPTY_NAME",
            NotEnoughPlayers { .. } => "MATCH_NOT_ENOUGH_PLAYERS",
            GameFinished => "MATCH_GAME_FINISHED",
            UnknownActivity { .. } => "MATCH_UNKNOWN_ACTIVITY",
            WrongActivity { .. } => "MATCH_WRONG_ACTIVITY",
            InvalidActivity { .. } => "MATCH_INVALID_ACTIVITY",
            MissingField { .. } => "MATCH_MISSING_FIELD",
            WrongType { .. } => "MATCH_WRONG_TYPE",
            PlayerNotFound { .. } => "MATCH_PLAYER_NOT_FOUND",
            PlayerDead { .. } => "MATCH_PLAYER_DEAD",
            NotAWolf { .. } => "MATCH_NOT_A_WOLF",
        }
    }

    pub(crate) fn player_not_found(name: &str) -> Self {
        Self::PlayerNotFound {
            name: name.to_owned(),
        }
    }

    pub(crate) fn player_dead(name: &str) -> Self {
        Self::PlayerDead {
            name: name.to_owned(),
        }
    }
}
