//! Event types for different topics.

use serde::{Deserialize, Serialize};

use werewolf_core::{Activity, Team};

/// Lobby changes: creation, joins, start, removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LobbyEvent {
    Created { code: String, host: String },
    PlayerJoined { code: String, player: String },
    Started { code: String, players: usize },
    Removed { code: String },
}

/// Gameplay changes. Never carries roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayEvent {
    /// A ballot was cast during `activity`.
    ///
    /// Night ballots are published without the actor so that subscribers
    /// cannot infer who the wolf is.
    BallotCast {
        code: String,
        activity: Activity,
        voter: Option<String>,
    },

    PlayerEliminated {
        code: String,
        player: String,
        during: Activity,
    },

    Finished { code: String, winners: Team },
}
