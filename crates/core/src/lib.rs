//! Match engine for a werewolves/citizens social deduction game.
//!
//! `werewolf-core` holds the rules and nothing else: a [`Match`] is a pure,
//! synchronous state machine that validates player actions, resolves ballots,
//! detects victory, and encodes itself as a JSON record. Persistence, locking,
//! and change notification live in the runtime crate.
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod record;
pub mod state;
pub mod view;

pub use action::{ActionPayload, target_payload};
pub use config::GameConfig;
pub use engine::ActionOutcome;
pub use error::MatchError;
pub use record::RecordError;
pub use state::{Activity, Ballot, Match, Phase, Player, Role, Roster, Team};
pub use view::{ActivityView, BallotView, MatchView};
