//! Match lifecycle and action dispatch.
//!
//! All mutation of a [`Match`] goes through the methods in this module. Each
//! method validates every precondition first and mutates only once the request
//! is known to succeed, which lets the store persist the result
//! unconditionally on `Ok` and skip the save on `Err`.

mod ballots;
mod transition;

use rand::Rng;
use rand::seq::index::sample;
use serde::Serialize;

use crate::action::ActionPayload;
use crate::config::GameConfig;
use crate::error::MatchError;
use crate::state::{Activity, Match, Phase, Role};

/// What a successful action did to the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    /// Player eliminated by this action, if the ballot resolved.
    pub eliminated: Option<String>,
    /// Activity after the action (and any cascading transition).
    pub activity: Activity,
}

impl Match {
    /// Adds a citizen named `name` (trimmed). Returns the stored name.
    pub fn add_player(&mut self, name: &str) -> Result<String, MatchError> {
        let current = self.activity();
        if current != Activity::Waiting {
            return Err(MatchError::InvalidActivity {
                operation: "join",
                current,
            });
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(MatchError::EmptyName);
        }
        if !self.roster.insert(name.to_owned(), Role::Citizen) {
            return Err(MatchError::DuplicateName {
                name: name.to_owned(),
            });
        }
        Ok(name.to_owned())
    }

    /// Assigns the wolf uniformly at random and opens the first night.
    pub fn start<R>(&mut self, rng: &mut R) -> Result<(), MatchError>
    where
        R: Rng + ?Sized,
    {
        let current = self.activity();
        if current != Activity::Waiting {
            return Err(MatchError::InvalidActivity {
                operation: "start",
                current,
            });
        }

        let joined = self.roster.len();
        if joined < GameConfig::MIN_PLAYERS {
            return Err(MatchError::NotEnoughPlayers {
                required: GameConfig::MIN_PLAYERS,
                joined,
            });
        }

        let players = self.roster.players_mut();
        for player in players.iter_mut() {
            player.assign(Role::Citizen);
        }
        for index in sample(rng, joined, GameConfig::WOLF_COUNT) {
            players[index].assign(Role::Wolf);
        }

        self.phase = Phase::Wolves(Default::default());
        Ok(())
    }

    /// Applies `payload` from `player` to the current activity.
    pub fn perform_action(
        &mut self,
        player: &str,
        payload: &ActionPayload,
    ) -> Result<ActionOutcome, MatchError> {
        match self.activity() {
            Activity::Finished => Err(MatchError::GameFinished),
            Activity::Waiting => Err(MatchError::UnknownActivity {
                activity: Activity::Waiting,
            }),
            Activity::Wolves => self.wolves_action(player, payload),
            Activity::Vote => self.vote_action(player, payload),
        }
    }

    /// Like [`Match::perform_action`], but rejects the action unless the
    /// caller's `activity` is the current one.
    pub fn perform_activity_action(
        &mut self,
        player: &str,
        activity: Activity,
        payload: &ActionPayload,
    ) -> Result<ActionOutcome, MatchError> {
        self.check_requested(activity)?;
        self.perform_action(player, payload)
    }

    /// Shared gate for activity-scoped actions and queries.
    pub(crate) fn check_requested(&self, requested: Activity) -> Result<(), MatchError> {
        let current = self.activity();
        if current == Activity::Finished {
            return Err(MatchError::GameFinished);
        }
        if !requested.is_actionable() {
            return Err(MatchError::UnknownActivity {
                activity: requested,
            });
        }
        if current == Activity::Waiting {
            return Err(MatchError::UnknownActivity { activity: current });
        }
        if current != requested {
            return Err(MatchError::WrongActivity { requested, current });
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    use crate::state::{Ballot, Match, Phase, Role};

    /// Match already in its first night with `wolf` as the wolf.
    pub(crate) fn started(names: &[&str], wolf: &str) -> Match {
        let mut game = Match::new();
        for name in names {
            game.roster.insert((*name).to_owned(), Role::Citizen);
        }
        for player in game.roster.players_mut() {
            if player.name() == wolf {
                player.assign(Role::Wolf);
            }
        }
        game.phase = Phase::Wolves(Ballot::default());
        game
    }
}
