//! Authoritative match state.
//!
//! [`Match`] is the root aggregate for one game: the roster in join order, the
//! set of eliminated players, and the current [`Phase`]. The phase carries the
//! activity-scoped data, so leaving an activity discards its ballots by
//! construction. Mutation happens only through the engine methods.
mod ballot;
mod roster;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use ballot::Ballot;
pub use roster::{Player, Roster};

/// Discrete phase of a match, as exposed to callers and persisted records.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Activity {
    Waiting,
    Wolves,
    Vote,
    Finished,
}

impl Activity {
    /// Returns true for activities that accept player actions.
    pub const fn is_actionable(self) -> bool {
        matches!(self, Self::Wolves | Self::Vote)
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    Citizen,
    Wolf,
}

/// Winning side of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Team {
    Citizens,
    Wolves,
}

/// Current activity together with the data scoped to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Waiting,
    /// Night: living wolves pick a victim.
    Wolves(Ballot),
    /// Day: every living player votes someone out.
    Vote(Ballot),
    Finished { winners: Team },
}

impl Phase {
    pub const fn activity(&self) -> Activity {
        match self {
            Self::Waiting => Activity::Waiting,
            Self::Wolves(_) => Activity::Wolves,
            Self::Vote(_) => Activity::Vote,
            Self::Finished { .. } => Activity::Finished,
        }
    }

    pub const fn ballot(&self) -> Option<&Ballot> {
        match self {
            Self::Wolves(ballot) | Self::Vote(ballot) => Some(ballot),
            Self::Waiting | Self::Finished { .. } => None,
        }
    }
}

/// One complete game, identified externally by an opaque code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Match {
    pub(crate) roster: Roster,
    pub(crate) dead: BTreeSet<String>,
    pub(crate) phase: Phase,
}

impl Match {
    /// Creates an empty match in the `waiting` activity.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activity(&self) -> Activity {
        self.phase.activity()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Eliminated players, in name order.
    pub fn dead(&self) -> &BTreeSet<String> {
        &self.dead
    }

    pub fn is_started(&self) -> bool {
        self.activity() != Activity::Waiting
    }

    pub fn is_finished(&self) -> bool {
        self.activity() == Activity::Finished
    }

    pub fn winners(&self) -> Option<Team> {
        match self.phase {
            Phase::Finished { winners } => Some(winners),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.roster.contains(name)
    }

    pub fn role_of(&self, name: &str) -> Option<Role> {
        self.roster.role_of(name)
    }

    /// Returns true if `name` joined and has not been eliminated.
    pub fn is_alive(&self, name: &str) -> bool {
        self.roster.contains(name) && !self.dead.contains(name)
    }

    /// Living players in join order.
    pub fn alive(&self) -> impl Iterator<Item = &Player> + '_ {
        self.roster.iter().filter(|p| !self.dead.contains(p.name()))
    }

    /// Counts living wolves and living citizens.
    pub fn alive_counts(&self) -> (usize, usize) {
        self.alive().fold((0, 0), |(wolves, citizens), player| {
            match player.role() {
                Role::Wolf => (wolves + 1, citizens),
                Role::Citizen => (wolves, citizens + 1),
            }
        })
    }
}
