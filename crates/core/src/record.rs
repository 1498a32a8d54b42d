//! Serialized match record.
//!
//! A match is persisted as a JSON text blob:
//!
//! ```json
//! {"players":{"Foo":"wolf","Bar":"citizen"},"dead":["Bar"],"activity":"vote",
//!  "state":{"voted_for":{"Foo":"Baz"},"votes":{"Baz":1}}}
//! ```
//!
//! `players` keeps join order and every other map is sorted, so decoding a
//! record and encoding it again yields identical bytes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::state::{Activity, Ballot, Match, Phase, Roster, Team};

/// Errors raised while decoding a stored record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("malformed match record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("inconsistent match record: {0}")]
    Inconsistent(String),
}

#[derive(Serialize, Deserialize)]
struct MatchRecord {
    players: Roster,
    dead: BTreeSet<String>,
    activity: Activity,
    #[serde(default)]
    state: StateRecord,
}

#[derive(Default, Serialize, Deserialize)]
struct StateRecord {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    voted_for: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    votes: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    winners: Option<Team>,
}

impl Match {
    /// Encodes the complete match state.
    pub fn encode(&self) -> Result<String, RecordError> {
        let state = match &self.phase {
            Phase::Waiting => StateRecord::default(),
            Phase::Wolves(ballot) | Phase::Vote(ballot) => StateRecord {
                voted_for: ballot.voted_for().clone(),
                votes: ballot.votes().clone(),
                winners: None,
            },
            Phase::Finished { winners } => StateRecord {
                winners: Some(*winners),
                ..StateRecord::default()
            },
        };
        let record = MatchRecord {
            players: self.roster.clone(),
            dead: self.dead.clone(),
            activity: self.activity(),
            state,
        };
        Ok(serde_json::to_string(&record)?)
    }

    /// Decodes a record produced by [`Match::encode`], validating invariants.
    pub fn decode(raw: &str) -> Result<Self, RecordError> {
        let record: MatchRecord = serde_json::from_str(raw)?;

        if let Some(name) = record.dead.iter().find(|name| !record.players.contains(name)) {
            return Err(RecordError::Inconsistent(format!(
                "dead player {name} never joined"
            )));
        }

        let StateRecord {
            voted_for,
            votes,
            winners,
        } = record.state;
        let ballot = || {
            let ballot = Ballot::from_parts(voted_for.clone(), votes.clone());
            let unknown = ballot
                .voted_for()
                .iter()
                .flat_map(|(voter, target)| [voter, target])
                .find(|name| !record.players.contains(name));
            if let Some(name) = unknown {
                return Err(RecordError::Inconsistent(format!(
                    "ballot names unknown player {name}"
                )));
            }
            if !ballot.is_consistent() {
                return Err(RecordError::Inconsistent(
                    "vote tally does not match ballots".into(),
                ));
            }
            Ok(ballot)
        };

        let phase = match record.activity {
            Activity::Waiting => Phase::Waiting,
            Activity::Wolves => Phase::Wolves(ballot()?),
            Activity::Vote => Phase::Vote(ballot()?),
            Activity::Finished => Phase::Finished {
                winners: winners.ok_or_else(|| {
                    RecordError::Inconsistent("finished match without winners".into())
                })?,
            },
        };

        Ok(Self {
            roster: record.players,
            dead: record.dead,
            phase,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::target_payload;
    use crate::engine::tests_support::started;

    fn assert_round_trip(game: &Match) {
        let encoded = game.encode().unwrap();
        let decoded = Match::decode(&encoded).unwrap();
        assert_eq!(&decoded, game);
        assert_eq!(decoded.encode().unwrap(), encoded);
    }

    #[test]
    fn empty_match_layout() {
        assert_eq!(
            Match::new().encode().unwrap(),
            r#"{"players":{},"dead":[],"activity":"waiting","state":{}}"#
        );
    }

    #[test]
    fn round_trips_every_activity() {
        let mut game = started(&["Qux", "Foo", "Bar", "Baz"], "Foo");
        assert_round_trip(&game);

        game.perform_action("Foo", &target_payload("Bar")).unwrap();
        game.perform_action("Qux", &target_payload("Baz")).unwrap();
        game.perform_action("Qux", &target_payload("Foo")).unwrap();
        assert_round_trip(&game);
        assert!(game.encode().unwrap().contains(r#""votes":{"Baz":0,"Foo":1}"#));

        game.perform_action("Baz", &target_payload("Foo")).unwrap();
        game.perform_action("Foo", &target_payload("Foo")).unwrap();
        assert!(game.is_finished());
        assert_round_trip(&game);
    }

    #[test]
    fn rejects_structurally_invalid_records() {
        let dead_stranger = r#"{"players":{"Foo":"citizen"},"dead":["Bar"],"activity":"waiting","state":{}}"#;
        assert!(matches!(
            Match::decode(dead_stranger),
            Err(RecordError::Inconsistent(_))
        ));

        let no_winners = r#"{"players":{},"dead":[],"activity":"finished","state":{}}"#;
        assert!(matches!(
            Match::decode(no_winners),
            Err(RecordError::Inconsistent(_))
        ));

        let bad_tally = r#"{"players":{"Foo":"wolf","Bar":"citizen"},"dead":[],"activity":"wolves","state":{"voted_for":{"Foo":"Bar"},"votes":{"Bar":2}}}"#;
        assert!(matches!(
            Match::decode(bad_tally),
            Err(RecordError::Inconsistent(_))
        ));

        assert!(matches!(Match::decode("{"), Err(RecordError::Json(_))));
    }
}
