//! Read-only projections of a match for a given viewer.
//!
//! Roles are never part of a projection. During `wolves` only wolves see the
//! night ballot; everyone else gets an empty object.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::MatchError;
use crate::state::{Activity, Ballot, Match, Phase, Role, Team};

/// Activity-scoped view for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ActivityView {
    Ballot(BallotView),
    Finished { winners: Team },
    /// Nothing visible to this viewer (serializes as `{}`).
    Hidden {},
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BallotView {
    /// The viewer's own current vote.
    pub vote: Option<String>,
    pub vote_count: BTreeMap<String, u32>,
    /// Players the viewer may target; empty once the viewer is dead.
    pub options: Vec<String>,
}

/// Match overview shown to a viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchView {
    pub started: bool,
    pub finished: bool,
    pub activity: Activity,
    /// All players in join order.
    pub players: Vec<String>,
    pub dead: Vec<String>,
    /// Present when the viewer is identified or the match is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ActivityView>,
}

impl Match {
    /// Projection of the current activity for `player`.
    ///
    /// Fails with [`MatchError::PlayerNotFound`] for a name not in the match,
    /// whatever the activity.
    pub fn info(&self, player: &str) -> Result<ActivityView, MatchError> {
        self.require_member(player)?;
        match &self.phase {
            Phase::Waiting => Ok(ActivityView::Hidden {}),
            Phase::Finished { winners } => Ok(ActivityView::Finished { winners: *winners }),
            Phase::Vote(ballot) => Ok(ActivityView::Ballot(self.ballot_view(player, ballot))),
            Phase::Wolves(ballot) if self.role_of(player) == Some(Role::Wolf) => {
                Ok(ActivityView::Ballot(self.ballot_view(player, ballot)))
            }
            Phase::Wolves(_) => Ok(ActivityView::Hidden {}),
        }
    }

    /// Projection for an explicitly named activity.
    ///
    /// A finished match answers any member with its winners, whatever
    /// activity was requested.
    pub fn activity_info(
        &self,
        player: &str,
        activity: Activity,
    ) -> Result<ActivityView, MatchError> {
        self.require_member(player)?;
        if let Phase::Finished { winners } = self.phase {
            return Ok(ActivityView::Finished { winners });
        }
        self.check_requested(activity)?;
        self.info(player)
    }

    pub fn overview(&self, viewer: Option<&str>) -> Result<MatchView, MatchError> {
        let state = match viewer {
            Some(player) => Some(self.info(player)?),
            None if self.is_finished() => self.winners().map(|winners| ActivityView::Finished { winners }),
            None => None,
        };

        Ok(MatchView {
            started: self.is_started(),
            finished: self.is_finished(),
            activity: self.activity(),
            players: self.roster.names().map(str::to_owned).collect(),
            dead: self.dead.iter().cloned().collect(),
            state,
        })
    }

    fn ballot_view(&self, player: &str, ballot: &Ballot) -> BallotView {
        let options = if self.dead.contains(player) {
            Vec::new()
        } else {
            self.alive().map(|p| p.name().to_owned()).collect()
        };
        BallotView {
            vote: ballot.vote_of(player).map(str::to_owned),
            vote_count: ballot.votes().clone(),
            options,
        }
    }

    fn require_member(&self, player: &str) -> Result<(), MatchError> {
        if self.contains(player) {
            Ok(())
        } else {
            Err(MatchError::player_not_found(player))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::action::target_payload;
    use crate::engine::tests_support::started;

    #[test]
    fn night_ballot_is_secret_to_citizens() {
        let game = started(&["Foo", "Bar", "Baz", "Qux"], "Foo");

        assert_eq!(game.info("Bar").unwrap(), ActivityView::Hidden {});
        assert_eq!(serde_json::to_value(game.info("Bar").unwrap()).unwrap(), json!({}));

        let ActivityView::Ballot(view) = game.info("Foo").unwrap() else {
            panic!("wolf should see the night ballot");
        };
        assert_eq!(view.options, ["Foo", "Bar", "Baz", "Qux"]);
        assert_eq!(view.vote, None);
    }

    #[test]
    fn vote_view_matches_reference_shape() {
        let mut game = started(&["Foo", "Bar", "Baz", "Qux"], "Foo");
        game.perform_action("Foo", &target_payload("Bar")).unwrap();
        for voter in ["Foo", "Baz", "Qux"] {
            game.perform_action(voter, &target_payload(voter)).unwrap();
        }

        assert_eq!(
            serde_json::to_value(game.info("Foo").unwrap()).unwrap(),
            json!({
                "vote": "Foo",
                "vote_count": {"Baz": 1, "Foo": 1, "Qux": 1},
                "options": ["Foo", "Baz", "Qux"],
            })
        );

        let ActivityView::Ballot(dead_view) = game.info("Bar").unwrap() else {
            panic!("dead players still see the vote");
        };
        assert!(dead_view.options.is_empty());
        assert_eq!(dead_view.vote_count.len(), 3);
    }

    #[test]
    fn activity_info_checks_requested_activity() {
        let game = started(&["Foo", "Bar", "Baz", "Qux"], "Foo");
        assert_eq!(
            game.activity_info("Foo", Activity::Vote),
            Err(MatchError::WrongActivity {
                requested: Activity::Vote,
                current: Activity::Wolves
            })
        );
        assert!(game.activity_info("Foo", Activity::Wolves).is_ok());
        assert_eq!(
            game.info("Nobody"),
            Err(MatchError::PlayerNotFound {
                name: "Nobody".into()
            })
        );
    }

    #[test]
    fn overview_includes_state_only_for_identified_viewers() {
        let mut game = Match::new();
        game.add_player("Foo").unwrap();

        let anonymous = game.overview(None).unwrap();
        assert!(!anonymous.started);
        assert_eq!(anonymous.players, ["Foo"]);
        assert_eq!(anonymous.state, None);

        let identified = game.overview(Some("Foo")).unwrap();
        assert_eq!(identified.state, Some(ActivityView::Hidden {}));
    }

    #[test]
    fn finished_overview_reveals_winners_to_everyone() {
        let mut game = started(&["Foo", "Bar", "Baz"], "Foo");
        game.perform_action("Foo", &target_payload("Bar")).unwrap();

        let view = game.overview(None).unwrap();
        assert!(view.finished);
        assert_eq!(view.state, Some(ActivityView::Finished { winners: Team::Wolves }));
        assert_eq!(
            game.activity_info("Baz", Activity::Vote).unwrap(),
            ActivityView::Finished { winners: Team::Wolves }
        );
    }

    #[test]
    fn strangers_are_rejected_in_every_activity() {
        let ghost = || MatchError::PlayerNotFound {
            name: "Ghost".into(),
        };

        let mut waiting = Match::new();
        waiting.add_player("Foo").unwrap();
        assert_eq!(waiting.info("Ghost"), Err(ghost()));
        assert_eq!(waiting.overview(Some("Ghost")), Err(ghost()));

        let mut finished = started(&["Foo", "Bar", "Baz"], "Foo");
        finished.perform_action("Foo", &target_payload("Bar")).unwrap();
        assert!(finished.is_finished());
        assert_eq!(finished.info("Ghost"), Err(ghost()));
        assert_eq!(finished.activity_info("Ghost", Activity::Vote), Err(ghost()));
        assert!(finished.overview(None).is_ok());
    }
}
