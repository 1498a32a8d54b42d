//! Handlers for the two ballot activities.

use crate::action::{self, ActionPayload};
use crate::error::MatchError;
use crate::state::{Activity, Match, Phase, Role};

use super::ActionOutcome;

impl Match {
    /// Day vote: every living player votes; a unique leader is eliminated.
    pub(super) fn vote_action(
        &mut self,
        player: &str,
        payload: &ActionPayload,
    ) -> Result<ActionOutcome, MatchError> {
        self.require_alive(player)?;
        let target = self.require_target(payload)?.to_owned();
        let eligible = self.alive().count();

        let current = self.activity();
        let Phase::Vote(ballot) = &mut self.phase else {
            return Err(MatchError::WrongActivity {
                requested: Activity::Vote,
                current,
            });
        };
        ballot.cast(player, &target);

        // Ties leave every ballot standing; a changed vote re-runs this check.
        let victim = if ballot.voter_count() == eligible {
            only(ballot.leaders())
        } else {
            None
        };
        Ok(self.settle(victim))
    }

    /// Night kill: living wolves agree on a single target.
    pub(super) fn wolves_action(
        &mut self,
        player: &str,
        payload: &ActionPayload,
    ) -> Result<ActionOutcome, MatchError> {
        self.require_alive(player)?;
        if self.role_of(player) != Some(Role::Wolf) {
            return Err(MatchError::NotAWolf {
                name: player.to_owned(),
            });
        }
        let target = self.require_target(payload)?.to_owned();
        let (wolves, _) = self.alive_counts();

        let current = self.activity();
        let Phase::Wolves(ballot) = &mut self.phase else {
            return Err(MatchError::WrongActivity {
                requested: Activity::Wolves,
                current,
            });
        };
        ballot.cast(player, &target);

        let victim = if ballot.voter_count() == wolves {
            only(ballot.supported())
        } else {
            None
        };
        Ok(self.settle(victim))
    }

    fn settle(&mut self, victim: Option<String>) -> ActionOutcome {
        match victim {
            Some(victim) => self.eliminate(victim),
            None => ActionOutcome {
                eliminated: None,
                activity: self.activity(),
            },
        }
    }

    fn require_alive(&self, name: &str) -> Result<(), MatchError> {
        if !self.contains(name) {
            return Err(MatchError::player_not_found(name));
        }
        if self.dead.contains(name) {
            return Err(MatchError::player_dead(name));
        }
        Ok(())
    }

    fn require_target<'p>(&self, payload: &'p ActionPayload) -> Result<&'p str, MatchError> {
        let target = action::target(payload)?;
        self.require_alive(target)?;
        Ok(target)
    }
}

fn only(targets: Vec<&str>) -> Option<String> {
    match targets.as_slice() {
        [target] => Some((*target).to_owned()),
        _ => None,
    }
}
