//! Activity advancement and victory checks.

use crate::state::{Activity, Ballot, Match, Phase, Role, Team};

use super::ActionOutcome;

impl Match {
    /// Eliminates `victim` and advances past the current activity.
    pub(super) fn eliminate(&mut self, victim: String) -> ActionOutcome {
        self.dead.insert(victim.clone());
        self.advance();
        ActionOutcome {
            eliminated: Some(victim),
            activity: self.activity(),
        }
    }

    /// Moves along `wolves → vote → wolves …`, finishing the match when a
    /// side has won. The check runs when leaving `vote` and again on entering
    /// it, so a night kill alone can end the game.
    fn advance(&mut self) {
        let leaving = self.activity();
        if leaving == Activity::Vote
            && let Some(winners) = self.victor()
        {
            self.phase = Phase::Finished { winners };
            return;
        }

        self.phase = match leaving {
            Activity::Wolves => Phase::Vote(Ballot::default()),
            Activity::Vote => Phase::Wolves(Ballot::default()),
            Activity::Waiting | Activity::Finished => return,
        };

        if self.activity() == Activity::Vote
            && let Some(winners) = self.victor()
        {
            self.phase = Phase::Finished { winners };
        }
    }

    /// Side that has won given the living players, if any.
    pub fn victor(&self) -> Option<Team> {
        let (wolves, citizens) = self.alive_counts();
        if wolves == 0 {
            Some(Team::Citizens)
        } else if wolves >= citizens {
            Some(Team::Wolves)
        } else {
            None
        }
    }

    /// Wolves in join order, dead or alive.
    pub fn wolves(&self) -> impl Iterator<Item = &str> + '_ {
        self.roster
            .iter()
            .filter(|p| p.role() == Role::Wolf)
            .map(|p| p.name())
    }
}
