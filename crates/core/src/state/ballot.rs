//! Voter → target ballots with a tally kept in lockstep.

use std::collections::BTreeMap;

/// Ballots cast during one `wolves` or `vote` activity.
///
/// Invariant: `votes[t]` equals the number of voters whose ballot names `t`.
/// Targets that lose all their votes keep a zero entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ballot {
    voted_for: BTreeMap<String, String>,
    votes: BTreeMap<String, u32>,
}

impl Ballot {
    /// Records `voter`'s ballot for `target`, moving any previous vote.
    pub(crate) fn cast(&mut self, voter: &str, target: &str) {
        if let Some(previous) = self.voted_for.get(voter) {
            if previous == target {
                return;
            }
            if let Some(count) = self.votes.get_mut(previous) {
                *count = count.saturating_sub(1);
            }
        }
        self.voted_for.insert(voter.to_owned(), target.to_owned());
        *self.votes.entry(target.to_owned()).or_insert(0) += 1;
    }

    /// Target of `voter`'s current ballot.
    pub fn vote_of(&self, voter: &str) -> Option<&str> {
        self.voted_for.get(voter).map(String::as_str)
    }

    /// Number of distinct voters holding a ballot.
    pub fn voter_count(&self) -> usize {
        self.voted_for.len()
    }

    pub fn voted_for(&self) -> &BTreeMap<String, String> {
        &self.voted_for
    }

    pub fn votes(&self) -> &BTreeMap<String, u32> {
        &self.votes
    }

    pub fn tally(&self, target: &str) -> u32 {
        self.votes.get(target).copied().unwrap_or(0)
    }

    /// Targets sharing the highest tally.
    pub fn leaders(&self) -> Vec<&str> {
        let Some(max) = self.votes.values().copied().max().filter(|max| *max > 0) else {
            return Vec::new();
        };
        self.votes
            .iter()
            .filter(|(_, count)| **count == max)
            .map(|(target, _)| target.as_str())
            .collect()
    }

    /// Targets with at least one vote.
    pub fn supported(&self) -> Vec<&str> {
        self.votes
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(target, _)| target.as_str())
            .collect()
    }

    pub(crate) fn from_parts(
        voted_for: BTreeMap<String, String>,
        votes: BTreeMap<String, u32>,
    ) -> Self {
        Self { voted_for, votes }
    }

    /// Returns true if every tally matches the ballots pointing at it.
    pub(crate) fn is_consistent(&self) -> bool {
        let mut expected: BTreeMap<&str, u32> = BTreeMap::new();
        for target in self.voted_for.values() {
            *expected.entry(target.as_str()).or_insert(0) += 1;
        }
        let recorded_ok = self
            .votes
            .iter()
            .all(|(target, count)| expected.get(target.as_str()).copied().unwrap_or(0) == *count);
        let expected_ok = expected
            .iter()
            .all(|(target, count)| self.votes.get(*target) == Some(count));
        recorded_ok && expected_ok
    }
}
