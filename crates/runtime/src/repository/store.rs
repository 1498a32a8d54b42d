//! Transactional match store.
//!
//! [`MatchStore`] maps match codes to serialized records and owns the single
//! exclusive region that serializes every read-modify-write cycle. Writes are
//! only reachable through an [`Exclusive`] guard, so a mutation cannot save
//! without having held the region since its load.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use werewolf_core::Match;

use super::{InMemoryMatchRepo, MatchRepository, RepositoryError, Result};

pub struct MatchStore {
    repo: Arc<dyn MatchRepository>,
    region: Mutex<()>,
}

impl MatchStore {
    pub fn new(repo: impl MatchRepository + 'static) -> Self {
        Self::from_shared(Arc::new(repo))
    }

    pub fn from_shared(repo: Arc<dyn MatchRepository>) -> Self {
        Self {
            repo,
            region: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(InMemoryMatchRepo::new())
    }

    /// Enters the exclusive region. Held until the guard is dropped.
    pub async fn exclusive(&self) -> Exclusive<'_> {
        Exclusive {
            store: self,
            _guard: self.region.lock().await,
        }
    }

    /// Runs `mutate` on the match stored under `code` inside the exclusive
    /// region, saving the result only if `mutate` succeeds.
    pub async fn transaction<T, E, F>(&self, code: &str, mutate: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Match) -> std::result::Result<T, E>,
        E: From<RepositoryError>,
    {
        let region = self.exclusive().await;
        let mut game = region.load(code)?.ok_or_else(|| RepositoryError::NotFound {
            code: code.to_owned(),
        })?;
        let value = mutate(&mut game)?;
        region.save(code, &game)?;
        Ok(value)
    }

    /// Loads and decodes the match stored under `code`.
    pub fn load(&self, code: &str) -> Result<Option<Match>> {
        self.load_raw(code)?
            .map(|raw| decode(code, &raw))
            .transpose()
    }

    /// Returns the stored record verbatim.
    pub fn load_raw(&self, code: &str) -> Result<Option<String>> {
        self.repo.get(code)
    }

    pub fn contains(&self, code: &str) -> Result<bool> {
        self.repo.contains(code)
    }

    /// Number of stored matches.
    pub fn len(&self) -> Result<usize> {
        self.repo.len()
    }

    pub fn codes(&self) -> Result<Vec<String>> {
        self.repo.codes()
    }
}

/// Write access to the store, valid while the exclusive region is held.
pub struct Exclusive<'a> {
    store: &'a MatchStore,
    _guard: MutexGuard<'a, ()>,
}

impl Exclusive<'_> {
    /// Stores a fresh empty match under `code`.
    pub fn create(&self, code: &str) -> Result<Match> {
        let game = Match::new();
        self.store.repo.insert(code, &encode(&game)?)?;
        debug!(target: "werewolf::store", code, "match created");
        Ok(game)
    }

    pub fn load(&self, code: &str) -> Result<Option<Match>> {
        self.store.load(code)
    }

    pub fn contains(&self, code: &str) -> Result<bool> {
        self.store.contains(code)
    }

    /// Overwrites the record for an existing match.
    pub fn save(&self, code: &str, game: &Match) -> Result<()> {
        self.store.repo.update(code, &encode(game)?)?;
        debug!(target: "werewolf::store", code, activity = %game.activity(), "match saved");
        Ok(())
    }

    pub fn remove(&self, code: &str) -> Result<bool> {
        self.store.repo.remove(code)
    }
}

fn encode(game: &Match) -> Result<String> {
    game.encode()
        .map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn decode(code: &str, raw: &str) -> Result<Match> {
    Match::decode(raw).map_err(|source| RepositoryError::CorruptedData {
        code: code.to_owned(),
        source,
    })
}
