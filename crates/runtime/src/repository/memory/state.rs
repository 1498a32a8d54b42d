//! In-memory MatchRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::repository::{MatchRepository, RepositoryError, Result};

/// In-memory implementation of [`MatchRepository`].
///
/// Records live in a `HashMap` behind an `RwLock`; each call replaces a whole
/// record under the write lock, so readers never see a partial write.
#[derive(Default)]
pub struct InMemoryMatchRepo {
    records: RwLock<HashMap<String, String>>,
}

impl InMemoryMatchRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchRepository for InMemoryMatchRepo {
    fn insert(&self, code: &str, record: &str) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if records.contains_key(code) {
            return Err(RepositoryError::AlreadyExists {
                code: code.to_owned(),
            });
        }
        records.insert(code.to_owned(), record.to_owned());
        Ok(())
    }

    fn get(&self, code: &str) -> Result<Option<String>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(code).cloned())
    }

    fn update(&self, code: &str, record: &str) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        match records.get_mut(code) {
            Some(stored) => {
                *stored = record.to_owned();
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                code: code.to_owned(),
            }),
        }
    }

    fn remove(&self, code: &str) -> Result<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.remove(code).is_some())
    }

    fn codes(&self) -> Result<Vec<String>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut codes: Vec<String> = records.keys().cloned().collect();
        codes.sort_unstable();
        Ok(codes)
    }

    fn contains(&self, code: &str) -> Result<bool> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.contains_key(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_update_remove() {
        let repo = InMemoryMatchRepo::new();
        repo.insert("abcdef", "one").unwrap();
        assert!(matches!(
            repo.insert("abcdef", "two"),
            Err(RepositoryError::AlreadyExists { .. })
        ));

        repo.update("abcdef", "three").unwrap();
        assert_eq!(repo.get("abcdef").unwrap().as_deref(), Some("three"));
        assert!(matches!(
            repo.update("zzzzzz", "x"),
            Err(RepositoryError::NotFound { .. })
        ));

        assert_eq!(repo.codes().unwrap(), ["abcdef"]);
        assert!(repo.remove("abcdef").unwrap());
        assert!(!repo.remove("abcdef").unwrap());
        assert_eq!(repo.get("abcdef").unwrap(), None);
    }
}
