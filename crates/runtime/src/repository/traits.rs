//! Repository contract for match records.

use super::Result;

/// Keyed text-blob storage for serialized matches.
///
/// Implementations must make every write atomic: a concurrent `get` returns
/// either the previous record or the new one, never a partial write. They do
/// not serialize read-modify-write cycles; [`super::MatchStore`] does.
pub trait MatchRepository: Send + Sync {
    /// Stores a new record. Fails with `AlreadyExists` if `code` is taken.
    fn insert(&self, code: &str, record: &str) -> Result<()>;

    /// Returns the record for `code`, if any.
    fn get(&self, code: &str) -> Result<Option<String>>;

    /// Overwrites an existing record. Fails with `NotFound` if `code` is absent.
    fn update(&self, code: &str, record: &str) -> Result<()>;

    /// Deletes a record. Returns whether it existed.
    fn remove(&self, code: &str) -> Result<bool>;

    /// All stored codes, sorted.
    fn codes(&self) -> Result<Vec<String>>;

    fn contains(&self, code: &str) -> Result<bool> {
        Ok(self.get(code)?.is_some())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.codes()?.len())
    }
}
