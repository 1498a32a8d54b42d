//! File-based MatchRepository implementation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::repository::{MatchRepository, RepositoryError, Result};

/// File-based implementation of [`MatchRepository`].
///
/// Stores each match as `{code}.json` under `base_dir`. Writes go to a
/// temporary file first and are renamed into place, so a reader sees either
/// the old record or the new one.
///
/// All I/O is blocking `std::fs` on the calling thread. Writes therefore
/// block an executor worker while the store's exclusive region is held; a
/// record is one small file, so each call is a single short syscall batch.
pub struct FileMatchRepository {
    base_dir: PathBuf,
}

impl FileMatchRepository {
    /// Create a new file-based match repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a record file.
    fn record_path(&self, code: &str) -> Result<PathBuf> {
        if !is_valid_key(code) {
            return Err(RepositoryError::InvalidKey {
                code: code.to_owned(),
            });
        }
        Ok(self.base_dir.join(format!("{code}.json")))
    }

    fn write_atomic(&self, path: &Path, record: &str) -> Result<()> {
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, record).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, path).map_err(RepositoryError::Io)?;
        Ok(())
    }
}

/// Codes become file names, so only plain ASCII word characters are allowed.
fn is_valid_key(code: &str) -> bool {
    !code.is_empty()
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

impl MatchRepository for FileMatchRepository {
    fn insert(&self, code: &str, record: &str) -> Result<()> {
        let path = self.record_path(code)?;
        if path.exists() {
            return Err(RepositoryError::AlreadyExists {
                code: code.to_owned(),
            });
        }
        self.write_atomic(&path, record)?;
        tracing::debug!(target: "werewolf::store", code, "created {}", path.display());
        Ok(())
    }

    fn get(&self, code: &str) -> Result<Option<String>> {
        if !is_valid_key(code) {
            return Ok(None);
        }
        let path = self.record_path(code)?;
        match fs::read_to_string(&path) {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RepositoryError::Io(e)),
        }
    }

    fn update(&self, code: &str, record: &str) -> Result<()> {
        let path = self.record_path(code)?;
        if !path.exists() {
            return Err(RepositoryError::NotFound {
                code: code.to_owned(),
            });
        }
        self.write_atomic(&path, record)?;
        tracing::debug!(target: "werewolf::store", code, "saved {}", path.display());
        Ok(())
    }

    fn remove(&self, code: &str) -> Result<bool> {
        if !is_valid_key(code) {
            return Ok(false);
        }
        let path = self.record_path(code)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(target: "werewolf::store", code, "deleted {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(RepositoryError::Io(e)),
        }
    }

    fn codes(&self) -> Result<Vec<String>> {
        let mut codes = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(code) = filename.strip_suffix(".json")
                && is_valid_key(code)
            {
                codes.push(code.to_owned());
            }
        }

        codes.sort_unstable();
        Ok(codes)
    }

    fn contains(&self, code: &str) -> Result<bool> {
        if !is_valid_key(code) {
            return Ok(false);
        }
        Ok(self.record_path(code)?.exists())
    }
}
