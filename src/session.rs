//! Persisted credential pair: the one piece of local state that survives
//! between invocations.
//!
//! Written on successful auth, cleared on logout, read once at startup for
//! the restore attempt. Loading is best effort: a missing or corrupt file is
//! the same as no stored session.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The stored (token, username) pair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Credentials {
    pub token: String,
    pub username: String,
}

pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, credentials: &Credentials) -> io::Result<()> {
        let body = serde_json::to_string(credentials)?;
        fs::write(&self.path, body)
    }

    pub fn load(&self) -> Option<Credentials> {
        let body = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&body) {
            Ok(credentials) => Some(credentials),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring corrupt session file");
                None
            }
        }
    }

    /// Remove the stored pair. A missing file is not an error: logout must
    /// succeed whether or not a session was ever persisted.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn creds() -> Credentials {
        Credentials {
            token: "t1".to_string(),
            username: "ann".to_string(),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("session.json"));
        store.save(&creds()).unwrap();
        assert_eq!(store.load(), Some(creds()));
    }

    #[test]
    fn load_is_none_when_file_missing() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn load_is_none_on_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = CredentialStore::new(path);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn clear_removes_file_and_tolerates_missing() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("session.json"));
        store.save(&creds()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);
        // Second clear: nothing left to remove.
        store.clear().unwrap();
    }
}
