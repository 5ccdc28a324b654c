//! Session token storage
//!
//! The bearer token is the only persisted client state. Every reader and
//! writer (interceptor, guard, login, logout) goes through [`TokenStore`], so
//! tests can substitute [`MemoryTokenStore`] for the file-backed store.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use log::debug;

use crate::error::{Result, SessionError};

/// Storage key holding the raw bearer token
pub const TOKEN_KEY: &str = "token";

/// Narrow key-value access to the session token.
///
/// The token is opaque: it is never parsed or validated, and an empty
/// string counts as absent.
pub trait TokenStore: Send + Sync {
    /// Current token, if one is stored
    fn get(&self) -> Option<String>;

    /// Store a token, replacing any previous one
    fn set(&self, token: &str) -> Result<()>;

    /// Remove the stored token
    fn clear(&self) -> Result<()>;

    /// Whether a non-empty token is present
    fn has_token(&self) -> bool {
        self.get().is_some_and(|t| !t.is_empty())
    }
}

/// Shared handle to a token store
pub type SharedTokenStore = Arc<dyn TokenStore>;

/// Token store backed by a YAML file (`token: <value>`)
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store persisting to the given session file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the session file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| SessionError::Read(e.to_string()))?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_yaml::from_str(&contents).map_err(|e| SessionError::Read(e.to_string()).into())
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SessionError::Write(e.to_string()))?;
        }

        let contents =
            serde_yaml::to_string(entries).map_err(|e| SessionError::Write(e.to_string()))?;
        std::fs::write(&self.path, contents).map_err(|e| SessionError::Write(e.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| SessionError::Write(e.to_string()))?;
        }

        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        match self.read_entries() {
            Ok(mut entries) => entries.remove(TOKEN_KEY),
            Err(e) => {
                debug!("Ignoring unreadable session file: {}", e);
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<()> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.write_entries(&entries)
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.read_entries().unwrap_or_default();
        if entries.remove(TOKEN_KEY).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}

/// In-memory token store
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RwLock<BTreeMap<String, String>>,
}

#[cfg_attr(not(test), allow(dead_code))]
impl MemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a token
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.write() {
            entries.insert(TOKEN_KEY.to_string(), token.to_string());
        }
        store
    }

    /// Raw value stored under `key`
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.raw(TOKEN_KEY)
    }

    fn set(&self, token: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| SessionError::Write(e.to_string()))?;
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| SessionError::Write(e.to_string()))?;
        entries.remove(TOKEN_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemoryTokenStore::new();
        assert!(store.get().is_none());
        assert!(!store.has_token());

        store.set("abc").unwrap();
        assert_eq!(store.raw("token").as_deref(), Some("abc"));
        assert!(store.has_token());

        store.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        let store = MemoryTokenStore::with_token("");
        assert_eq!(store.get().as_deref(), Some(""));
        assert!(!store.has_token());
    }

    #[test]
    fn test_file_store_persists_under_token_key() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("session.yaml");
        let store = FileTokenStore::new(path.clone());

        store.set("FAKE_JWT").unwrap();

        let raw: BTreeMap<String, String> =
            serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get("token").map(String::as_str), Some("FAKE_JWT"));

        let reopened = FileTokenStore::new(path);
        assert_eq!(reopened.get().as_deref(), Some("FAKE_JWT"));
    }

    #[test]
    fn test_file_store_clear_removes_token() {
        let temp = tempdir().unwrap();
        let store = FileTokenStore::new(temp.path().join("session.yaml"));

        store.set("abc").unwrap();
        store.clear().unwrap();

        assert!(store.get().is_none());
        assert!(!store.has_token());
    }

    #[test]
    fn test_file_store_missing_file() {
        let temp = tempdir().unwrap();
        let store = FileTokenStore::new(temp.path().join("never-written.yaml"));

        assert!(store.get().is_none());
        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("session.yaml");
        std::fs::write(&path, "token: [unterminated").unwrap();

        let store = FileTokenStore::new(path);
        assert!(store.get().is_none());

        store.set("fresh").unwrap();
        assert_eq!(store.get().as_deref(), Some("fresh"));
    }
}
