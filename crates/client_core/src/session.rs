//! Explicit session context: the admin bearer token and where it is kept.

use std::{
    collections::HashMap,
    fmt, fs,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::error::ConsoleError;

/// Storage key the console keeps its bearer token under.
pub const ADMIN_TOKEN_KEY: &str = "adminToken";

pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryCredentialStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        if let Ok(mut values) = store.values.write() {
            values.insert(ADMIN_TOKEN_KEY.to_string(), token.to_string());
        }
        store
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .map_err(|_| anyhow::anyhow!("credential store lock poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values
            .write()
            .map_err(|_| anyhow::anyhow!("credential store lock poisoned"))?
            .remove(key);
        Ok(())
    }
}

/// JSON key/value file, the on-disk counterpart of browser local storage.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => serde_json::from_str(&raw).with_context(|| {
                format!("invalid credential file '{}'", self.path.display())
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err).with_context(|| {
                format!("failed to read credential file '{}'", self.path.display())
            }),
        }
    }

    fn write_all(&self, values: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!(
                    "failed to create parent directory '{}' for credential file",
                    parent.display()
                )
            })?;
        }
        let raw = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, raw).with_context(|| {
            format!("failed to write credential file '{}'", self.path.display())
        })
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_all() {
            Ok(mut values) => values.remove(key),
            Err(err) => {
                warn!("session: credential store unreadable: {err:#}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn CredentialStore>,
}

impl Session {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub fn in_memory(token: &str) -> Self {
        Self::new(Arc::new(MemoryCredentialStore::with_token(token)))
    }

    /// Pre-flight check every authenticated request goes through.
    pub fn access_token(&self) -> Result<AccessToken, ConsoleError> {
        self.store
            .get(ADMIN_TOKEN_KEY)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .map(AccessToken)
            .ok_or(ConsoleError::MissingCredential)
    }

    pub fn sign_in(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            anyhow::bail!("token must not be empty");
        }
        self.store.set(ADMIN_TOKEN_KEY, token)?;
        debug!("session: token stored");
        Ok(())
    }

    pub fn sign_out(&self) -> Result<()> {
        self.store.remove(ADMIN_TOKEN_KEY)?;
        debug!("session: token removed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
