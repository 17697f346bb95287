use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Key under which the bearer token is stored
pub const CREDENTIAL_KEY: &str = "study_aid_token";

/// Backing store for opaque credentials. Persistence is up to the implementor.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Process-local credential store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
    }
}

/// Handle to the session's bearer token, shared by everything that needs it
#[derive(Clone)]
pub struct Credentials {
    store: Arc<dyn CredentialStore>,
}

impl Credentials {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Credentials backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCredentialStore::new()))
    }

    pub fn init(&self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            self.clear();
            return;
        }
        self.store.set(CREDENTIAL_KEY, token);
        debug!(component = "credentials", "Bearer token stored");
    }

    /// The stored token, if any. Blank values are treated as absent.
    pub fn token(&self) -> Option<String> {
        self.store
            .get(CREDENTIAL_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn clear(&self) {
        self.store.remove(CREDENTIAL_KEY);
        debug!(component = "credentials", "Bearer token cleared");
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("has_token", &self.token().is_some())
            .finish()
    }
}
