use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Well-known storage keys. The plan-cache key is the legacy per-user
/// entry; see `keys::plan_cache`.
pub mod keys {
    use uuid::Uuid;

    pub const AUTH_TOKEN: &str = "ayursutra_auth_token";
    pub const USER_DATA: &str = "ayursutra_user_data";
    pub const THEME: &str = "ayursutra_theme";

    /// Deprecated per-user treatment-plan cache. Read as a fallback
    /// before the first server fetch, removed on every authoritative
    /// fetch. New code must not write it.
    pub fn plan_cache(user_id: Uuid) -> String {
        format!("treatment_plan_{}", user_id)
    }

    pub const PLAN_CACHE_PREFIX: &str = "treatment_plan_";
}

/// Persisted key-value store backed by a single JSON file.
///
/// Writes are flushed synchronously on every mutation; a flush failure
/// is logged and the in-memory view stays authoritative for the rest
/// of the session, mirroring how the rest of the client treats the
/// store as best-effort local state rather than a second source of
/// truth.
#[derive(Clone)]
pub struct LocalStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, Value>>,
}

impl LocalStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(body) => match serde_json::from_str::<BTreeMap<String, Value>>(&body) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Local store at {} is corrupt ({}), starting empty", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        debug!("Opened local store at {} with {} entries", path.display(), entries.len());

        Self {
            inner: Arc::new(Inner {
                path,
                entries: RwLock::new(entries),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let entries = self.inner.entries.read().expect("local store lock poisoned");
        entries.get(key).cloned()
    }

    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Local store entry {} has unexpected shape: {}", key, e);
                None
            }
        }
    }

    pub fn set(&self, key: &str, value: &impl Serialize) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                warn!("Refusing to store unserializable value under {}: {}", key, e);
                return;
            }
        };

        {
            let mut entries = self.inner.entries.write().expect("local store lock poisoned");
            entries.insert(key.to_string(), value);
        }
        self.flush();
    }

    pub fn remove(&self, key: &str) -> bool {
        let removed = {
            let mut entries = self.inner.entries.write().expect("local store lock poisoned");
            entries.remove(key).is_some()
        };
        if removed {
            self.flush();
        }
        removed
    }

    /// Linear scan over stored keys, as the legacy plan cache expects.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let entries = self.inner.entries.read().expect("local store lock poisoned");
        entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn flush(&self) {
        let body = {
            let entries = self.inner.entries.read().expect("local store lock poisoned");
            match serde_json::to_string_pretty(&*entries) {
                Ok(body) => body,
                Err(e) => {
                    warn!("Failed to serialize local store: {}", e);
                    return;
                }
            }
        };

        if let Some(parent) = self.inner.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    warn!("Failed to create local store directory: {}", e);
                    return;
                }
            }
        }

        if let Err(e) = std::fs::write(&self.inner.path, body) {
            warn!("Failed to flush local store to {}: {}", self.inner.path.display(), e);
        }
    }
}

/// Bearer-token accessor over the local store. The token is written
/// once at login, removed at logout, and read on every request.
#[derive(Clone)]
pub struct TokenStore {
    store: LocalStore,
}

impl TokenStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Option<String> {
        self.store.get_as::<String>(keys::AUTH_TOKEN)
    }

    pub fn set_token(&self, token: &str) {
        self.store.set(keys::AUTH_TOKEN, &token);
    }

    pub fn clear_token(&self) {
        self.store.remove(keys::AUTH_TOKEN);
    }
}
