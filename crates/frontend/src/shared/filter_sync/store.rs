//! Key-value persistence for page state.
//!
//! Pages never talk to `sessionStorage` directly: they receive a
//! [`PersistedStore`] so tests (and non-browser hosts) can swap in
//! [`MemoryStore`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub trait PersistedStore {
    fn get(&self, key: &str) -> Option<String>;

    fn try_set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str);

    /// Write that never fails: on quota/disabled storage the value is just
    /// not kept and state falls back to defaults on the next load.
    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.try_set(key, value) {
            log::warn!("store: dropping write of '{}': {}", key, e);
        }
    }
}

/// Read a JSON blob. Malformed data is treated as absent.
pub fn load_json<T: DeserializeOwned>(store: &impl PersistedStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str::<T>(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("store: ignoring malformed blob under '{}': {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize>(store: &impl PersistedStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(e) => log::warn!("store: failed to serialize '{}': {}", key, e),
    }
}

/// Browser `sessionStorage` of the current tab.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStore;

impl SessionStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.session_storage().ok().flatten())
    }
}

impl PersistedStore for SessionStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn try_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage()
            .ok_or_else(|| StoreError::Unavailable("sessionStorage is disabled".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory store. Clones share the same map, like several pages sharing
/// one browser tab.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PersistedStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn try_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Blob {
        a: u32,
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope"), None);
        store.remove("nope");
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_items() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v");
        assert_eq!(other.get("k").as_deref(), Some("v"));
        other.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_json_roundtrip_and_malformed() {
        let store = MemoryStore::new();
        save_json(&store, "blob", &Blob { a: 7 });
        assert_eq!(load_json::<Blob>(&store, "blob"), Some(Blob { a: 7 }));

        store.set("blob", "{not json");
        assert_eq!(load_json::<Blob>(&store, "blob"), None);
    }

    struct FullStore;

    impl PersistedStore for FullStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn try_set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("quota exceeded".to_string()))
        }
        fn remove(&self, _key: &str) {}
    }

    #[test]
    fn test_set_swallows_failures() {
        let store = FullStore;
        assert!(store.try_set("k", "v").is_err());
        store.set("k", "v");
        save_json(&store, "k", &Blob { a: 1 });
        assert_eq!(load_json::<Blob>(&store, "k"), None);
    }
}
