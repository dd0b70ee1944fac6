//! Saved favorites and play history
//!
//! Both lists are JSON arrays of game ids under fixed keys in a string
//! key-value store (`localStorage` in the browser, [`MemoryStore`] in tests).
//! Nothing here ever fails the caller: unreadable data loads as empty and
//! failed writes are logged and dropped.

use std::collections::HashMap;

use indexmap::IndexSet;

use crate::config::CatalogConfig;
use crate::error::StorageError;

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store, used in tests and when the browser store is disabled
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Favorites and recently-played ids, mirrored to a [`KeyValueStore`]
pub struct Persistence<S> {
    store: S,
    favorites_key: String,
    recent_key: String,
    recent_limit: usize,
    favorites: IndexSet<String>,
    recent: Vec<String>,
}

impl<S: KeyValueStore> Persistence<S> {
    /// Open the store and load both lists once
    pub fn new(store: S, config: &CatalogConfig) -> Self {
        let mut persistence = Self {
            store,
            favorites_key: config.favorites_key.clone(),
            recent_key: config.recent_key.clone(),
            recent_limit: config.recent_limit.max(1),
            favorites: IndexSet::new(),
            recent: Vec::new(),
        };
        persistence.favorites = persistence.load_favorites();
        persistence.recent = persistence.load_recently_played();
        tracing::debug!(
            "Loaded {} favorites and {} recently played",
            persistence.favorites.len(),
            persistence.recent.len()
        );
        persistence
    }

    /// Read favorites from the store. Missing or malformed data yields an empty set.
    pub fn load_favorites(&self) -> IndexSet<String> {
        self.read_ids(&self.favorites_key).into_iter().collect()
    }

    /// Read play history from the store, most recent first.
    /// Duplicates and entries past the limit are dropped.
    pub fn load_recently_played(&self) -> Vec<String> {
        let ids: IndexSet<String> = self.read_ids(&self.recent_key).into_iter().collect();
        ids.into_iter().take(self.recent_limit).collect()
    }

    pub fn save_favorites(&mut self) {
        let json = serde_json::to_string(&self.favorites);
        write_json(&mut self.store, &self.favorites_key, json);
    }

    fn save_recently_played(&mut self) {
        let json = serde_json::to_string(&self.recent);
        write_json(&mut self.store, &self.recent_key, json);
    }

    /// Flip membership and persist. Returns true if the game is now a favorite.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let favorited = if self.favorites.shift_remove(id) {
            false
        } else {
            self.favorites.insert(id.to_string());
            true
        };
        self.save_favorites();
        favorited
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn favorites(&self) -> &IndexSet<String> {
        &self.favorites
    }

    /// Move `id` to the front of the history, capped at the configured limit
    pub fn record_played(&mut self, id: &str) {
        self.recent.retain(|r| r != id);
        self.recent.insert(0, id.to_string());
        self.recent.truncate(self.recent_limit);
        self.save_recently_played();
    }

    pub fn recently_played(&self) -> &[String] {
        &self.recent
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read_ids(&self, key: &str) -> Vec<String> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Could not read '{}': {}", key, e);
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<String>>(&raw).map_err(StorageError::from) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!("Ignoring stored '{}': {}", key, e);
                Vec::new()
            }
        }
    }
}

fn write_json<S: KeyValueStore>(store: &mut S, key: &str, json: serde_json::Result<String>) {
    let result = json
        .map_err(StorageError::from)
        .and_then(|json| store.set(key, &json));
    if let Err(e) = result {
        tracing::error!("Could not save '{}': {}", key, e);
    }
}
