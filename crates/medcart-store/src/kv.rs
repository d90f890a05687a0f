//! # Key-Value Storage Trait
//!
//! The storage seam the engine is injected with.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storage Abstraction                                 │
//! │                                                                         │
//! │  CartEngine ──owns──► Arc<dyn CartStore>                               │
//! │                          │                                              │
//! │              ┌───────────┴───────────┐                                  │
//! │              ▼                       ▼                                  │
//! │        MemoryStore             SqliteStore                              │
//! │        (tests, previews)       (production)                             │
//! │                                                                         │
//! │  The engine serializes its entire item list as ONE document under      │
//! │  ONE fixed key. No other component writes to that slot.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::StoreResult;

// =============================================================================
// CartStore Trait
// =============================================================================

/// Asynchronous durable key-value storage for the cart snapshot.
///
/// Implementations must be safe to share across tasks; the engine holds
/// the store behind an `Arc`.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Loads the payload stored under `key`, if any.
    async fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `payload` under `key`, replacing any prior value.
    async fn save(&self, key: &str, payload: &str) -> StoreResult<()>;

    /// Removes the value under `key` (no-op if absent).
    async fn remove(&self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// In-process store backed by a `HashMap`.
///
/// ## Usage
/// Tests and previews. Cloning shares the same underlying map, which lets
/// a test hand "the same durable storage" to two engine instances to
/// exercise crash/restore behavior.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys (diagnostics).
    pub fn len(&self) -> usize {
        self.entries.lock().expect("memory store mutex poisoned").len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().expect("memory store mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    async fn save(&self, key: &str, payload: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().expect("memory store mutex poisoned");
        entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().expect("memory store mutex poisoned");
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();

        assert_eq!(store.load("cart").await.unwrap(), None);

        store.save("cart", "{\"version\":1,\"items\":[]}").await.unwrap();
        assert_eq!(
            store.load("cart").await.unwrap().as_deref(),
            Some("{\"version\":1,\"items\":[]}")
        );

        store.remove("cart").await.unwrap();
        assert_eq!(store.load("cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_clone_shares_state() {
        let store = MemoryStore::new();
        let alias = store.clone();

        store.save("cart", "payload").await.unwrap();
        assert_eq!(alias.load("cart").await.unwrap().as_deref(), Some("payload"));
    }

    #[tokio::test]
    async fn test_save_replaces_prior_value() {
        let store = MemoryStore::new();
        store.save("cart", "old").await.unwrap();
        store.save("cart", "new").await.unwrap();
        assert_eq!(store.load("cart").await.unwrap().as_deref(), Some("new"));
        assert_eq!(store.len(), 1);
    }
}
