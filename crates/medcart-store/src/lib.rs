//! # medcart-store: Durable Storage for the Medcart Engine
//!
//! The cart engine persists its entire line-item list as one JSON document
//! under a single fixed key. This crate owns that slot: the storage trait,
//! the versioned snapshot format, and the concrete backends.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Medcart Data Flow                                │
//! │                                                                         │
//! │  Engine mutation (add_item, update_item_quantity, ...)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   medcart-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   CartStore   │    │  CartSnapshot │    │  Migrations  │  │   │
//! │  │   │   (kv.rs)     │    │ (snapshot.rs) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ load/save/    │◄───│ {version: 1,  │    │ 001_cart_    │  │   │
//! │  │   │ remove        │    │  items: [..]} │    │ store.sql    │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  │     ┌─────┴──────┐                                             │   │
//! │  │     ▼            ▼                                             │   │
//! │  │  MemoryStore  SqliteStore                                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - The `CartStore` trait and the in-memory backend
//! - [`snapshot`] - Versioned snapshot envelope with legacy migration
//! - [`sqlite`] - SQLite backend (sqlx pool, WAL mode, embedded migration)
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medcart_store::{CartStore, SqliteConfig, SqliteStore};
//!
//! let store = SqliteStore::new(SqliteConfig::new("medcart.db")).await?;
//! store.save("medcart.cart", &payload).await?;
//! let loaded = store.load("medcart.cart").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod snapshot;
pub mod sqlite;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{SnapshotError, StoreError, StoreResult};
pub use kv::{CartStore, MemoryStore};
pub use snapshot::{CartSnapshot, SNAPSHOT_VERSION};
pub use sqlite::{SqliteConfig, SqliteStore};
