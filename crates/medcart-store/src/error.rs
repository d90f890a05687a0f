//! # Storage Error Types
//!
//! Error types for durable-storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EngineError (medcart-engine) ← What the consuming UI sees             │
//! │                                                                         │
//! │  The mobile app caught and swallowed these; here they surface so a     │
//! │  UI can show a "changes may not be saved" indicator.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Durable-storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Storage connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Storage migration failed: {0}")]
    MigrationFailed(String),

    /// Reading the persisted snapshot failed.
    #[error("Storage read failed: {0}")]
    ReadFailed(String),

    /// Writing the snapshot failed. The in-memory cart stays authoritative
    /// for the session; the durable copy is stale until the next write.
    #[error("Storage write failed: {0}")]
    WriteFailed(String),
}

/// Convert sqlx errors to StoreError.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                StoreError::ConnectionFailed("connection pool exhausted".to_string())
            }
            sqlx::Error::PoolClosed => {
                StoreError::ConnectionFailed("connection pool is closed".to_string())
            }
            other => StoreError::ReadFailed(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Snapshot Error
// =============================================================================

/// Errors decoding a persisted cart snapshot.
///
/// The engine treats any of these as "no prior cart" (logged, not fatal).
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The payload is not valid snapshot JSON in any supported format.
    #[error("Malformed cart snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The payload was written by a newer format than this build supports.
    #[error("Unsupported cart snapshot version: {0}")]
    UnsupportedVersion(u32),
}
