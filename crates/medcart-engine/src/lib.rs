//! # medcart-engine: The Cart Engine Service
//!
//! The consumer-facing service for the Medcart pharmacy cart: one instance
//! per running application, constructed at startup by the composition root
//! and handed (via cheap `Clone`) to whatever needs cart access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Medcart Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile Frontend                              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ medcart-engine (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  service  │  │subscribers│  │  checkout │  │   config  │  │   │
//! │  │   │CartEngine │  │ registry  │  │ processor │  │ env + def │  │   │
//! │  │   │ mutation  │  │ ordered   │  │   seam    │  │           │  │   │
//! │  │   │   lane    │  │ callbacks │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └───────────┬─────────────────────────────────┬───────────────────┘   │
//! │              │                                 │                        │
//! │  ┌───────────▼───────────────┐   ┌─────────────▼───────────────────┐   │
//! │  │       medcart-core        │   │         medcart-store           │   │
//! │  │   pure cart/money logic   │   │   durable snapshot key-value    │   │
//! │  └───────────────────────────┘   └─────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - Mutations are serialized through a single lane; no lost updates
//! - Every successful mutation persists a snapshot, then notifies
//!   subscribers synchronously, in registration order, exactly once
//! - Storage failures are surfaced to the caller but never roll back the
//!   in-memory cart
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use medcart_engine::{CartEngine, EngineConfig};
//! use medcart_store::MemoryStore;
//!
//! # async fn demo(product: medcart_core::Product) -> medcart_engine::EngineResult<()> {
//! let store = Arc::new(MemoryStore::new());
//! let engine = CartEngine::restore(store, EngineConfig::default()).await;
//!
//! engine.add_item(&product, 2).await?;
//! let summary = engine.summary().await;
//! println!("Total: {} cents", summary.total_cents);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod error;
pub mod service;
pub mod subscribers;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{
    CustomerDetails, PaymentError, PaymentProcessor, PaymentRequest, PaymentResponse,
    PaymentStatus,
};
pub use config::{EngineConfig, DEFAULT_STORAGE_KEY};
pub use error::{EngineError, EngineResult};
pub use service::CartEngine;
pub use subscribers::{CartSubscriber, SubscriberId};
