//! # medcart-core: Pure Business Logic for the Medcart Engine
//!
//! This crate is the **heart** of the Medcart pharmacy cart. It contains all
//! business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Medcart Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile Frontend                              │   │
//! │  │    Browse UI ──► Cart UI ──► Delivery UI ──► Checkout UI       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    medcart-engine                               │   │
//! │  │    add_item, update_item_quantity, checkout, subscribe, ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ medcart-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │ CartItem  │  │ VAT calc  │  │ grouping  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    medcart-store (Storage Layer)                │   │
//! │  │              Durable cart snapshots (SQLite / in-memory)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, DeliveryOption, CartSummary, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart aggregate: items, quantity rules, grouping
//! - [`delivery`] - The static delivery-option catalog
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use medcart_core::money::Money;
//! use medcart_core::types::TaxRate;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(5000); // R50.00
//!
//! // South African VAT is 15%
//! let vat = price.calculate_tax(TaxRate::from_bps(1500));
//! assert_eq!(vat.cents(), 750); // R7.50
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod delivery;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use medcart_core::Money` instead of
// `use medcart_core::money::Money`

pub use cart::{Cart, CartItem, CartValidation, PharmacyGroup};
pub use delivery::{delivery_catalog, DeliveryOption};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default VAT rate in basis points (15%, South Africa).
///
/// ## Why a constant?
/// The engine is single-jurisdiction for now. The rate is configurable on
/// the engine so a regulatory change doesn't require touching cart math.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1500;

/// Maximum quantity of a single item when no stock ceiling is known.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 100 instead of 10) on
/// products whose stock level the catalog did not report.
pub const DEFAULT_MAX_ITEM_QUANTITY: i64 = 99;

/// Maximum distinct line items in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps persisted snapshots small.
pub const MAX_CART_ITEMS: usize = 100;
