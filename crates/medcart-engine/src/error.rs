//! # Engine Error Type
//!
//! The error surface consumers see.
//!
//! ## Why Not Booleans?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The mobile app's cart service returned bare `false` for every         │
//! │  failure and swallowed storage exceptions after logging them. A        │
//! │  caller could not tell "stock ceiling hit" from "disk full", and       │
//! │  usually ignored the boolean entirely.                                 │
//! │                                                                         │
//! │  Here every failure is a typed variant:                                │
//! │    Core(QuantityExceedsStock)  → show "only N available"               │
//! │    Core(NotInCart)             → stale UI row, refresh the list        │
//! │    Store(WriteFailed)          → "changes may not be saved" banner     │
//! │                                   (in-memory cart is still updated)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::checkout::PaymentError;
use medcart_core::CoreError;
use medcart_store::StoreError;

/// Errors returned by cart engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A cart business rule rejected the mutation; state is unchanged.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Durable storage failed. The in-memory mutation was applied and
    /// subscribers were notified; only the durable copy is stale.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The external payment processor reported a failure.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_pass_through_transparently() {
        let err: EngineError = CoreError::NotInCart("p1".to_string()).into();
        assert_eq!(err.to_string(), "Product not in cart: p1");
    }

    #[test]
    fn test_store_errors_keep_context() {
        let err: EngineError = StoreError::WriteFailed("disk full".to_string()).into();
        assert_eq!(err.to_string(), "Storage write failed: disk full");
    }
}
