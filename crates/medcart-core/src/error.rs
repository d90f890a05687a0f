//! # Error Types
//!
//! Domain-specific error types for medcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  medcart-core errors (this file)                                       │
//! │  ├── CoreError        - Cart business rule violations                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  medcart-store errors (separate crate)                                 │
//! │  └── StoreError       - Durable storage failures                       │
//! │                                                                         │
//! │  medcart-engine errors (separate crate)                                │
//! │  └── EngineError      - What the consumer sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → EngineError → Frontend            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart business rule violations.
///
/// These replace the bare `false` returns the mobile app's cart service used:
/// callers get a typed reason instead of a boolean they might ignore.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A mutation would push an item's quantity above its stock ceiling.
    ///
    /// ## When This Occurs
    /// - Adding a product already in the cart past its stock count
    /// - Setting a quantity above the recorded maximum
    /// - Incrementing an item already at its ceiling
    ///
    /// ## User Workflow
    /// ```text
    /// Tap "+" on Panado 500mg (qty 5 of 5 in stock)
    ///      │
    ///      ▼
    /// QuantityExceedsStock { name: "Panado 500mg", requested: 6, max: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 5 available"
    /// ```
    #[error("Quantity {requested} for {name} exceeds the maximum available ({max})")]
    QuantityExceedsStock {
        name: String,
        requested: i64,
        max: i64,
    },

    /// Operating on a product identifier absent from the cart.
    #[error("Product not in cart: {0}")]
    NotInCart(String),

    /// Cart has exceeded the maximum number of distinct line items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// The requested delivery option is not in the catalog.
    #[error("Unknown delivery option: {0}")]
    UnknownDeliveryOption(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller-supplied data doesn't meet requirements.
/// Used for early validation before cart logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityExceedsStock {
            name: "Panado 500mg".to_string(),
            requested: 6,
            max: 5,
        };
        assert_eq!(
            err.to_string(),
            "Quantity 6 for Panado 500mg exceeds the maximum available (5)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "product id".to_string(),
        };
        assert_eq!(err.to_string(), "product id is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "product id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
