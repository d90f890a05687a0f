//! # Validation Module
//!
//! Input validation for caller-supplied data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend                                                     │
//! │  ├── Basic format checks (empty fields, quantity steppers)             │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine operation (Rust)                                      │
//! │  └── THIS MODULE: required fields, positive quantities                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart aggregate                                               │
//! │  └── Stock ceilings, cart size, item presence                          │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The mobile app's cart service trusted callers to pass a positive initial
//! quantity and silently stored whatever arrived. Here a zero or negative
//! quantity is rejected up front.

use crate::error::ValidationError;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a caller-supplied add quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// Stock ceilings are per-item and enforced by the cart aggregate, so no
/// global upper bound is applied here.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, e.g. promotional samples)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 64 characters
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "product id".to_string(),
            max: 64,
        });
    }

    Ok(())
}

// =============================================================================
// Product Validator
// =============================================================================

/// Validates the minimum product shape required to trade.
///
/// ## Rules
/// The catalog layer can omit every optional field, but an identifier,
/// name, non-negative price and pharmacy must be present.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;

    if product.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product name".to_string(),
        });
    }

    if product.pharmacy.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "pharmacy".to_string(),
        });
    }

    validate_price_cents(product.price_cents)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Panado 500mg".to_string(),
            price_cents: 5999,
            original_price_cents: None,
            image: None,
            image_url: None,
            pharmacy: "Clicks".to_string(),
            pharmacy_color: None,
            in_stock: true,
            stock_count: None,
            max_quantity: None,
            generic_name: None,
            dosage: None,
            pack_size: None,
            requires_prescription: false,
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(150).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(5999).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("p1").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
        assert!(validate_product_id(&"a".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(&product()).is_ok());

        let mut nameless = product();
        nameless.name = " ".to_string();
        assert!(validate_product(&nameless).is_err());

        let mut orphan = product();
        orphan.pharmacy = String::new();
        assert!(validate_product(&orphan).is_err());

        let mut negative = product();
        negative.price_cents = -1;
        assert!(validate_product(&negative).is_err());
    }
}
