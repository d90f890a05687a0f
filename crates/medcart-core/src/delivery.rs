//! # Delivery Options
//!
//! The static fulfillment catalog the engine selects from.
//!
//! ## Catalog
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  id         name                 eta                 price              │
//! │  ─────────  ───────────────────  ──────────────────  ─────              │
//! │  standard   Standard Delivery    2-3 working days    R60.00  ← default  │
//! │  express    Express Delivery     Same day, 2-4 hrs   R120.00            │
//! │  pickup     Collect In-Store     Ready in 1 hour     Free               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is immutable for the life of the engine; only the *selection*
//! changes. The default selection is the first entry.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Delivery Option
// =============================================================================

/// A selectable fulfillment method with its own price and ETA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOption {
    /// Stable identifier ("standard", "express", "pickup").
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description shown under the name.
    pub description: String,

    /// Estimated fulfillment window.
    pub eta: String,

    /// Fixed price in cents.
    pub price_cents: i64,

    /// Icon asset reference for the frontend.
    pub icon: String,
}

impl DeliveryOption {
    /// Returns the fee as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Returns the fixed delivery catalog, cheapest standard option first.
///
/// The first entry is the default selection on every engine construction
/// (the selection itself is not persisted).
pub fn delivery_catalog() -> Vec<DeliveryOption> {
    vec![
        DeliveryOption {
            id: "standard".to_string(),
            name: "Standard Delivery".to_string(),
            description: "Delivered to your door".to_string(),
            eta: "2-3 working days".to_string(),
            price_cents: 6000,
            icon: "truck".to_string(),
        },
        DeliveryOption {
            id: "express".to_string(),
            name: "Express Delivery".to_string(),
            description: "Same-day courier".to_string(),
            eta: "2-4 hours".to_string(),
            price_cents: 12000,
            icon: "bolt".to_string(),
        },
        DeliveryOption {
            id: "pickup".to_string(),
            name: "Collect In-Store".to_string(),
            description: "Collect from your nearest branch".to_string(),
            eta: "Ready in 1 hour".to_string(),
            price_cents: 0,
            icon: "store".to_string(),
        },
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_unique_ids() {
        let catalog = delivery_catalog();
        let mut ids: Vec<&str> = catalog.iter().map(|o| o.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_default_option_is_standard() {
        let catalog = delivery_catalog();
        assert_eq!(catalog[0].id, "standard");
    }

    #[test]
    fn test_pickup_is_free() {
        let catalog = delivery_catalog();
        let pickup = catalog.iter().find(|o| o.id == "pickup").unwrap();
        assert!(pickup.price().is_zero());
    }
}
