//! # Cart Snapshot Envelope
//!
//! The persisted wire format for the cart's one durable slot.
//!
//! ## Why an Envelope?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The mobile app persisted a bare JSON array of items. A field change   │
//! │  made old payloads fail deserialization SILENTLY - the user's cart     │
//! │  just vanished on upgrade.                                             │
//! │                                                                         │
//! │  Now the payload is wrapped:                                           │
//! │                                                                         │
//! │    {"version": 1, "items": [ ... ]}                                    │
//! │                                                                         │
//! │  On load:                                                              │
//! │    version 1      → decode directly                                    │
//! │    bare array     → legacy (pre-envelope) format, migrated in place    │
//! │    version > 1    → explicit UnsupportedVersion error                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SnapshotError;
use medcart_core::CartItem;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The versioned envelope wrapping the persisted item list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Format version. Bump on any breaking change to [`CartItem`].
    pub version: u32,

    /// The full line-item list, in insertion order.
    pub items: Vec<CartItem>,
}

impl CartSnapshot {
    /// Wraps an item list in the current envelope version.
    pub fn new(items: Vec<CartItem>) -> Self {
        CartSnapshot {
            version: SNAPSHOT_VERSION,
            items,
        }
    }

    /// Encodes the snapshot as its persisted JSON document.
    pub fn encode(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a persisted payload, migrating legacy formats.
    ///
    /// ## Accepted Formats
    /// - The current envelope (`version` <= [`SNAPSHOT_VERSION`])
    /// - A bare JSON array of items (the pre-envelope format)
    pub fn decode(payload: &str) -> Result<Vec<CartItem>, SnapshotError> {
        match serde_json::from_str::<CartSnapshot>(payload) {
            Ok(snapshot) if snapshot.version <= SNAPSHOT_VERSION => Ok(snapshot.items),
            Ok(snapshot) => Err(SnapshotError::UnsupportedVersion(snapshot.version)),
            Err(envelope_err) => {
                // Fall back to the legacy bare-array format
                match serde_json::from_str::<Vec<CartItem>>(payload) {
                    Ok(items) => {
                        debug!(count = items.len(), "Migrated legacy cart snapshot");
                        Ok(items)
                    }
                    Err(_) => Err(SnapshotError::Malformed(envelope_err)),
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use medcart_core::{Cart, Product};

    fn item(id: &str) -> CartItem {
        let product = Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price_cents: 5999,
            original_price_cents: None,
            image: None,
            image_url: None,
            pharmacy: "Clicks".to_string(),
            pharmacy_color: None,
            in_stock: true,
            stock_count: Some(10),
            max_quantity: None,
            generic_name: None,
            dosage: None,
            pack_size: None,
            requires_prescription: false,
        };
        CartItem::from_product(&product, 2)
    }

    #[test]
    fn test_round_trip() {
        let snapshot = CartSnapshot::new(vec![item("p1"), item("p2")]);
        let payload = snapshot.encode().unwrap();
        assert!(payload.contains("\"version\":1"));

        let items = CartSnapshot::decode(&payload).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id, "p1");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].max_quantity, 10);
    }

    #[test]
    fn test_decode_legacy_bare_array() {
        let legacy = serde_json::to_string(&vec![item("p1")]).unwrap();
        assert!(legacy.starts_with('['));

        let items = CartSnapshot::decode(&legacy).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, "p1");
    }

    #[test]
    fn test_decode_future_version_rejected() {
        let payload = r#"{"version": 99, "items": []}"#;
        let err = CartSnapshot::decode(payload).unwrap_err();
        assert!(matches!(err, SnapshotError::UnsupportedVersion(99)));
    }

    #[test]
    fn test_decode_garbage_rejected() {
        assert!(CartSnapshot::decode("not json").is_err());
        assert!(CartSnapshot::decode("{\"something\": true}").is_err());
    }

    #[test]
    fn test_empty_cart_round_trip() {
        let cart = Cart::new();
        let payload = CartSnapshot::new(cart.items).encode().unwrap();
        assert!(CartSnapshot::decode(&payload).unwrap().is_empty());
    }
}
