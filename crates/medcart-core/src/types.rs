//! # Domain Types
//!
//! Core domain types used throughout the Medcart engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   CartSummary   │   │ DeliveryOption  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (catalog)   │   │  subtotal_cents │   │  id ("pickup")  │       │
//! │  │  name           │   │  savings_cents  │   │  name, eta      │       │
//! │  │  price_cents    │   │  tax_cents      │   │  price_cents    │       │
//! │  │  pharmacy       │   │  total_cents    │   │  (delivery.rs)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │    TaxRate      │                                                    │
//! │  │  ─────────────  │                                                    │
//! │  │  bps (u32)      │                                                    │
//! │  │  1500 = 15%     │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Product` is the shape the catalog/UI layer hands to `add_item`; the cart
//! freezes what it needs into a `CartItem` (see [`crate::cart`]).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1500 bps = 15% (South African VAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as supplied by the catalog/UI layer when adding to the cart.
///
/// The engine is tolerant of missing optional fields: only the identifier,
/// name, price, pharmacy and stock flag are required to trade.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier - the unique key within the cart.
    pub id: String,

    /// Display name shown in the cart and on the order.
    pub name: String,

    /// Current price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Pre-discount price in cents, when the product is on promotion.
    #[serde(default)]
    pub original_price_cents: Option<i64>,

    /// Bundled image asset reference.
    #[serde(default)]
    pub image: Option<String>,

    /// Externally hosted image URL.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Name of the pharmacy fulfilling this product.
    pub pharmacy: String,

    /// Display color associated with the pharmacy (hex string).
    #[serde(default)]
    pub pharmacy_color: Option<String>,

    /// Whether the product is currently in stock.
    pub in_stock: bool,

    /// Units available, when the catalog reports a stock level.
    #[serde(default)]
    pub stock_count: Option<i64>,

    /// Explicit per-item orderable maximum, when the catalog caps it.
    #[serde(default)]
    pub max_quantity: Option<i64>,

    /// Generic/active-ingredient name.
    #[serde(default)]
    pub generic_name: Option<String>,

    /// Dosage strength (e.g. "500mg").
    #[serde(default)]
    pub dosage: Option<String>,

    /// Pack size (e.g. "24 tablets").
    #[serde(default)]
    pub pack_size: Option<String>,

    /// Whether a prescription is required to dispense this product.
    #[serde(default)]
    pub requires_prescription: bool,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// The quantity ceiling this product declares, if any.
    ///
    /// An explicit `max_quantity` wins over the reported stock count.
    pub fn declared_max(&self) -> Option<i64> {
        self.max_quantity.or(self.stock_count)
    }
}

// =============================================================================
// Cart Summary
// =============================================================================

/// Derived monetary breakdown of the cart. Recomputed on demand, never stored.
///
/// ## Invariant
/// `total_cents == subtotal_cents + tax_cents + delivery_fee_cents`, and
/// `total >= subtotal` since tax and delivery fees are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Sum of quantities across all line items.
    pub item_count: i64,

    /// Sum of price × quantity across all line items.
    pub subtotal_cents: i64,

    /// Sum of (original price − price) × quantity where the original
    /// price is higher than the current price.
    pub savings_cents: i64,

    /// VAT on the subtotal.
    pub tax_cents: i64,

    /// Price of the selected delivery option.
    pub delivery_fee_cents: i64,

    /// Subtotal + tax + delivery fee.
    pub total_cents: i64,
}

impl CartSummary {
    /// An all-zero summary (empty cart with a free delivery option).
    pub fn empty() -> Self {
        CartSummary {
            item_count: 0,
            subtotal_cents: 0,
            savings_cents: 0,
            tax_cents: 0,
            delivery_fee_cents: 0,
            total_cents: 0,
        }
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
