//! # Cart Aggregate
//!
//! The cart itself: ordered line items plus every quantity and pricing rule.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Frontend Action          Engine Operation         Cart Change          │
//! │  ───────────────          ────────────────         ───────────          │
//! │                                                                         │
//! │  Tap Product ────────────► add_item() ───────────► combine or push     │
//! │                                                                         │
//! │  Change Quantity ────────► update_quantity() ────► qty set / removed   │
//! │                                                                         │
//! │  Tap Remove ─────────────► remove_item() ────────► item removed        │
//! │                                                                         │
//! │  Checkout Complete ──────► clear() ──────────────► items cleared       │
//! │                                                                         │
//! │  View Totals ────────────► summary() ────────────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Line Item State Machine
//! ```text
//! ABSENT ──add──► PRESENT(n) ──update 1..=max──► PRESENT(m)
//!                     │
//!                     └──remove / update <= 0──► ABSENT
//! ```
//! There is no "reserved" or "pending" state: stock ceilings are advisory
//! caps on quantity, not a reservation system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartSummary, Product, TaxRate};
use crate::validation::validate_quantity;
use crate::{DEFAULT_MAX_ITEM_QUANTITY, MAX_CART_ITEMS};

// =============================================================================
// Cart Item
// =============================================================================

/// An item in the shopping cart.
///
/// ## Design Notes
/// - `product_id`: Reference to the catalog product (unique key in the cart)
/// - Everything else is a frozen snapshot of product data at time of adding.
///   The cart displays consistent data even if the catalog updates the
///   product afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product ID (catalog identifier).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price in cents at time of adding (frozen).
    /// This is critical: we lock in the price when added to cart.
    pub unit_price_cents: i64,

    /// Pre-discount price in cents, when the product was on promotion.
    #[serde(default)]
    pub original_price_cents: Option<i64>,

    /// Quantity in cart. Always >= 1 while the item is present.
    pub quantity: i64,

    /// Bundled image asset reference.
    #[serde(default)]
    pub image: Option<String>,

    /// Externally hosted image URL.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Fulfilling pharmacy name.
    pub pharmacy: String,

    /// Display color associated with the pharmacy.
    #[serde(default)]
    pub pharmacy_color: Option<String>,

    /// Stock flag at time of adding.
    pub in_stock: bool,

    /// Units available at time of adding, when known.
    #[serde(default)]
    pub stock_count: Option<i64>,

    /// Quantity ceiling: the product's declared cap or stock count,
    /// else [`DEFAULT_MAX_ITEM_QUANTITY`].
    pub max_quantity: i64,

    /// Generic/active-ingredient name.
    #[serde(default)]
    pub generic_name: Option<String>,

    /// Dosage strength.
    #[serde(default)]
    pub dosage: Option<String>,

    /// Pack size.
    #[serde(default)]
    pub pack_size: Option<String>,

    /// Whether a prescription is required to dispense this item.
    #[serde(default)]
    pub requires_prescription: bool,

    /// When this item was added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart item from a product and quantity.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the product price changes
    /// in the catalog, this cart item retains the original price.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            original_price_cents: product.original_price_cents,
            quantity,
            image: product.image.clone(),
            image_url: product.image_url.clone(),
            pharmacy: product.pharmacy.clone(),
            pharmacy_color: product.pharmacy_color.clone(),
            in_stock: product.in_stock,
            stock_count: product.stock_count,
            max_quantity: product.declared_max().unwrap_or(DEFAULT_MAX_ITEM_QUANTITY),
            generic_name: product.generic_name.clone(),
            dosage: product.dosage.clone(),
            pack_size: product.pack_size.clone(),
            requires_prescription: product.requires_prescription,
            added_at: Utc::now(),
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Savings contribution: (original price − price) × quantity when the
    /// original price is higher than the current price, else zero.
    pub fn savings_cents(&self) -> i64 {
        match self.original_price_cents {
            Some(original) if original > self.unit_price_cents => {
                (original - self.unit_price_cents) * self.quantity
            }
            _ => 0,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart aggregate.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding the same product combines
///   quantities)
/// - Quantity is always >= 1 while an item is present; an update to 0 or
///   below removes the item entirely
/// - Quantity never exceeds the item's `max_quantity`; violating mutations
///   are rejected with state unchanged
/// - Item order is insertion order (irrelevant to totals, relevant to
///   list rendering)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in the cart, in insertion order.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a product to the cart, or combines quantities if already present.
    ///
    /// ## Ceiling Rule
    /// The effective maximum when combining is the incoming product's
    /// declared cap (explicit cap or stock count), falling back to the
    /// stored item maximum. A combine that would exceed it is rejected
    /// with the cart unchanged; a successful combine stores the effective
    /// maximum as the item's new ceiling (the incoming product carries the
    /// fresher catalog data).
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let max = product.declared_max().unwrap_or(item.max_quantity);
            let new_qty = item.quantity + quantity;
            if new_qty > max {
                return Err(CoreError::QuantityExceedsStock {
                    name: item.name.clone(),
                    requested: new_qty,
                    max,
                });
            }
            item.quantity = new_qty;
            item.max_quantity = max;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        let item = CartItem::from_product(product, quantity);
        if quantity > item.max_quantity {
            return Err(CoreError::QuantityExceedsStock {
                name: item.name,
                requested: quantity,
                max: item.max_quantity,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Sets the quantity of an item.
    ///
    /// ## Behavior
    /// - quantity <= 0: removes the item
    /// - quantity in 1..=max: sets it
    /// - quantity > max: rejected, cart unchanged
    /// - product not in cart: [`CoreError::NotInCart`]
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) else {
            return Err(CoreError::NotInCart(product_id.to_string()));
        };

        if quantity <= 0 {
            self.items.retain(|i| i.product_id != product_id);
            return Ok(());
        }

        if quantity > item.max_quantity {
            return Err(CoreError::QuantityExceedsStock {
                name: item.name.clone(),
                requested: quantity,
                max: item.max_quantity,
            });
        }

        item.quantity = quantity;
        Ok(())
    }

    /// Removes an item by product ID. Idempotent: removing an absent id
    /// leaves the cart unchanged.
    ///
    /// Returns whether an item was actually removed.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != initial_len
    }

    /// Looks up an item by product ID.
    pub fn get_item(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of distinct line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the subtotal (sum of price × quantity).
    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents()).sum()
    }

    /// Calculates the total promotional savings.
    pub fn savings_cents(&self) -> i64 {
        self.items.iter().map(|i| i.savings_cents()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Computes the derived monetary breakdown for the given tax rate and
    /// selected delivery fee. Pure: does not mutate or cache anything.
    pub fn summary(&self, tax_rate: TaxRate, delivery_fee_cents: i64) -> CartSummary {
        let subtotal_cents = self.subtotal_cents();
        let tax_cents = Money::from_cents(subtotal_cents)
            .calculate_tax(tax_rate)
            .cents();

        CartSummary {
            item_count: self.total_quantity(),
            subtotal_cents,
            savings_cents: self.savings_cents(),
            tax_cents,
            delivery_fee_cents,
            total_cents: subtotal_cents + tax_cents + delivery_fee_cents,
        }
    }

    /// Scans the cart and reports advisory checkout findings.
    ///
    /// Findings never block engine operations; callers decide whether to
    /// block checkout or merely warn.
    pub fn validate(&self) -> CartValidation {
        let mut issues = Vec::new();

        for item in &self.items {
            if !item.in_stock {
                issues.push(format!("{} is out of stock", item.name));
            }
            if let Some(stock) = item.stock_count {
                if item.quantity > stock {
                    issues.push(format!(
                        "{}: quantity {} exceeds available stock ({})",
                        item.name, item.quantity, stock
                    ));
                }
            }
            // Always reported - informational, not an availability judgement.
            // Whether checkout is hard-blocked on prescriptions is the
            // caller's policy decision.
            if item.requires_prescription {
                issues.push(format!("{} requires a prescription", item.name));
            }
        }

        CartValidation {
            valid: issues.is_empty(),
            issues,
        }
    }

    /// Groups items by pharmacy, preserving the first-appearance order of
    /// pharmacies and insertion order within each group.
    pub fn groups_by_pharmacy(&self) -> Vec<PharmacyGroup> {
        let mut groups: Vec<PharmacyGroup> = Vec::new();

        for item in &self.items {
            match groups.iter_mut().find(|g| g.pharmacy == item.pharmacy) {
                Some(group) => group.items.push(item.clone()),
                None => groups.push(PharmacyGroup {
                    pharmacy: item.pharmacy.clone(),
                    items: vec![item.clone()],
                }),
            }
        }

        groups
    }

    /// Per-pharmacy subtotals: sum of price × quantity within each group.
    /// Independent of tax, delivery and savings.
    pub fn pharmacy_totals(&self) -> Vec<(String, i64)> {
        self.groups_by_pharmacy()
            .into_iter()
            .map(|g| {
                let total = g.subtotal_cents();
                (g.pharmacy, total)
            })
            .collect()
    }
}

// =============================================================================
// Pharmacy Grouping
// =============================================================================

/// Items belonging to one fulfilling pharmacy.
///
/// Used for split-fulfillment and per-pharmacy subtotal display.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyGroup {
    /// Pharmacy name.
    pub pharmacy: String,

    /// Items fulfilled by this pharmacy, in insertion order.
    pub items: Vec<CartItem>,
}

impl PharmacyGroup {
    /// Subtotal for this group (price × quantity over its items).
    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents()).sum()
    }
}

// =============================================================================
// Cart Validation Report
// =============================================================================

/// Advisory validation findings for the current cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartValidation {
    /// True iff `issues` is empty.
    pub valid: bool,

    /// Human-readable findings, one per issue.
    pub issues: Vec<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_cents: i64, pharmacy: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price_cents,
            original_price_cents: None,
            image: None,
            image_url: None,
            pharmacy: pharmacy.to_string(),
            pharmacy_color: Some("#0054A6".to_string()),
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
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        let product = test_product("p1", 999, "Clicks");

        cart.add_item(&product, 2).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal_cents(), 1998);
    }

    #[test]
    fn test_cart_add_same_product_combines_quantity() {
        let mut cart = Cart::new();
        let product = test_product("p1", 999, "Clicks");

        cart.add_item(&product, 2).unwrap();
        cart.add_item(&product, 3).unwrap();

        assert_eq!(cart.item_count(), 1); // Still one line item
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_add_rejects_nonpositive_quantity() {
        let mut cart = Cart::new();
        let product = test_product("p1", 999, "Clicks");

        assert!(cart.add_item(&product, 0).is_err());
        assert!(cart.add_item(&product, -2).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_stock_ceiling_on_add() {
        let mut cart = Cart::new();
        let mut product = test_product("p2", 1500, "Dis-Chem");
        product.stock_count = Some(5);

        cart.add_item(&product, 5).unwrap();
        let err = cart.add_item(&product, 1).unwrap_err();
        assert!(matches!(err, CoreError::QuantityExceedsStock { max: 5, .. }));
        assert_eq!(cart.get_item("p2").unwrap().quantity, 5); // unchanged
    }

    #[test]
    fn test_new_item_cannot_exceed_its_ceiling() {
        let mut cart = Cart::new();
        let mut product = test_product("p2", 1500, "Dis-Chem");
        product.stock_count = Some(3);

        assert!(cart.add_item(&product, 4).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_combine_refreshes_ceiling_from_incoming_product() {
        let mut cart = Cart::new();
        let product = test_product("p1", 999, "Clicks"); // no ceiling known
        cart.add_item(&product, 2).unwrap();
        assert_eq!(cart.get_item("p1").unwrap().max_quantity, 99);

        // Re-adding with fresher catalog data tightens the stored ceiling
        let mut restocked = test_product("p1", 999, "Clicks");
        restocked.stock_count = Some(5);
        cart.add_item(&restocked, 1).unwrap();
        assert_eq!(cart.get_item("p1").unwrap().max_quantity, 5);

        // Later direct updates enforce the refreshed ceiling
        assert!(cart.update_quantity("p1", 50).is_err());
        cart.update_quantity("p1", 5).unwrap();
        assert_eq!(cart.get_item("p1").unwrap().quantity, 5);
    }

    #[test]
    fn test_default_ceiling_is_99() {
        let mut cart = Cart::new();
        let product = test_product("p1", 100, "Clicks");

        cart.add_item(&product, 99).unwrap();
        assert!(cart.add_item(&product, 1).is_err());
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new();
        let product = test_product("p1", 999, "Clicks");

        cart.add_item(&product, 2).unwrap();
        cart.update_quantity("p1", 0).unwrap();
        assert!(cart.is_empty());

        cart.add_item(&product, 2).unwrap();
        cart.update_quantity("p1", -5).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_absent_item_errors() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.update_quantity("ghost", 3),
            Err(CoreError::NotInCart("ghost".to_string()))
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        let product = test_product("p1", 999, "Clicks");
        cart.add_item(&product, 1).unwrap();

        assert!(cart.remove_item("p1"));
        assert!(!cart.remove_item("p1"));
        assert!(!cart.remove_item("never-added"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_summary_additivity() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("p1", 5000, "Clicks"), 2).unwrap();
        cart.add_item(&test_product("p2", 1250, "Dis-Chem"), 3).unwrap();

        let summary = cart.summary(TaxRate::from_bps(1500), 6000);
        assert_eq!(summary.subtotal_cents, 2 * 5000 + 3 * 1250);
        assert_eq!(
            summary.total_cents,
            summary.subtotal_cents + summary.tax_cents + summary.delivery_fee_cents
        );
        assert_eq!(summary.item_count, 5);
    }

    #[test]
    fn test_savings_computation() {
        let mut cart = Cart::new();

        // originalPrice 100.00, price 70.00, qty 3 → savings 90.00
        let mut discounted = test_product("p1", 7000, "Clicks");
        discounted.original_price_cents = Some(10000);
        cart.add_item(&discounted, 3).unwrap();
        assert_eq!(cart.savings_cents(), 9000);

        // No original price → no contribution
        cart.add_item(&test_product("p2", 5000, "Clicks"), 2).unwrap();
        assert_eq!(cart.savings_cents(), 9000);

        // Original price below current price → no contribution
        let mut marked_up = test_product("p3", 5000, "Clicks");
        marked_up.original_price_cents = Some(4000);
        cart.add_item(&marked_up, 1).unwrap();
        assert_eq!(cart.savings_cents(), 9000);
    }

    #[test]
    fn test_pharmacy_grouping_round_trip() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("p1", 5000, "Clicks"), 2).unwrap();
        cart.add_item(&test_product("p2", 1250, "Dis-Chem"), 3).unwrap();
        cart.add_item(&test_product("p3", 900, "Clicks"), 1).unwrap();

        let groups = cart.groups_by_pharmacy();
        assert_eq!(groups.len(), 2);
        // First-appearance order
        assert_eq!(groups[0].pharmacy, "Clicks");
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[1].pharmacy, "Dis-Chem");

        // Grouping never drops or double-counts money
        let grouped_total: i64 = cart.pharmacy_totals().iter().map(|(_, t)| t).sum();
        assert_eq!(grouped_total, cart.subtotal_cents());
    }

    #[test]
    fn test_validate_reports_stock_and_prescription_issues() {
        let mut cart = Cart::new();

        let mut out_of_stock = test_product("p1", 999, "Clicks");
        out_of_stock.in_stock = false;
        cart.add_item(&out_of_stock, 1).unwrap();

        let mut scripted = test_product("p2", 15000, "Dis-Chem");
        scripted.requires_prescription = true;
        cart.add_item(&scripted, 1).unwrap();

        let report = cart.validate();
        assert!(!report.valid);
        assert_eq!(report.issues.len(), 2);
        assert!(report.issues[0].contains("out of stock"));
        assert!(report.issues[1].contains("requires a prescription"));
    }

    #[test]
    fn test_validate_flags_quantity_over_recorded_stock() {
        // Stock can drop after an item was added; validate() catches it.
        let mut cart = Cart::new();
        let mut product = test_product("p1", 999, "Clicks");
        product.stock_count = Some(10);
        cart.add_item(&product, 8).unwrap();

        cart.items[0].stock_count = Some(5);
        let report = cart.validate();
        assert!(!report.valid);
        assert!(report.issues[0].contains("exceeds available stock (5)"));
    }

    #[test]
    fn test_validate_clean_cart() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("p1", 999, "Clicks"), 2).unwrap();

        let report = cart.validate();
        assert!(report.valid);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("p1", 999, "Clicks"), 2).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.summary(TaxRate::default(), 0), CartSummary::empty());
    }
}
