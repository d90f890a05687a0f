//! # Cart Engine Service
//!
//! The single consumer-facing service object.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Engine Lifecycle                                     │
//! │                                                                         │
//! │  Composition root (app startup)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartEngine::restore(store, config).await                              │
//! │       │   load snapshot ── unreadable/absent → start empty             │
//! │       ▼                                                                 │
//! │  handed to UI components (cheap Clone, shared state)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mutate ──► persist ──► notify ──► return     (per operation)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  checkout() ──► processor completed ──► clear_cart()                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Every operation that touches cart state goes through one `tokio::Mutex`:
//! a single-flight mutation lane. Two near-simultaneous `add_item` calls
//! for the same product can no longer race on the read-modify-write of the
//! quantity. Persistence happens inside the lane, so snapshots hit storage
//! in mutation order.
//!
//! ## Failure Semantics
//! A storage failure does NOT roll back the in-memory mutation: the session
//! cart stays authoritative and subscribers are still notified, but the
//! operation returns `EngineError::Store` so the UI can warn that changes
//! may not survive a restart.

use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::checkout::{CustomerDetails, PaymentProcessor, PaymentRequest, PaymentResponse};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::subscribers::{CartSubscriber, SubscriberId, SubscriberRegistry};
use medcart_core::{
    delivery_catalog, validation::validate_product, Cart, CartItem, CartSummary, CartValidation,
    CoreError, DeliveryOption, PharmacyGroup, Product, TaxRate,
};
use medcart_store::{CartSnapshot, CartStore, StoreError};

// =============================================================================
// Engine State
// =============================================================================

/// Mutable state behind the mutation lane.
struct EngineState {
    /// The cart aggregate.
    cart: Cart,

    /// Index into the delivery catalog. Defaults to 0 (standard) on every
    /// construction - the selection is deliberately not persisted.
    selected_delivery: usize,
}

struct EngineInner {
    config: EngineConfig,
    store: Arc<dyn CartStore>,
    catalog: Vec<DeliveryOption>,
    state: Mutex<EngineState>,
    subscribers: StdMutex<SubscriberRegistry>,
}

// =============================================================================
// Cart Engine
// =============================================================================

/// The cart engine: owns the line items and the delivery selection,
/// computes summaries, persists itself, and notifies subscribers of every
/// mutation.
///
/// Cloning is cheap and shares state - construct once at startup and hand
/// clones to whatever needs cart access.
#[derive(Clone)]
pub struct CartEngine {
    inner: Arc<EngineInner>,
}

impl CartEngine {
    /// Constructs the engine, restoring the item list from durable storage.
    ///
    /// ## Failure Tolerance
    /// A missing snapshot, a storage read error, or an unreadable payload
    /// all produce an empty cart (logged, never fatal). The delivery
    /// selection always starts at the catalog default.
    pub async fn restore(store: Arc<dyn CartStore>, config: EngineConfig) -> Self {
        let cart = match store.load(&config.storage_key).await {
            Ok(Some(payload)) => match CartSnapshot::decode(&payload) {
                Ok(items) => {
                    info!(items = items.len(), "Restored cart from durable storage");
                    Cart { items }
                }
                Err(err) => {
                    warn!(error = %err, "Discarding unreadable cart snapshot");
                    Cart::new()
                }
            },
            Ok(None) => {
                debug!("No prior cart snapshot");
                Cart::new()
            }
            Err(err) => {
                warn!(error = %err, "Cart snapshot load failed, starting empty");
                Cart::new()
            }
        };

        CartEngine {
            inner: Arc::new(EngineInner {
                config,
                store,
                catalog: delivery_catalog(),
                state: Mutex::new(EngineState {
                    cart,
                    selected_delivery: 0,
                }),
                subscribers: StdMutex::new(SubscriberRegistry::default()),
            }),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product to the cart, combining quantities if already present.
    ///
    /// ## Errors
    /// - `Core(Validation)` - missing required product fields or a
    ///   non-positive quantity
    /// - `Core(QuantityExceedsStock)` - the combine would pass the ceiling;
    ///   cart unchanged
    /// - `Store` - mutation applied and notified, durable copy stale
    pub async fn add_item(&self, product: &Product, quantity: i64) -> EngineResult<()> {
        validate_product(product).map_err(CoreError::Validation)?;
        debug!(product_id = %product.id, quantity, "add_item");

        let mut state = self.inner.state.lock().await;
        state.cart.add_item(product, quantity)?;
        self.persist_and_notify(&state.cart).await
    }

    /// Sets an item's quantity. Zero or below removes the item.
    pub async fn update_item_quantity(&self, product_id: &str, quantity: i64) -> EngineResult<()> {
        debug!(product_id = %product_id, quantity, "update_item_quantity");

        let mut state = self.inner.state.lock().await;
        state.cart.update_quantity(product_id, quantity)?;
        self.persist_and_notify(&state.cart).await
    }

    /// Removes an item if present. Idempotent: an absent id is a no-op,
    /// but the snapshot is still persisted and subscribers still notified
    /// (an accepted inefficiency, kept from the original behavior).
    pub async fn remove_item(&self, product_id: &str) -> EngineResult<()> {
        let mut state = self.inner.state.lock().await;
        let removed = state.cart.remove_item(product_id);
        debug!(product_id = %product_id, removed, "remove_item");
        self.persist_and_notify(&state.cart).await
    }

    /// Increases an item's quantity by one, subject to its ceiling.
    pub async fn increment_item(&self, product_id: &str) -> EngineResult<()> {
        let mut state = self.inner.state.lock().await;
        let current = state
            .cart
            .get_item(product_id)
            .map(|i| i.quantity)
            .ok_or_else(|| CoreError::NotInCart(product_id.to_string()))?;
        state.cart.update_quantity(product_id, current + 1)?;
        self.persist_and_notify(&state.cart).await
    }

    /// Decreases an item's quantity by one; reaching zero removes it.
    pub async fn decrement_item(&self, product_id: &str) -> EngineResult<()> {
        let mut state = self.inner.state.lock().await;
        let current = state
            .cart
            .get_item(product_id)
            .map(|i| i.quantity)
            .ok_or_else(|| CoreError::NotInCart(product_id.to_string()))?;
        state.cart.update_quantity(product_id, current - 1)?;
        self.persist_and_notify(&state.cart).await
    }

    /// Empties the cart. Called after a completed checkout handoff or on
    /// explicit user action.
    pub async fn clear_cart(&self) -> EngineResult<()> {
        debug!("clear_cart");
        let mut state = self.inner.state.lock().await;
        state.cart.clear();
        self.persist_and_notify(&state.cart).await
    }

    // =========================================================================
    // Delivery Selection
    // =========================================================================

    /// Selects a delivery option from the catalog.
    ///
    /// Notifies subscribers (so dependent summaries recompute) but does not
    /// persist - the selection resets to the default on restart.
    pub async fn set_delivery_option(&self, option_id: &str) -> EngineResult<()> {
        let mut state = self.inner.state.lock().await;
        let index = self
            .inner
            .catalog
            .iter()
            .position(|o| o.id == option_id)
            .ok_or_else(|| CoreError::UnknownDeliveryOption(option_id.to_string()))?;

        debug!(option_id = %option_id, "set_delivery_option");
        state.selected_delivery = index;
        self.notify(&state.cart);
        Ok(())
    }

    /// Returns a copy of the static delivery catalog.
    pub fn delivery_options(&self) -> Vec<DeliveryOption> {
        self.inner.catalog.clone()
    }

    /// Returns the currently selected delivery option.
    pub async fn selected_delivery_option(&self) -> DeliveryOption {
        let state = self.inner.state.lock().await;
        self.inner.catalog[state.selected_delivery].clone()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns a defensive snapshot of the current items, in insertion
    /// order. Mutating the returned list has no effect on engine state.
    pub async fn items(&self) -> Vec<CartItem> {
        let state = self.inner.state.lock().await;
        state.cart.items.clone()
    }

    /// Computes the current summary on demand. Never cached: recompute
    /// after every mutation notification if a live summary is needed.
    pub async fn summary(&self) -> CartSummary {
        let state = self.inner.state.lock().await;
        self.summary_locked(&state)
    }

    /// Advisory validation findings for the current cart. Never blocks
    /// engine operations; callers decide whether to gate checkout on it.
    pub async fn validate_cart(&self) -> CartValidation {
        let state = self.inner.state.lock().await;
        state.cart.validate()
    }

    /// Groups current items by pharmacy, preserving first-appearance order.
    pub async fn items_by_pharmacy(&self) -> Vec<PharmacyGroup> {
        let state = self.inner.state.lock().await;
        state.cart.groups_by_pharmacy()
    }

    /// Per-pharmacy subtotals (price × quantity per vendor).
    pub async fn pharmacy_totals(&self) -> Vec<(String, i64)> {
        let state = self.inner.state.lock().await;
        state.cart.pharmacy_totals()
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Registers a subscriber invoked with an item snapshot after every
    /// successful mutation, in registration order, before the mutating
    /// call returns.
    pub fn subscribe(&self, subscriber: CartSubscriber) -> SubscriberId {
        let mut registry = self
            .inner
            .subscribers
            .lock()
            .expect("subscriber registry mutex poisoned");
        registry.subscribe(subscriber)
    }

    /// De-registers a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut registry = self
            .inner
            .subscribers
            .lock()
            .expect("subscriber registry mutex poisoned");
        registry.unsubscribe(id)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Builds a payment request from the current summary and hands it to
    /// the external processor. The cart is cleared only when the processor
    /// reports a completed payment.
    ///
    /// Validation findings are advisory: they are logged here but never
    /// block the handoff. Callers wanting a hard gate should consult
    /// [`Self::validate_cart`] first.
    pub async fn checkout(
        &self,
        processor: &dyn PaymentProcessor,
        customer: CustomerDetails,
        method: &str,
    ) -> EngineResult<PaymentResponse> {
        let request = {
            let state = self.inner.state.lock().await;
            if state.cart.is_empty() {
                return Err(EngineError::EmptyCart);
            }

            let report = state.cart.validate();
            if !report.valid {
                warn!(
                    findings = report.issues.len(),
                    "Checking out with advisory validation findings"
                );
            }

            let summary = self.summary_locked(&state);
            PaymentRequest {
                amount_cents: summary.total_cents,
                reference: Uuid::new_v4().to_string(),
                description: format!("Medcart order ({} items)", summary.item_count),
                customer,
                method: method.to_string(),
            }
        };

        info!(
            reference = %request.reference,
            amount_cents = request.amount_cents,
            method = %request.method,
            "Submitting payment request"
        );

        let response = processor.process(request).await?;

        if response.is_completed() {
            info!(transaction_id = ?response.transaction_id, "Payment completed, clearing cart");
            self.clear_cart().await?;
        } else {
            debug!(status = ?response.status, "Payment not completed, cart retained");
        }

        Ok(response)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn summary_locked(&self, state: &EngineState) -> CartSummary {
        state.cart.summary(
            TaxRate::from_bps(self.inner.config.tax_rate_bps),
            self.inner.catalog[state.selected_delivery].price_cents,
        )
    }

    /// Persists the snapshot, then notifies subscribers. Runs inside the
    /// mutation lane so snapshots reach storage in mutation order.
    ///
    /// A persist failure still notifies (subscribers must see the applied
    /// in-memory mutation) and is then returned to the caller.
    async fn persist_and_notify(&self, cart: &Cart) -> EngineResult<()> {
        let persist_result = self.persist(cart).await;
        self.notify(cart);

        if let Err(ref err) = persist_result {
            warn!(error = %err, "Cart snapshot persist failed, in-memory state retained");
        }
        persist_result.map_err(EngineError::Store)
    }

    async fn persist(&self, cart: &Cart) -> Result<(), StoreError> {
        let payload = CartSnapshot::new(cart.items.clone())
            .encode()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        self.inner
            .store
            .save(&self.inner.config.storage_key, &payload)
            .await
    }

    /// Snapshots the subscriber list under the registry lock, then invokes
    /// the callbacks with the lock released. A callback may therefore call
    /// `subscribe`/`unsubscribe` on this engine without deadlocking; such
    /// changes take effect from the next notification.
    fn notify(&self, cart: &Cart) {
        let subscribers = {
            let registry = self
                .inner
                .subscribers
                .lock()
                .expect("subscriber registry mutex poisoned");
            registry.snapshot()
        };

        for subscriber in subscribers {
            subscriber(&cart.items);
        }
    }
}
