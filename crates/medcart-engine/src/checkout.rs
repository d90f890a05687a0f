//! # Checkout Boundary
//!
//! The seam between the cart engine and the external payment processor.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Handoff                                     │
//! │                                                                         │
//! │  CartEngine::checkout(processor, customer, method)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Build PaymentRequest from the current summary                         │
//! │    • amount  = summary total                                           │
//! │    • reference = fresh UUID v4                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  processor.process(request) ── external: gateway redirects, QR         │
//! │       │                        codes, EFT banking details are all      │
//! │       │                        the processor's concern, not ours       │
//! │       ▼                                                                 │
//! │  PaymentResponse { success, status, ... }                              │
//! │       │                                                                 │
//! │       ├── success + Completed ──► clear_cart()                         │
//! │       └── anything else ────────► cart untouched                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Customer Details
// =============================================================================

/// Contact fields the payment processor requires on a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub cell_number: String,
}

// =============================================================================
// Payment Request / Response
// =============================================================================

/// A payment request built from the cart summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Amount to charge, in cents.
    pub amount_cents: i64,

    /// Unique order reference (UUID v4).
    pub reference: String,

    /// Human-readable order description.
    pub description: String,

    /// Customer contact fields.
    pub customer: CustomerDetails,

    /// Selected payment-method identifier (gateway-specific, opaque here).
    pub method: String,
}

/// Status reported by the payment processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

/// The processor's answer to a payment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    /// Whether the processor accepted the payment.
    pub success: bool,

    /// Processor-side transaction identifier, when one was created.
    pub transaction_id: Option<String>,

    /// Redirect URL for gateway-hosted payment pages, when applicable.
    pub redirect_url: Option<String>,

    /// Human-readable message for the user.
    pub message: String,

    /// Final or interim payment status.
    pub status: PaymentStatus,
}

impl PaymentResponse {
    /// True when the cart may be cleared: the processor accepted the
    /// payment and reports it completed (not merely pending a redirect).
    pub fn is_completed(&self) -> bool {
        self.success && self.status == PaymentStatus::Completed
    }
}

// =============================================================================
// Payment Processor Trait
// =============================================================================

/// Errors from the external payment processor.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The processor could not be reached or rejected the request outright.
    #[error("Payment processor failure: {0}")]
    Processor(String),
}

/// The external payment processor (PayFast, Ozow, wallet providers, ...).
///
/// Implemented by the application layer; the engine only builds the request
/// and reacts to the response.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Submits a payment request and returns the processor's response.
    async fn process(&self, request: PaymentRequest) -> Result<PaymentResponse, PaymentError>;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_completed_requires_both_flags() {
        let mut response = PaymentResponse {
            success: true,
            transaction_id: Some("txn-1".to_string()),
            redirect_url: None,
            message: "Paid".to_string(),
            status: PaymentStatus::Completed,
        };
        assert!(response.is_completed());

        response.status = PaymentStatus::Pending;
        assert!(!response.is_completed());

        response.status = PaymentStatus::Completed;
        response.success = false;
        assert!(!response.is_completed());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&PaymentStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }
}
