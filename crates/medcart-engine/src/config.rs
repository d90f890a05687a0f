//! # Engine Configuration
//!
//! Configuration loaded once at engine construction.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MEDCART_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};

use medcart_core::DEFAULT_TAX_RATE_BPS;

/// Fixed key the cart snapshot is stored under.
/// The engine exclusively owns this slot; no other component writes to it.
pub const DEFAULT_STORAGE_KEY: &str = "medcart.cart";

/// Cart engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// VAT rate in basis points. Default: 1500 (15%, South Africa).
    pub tax_rate_bps: u32,

    /// Durable-storage key for the cart snapshot.
    pub storage_key: String,

    /// Currency symbol (for display/diagnostics).
    pub currency_symbol: String,
}

impl Default for EngineConfig {
    /// Returns the production defaults: 15% VAT, rand, the fixed slot key.
    fn default() -> Self {
        EngineConfig {
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency_symbol: "R".to_string(),
        }
    }
}

impl EngineConfig {
    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MEDCART_TAX_RATE`: Override VAT percentage (e.g. "15")
    /// - `MEDCART_STORAGE_KEY`: Override the snapshot key (testing)
    pub fn from_env() -> Self {
        let mut config = EngineConfig::default();

        if let Ok(rate_str) = std::env::var("MEDCART_TAX_RATE") {
            if let Ok(rate) = rate_str.parse::<f64>() {
                config.tax_rate_bps = (rate * 100.0) as u32;
            }
        }

        if let Ok(key) = std::env::var("MEDCART_STORAGE_KEY") {
            config.storage_key = key;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.tax_rate_bps, 1500);
        assert_eq!(config.storage_key, "medcart.cart");
        assert_eq!(config.currency_symbol, "R");
    }
}
