//! Storefront client configuration.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5003/api"
//! timeout_secs = 15
//!
//! [pricing]
//! currency = "USD"
//! tax_rate_bps = 1000
//! free_shipping_threshold_cents = 5000
//! flat_shipping_cents = 599
//!
//! [checkout]
//! shipping_method = "standard"
//! notes = "Order from website"
//! confirmation_delay_ms = 1000
//!
//! [logging]
//! level = "warn"
//! format = "human"
//! ```

use crate::StorefrontError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use turbo_commerce::cart::{PricingPolicy, ShippingPolicy};
use turbo_commerce::checkout::{DEFAULT_ORDER_NOTES, DEFAULT_SHIPPING_METHOD};
use turbo_commerce::money::Currency;
use turbo_observability::LogConfig;

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "TURBO_API_URL";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub api: ApiConfig,
    pub pricing: PricingConfig,
    pub checkout: CheckoutConfig,
    pub logging: LogConfig,
}

impl StorefrontConfig {
    /// Load from a file; `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorefrontError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            StorefrontError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, StorefrontError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `TURBO_API_URL`, if set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
        self
    }

    /// Reject values that cannot work.
    pub fn validate(&self) -> Result<(), StorefrontError> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(StorefrontError::Config(format!(
                "api.base_url must be an http(s) URL, got {:?}",
                self.api.base_url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(StorefrontError::Config(
                "api.timeout_secs must be positive".to_string(),
            ));
        }
        self.pricing.currency()?;
        if self.pricing.flat_shipping_cents < 0 {
            return Err(StorefrontError::Config(
                "pricing.flat_shipping_cents must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5003/api".to_string(),
            timeout_secs: 15,
        }
    }
}

/// Tax and shipping settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub currency: String,
    pub tax_rate_bps: u32,
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold_cents: i64,
    pub flat_shipping_cents: i64,
}

impl PricingConfig {
    pub fn currency(&self) -> Result<Currency, StorefrontError> {
        Currency::from_code(&self.currency).ok_or_else(|| {
            StorefrontError::Config(format!("unknown currency {:?}", self.currency))
        })
    }

    pub fn policy(&self) -> PricingPolicy {
        PricingPolicy {
            tax_rate_bps: self.tax_rate_bps,
            shipping: ShippingPolicy {
                free_threshold_cents: Some(self.free_shipping_threshold_cents),
                flat_rate_cents: self.flat_shipping_cents,
            },
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        let policy = PricingPolicy::default();
        Self {
            currency: Currency::USD.code().to_string(),
            tax_rate_bps: policy.tax_rate_bps,
            free_shipping_threshold_cents: policy.shipping.free_threshold_cents.unwrap_or(0),
            flat_shipping_cents: policy.shipping.flat_rate_cents,
        }
    }
}

/// Order submission settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    pub shipping_method: String,
    pub notes: String,
    /// How long the confirmation step waits before showing the placeholder order.
    pub confirmation_delay_ms: u64,
}

impl CheckoutConfig {
    pub fn confirmation_delay(&self) -> Duration {
        Duration::from_millis(self.confirmation_delay_ms)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            shipping_method: DEFAULT_SHIPPING_METHOD.to_string(),
            notes: DEFAULT_ORDER_NOTES.to_string(),
            confirmation_delay_ms: 1000,
        }
    }
}
