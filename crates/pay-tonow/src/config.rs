//! # Tonow Configuration
//!
//! Configuration for the Tonow gateway client.
//! Values come from environment variables, with production defaults.

use pay_core::PaymentError;
use std::env;
use std::time::Duration;

/// Production gateway host
pub const DEFAULT_API_BASE_URL: &str = "https://gateway.tonow.net";

/// Path of the payment token endpoint
pub const PAYMENT_TOKEN_PATH: &str = "/v3/paymentToken";

/// Hard upper bound on one gateway call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Tonow API configuration
#[derive(Debug, Clone)]
pub struct TonowConfig {
    /// API base URL (overridable for testing/mocking)
    pub api_base_url: String,

    /// Deadline applied to every gateway call
    pub timeout: Duration,
}

impl TonowConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `TONOW_API_BASE_URL` (default `https://gateway.tonow.net`)
    /// - `TONOW_TIMEOUT_SECS` (default 300)
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PaymentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("TONOW_API_BASE_URL").filter(|u| !u.is_empty()) {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(PaymentError::Configuration(
                    "TONOW_API_BASE_URL must start with http:// or https://".to_string(),
                ));
            }
            config.api_base_url = url;
        }

        if let Some(raw) = lookup("TONOW_TIMEOUT_SECS").filter(|s| !s.is_empty()) {
            let secs: u64 = raw.parse().map_err(|_| {
                PaymentError::Configuration(format!(
                    "TONOW_TIMEOUT_SECS must be a positive integer, got {:?}",
                    raw
                ))
            })?;
            if secs == 0 {
                return Err(PaymentError::Configuration(
                    "TONOW_TIMEOUT_SECS must be greater than zero".to_string(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Full URL of the payment token endpoint
    pub fn token_url(&self) -> String {
        format!(
            "{}{}",
            self.api_base_url.trim_end_matches('/'),
            PAYMENT_TOKEN_PATH
        )
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set the per-call deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for TonowConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
