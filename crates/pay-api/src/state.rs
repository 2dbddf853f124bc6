//! # Application State
//!
//! Shared state for the Axum application.
//! Built once by `main` and handed to the router; nothing here is global.

use anyhow::Context;
use pay_core::{BoxedPaymentGateway, CallContext, CallbackReceiver, PaymentMediator};
use pay_tonow::TonowGateway;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 9090;
const DEFAULT_ENVIRONMENT: &str = "dev";
const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Candidate `.env` locations, first hit wins
const DOTENV_PATHS: [&str; 2] = [".env", "../../.env"];

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (dev, uat, prod)
    pub environment: String,
    /// How long in-flight requests may drain after a shutdown signal
    pub shutdown_grace: Duration,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT").filter(|p| !p.is_empty()) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid PORT value '{}', using default {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let shutdown_grace = match lookup("SHUTDOWN_GRACE_SECS").filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse().map(Duration::from_secs).unwrap_or_else(|_| {
                tracing::warn!(
                    "Invalid SHUTDOWN_GRACE_SECS value '{}', using default {:?}",
                    raw,
                    DEFAULT_SHUTDOWN_GRACE
                );
                DEFAULT_SHUTDOWN_GRACE
            }),
            None => DEFAULT_SHUTDOWN_GRACE,
        };

        Self {
            host: lookup("HOST")
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            environment: lookup("ENV")
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            shutdown_grace,
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "prod" | "production")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn load_dotenv() {
    for path in DOTENV_PATHS {
        if dotenvy::from_path(Path::new(path)).is_ok() {
            tracing::info!("Loaded environment variables from {}", path);
            return;
        }
    }
    tracing::warn!(
        "No .env file found in {:?}, using process environment",
        DOTENV_PATHS
    );
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment mediator (inbound request -> gateway)
    pub mediator: PaymentMediator,
    /// Gateway callback receiver
    pub callbacks: CallbackReceiver,
    /// Application config
    pub config: AppConfig,
    /// Flips to `true` when the process starts shutting down
    pub shutdown: watch::Receiver<bool>,
}

impl AppState {
    /// Create a new AppState backed by the Tonow gateway
    pub fn new(config: AppConfig, shutdown: watch::Receiver<bool>) -> anyhow::Result<Self> {
        let gateway = TonowGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Tonow gateway: {}", e))?;

        Ok(Self::with_gateway(config, Arc::new(gateway), shutdown))
    }

    /// Create with an explicit gateway
    pub fn with_gateway(
        config: AppConfig,
        gateway: BoxedPaymentGateway,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            mediator: PaymentMediator::new(gateway),
            callbacks: CallbackReceiver::new(),
            config,
            shutdown,
        }
    }

    /// Root context for one inbound request, cancelled on shutdown
    pub fn call_context(&self) -> CallContext {
        CallContext::background().with_cancellation(self.shutdown.clone())
    }
}
