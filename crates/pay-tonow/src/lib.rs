//! # pay-tonow
//!
//! Tonow payment gateway client for tonow-pay-rs.
//!
//! `TonowGateway` implements `pay_core::PaymentGateway` by posting the
//! payment request to `/v3/paymentToken` and relaying the JSON reply.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_core::{CallContext, PaymentGateway};
//! use pay_tonow::TonowGateway;
//!
//! // Create client from environment
//! let gateway = TonowGateway::from_env()?;
//!
//! // Request a payment token
//! let response = gateway.submit(&CallContext::background(), &request).await?;
//! ```
//!
//! Every call is bounded by `TonowConfig::timeout` (5 minutes unless
//! overridden) and by the caller's own deadline, whichever comes first.

pub mod client;
pub mod config;

// Re-exports
pub use client::TonowGateway;
pub use config::{TonowConfig, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT, PAYMENT_TOKEN_PATH};
