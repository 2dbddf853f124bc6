//! # Payment Gateway Trait
//!
//! The seam between the relay and the external payment provider.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │          PaymentGateway (trait)              │
//! │  ├── submit()                                │
//! │  └── provider_name()                         │
//! └──────────────────────────────────────────────┘
//!                      ▲
//!          ┌───────────┴───────────┐
//!  ┌───────┴───────┐       ┌───────┴───────┐
//!  │ TonowGateway  │       │  test doubles │
//!  └───────────────┘       └───────────────┘
//! ```

use crate::context::CallContext;
use crate::error::PaymentResult;
use crate::payment::{PaymentRequest, PaymentResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// Outbound client for a payment provider's token endpoint.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Send exactly one payment request to the provider.
    ///
    /// # Arguments
    /// * `ctx` - Parent deadline and cancellation; implementations may only
    ///   shorten the deadline, never extend it
    /// * `request` - Relayed as-is
    ///
    /// # Returns
    /// The decoded provider reply, or a `PaymentError` naming the failure class.
    /// No retries are attempted.
    async fn submit(
        &self,
        ctx: &CallContext,
        request: &PaymentRequest,
    ) -> PaymentResult<PaymentResponse>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
