//! # pay-core
//!
//! Core types and traits for the tonow-pay gateway relay.
//!
//! This crate provides:
//! - `PaymentRequest` / `PaymentResponse` relayed to and from the gateway
//! - `CallContext` for deadlines and cancellation of outbound calls
//! - `PaymentGateway` trait implemented by provider clients
//! - `PaymentMediator` between the HTTP layer and the gateway
//! - `CallbackPayload` and `CallbackReceiver` for gateway webhooks
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{CallContext, PaymentMediator, PaymentRequest};
//!
//! let mediator = PaymentMediator::new(gateway);
//! let response = mediator
//!     .process_payment(&CallContext::background(), &request)
//!     .await?;
//! ```

pub mod callback;
pub mod context;
mod de;
pub mod error;
pub mod gateway;
pub mod mediator;
pub mod payment;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use callback::{CallbackAck, CallbackPayload, CallbackReceiver, CALLBACK_ACCEPTED};
pub use context::CallContext;
pub use error::{PaymentError, PaymentResult};
pub use gateway::{BoxedPaymentGateway, PaymentGateway};
pub use mediator::PaymentMediator;
pub use payment::{ExtensionMap, PaymentRequest, PaymentResponse};
