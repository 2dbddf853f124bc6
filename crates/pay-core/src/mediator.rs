//! # Payment Mediator
//!
//! Seam between the inbound API shape and the gateway client. Today it
//! forwards each request unchanged; validation, enrichment or persistence
//! slot in here without touching the HTTP layer or the client.

use crate::context::CallContext;
use crate::error::PaymentResult;
use crate::gateway::BoxedPaymentGateway;
use crate::payment::{PaymentRequest, PaymentResponse};
use tracing::{debug, instrument};

/// Routes payment requests to the configured gateway
#[derive(Clone)]
pub struct PaymentMediator {
    gateway: BoxedPaymentGateway,
}

impl PaymentMediator {
    pub fn new(gateway: BoxedPaymentGateway) -> Self {
        Self { gateway }
    }

    /// Name of the gateway behind this mediator
    pub fn provider(&self) -> &'static str {
        self.gateway.provider_name()
    }

    /// Forward one payment request and relay the gateway's answer.
    ///
    /// Errors keep their variant so the caller can map them to a status code;
    /// logging failures is left to the caller.
    #[instrument(skip_all, fields(provider = self.gateway.provider_name()))]
    pub async fn process_payment(
        &self,
        ctx: &CallContext,
        request: &PaymentRequest,
    ) -> PaymentResult<PaymentResponse> {
        debug!(
            account_id = %request.account_id,
            amount = %request.amount,
            "Forwarding payment to gateway"
        );

        self.gateway.submit(ctx, request).await
    }
}
