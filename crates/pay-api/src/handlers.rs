//! # Request Handlers
//!
//! Axum request handlers for the payment API.
//! Bodies are taken as raw bytes and decoded here so every rejection uses
//! the same JSON error envelope.

use crate::state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use pay_core::{CallbackAck, CallbackPayload, PaymentError, PaymentRequest, PaymentResponse};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

// =============================================================================
// Response Types
// =============================================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn payment_error_to_response(err: PaymentError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code).with_details(err.kind());
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Decode a JSON body, rejecting anything that does not fit `T`
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!("Rejected malformed body: {}", e);
        payment_error_to_response(PaymentError::MalformedRequest(e.to_string()))
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "tonow-pay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Request a payment token from the gateway and relay its reply
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn create_payment(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PaymentResponse>, ApiError> {
    let request: PaymentRequest = decode_body(&body)?;

    info!(
        "Processing payment: account={}, amount={}, references={:?}",
        request.account_id,
        request.amount,
        request.references().collect::<Vec<_>>()
    );

    let ctx = state.call_context();
    let response = state
        .mediator
        .process_payment(&ctx, &request)
        .await
        .map_err(|e| {
            error!("Failed to process payment: {}", e);
            payment_error_to_response(e)
        })?;

    info!(
        "Payment relayed: id={}, status={}, issued_at={:?}",
        response.id,
        response.status,
        response.issued_at()
    );

    Ok(Json(response))
}

/// Receive an asynchronous status callback from the gateway
#[instrument(skip_all)]
pub async fn payment_callback(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CallbackAck>, ApiError> {
    let payload: CallbackPayload = decode_body(&body)?;
    Ok(Json(state.callbacks.handle_callback(&payload)))
}
