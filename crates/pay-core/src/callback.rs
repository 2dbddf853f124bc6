//! # Payment Callbacks
//!
//! Asynchronous status notifications pushed by the gateway after a payment
//! moves state. Deliveries are logged and acknowledged; nothing is stored
//! and repeated deliveries of the same transaction are acknowledged again.

use crate::de::null_as_default;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Acknowledgement message returned for every accepted callback
pub const CALLBACK_ACCEPTED: &str = "Callback accepted";

/// Webhook body sent by the gateway.
///
/// All fields are plain strings; amounts stay as the gateway formatted them.
/// Correlating a callback with its originating request is up to the caller,
/// via the reference identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallbackPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub payment_channel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub document_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub document_no: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub confirm_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub payment_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_id: String,
    #[serde(rename = "transactionDateandTime", deserialize_with = "null_as_default")]
    pub transaction_date_and_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_fee: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_tax: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_id1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_id2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_id3: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_id4: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_id5: String,
}

/// Body returned to the gateway for an accepted callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackAck {
    /// Echo of the payload's transaction status
    pub status: String,
    pub message: String,
}

/// Accepts gateway callbacks.
///
/// Holds no state; every delivery is handled independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallbackReceiver;

impl CallbackReceiver {
    pub fn new() -> Self {
        Self
    }

    /// Record the delivery and acknowledge it. Never fails.
    pub fn handle_callback(&self, payload: &CallbackPayload) -> CallbackAck {
        info!(
            payment_id = %payload.payment_id,
            transaction_status = %payload.transaction_status,
            transaction_amount = %payload.transaction_amount,
            "Payment callback received"
        );

        CallbackAck {
            status: payload.transaction_status.clone(),
            message: CALLBACK_ACCEPTED.to_string(),
        }
    }
}
