//! # Payment Types
//!
//! Request and response shapes exchanged with the payment gateway's
//! token endpoint. Both are relayed verbatim: nothing here validates,
//! defaults or rewrites a field.

use chrono::{DateTime, Utc};
use crate::de::null_as_default;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open-ended key/value payload owned by the gateway
pub type ExtensionMap = Map<String, Value>;

/// A charge intent submitted by the frontend.
///
/// Missing fields decode to their empty value, the same way the gateway
/// treats them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub account_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account_channel: String,
    /// Decimal amount as text, e.g. `"100.00"`
    #[serde(deserialize_with = "null_as_default")]
    pub amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub detail: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(rename = "isSMS", deserialize_with = "null_as_default")]
    pub is_sms: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_id1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_id2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_id3: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_id4: String,
    #[serde(deserialize_with = "null_as_default")]
    pub background_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub redirect_url: String,
    /// Gateway extension fields, passed through untouched
    pub charge: Option<ExtensionMap>,
}

impl PaymentRequest {
    /// Reference identifiers that are actually set, in order
    pub fn references(&self) -> impl Iterator<Item = &str> {
        [
            &self.reference_id1,
            &self.reference_id2,
            &self.reference_id3,
            &self.reference_id4,
        ]
        .into_iter()
        .map(String::as_str)
        .filter(|r| !r.is_empty())
    }
}

/// The gateway's synchronous reply to a token request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    /// Unix epoch seconds
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: i64,
    pub data: Option<ExtensionMap>,
}

impl PaymentResponse {
    /// Gateway timestamp as a UTC datetime, if it is in range
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}
