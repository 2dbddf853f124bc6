//! # Payment Error Types
//!
//! Typed error handling for the gateway relay.
//! Every gateway call returns `Result<T, PaymentError>`; the variants stay
//! distinct all the way up to the HTTP layer so it can pick a status code.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The outbound request could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The call deadline elapsed before the gateway answered
    #[error("Gateway timeout: no response within {0}")]
    Timeout(String),

    /// Network failure talking to the gateway (DNS, refused connection, TLS, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The gateway answered with a status other than 200
    #[error("Gateway returned status {status}: {body}")]
    Gateway { status: u16, body: String },

    /// The gateway answered 200 but the body is not a payment response
    #[error("Failed to decode gateway response: {0}")]
    Decode(String),

    /// The caller cancelled the call before the gateway answered
    #[error("Request cancelled: {0}")]
    Cancelled(String),

    /// Inbound body could not be parsed
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Configuration errors (missing or invalid settings)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PaymentError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::MalformedRequest(_) => 400,
            PaymentError::Timeout(_) => 504,
            PaymentError::Transport(_) => 502,
            PaymentError::Gateway { .. } => 502,
            PaymentError::Decode(_) => 502,
            PaymentError::Cancelled(_) => 503,
            PaymentError::Serialization(_) => 500,
            PaymentError::Configuration(_) => 500,
        }
    }

    /// Stable machine-readable name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            PaymentError::MalformedRequest(_) => "malformed_request",
            PaymentError::Timeout(_) => "gateway_timeout",
            PaymentError::Transport(_) => "gateway_unreachable",
            PaymentError::Gateway { .. } => "gateway_rejected",
            PaymentError::Decode(_) => "gateway_bad_response",
            PaymentError::Cancelled(_) => "cancelled",
            PaymentError::Serialization(_) => "serialization",
            PaymentError::Configuration(_) => "configuration",
        }
    }

    /// True when the failure happened on the gateway side of the call
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            PaymentError::Timeout(_)
                | PaymentError::Transport(_)
                | PaymentError::Gateway { .. }
                | PaymentError::Decode(_)
        )
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PaymentError::MalformedRequest("eof".into()).status_code(),
            400
        );
        assert_eq!(PaymentError::Timeout("5m".into()).status_code(), 504);
        assert_eq!(
            PaymentError::Transport("refused".into()).status_code(),
            502
        );
        assert_eq!(
            PaymentError::Gateway {
                status: 500,
                body: "{}".into()
            }
            .status_code(),
            502
        );
        assert_eq!(PaymentError::Decode("eof".into()).status_code(), 502);
        assert_eq!(
            PaymentError::Serialization("nan".into()).status_code(),
            500
        );
    }

    #[test]
    fn test_gateway_error_keeps_body() {
        let err = PaymentError::Gateway {
            status: 500,
            body: r#"{"error":"bad gateway"}"#.into(),
        };
        assert_eq!(
            err.to_string(),
            r#"Gateway returned status 500: {"error":"bad gateway"}"#
        );
        assert_eq!(err.kind(), "gateway_rejected");
    }

    #[test]
    fn test_upstream_classification() {
        assert!(PaymentError::Timeout("5m".into()).is_upstream());
        assert!(PaymentError::Decode("eof".into()).is_upstream());
        assert!(!PaymentError::Cancelled("shutdown".into()).is_upstream());
        assert!(!PaymentError::MalformedRequest("eof".into()).is_upstream());
    }
}
