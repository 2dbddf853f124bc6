//! # Tonow Payment Token Client
//!
//! One POST to `/v3/paymentToken` per payment, bounded by the configured
//! deadline and by whatever deadline or cancellation the caller brings.

use crate::config::TonowConfig;
use async_trait::async_trait;
use pay_core::{
    CallContext, PaymentError, PaymentGateway, PaymentRequest, PaymentResponse, PaymentResult,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tokio::time::Instant;
use tracing::{debug, error, info, instrument};

const APPLICATION_JSON: &str = "application/json";

/// Tonow gateway client
pub struct TonowGateway {
    config: TonowConfig,
    client: Client,
}

impl TonowGateway {
    /// Create a new gateway client
    pub fn new(config: TonowConfig) -> PaymentResult<Self> {
        let client = Client::builder().build().map_err(|e| {
            PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { config, client })
    }

    /// Create with a caller-provided HTTP client
    pub fn with_client(config: TonowConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        Self::new(TonowConfig::from_env()?)
    }

    pub fn config(&self) -> &TonowConfig {
        &self.config
    }

    /// Send the encoded body and read the raw reply.
    ///
    /// The reply is decoded as UTF-8 regardless of its declared charset.
    /// Invalid sequences become U+FFFD, so only a valid UTF-8 body is kept
    /// byte-for-byte.
    async fn exchange(&self, url: &str, body: Vec<u8>) -> PaymentResult<(StatusCode, String)> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .header(ACCEPT, APPLICATION_JSON)
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;
        let text = String::from_utf8_lossy(&bytes).into_owned();

        Ok((status, text))
    }
}

#[async_trait]
impl PaymentGateway for TonowGateway {
    #[instrument(skip(self, ctx, request), fields(account_id = %request.account_id))]
    async fn submit(
        &self,
        ctx: &CallContext,
        request: &PaymentRequest,
    ) -> PaymentResult<PaymentResponse> {
        let body = serde_json::to_vec(request).map_err(|e| {
            PaymentError::Serialization(format!("Failed to encode payment request: {}", e))
        })?;

        let started = Instant::now();
        let ctx = ctx.clone().with_timeout(self.config.timeout);
        let deadline = ctx.deadline().unwrap_or(started + self.config.timeout);
        let url = self.config.token_url();

        debug!(
            "Sending payment token request: url={}, bytes={}, budget={:?}",
            url,
            body.len(),
            deadline.saturating_duration_since(started)
        );

        let outcome = tokio::select! {
            biased;
            _ = ctx.cancelled() => {
                return Err(PaymentError::Cancelled(format!(
                    "gateway call abandoned after {:?}",
                    started.elapsed()
                )));
            }
            outcome = tokio::time::timeout_at(deadline, self.exchange(&url, body)) => outcome,
        };

        let (status, text) = match outcome {
            Ok(result) => result?,
            Err(_) => {
                error!("Gateway call timed out after {:?}", started.elapsed());
                return Err(PaymentError::Timeout(format!("{:?}", started.elapsed())));
            }
        };

        if status != StatusCode::OK {
            error!("Tonow API error: status={}, body={}", status, text);
            return Err(PaymentError::Gateway {
                status: status.as_u16(),
                body: text,
            });
        }

        let payment: PaymentResponse = serde_json::from_str(&text).map_err(|e| {
            PaymentError::Decode(format!("Failed to parse Tonow response: {}", e))
        })?;

        info!(
            "Payment token issued: id={}, code={}, status={}",
            payment.id, payment.code, payment.status
        );

        Ok(payment)
    }

    fn provider_name(&self) -> &'static str {
        "tonow"
    }
}

fn transport_error(err: reqwest::Error) -> PaymentError {
    if err.is_timeout() {
        PaymentError::Timeout(err.to_string())
    } else {
        PaymentError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::watch;
    use wiremock::matchers::{body_bytes, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SUCCESS_BODY: &str =
        r#"{"id":"p1","code":"00","status":"SUCCESS","message":"ok","timestamp":1700000000,"data":{}}"#;

    fn sample_request() -> PaymentRequest {
        PaymentRequest {
            account_id: "A1".into(),
            amount: "100.00".into(),
            detail: "test".into(),
            ..Default::default()
        }
    }

    fn gateway_for(server: &MockServer) -> TonowGateway {
        let config = TonowConfig::default().with_api_base_url(server.uri());
        TonowGateway::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_success_relays_response() {
        let server = MockServer::start().await;
        let request = sample_request();

        Mock::given(method("POST"))
            .and(path("/v3/paymentToken"))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .and(body_bytes(serde_json::to_vec(&request).unwrap()))
            .respond_with(ResponseTemplate::new(200).set_body_raw(SUCCESS_BODY, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let response = gateway_for(&server)
            .submit(&CallContext::background(), &request)
            .await
            .unwrap();

        let expected: PaymentResponse = serde_json::from_str(SUCCESS_BODY).unwrap();
        assert_eq!(response, expected);
    }

    #[tokio::test]
    async fn test_charge_map_forwarded() {
        let server = MockServer::start().await;
        let mut request = sample_request();
        request.charge = json!({"installments": 3, "meta": {"k": "v"}})
            .as_object()
            .cloned();

        Mock::given(method("POST"))
            .and(body_bytes(serde_json::to_vec(&request).unwrap()))
            .respond_with(ResponseTemplate::new(200).set_body_string(SUCCESS_BODY))
            .expect(1)
            .mount(&server)
            .await;

        gateway_for(&server)
            .submit(&CallContext::background(), &request)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_200_is_gateway_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string(r#"{"error":"bad gateway"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .submit(&CallContext::background(), &sample_request())
            .await
            .unwrap_err();

        match err {
            PaymentError::Gateway { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, r#"{"error":"bad gateway"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_body_ignores_declared_charset() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(502)
                    .insert_header("content-type", "text/plain; charset=iso-8859-1")
                    .set_body_bytes("café déclinée".as_bytes()),
            )
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .submit(&CallContext::background(), &sample_request())
            .await
            .unwrap_err();

        match err {
            PaymentError::Gateway { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "café déclinée");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_other_success_codes_are_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_string(SUCCESS_BODY))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .submit(&CallContext::background(), &sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Gateway { status: 201, .. }));
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .submit(&CallContext::background(), &sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Decode(_)));
    }

    #[tokio::test]
    async fn test_slow_gateway_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(SUCCESS_BODY)
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let config = TonowConfig::default()
            .with_api_base_url(server.uri())
            .with_timeout(Duration::from_millis(200));
        let gateway = TonowGateway::new(config).unwrap();

        let err = gateway
            .submit(&CallContext::background(), &sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_parent_deadline_governs() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(SUCCESS_BODY)
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let ctx = CallContext::background().with_timeout(Duration::from_millis(200));
        let started = std::time::Instant::now();
        let err = gateway_for(&server)
            .submit(&ctx, &sample_request())
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Timeout(_)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_error() {
        let config = TonowConfig::default().with_api_base_url("http://127.0.0.1:1");
        let gateway = TonowGateway::new(config).unwrap();

        let err = gateway
            .submit(&CallContext::background(), &sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Transport(_)));
    }

    #[tokio::test]
    async fn test_cancellation_aborts_call() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(SUCCESS_BODY)
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let (tx, rx) = watch::channel(false);
        let ctx = CallContext::background().with_cancellation(rx);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let _ = tx.send(true);
        });

        let err = gateway_for(&server)
            .submit(&ctx, &sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Cancelled(_)));
    }

    #[tokio::test]
    async fn test_provider_name() {
        let gateway = TonowGateway::new(TonowConfig::default()).unwrap();
        assert_eq!(gateway.provider_name(), "tonow");
        assert_eq!(gateway.config().timeout, Duration::from_secs(300));
    }
}
