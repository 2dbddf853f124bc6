//! # Routes
//!
//! Axum router configuration for the payment API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health, / - Health check
/// - POST /api/v2/payment - Request a payment token
/// - POST /api/v2/payment/callback - Gateway status callback
pub fn create_router(state: AppState) -> Router {
    // Frontends call from arbitrary origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    let payment_routes = Router::new()
        .route("/payment", post(handlers::create_payment))
        .route("/payment/", post(handlers::create_payment))
        .route("/payment/callback", post(handlers::payment_callback));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // API v2
        .nest("/api/v2", payment_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
