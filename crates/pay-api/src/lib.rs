//! # pay-api
//!
//! HTTP API layer for tonow-pay-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Payment endpoint relaying requests to the gateway
//! - Callback endpoint for gateway status notifications
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v2/payment` | Request a payment token |
//! | POST | `/api/v2/payment/callback` | Gateway callback |

pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
