//! # Tonow-Pay RS
//!
//! Payment relay between the storefront and the Tonow gateway.
//!
//! ## Usage
//!
//! ```bash
//! # Optional overrides
//! export PORT=9090
//! export TONOW_API_BASE_URL=https://gateway.tonow.net
//! export LOG_FORMAT=json
//!
//! # Run the server
//! tonow-pay
//! ```

use pay_api::{routes, state::AppConfig, state::AppState, telemetry};
use std::future::IntoFuture;
use tokio::sync::watch;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init(telemetry::LogFormat::from_env());

    print_banner();

    let config = AppConfig::from_env();
    let addr = config.socket_addr()?;
    let grace = config.shutdown_grace;

    // Flipped once on SIGINT/SIGTERM; in-flight gateway calls watch it
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let state = AppState::new(config, shutdown_rx.clone())?;

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.mediator.provider());

    let is_prod = state.config.is_production();
    let app = routes::create_router(state);

    info!("🚀 Tonow-Pay starting on http://{}", addr);

    if !is_prod {
        info!("💳 Payment: POST http://{}/api/v2/payment", addr);
        info!("🔔 Callback: POST http://{}/api/v2/payment/callback", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            info!("Shutting down server gracefully...");
            let _ = shutdown_tx.send(true);
        })
        .into_future();

    let mut draining = shutdown_rx;
    let drain_deadline = async move {
        let _ = draining.wait_for(|stopping| *stopping).await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => result?,
        _ = drain_deadline => warn!("Shutdown grace period of {:?} elapsed, exiting", grace),
    }

    info!("Server exited");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn print_banner() {
    println!(
        r#"
  💸 Tonow-Pay RS 💸
  ━━━━━━━━━━━━━━━━━━━━━━━
  Payment gateway relay
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
