//! # cashfree-relay
//!
//! Relay between a front end, Cashfree Payment Gateway and Firebase Auth.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables (or put them in .env)
//! export CASHFREE_CLIENT_ID=...
//! export CASHFREE_CLIENT_SECRET=...
//! export ORIGIN_URL=https://shop.example
//! export RETURN_URL=https://shop.example/return
//! export PAYMENTS_METHOD=cc,dc,upi
//! export ORDER_AMOUNT=499
//! export FB_PROJECT_ID=...   # plus the rest of the FB_* service account
//!
//! # Run the server
//! cashfree-relay
//! ```

use relay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Payment gateway: {}, identity provider: {}",
        state.orders.provider_name(),
        state.identity.provider_name()
    );
    info!(
        "Order amount: {} INR, methods: {}",
        state.config.order.order_amount, state.config.order.payment_methods
    );
    info!("Allowed origin: {}", state.config.origin_url);

    let app = routes::create_router(state);

    info!("Cashfree relay starting on http://{}", addr);

    if !is_prod {
        info!("Health: GET http://{}/health", addr);
        info!("Payment: GET http://{}/payment?name=&number=&email=", addr);
        info!("Verify: POST http://{}/verify", addr);
        info!("Validate email: POST http://{}/validate-email", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Cashfree relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn print_banner() {
    println!(
        r#"
  Cashfree Relay
  ━━━━━━━━━━━━━━━━━━━━━━━
  Payments + identity relay
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
