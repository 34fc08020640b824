//! # Routes
//!
//! Axum router configuration for the relay API.

use crate::handlers;
use crate::state::{AppConfig, AppState};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /payment - Create a payment order (query: name, number, email)
/// - POST /verify - Fetch payment records for `{orderId}`
/// - POST /validate-email - Check whether `{email}` is registered
/// - GET  /health, / - Health check
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // Relay endpoints
        .route("/payment", get(handlers::create_payment))
        .route("/verify", post(handlers::verify_payment))
        .route("/validate-email", post(handlers::validate_email))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

/// CORS policy: the configured origin only, with credentials
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    // The origin is validated when the config is loaded.
    let origin = HeaderValue::from_str(&config.origin_url).ok();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origin))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
