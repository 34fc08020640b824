//! # relay-api
//!
//! HTTP API layer for cashfree-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Relay endpoints for the payment gateway and the identity provider
//! - CORS policy for the configured front-end origin
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/payment` | Create payment order |
//! | POST | `/verify` | Fetch payment records for an order |
//! | POST | `/validate-email` | Check whether an email is registered |

pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
