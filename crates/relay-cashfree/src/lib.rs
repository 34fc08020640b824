//! # relay-cashfree
//!
//! Cashfree Payment Gateway client for cashfree-relay.
//!
//! Implements [`relay_core::OrderService`] over the Cashfree PG REST API
//! (`x-api-version: 2023-08-01`):
//!
//! - `create_order` → `POST /pg/orders`
//! - `fetch_payments` → `GET /pg/orders/{order_id}/payments`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay_cashfree::CashfreeOrderService;
//! use relay_core::{CustomerContact, OrderRequest, OrderService};
//!
//! let orders = CashfreeOrderService::from_env()?;
//!
//! let request = OrderRequest::new(&settings, CustomerContact::default());
//! let order = orders.create_order(&request).await?;
//! ```

pub mod config;
pub mod orders;

// Re-exports
pub use config::{CashfreeConfig, CashfreeEnvironment, CASHFREE_API_VERSION};
pub use orders::CashfreeOrderService;
