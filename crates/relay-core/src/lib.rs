//! # relay-core
//!
//! Core types and traits for the cashfree-relay service.
//!
//! This crate provides:
//! - `OrderService` trait for the payment gateway (create order, fetch payments)
//! - `IdentityService` trait for the identity provider (lookup by email)
//! - `OrderRequest` and `CustomerContact` for order creation
//! - `RelayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use relay_core::{CustomerContact, OrderRequest, OrderSettings};
//!
//! let settings = OrderSettings::new(amount, "upi,cc", "https://shop.example/return");
//! let contact = CustomerContact::new(Some("Asha"), Some("9999999999"), Some("asha@example.com"));
//!
//! let request = OrderRequest::new(&settings, contact);
//! let payload = orders.create_order(&request).await?;
//! ```

pub mod error;
pub mod order;
pub mod service;

// Re-exports for convenience
pub use error::{RelayError, RelayResult};
pub use order::{
    Currency, CustomerContact, CustomerDetails, OrderMeta, OrderRequest, OrderSettings,
    CUSTOMER_ID_SUFFIX,
};
pub use service::{
    IdentityService, OrderService, SharedIdentityService, SharedOrderService, UserRecord,
};
