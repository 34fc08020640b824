//! # Vendor Service Traits
//!
//! Capability traits for the two vendors the relay talks to.
//! Handlers only see these traits, so they can run against stand-ins.
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────┐
//! │   OrderService (trait)       │   │   IdentityService (trait)    │
//! │  ├── create_order()          │   │  └── lookup_user_by_email()  │
//! │  └── fetch_payments()        │   └──────────────────────────────┘
//! └──────────────────────────────┘                  ▲
//!                ▲                                  │
//!     ┌──────────┴──────────┐            ┌──────────┴──────────┐
//!     │ CashfreeOrderService│            │FirebaseIdentityServ.│
//!     └─────────────────────┘            └─────────────────────┘
//! ```

use crate::error::RelayResult;
use crate::order::OrderRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Payment gateway operations.
///
/// Both operations return `Ok(None)` when the gateway answered successfully
/// but without a data payload. Callers decide what that means.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Create an order and return the gateway's order document.
    async fn create_order(&self, request: &OrderRequest)
        -> RelayResult<Option<serde_json::Value>>;

    /// Fetch the payment attempts recorded against an order.
    async fn fetch_payments(&self, order_id: &str) -> RelayResult<Option<serde_json::Value>>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// A user account held by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl UserRecord {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: Some(email.into()),
            email_verified: false,
            display_name: None,
            disabled: false,
        }
    }
}

/// Identity provider operations.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Look up an account by email.
    ///
    /// "No such user" is `Ok(None)`, not an error.
    async fn lookup_user_by_email(&self, email: &str) -> RelayResult<Option<UserRecord>>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Shared payment gateway handle (dynamic dispatch)
pub type SharedOrderService = Arc<dyn OrderService>;

/// Shared identity provider handle (dynamic dispatch)
pub type SharedIdentityService = Arc<dyn IdentityService>;
