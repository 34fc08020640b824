//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the immutable configuration and the two vendor clients.

use anyhow::{anyhow, Context};
use axum::http::HeaderValue;
use relay_cashfree::CashfreeOrderService;
use relay_core::{OrderSettings, SharedIdentityService, SharedOrderService};
use relay_firebase::FirebaseIdentityService;
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Only origin allowed by the CORS policy
    pub origin_url: String,
    /// Amount, payment methods and return URL used for every order
    pub order: OrderSettings,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_source(|name| std::env::var(name).ok())
    }

    /// Load from any key lookup. Required keys: `ORIGIN_URL`, `RETURN_URL`,
    /// `PAYMENTS_METHOD`, `ORDER_AMOUNT`.
    pub fn from_source<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| anyhow!("{} not set", name))
        };

        let origin_url = required("ORIGIN_URL")?;
        HeaderValue::from_str(&origin_url)
            .with_context(|| format!("ORIGIN_URL is not a valid origin: {}", origin_url))?;
        // Credentialed CORS cannot use a wildcard origin.
        if origin_url.trim() == "*" {
            return Err(anyhow!("ORIGIN_URL must name a single origin, not *"));
        }

        let order_amount = required("ORDER_AMOUNT")?;
        let order_amount = Decimal::from_str(order_amount.trim())
            .with_context(|| format!("ORDER_AMOUNT is not a decimal: {}", order_amount))?;
        if order_amount <= Decimal::ZERO {
            return Err(anyhow!("ORDER_AMOUNT must be positive, got {}", order_amount));
        }

        let order = OrderSettings::new(
            order_amount,
            required("PAYMENTS_METHOD")?,
            required("RETURN_URL")?,
        );

        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT is not a valid port: {}", port))?,
            None => 8080,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            origin_url,
            order,
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway
    pub orders: SharedOrderService,
    /// Identity provider
    pub identity: SharedIdentityService,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create the production state: config plus Cashfree and Firebase clients
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let orders = CashfreeOrderService::from_env()
            .map_err(|e| anyhow!("Failed to initialize Cashfree: {}", e))?;

        let identity = FirebaseIdentityService::from_env()
            .map_err(|e| anyhow!("Failed to initialize Firebase: {}", e))?;

        Ok(Self::with_services(config, Arc::new(orders), Arc::new(identity)))
    }

    /// Create state around explicit vendor implementations
    pub fn with_services(
        config: AppConfig,
        orders: SharedOrderService,
        identity: SharedIdentityService,
    ) -> Self {
        Self {
            orders,
            identity,
            config: Arc::new(config),
        }
    }
}
