//! # Cashfree Configuration
//!
//! Configuration management for the Cashfree integration.
//! All secrets are loaded from environment variables.

use relay_core::RelayError;
use std::env;
use std::fmt;
use std::str::FromStr;

/// API version sent with every request
pub const CASHFREE_API_VERSION: &str = "2023-08-01";

/// Cashfree deployment to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CashfreeEnvironment {
    Sandbox,
    #[default]
    Production,
}

impl CashfreeEnvironment {
    /// Base URL of the PG API for this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            CashfreeEnvironment::Sandbox => "https://sandbox.cashfree.com/pg",
            CashfreeEnvironment::Production => "https://api.cashfree.com/pg",
        }
    }
}

impl FromStr for CashfreeEnvironment {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(CashfreeEnvironment::Production),
            "sandbox" | "test" => Ok(CashfreeEnvironment::Sandbox),
            other => Err(RelayError::Configuration(format!(
                "CASHFREE_ENVIRONMENT must be production or sandbox, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for CashfreeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CashfreeEnvironment::Sandbox => write!(f, "sandbox"),
            CashfreeEnvironment::Production => write!(f, "production"),
        }
    }
}

/// Cashfree API configuration
#[derive(Clone)]
pub struct CashfreeConfig {
    /// App ID from the merchant dashboard
    pub client_id: String,

    /// Secret key from the merchant dashboard
    pub client_secret: String,

    /// Target environment
    pub environment: CashfreeEnvironment,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,
}

impl CashfreeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `CASHFREE_CLIENT_ID`
    /// - `CASHFREE_CLIENT_SECRET`
    ///
    /// Optional:
    /// - `CASHFREE_ENVIRONMENT` (`production` when unset)
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let client_id = required_var("CASHFREE_CLIENT_ID")?;
        let client_secret = required_var("CASHFREE_CLIENT_SECRET")?;

        let environment = match env::var("CASHFREE_ENVIRONMENT") {
            Ok(value) => value.parse()?,
            Err(_) => CashfreeEnvironment::default(),
        };

        Ok(Self::new(client_id, client_secret, environment))
    }

    /// Create config with explicit values
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        environment: CashfreeEnvironment,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            environment,
            api_base_url: environment.base_url().to_string(),
            api_version: CASHFREE_API_VERSION.to_string(),
        }
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

// Keep the secret out of logs.
impl fmt::Debug for CashfreeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CashfreeConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("environment", &self.environment)
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

fn required_var(name: &str) -> Result<String, RelayError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(RelayError::Configuration(format!("{} not set", name))),
    }
}
