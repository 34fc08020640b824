//! # Firebase Authentication
//!
//! User lookup against the Identity Toolkit admin API.

use crate::credentials::ServiceAccountKey;
use crate::token::ServiceAccountTokenSource;
use async_trait::async_trait;
use relay_core::{IdentityService, RelayError, RelayResult, UserRecord};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, instrument};

const PROVIDER: &str = "firebase";

/// Identity Toolkit production endpoint
pub const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com";

/// Error message Identity Toolkit uses for an unknown account
const USER_NOT_FOUND: &str = "USER_NOT_FOUND";

/// Firebase identity service
pub struct FirebaseIdentityService {
    tokens: ServiceAccountTokenSource,
    client: Client,
    api_base_url: String,
}

impl FirebaseIdentityService {
    /// Create a new identity service for a service account
    pub fn new(key: ServiceAccountKey) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let tokens = ServiceAccountTokenSource::new(key, client.clone())?;

        Ok(Self {
            tokens,
            client,
            api_base_url: IDENTITY_TOOLKIT_URL.to_string(),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> RelayResult<Self> {
        let key = ServiceAccountKey::from_env()?;
        Self::new(key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn project_id(&self) -> &str {
        &self.tokens.key().project_id
    }

    fn lookup_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/accounts:lookup",
            self.api_base_url,
            self.project_id()
        )
    }
}

#[async_trait]
impl IdentityService for FirebaseIdentityService {
    #[instrument(skip(self, email))]
    async fn lookup_user_by_email(&self, email: &str) -> RelayResult<Option<UserRecord>> {
        if !is_valid_email(email) {
            return Err(RelayError::InvalidRequest(
                "email must be a non-empty valid address".to_string(),
            ));
        }

        let token = self.tokens.access_token().await?;

        let response = self
            .client
            .post(self.lookup_url())
            .bearer_auth(token)
            .json(&serde_json::json!({ "email": [email] }))
            .send()
            .await
            .map_err(|e| RelayError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GoogleErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {}: {}", status, body));

            if message.starts_with(USER_NOT_FOUND) {
                debug!("No account for email");
                return Ok(None);
            }

            error!("Identity Toolkit error: status={}, message={}", status, message);
            return Err(RelayError::ProviderError {
                provider: PROVIDER.to_string(),
                message,
            });
        }

        let lookup: LookupResponse = serde_json::from_str(&body).map_err(|e| {
            RelayError::Serialization(format!("Failed to parse lookup response: {}", e))
        })?;

        let user = lookup.users.into_iter().next().map(UserRecord::from);
        debug!("Account lookup finished: found={}", user.is_some());

        Ok(user)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Shape check matching what the admin SDK rejects before calling out:
/// exactly one `@` with something on both sides and no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !domain.is_empty()
                && !email.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}

// =============================================================================
// Identity Toolkit Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<AccountInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountInfo {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    disabled: bool,
}

impl From<AccountInfo> for UserRecord {
    fn from(info: AccountInfo) -> Self {
        UserRecord {
            uid: info.local_id,
            email: info.email,
            email_verified: info.email_verified,
            display_name: info.display_name,
            disabled: info.disabled,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    message: String,
}
