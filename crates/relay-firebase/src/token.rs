//! # Access Tokens
//!
//! OAuth2 JWT-bearer flow for a Google service account.
//! The assertion is signed locally with the account's RSA key and exchanged
//! at the key's `token_uri` for a short-lived bearer token.

use crate::credentials::ServiceAccountKey;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use relay_core::{RelayError, RelayResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error, instrument};

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Scopes needed for Identity Toolkit admin calls
pub const DEFAULT_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/cloud-platform",
    "https://www.googleapis.com/auth/identitytoolkit",
];

/// Lifetime requested for each assertion (Google caps this at one hour)
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Tokens are refreshed this long before they expire
const EXPIRY_MARGIN_SECS: i64 = 60;

/// A bearer token and its expiry
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Usable for at least `EXPIRY_MARGIN_SECS` more
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now
    }
}

/// Issues bearer tokens for a service account
pub struct ServiceAccountTokenSource {
    key: ServiceAccountKey,
    signing_key: EncodingKey,
    client: Client,
    scopes: String,
    cached: Mutex<Option<AccessToken>>,
}

impl ServiceAccountTokenSource {
    /// Create a token source. Fails if the private key does not parse.
    pub fn new(key: ServiceAccountKey, client: Client) -> RelayResult<Self> {
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            RelayError::Configuration(format!("Invalid service account private key: {}", e))
        })?;

        Ok(Self {
            key,
            signing_key,
            client,
            scopes: DEFAULT_SCOPES.join(" "),
            cached: Mutex::new(None),
        })
    }

    pub fn key(&self) -> &ServiceAccountKey {
        &self.key
    }

    /// Return a valid bearer token, fetching a new one when needed
    pub async fn access_token(&self) -> RelayResult<String> {
        // Held across the exchange: one refresh at a time, later callers
        // wait for it and then read the cached token.
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.token.clone());
            }
        }

        let fresh = self.fetch_token().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    /// Build the signed assertion
    fn assertion(&self, now: DateTime<Utc>) -> RelayResult<String> {
        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            sub: &self.key.client_email,
            aud: &self.key.token_uri,
            scope: &self.scopes,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.key.private_key_id.clone());

        jsonwebtoken::encode(&header, &claims, &self.signing_key)
            .map_err(|e| RelayError::Authentication(format!("Failed to sign assertion: {}", e)))
    }

    #[instrument(skip(self), fields(client_email = %self.key.client_email))]
    async fn fetch_token(&self) -> RelayResult<AccessToken> {
        let now = Utc::now();
        let assertion = self.assertion(now)?;

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| RelayError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Token exchange failed: status={}, body={}", status, body);

            let message = serde_json::from_str::<TokenErrorResponse>(&body)
                .map(|e| match e.error_description {
                    Some(description) => format!("{}: {}", e.error, description),
                    None => e.error,
                })
                .unwrap_or_else(|_| format!("HTTP {}", status));

            return Err(RelayError::Authentication(message));
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            RelayError::Serialization(format!("Failed to parse token response: {}", e))
        })?;

        debug!("Obtained access token, expires in {}s", token.expires_in);

        Ok(AccessToken {
            token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}

// =============================================================================
// OAuth2 Types
// =============================================================================

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    sub: &'a str,
    aud: &'a str,
    scope: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}
