//! # Cashfree Orders
//!
//! Implementation of the Cashfree PG Orders API.

use crate::config::CashfreeConfig;
use async_trait::async_trait;
use relay_core::{OrderRequest, OrderService, RelayError, RelayResult};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "cashfree";

/// Cashfree order service
///
/// Creates hosted-checkout orders and reads back their payment attempts.
pub struct CashfreeOrderService {
    config: CashfreeConfig,
    client: Client,
}

impl CashfreeOrderService {
    /// Create a new Cashfree order service
    pub fn new(config: CashfreeConfig) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> RelayResult<Self> {
        let config = CashfreeConfig::from_env()?;
        Self::new(config)
    }

    /// Build an endpoint URL, percent-encoding each path segment
    fn endpoint(&self, segments: &[&str]) -> RelayResult<Url> {
        // `Url` resolves dot segments instead of encoding them.
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(RelayError::InvalidRequest(format!(
                "Invalid path segment: {}",
                segment
            )));
        }

        let mut url = Url::parse(&self.config.api_base_url).map_err(|e| {
            RelayError::Configuration(format!(
                "Invalid Cashfree base URL {}: {}",
                self.config.api_base_url, e
            ))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                RelayError::Configuration(format!(
                    "Cashfree base URL cannot carry a path: {}",
                    self.config.api_base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Attach the authentication and version headers
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("x-client-id", &self.config.client_id)
            .header("x-client-secret", &self.config.client_secret)
            .header("x-api-version", &self.config.api_version)
            .header("Accept", "application/json")
    }

    /// Turn a Cashfree response into its data payload.
    ///
    /// Non-2xx is a provider error; a 2xx with an empty or `null` body is `None`.
    async fn read_payload(
        response: Response,
        operation: &str,
    ) -> RelayResult<Option<serde_json::Value>> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!(
                "Cashfree API error: operation={}, status={}, body={}",
                operation, status, body
            );

            if let Ok(error_response) = serde_json::from_str::<CashfreeErrorResponse>(&body) {
                return Err(RelayError::ProviderError {
                    provider: PROVIDER.to_string(),
                    message: error_response.describe(),
                });
            }

            return Err(RelayError::ProviderError {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        let payload: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            RelayError::Serialization(format!("Failed to parse Cashfree response: {}", e))
        })?;

        if payload.is_null() {
            return Ok(None);
        }

        Ok(Some(payload))
    }
}

#[async_trait]
impl OrderService for CashfreeOrderService {
    #[instrument(skip(self, request), fields(order_id = %request.order_id))]
    async fn create_order(
        &self,
        request: &OrderRequest,
    ) -> RelayResult<Option<serde_json::Value>> {
        let url = self.endpoint(&["orders"])?;

        debug!(
            "Creating Cashfree order: amount={} {:?}",
            request.order_amount, request.order_currency
        );

        let response = self
            .authorize(self.client.post(url))
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::NetworkError(e.to_string()))?;

        let payload = Self::read_payload(response, "create_order").await?;

        if payload.is_some() {
            info!("Created Cashfree order: id={}", request.order_id);
        }

        Ok(payload)
    }

    #[instrument(skip(self))]
    async fn fetch_payments(&self, order_id: &str) -> RelayResult<Option<serde_json::Value>> {
        let url = self.endpoint(&["orders", order_id, "payments"])?;

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|e| RelayError::NetworkError(e.to_string()))?;

        let payload = Self::read_payload(response, "fetch_payments").await?;

        debug!(
            "Fetched Cashfree payments: order_id={}, records={}",
            order_id,
            payload
                .as_ref()
                .and_then(|p| p.as_array())
                .map(|a| a.len())
                .unwrap_or(0)
        );

        Ok(payload)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Cashfree API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct CashfreeErrorResponse {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
}

impl CashfreeErrorResponse {
    fn describe(&self) -> String {
        match (&self.error_type, &self.code) {
            (Some(kind), Some(code)) => format!("{} ({}/{})", self.message, kind, code),
            (None, Some(code)) => format!("{} ({})", self.message, code),
            (Some(kind), None) => format!("{} ({})", self.message, kind),
            (None, None) => self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CashfreeEnvironment;

    fn service(base: &str) -> CashfreeOrderService {
        let config = CashfreeConfig::new("app", "secret", CashfreeEnvironment::Sandbox)
            .with_api_base_url(base);
        CashfreeOrderService::new(config).unwrap()
    }

    #[test]
    fn test_endpoint_encodes_order_id() {
        let orders = service("https://sandbox.cashfree.com/pg");
        let url = orders
            .endpoint(&["orders", "order 1/2", "payments"])
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://sandbox.cashfree.com/pg/orders/order%201%2F2/payments"
        );
    }

    #[test]
    fn test_endpoint_rejects_dot_segments() {
        let orders = service("https://sandbox.cashfree.com/pg");

        for order_id in [".", ".."] {
            assert!(matches!(
                orders.endpoint(&["orders", order_id, "payments"]),
                Err(RelayError::InvalidRequest(_))
            ));
        }
        assert!(orders.endpoint(&["orders", "..order", "payments"]).is_ok());
    }

    #[test]
    fn test_endpoint_rejects_bad_base() {
        let orders = service("not a url");
        assert!(matches!(
            orders.endpoint(&["orders"]),
            Err(RelayError::Configuration(_))
        ));
    }

    #[test]
    fn test_error_description() {
        let err: CashfreeErrorResponse = serde_json::from_str(
            r#"{"message":"order_id is invalid","code":"order_id_invalid","type":"invalid_request_error"}"#,
        )
        .unwrap();
        assert_eq!(
            err.describe(),
            "order_id is invalid (invalid_request_error/order_id_invalid)"
        );
    }
}
