//! # Request Handlers
//!
//! Axum request handlers for the relay API.
//! Each relay handler makes exactly one vendor call and never forwards vendor
//! error detail to the caller.

use crate::extract::{BodyRejection, JsonOrForm};
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use relay_core::{CustomerContact, OrderRequest, RelayError};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

pub const CREATE_PAYMENT_FAILED: &str = "Error creating payment";
pub const VERIFY_PAYMENT_FAILED: &str = "Error verifying payment";
pub const MISSING_ORDER_ID: &str = "Missing orderId";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Query string of `GET /payment`
#[derive(Debug, Default, Deserialize)]
pub struct PaymentQuery {
    #[serde(default)]
    pub name: Option<String>,
    /// Phone number
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<PaymentQuery> for CustomerContact {
    fn from(query: PaymentQuery) -> Self {
        CustomerContact {
            name: query.name,
            phone: query.number,
            email: query.email,
        }
    }
}

/// Body of `POST /verify` (JSON or form)
#[derive(Debug, Default, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(rename = "orderId", default)]
    pub order_id: Option<String>,
}

/// Body of `POST /validate-email` (JSON or form)
#[derive(Debug, Default, Deserialize)]
pub struct ValidateEmailRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// Email validation response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailExistsResponse {
    pub exists: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, message: &str) -> ApiError {
    (status, Json(ErrorResponse::new(message)))
}

/// Log a vendor failure and hide it behind a fixed 500 message
fn vendor_failure(context: &str, err: RelayError, message: &str) -> ApiError {
    error!("{}: {}", context, err);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cashfree-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a payment order for the configured amount
#[instrument(skip(state, query))]
pub async fn create_payment(
    State(state): State<AppState>,
    query: Result<Query<PaymentQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        error!("Unreadable payment query: {}", rejection);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, CREATE_PAYMENT_FAILED)
    })?;

    let request = OrderRequest::new(&state.config.order, query.into());

    info!(
        "Creating payment order: order_id={}, customer_id={}, amount={}",
        request.order_id,
        request.customer_id(),
        request.order_amount
    );

    let payload = state
        .orders
        .create_order(&request)
        .await
        .and_then(|payload| {
            payload.ok_or_else(|| {
                RelayError::empty_response(state.orders.provider_name(), "create_order")
            })
        })
        .map_err(|e| vendor_failure("Error creating payment", e, CREATE_PAYMENT_FAILED))?;

    Ok(Json(payload))
}

/// Relay the payment records of an order
#[instrument(skip(state, payload))]
pub async fn verify_payment(
    State(state): State<AppState>,
    payload: Result<JsonOrForm<VerifyPaymentRequest>, BodyRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let order_id = match payload {
        Ok(JsonOrForm(VerifyPaymentRequest {
            order_id: Some(order_id),
        })) if !order_id.is_empty() => order_id,
        Ok(_) => return Err(error_response(StatusCode::BAD_REQUEST, MISSING_ORDER_ID)),
        Err(rejection) => {
            warn!("Unreadable verify body: {}", rejection);
            return Err(error_response(StatusCode::BAD_REQUEST, MISSING_ORDER_ID));
        }
    };

    info!("Verifying payment: order_id={}", order_id);

    let records = state
        .orders
        .fetch_payments(&order_id)
        .await
        .and_then(|records| {
            records.ok_or_else(|| {
                RelayError::empty_response(state.orders.provider_name(), "fetch_payments")
            })
        })
        .map_err(|e| vendor_failure("Error verifying payment", e, VERIFY_PAYMENT_FAILED))?;

    Ok(Json(records))
}

/// Report whether an account exists for an email
#[instrument(skip(state, payload))]
pub async fn validate_email(
    State(state): State<AppState>,
    payload: Result<JsonOrForm<ValidateEmailRequest>, BodyRejection>,
) -> Result<Json<EmailExistsResponse>, ApiError> {
    // A missing email is passed on as empty; the identity client rejects it.
    let email = match payload {
        Ok(JsonOrForm(request)) => request.email.unwrap_or_default(),
        Err(rejection) => {
            warn!("Unreadable validate-email body: {}", rejection);
            String::new()
        }
    };

    match state.identity.lookup_user_by_email(&email).await {
        Ok(Some(_)) => Ok(Json(EmailExistsResponse { exists: true })),
        Ok(None) => Ok(Json(EmailExistsResponse { exists: false })),
        Err(e) => Err(vendor_failure(
            "Error validating email",
            e,
            INTERNAL_SERVER_ERROR,
        )),
    }
}
