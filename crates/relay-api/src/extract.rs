//! # Body Extraction
//!
//! Request bodies arrive either as JSON or as an urlencoded form.

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        FromRequest, Request,
    },
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Body decoded from `application/x-www-form-urlencoded` when the request
/// says so, and from JSON otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

/// Why a body could not be decoded
#[derive(Debug, Error)]
pub enum BodyRejection {
    #[error(transparent)]
    Json(#[from] JsonRejection),
    #[error(transparent)]
    Form(#[from] FormRejection),
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        match self {
            BodyRejection::Json(rejection) => rejection.into_response(),
            BodyRejection::Form(rejection) => rejection.into_response(),
        }
    }
}

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            return Ok(Self(value));
        }

        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim_start().starts_with(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        #[serde(rename = "orderId")]
        order_id: String,
    }

    fn request(content_type: &str, body: &'static str) -> Request {
        http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_reads_json_body() {
        let req = request("application/json", r#"{"orderId":"order_1"}"#);
        let JsonOrForm(payload) = JsonOrForm::<Payload>::from_request(req, &()).await.unwrap();

        assert_eq!(payload.order_id, "order_1");
    }

    #[tokio::test]
    async fn test_reads_form_body() {
        let req = request("application/x-www-form-urlencoded; charset=utf-8", "orderId=order%201");
        let JsonOrForm(payload) = JsonOrForm::<Payload>::from_request(req, &()).await.unwrap();

        assert_eq!(payload.order_id, "order 1");
    }

    #[tokio::test]
    async fn test_plain_text_rejected_as_json() {
        let req = request("text/plain", "orderId=order_1");
        let result = JsonOrForm::<Payload>::from_request(req, &()).await;

        assert!(matches!(result, Err(BodyRejection::Json(_))));
    }
}
