use relay_core::{IdentityService, RelayError};
use relay_firebase::{FirebaseIdentityService, ServiceAccountKey};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRIVATE_KEY: &str = include_str!("fixtures/service_account_key.pem");
const LOOKUP_PATH: &str = "/v1/projects/relay-test/accounts:lookup";

fn service_account(server: &MockServer) -> ServiceAccountKey {
    let key = json!({
        "type": "service_account",
        "project_id": "relay-test",
        "private_key_id": "key-1",
        "private_key": PRIVATE_KEY,
        "client_email": "firebase-adminsdk@relay-test.iam.gserviceaccount.com",
        "client_id": "1234567890",
        "auth_uri": "https://accounts.google.com/o/oauth2/auth",
        "token_uri": format!("{}/token", server.uri()),
        "auth_provider_x509_cert_url": "https://www.googleapis.com/oauth2/v1/certs",
        "client_x509_cert_url": "https://www.googleapis.com/robot/v1/metadata/x509/firebase-adminsdk"
    });
    ServiceAccountKey::from_json(&key.to_string()).unwrap()
}

fn identity_for(server: &MockServer) -> FirebaseIdentityService {
    FirebaseIdentityService::new(service_account(server))
        .unwrap()
        .with_api_base_url(server.uri())
}

async fn mount_token(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.test-token",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn existing_user_is_returned() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("POST"))
        .and(path(LOOKUP_PATH))
        .and(header("authorization", "Bearer ya29.test-token"))
        .and(body_json(json!({ "email": ["asha@example.com"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "identitytoolkit#GetAccountInfoResponse",
            "users": [{
                "localId": "uid-asha",
                "email": "asha@example.com",
                "emailVerified": true
            }]
        })))
        .mount(&server)
        .await;

    let user = identity_for(&server)
        .lookup_user_by_email("asha@example.com")
        .await
        .unwrap()
        .expect("user");

    assert_eq!(user.uid, "uid-asha");
    assert!(user.email_verified);
}

#[tokio::test]
async fn empty_lookup_is_not_found() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("POST"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "identitytoolkit#GetAccountInfoResponse"
        })))
        .mount(&server)
        .await;

    let user = identity_for(&server)
        .lookup_user_by_email("nobody@example.com")
        .await
        .unwrap();

    assert!(user.is_none());
}

#[tokio::test]
async fn user_not_found_error_is_not_found() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("POST"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "USER_NOT_FOUND" }
        })))
        .mount(&server)
        .await;

    let user = identity_for(&server)
        .lookup_user_by_email("nobody@example.com")
        .await
        .unwrap();

    assert!(user.is_none());
}

#[tokio::test]
async fn other_provider_errors_propagate() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("POST"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "PERMISSION_DENIED" }
        })))
        .mount(&server)
        .await;

    let err = identity_for(&server)
        .lookup_user_by_email("asha@example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::ProviderError { ref message, .. } if message == "PERMISSION_DENIED"));
}

#[tokio::test]
async fn token_is_reused_between_lookups() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("POST"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let identity = identity_for(&server);
    identity.lookup_user_by_email("a@example.com").await.unwrap();
    identity.lookup_user_by_email("b@example.com").await.unwrap();
}

#[tokio::test]
async fn concurrent_lookups_share_one_token_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "access_token": "ya29.test-token",
                    "expires_in": 3599,
                    "token_type": "Bearer"
                }))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(LOOKUP_PATH))
        .and(header("authorization", "Bearer ya29.test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(3)
        .mount(&server)
        .await;

    let identity = identity_for(&server);
    let (a, b, c) = tokio::join!(
        identity.lookup_user_by_email("a@example.com"),
        identity.lookup_user_by_email("b@example.com"),
        identity.lookup_user_by_email("c@example.com"),
    );

    assert!(a.unwrap().is_none());
    assert!(b.unwrap().is_none());
    assert!(c.unwrap().is_none());
}

#[tokio::test]
async fn rejected_token_exchange_is_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid JWT Signature."
        })))
        .mount(&server)
        .await;

    let err = identity_for(&server)
        .lookup_user_by_email("asha@example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::Authentication(ref message) if message.contains("invalid_grant")));
}

#[tokio::test]
async fn malformed_email_fails_before_network() {
    let server = MockServer::start().await;
    mount_token(&server, 0).await;

    let err = identity_for(&server)
        .lookup_user_by_email("not-an-email")
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::InvalidRequest(_)));
}
