//! Login, registration and logout

use recipebox::client::{logout, LoginController, RegisterController, Session};
use recipebox::shared::ClientError;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;
use crate::{assert_err, assert_ok};

#[tokio::test]
async fn test_login_stores_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .and(body_json(json!({"email": "a@b.co", "password": "Abcdefg1!"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "T"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = anonymous_client(&server);
    let mut login = LoginController::new();
    login.set_email("a@b.co");
    login.set_password("Abcdefg1!");

    assert_ok!(login.submit(&api).await);
    assert!(login.state().is_success());
    assert!(login.password.is_empty());
    assert_eq!(api.session().get_token().await.as_deref(), Some("T"));
}

#[tokio::test]
async fn test_login_rejected_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let api = anonymous_client(&server);
    let mut login = LoginController::new();
    login.set_email("a@b.co");
    login.set_password("wrong");

    assert_err!(login.submit(&api).await, ClientError::Auth { .. });
    assert_eq!(login.state().error(), Some("Invalid credentials"));
    assert!(!api.session().is_authenticated().await);
}

#[tokio::test]
async fn test_login_server_failure_is_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = anonymous_client(&server);
    assert_err!(api.login("a@b.co", "Abcdefg1!").await, ClientError::Unknown { .. });
}

#[tokio::test]
async fn test_login_without_token_is_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;

    let api = anonymous_client(&server);
    assert_err!(api.login("a@b.co", "Abcdefg1!").await, ClientError::Unknown { .. });
}

#[tokio::test]
async fn test_login_unreachable_server_is_network_error() {
    let api = unreachable_client(Session::in_memory());
    let mut login = LoginController::new();
    login.set_email("a@b.co");
    login.set_password("Abcdefg1!");

    assert_err!(login.submit(&api).await, ClientError::Network { .. });
    assert_eq!(
        login.state().error(),
        Some("No response from server. Please check your network connection.")
    );
}

#[tokio::test]
async fn test_register_success_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/register"))
        .and(body_json(json!({"email": "new@cook.io", "password": "Abcdefg1!"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "created"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = anonymous_client(&server);
    let mut register = RegisterController::new();
    register.set_email("new@cook.io");
    register.set_password("Abcdefg1!");
    register.set_confirm_password("Abcdefg1!");

    let outcome = assert_ok!(register.submit(&api).await);
    assert_eq!(outcome.token, None);
    assert!(register.state().is_success());
    assert!(!api.session().is_authenticated().await);
}

#[tokio::test]
async fn test_register_token_is_stored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"token": "fresh"})))
        .mount(&server)
        .await;

    let api = anonymous_client(&server);
    let mut register = RegisterController::new();
    register.set_email("new@cook.io");
    register.set_password("Abcdefg1!");
    register.set_confirm_password("Abcdefg1!");

    assert_ok!(register.submit(&api).await);
    assert_eq!(api.session().get_token().await.as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_register_duplicate_email_is_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/register"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"error": "Email already exists"})),
        )
        .mount(&server)
        .await;

    let api = anonymous_client(&server);
    let mut register = RegisterController::new();
    register.set_email("taken@cook.io");
    register.set_password("Abcdefg1!");
    register.set_confirm_password("Abcdefg1!");

    assert_err!(
        register.submit(&api).await,
        ClientError::Validation { .. }
    );
    assert_eq!(register.state().error(), Some("Email already exists"));
}

#[tokio::test]
async fn test_register_weak_password_never_calls_api() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;

    let api = anonymous_client(&server);
    let mut register = RegisterController::new();
    register.set_email("new@cook.io");
    register.set_password("abcdefgh");
    register.set_confirm_password("abcdefgh");

    assert_err!(register.submit(&api).await, ClientError::Validation { .. });
    assert_eq!(
        register.state().error(),
        Some("Please fulfill all password requirements.")
    );
}

#[tokio::test]
async fn test_register_mismatch_reported_first() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;

    let api = anonymous_client(&server);
    let mut register = RegisterController::new();
    register.set_email("not-an-email");
    register.set_password("weak");
    register.set_confirm_password("other");

    assert_err!(register.submit(&api).await);
    assert_eq!(register.state().error(), Some("Passwords do not match."));
}

#[tokio::test]
async fn test_logout_blocks_authenticated_calls() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;

    let api = logged_in_client(&server).await;
    assert!(api.session().is_authenticated().await);

    assert_ok!(logout(api.session()).await);

    assert!(!api.session().is_authenticated().await);
    let err = api.get_recipe("r1").await.unwrap_err();
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_token_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("session.db");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "durable"})))
        .mount(&server)
        .await;

    {
        let session = assert_ok!(Session::open(&db_path).await);
        let api = client_for(&server, session);
        let mut login = LoginController::new();
        login.set_email("a@b.co");
        login.set_password("Abcdefg1!");
        assert_ok!(login.submit(&api).await);
    }

    let reopened = assert_ok!(Session::open(&db_path).await);
    assert_eq!(reopened.get_token().await.as_deref(), Some("durable"));
}
