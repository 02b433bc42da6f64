//! End-to-end exercises of the auth routes over in-memory fakes.

use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::json;

use tm_api::app::configure_routes;
use tm_api::middleware::auth::TokenVerifier;
use tm_api::routes::auth::AppState;
use tm_core::repositories::{MockRevocationLedger, MockUserRepository};
use tm_core::services::auth::AuthService;
use tm_core::services::token::{TokenService, TokenServiceConfig};

type TestState = web::Data<AppState<MockUserRepository, MockRevocationLedger>>;

fn build_state() -> (TestState, web::Data<Arc<dyn TokenVerifier>>) {
    let ledger = Arc::new(MockRevocationLedger::new());
    let config = TokenServiceConfig {
        jwt_secret: "integration-test-secret".to_string(),
        access_token_expiry_minutes: 30,
        strict_revocation: false,
    };
    let token_service =
        Arc::new(TokenService::new(ledger, config).expect("token service should build"));
    let users = Arc::new(MockUserRepository::new());
    let auth_service = Arc::new(AuthService::new(users, token_service.clone()));

    let verifier: Arc<dyn TokenVerifier> = token_service;
    (
        web::Data::new(AppState::new(auth_service)),
        web::Data::new(verifier),
    )
}

/// Dispatches a request, rendering service-level errors (e.g. middleware
/// denials) into their HTTP responses the way a real server would.
async fn call_service<S, R>(app: &S, req: R) -> ServiceResponse<BoxBody>
where
    S: Service<R, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    match test::try_call_service(app, req).await {
        Ok(response) => response,
        Err(error) => ServiceResponse::new(
            test::TestRequest::default().to_http_request(),
            error.error_response(),
        ),
    }
}

macro_rules! test_app {
    ($state:expr, $verifier:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .app_data($verifier.clone())
                .configure(configure_routes::<MockUserRepository, MockRevocationLedger>),
        )
        .await
    };
}

macro_rules! register_and_login {
    ($app:expr, $username:expr, $password:expr) => {{
        let response = call_service(
            $app,
            test::TestRequest::post()
                .uri("/api/v1/auth/register")
                .set_json(json!({ "username": $username, "password": $password }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = call_service(
            $app,
            test::TestRequest::post()
                .uri("/api/v1/auth/token")
                .set_form([("username", $username), ("password", $password)])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["token_type"], "bearer");
        body["access_token"]
            .as_str()
            .expect("token present")
            .to_string()
    }};
}

#[actix_web::test]
async fn register_login_and_fetch_profile() {
    let (state, verifier) = build_state();
    let app = test_app!(state, verifier);

    let token = register_and_login!(&app, "alice", "password1");

    let response = call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/users/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["is_active"], true);
}

#[actix_web::test]
async fn protected_route_without_token_is_401() {
    let (state, verifier) = build_state();
    let app = test_app!(state, verifier);

    let response = call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/users/me")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["detail"], "Could not validate credentials");
}

#[actix_web::test]
async fn garbage_token_is_rejected_as_invalid() {
    let (state, verifier) = build_state();
    let app = test_app!(state, verifier);

    let response = call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/users/me")
            .insert_header(("Authorization", "Bearer not.a.jwt"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["detail"], "Invalid token");
}

#[actix_web::test]
async fn logout_invalidates_the_presented_token() {
    let (state, verifier) = build_state();
    let app = test_app!(state, verifier);

    let token = register_and_login!(&app, "bob", "password2");
    let auth_header = ("Authorization", format!("Bearer {}", token));

    let response = call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .insert_header(auth_header.clone())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Successfully logged out");

    // The blacklisted token no longer opens protected routes.
    let response = call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/users/me")
            .insert_header(auth_header)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["detail"], "Token has been invalidated");
}

#[actix_web::test]
async fn duplicate_registration_is_rejected() {
    let (state, verifier) = build_state();
    let app = test_app!(state, verifier);

    let request = || {
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({ "username": "carol", "password": "password3" }))
            .to_request()
    };

    let response = call_service(&app, request()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = call_service(&app, request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["detail"], "Username already registered");
}

#[actix_web::test]
async fn wrong_password_and_unknown_user_look_identical() {
    let (state, verifier) = build_state();
    let app = test_app!(state, verifier);

    let _ = register_and_login!(&app, "dave", "password4");

    let login = |username: &'static str, password: &'static str| {
        test::TestRequest::post()
            .uri("/api/v1/auth/token")
            .set_form([("username", username), ("password", password)])
            .to_request()
    };

    let wrong_password = call_service(&app, login("dave", "nope")).await;
    let unknown_user = call_service(&app, login("nobody", "nope")).await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let wrong_body: serde_json::Value = test::read_body_json(wrong_password).await;
    let unknown_body: serde_json::Value = test::read_body_json(unknown_user).await;
    assert_eq!(wrong_body, unknown_body);
}

#[actix_web::test]
async fn health_reports_ledger_size() {
    let (state, verifier) = build_state();
    let app = test_app!(state, verifier);

    let token = register_and_login!(&app, "erin", "password5");

    let response = call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/health")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["revoked_tokens"], 0);

    let response = call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/health")
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["revoked_tokens"], 1);
}
