use super::*;

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::{HeaderMap as AxumHeaderMap, StatusCode as AxumStatus, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete as axum_delete, get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::config::ClientConfig;
use crate::net::error::ErrorKind;
use crate::net::services;
use crate::net::types::LoginRequest;
use crate::session::SessionStore;

// =============================================================
// pure helpers
// =============================================================

#[test]
fn error_message_prefers_server_error_field() {
    let body = r#"{"error":"Credenciais inválidas"}"#.as_bytes();
    assert_eq!(error_message(401, body), "Credenciais inválidas");
}

#[test]
fn error_message_falls_back_to_status() {
    assert_eq!(error_message(500, b"Internal Server Error"), "HTTP 500");
    assert_eq!(error_message(404, b""), "HTTP 404");
    // JSON without an `error` field also falls back.
    assert_eq!(error_message(400, br#"{"detail":"nope"}"#), "HTTP 400");
}

#[test]
fn session_cookie_parses_the_session_pair_only() {
    assert_eq!(
        parse_session_cookie("session=abc123; Path=/; HttpOnly"),
        Some("abc123".to_owned())
    );
    assert_eq!(parse_session_cookie("other=abc123; Path=/"), None);
    assert_eq!(parse_session_cookie("session=; Path=/"), None);
    assert_eq!(parse_session_cookie("garbage"), None);
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let client = ApiClient::new(&ClientConfig {
        api_url: "http://localhost:5001/api/".to_owned(),
        ..ClientConfig::default()
    })
    .unwrap();
    assert_eq!(
        client.url_for("/auth/me"),
        "http://localhost:5001/api/auth/me"
    );
}

// =============================================================
// loopback server
// =============================================================

const TOKEN: &str = "tok-1";

fn admin_user() -> serde_json::Value {
    json!({ "id": 1, "name": "Admin", "email": "admin@prefeitura.gov.br", "role": "admin" })
}

fn authenticated(headers: &AxumHeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|cookie| cookie.contains(&format!("session={TOKEN}")))
}

async fn me(headers: AxumHeaderMap) -> Response {
    if authenticated(&headers) {
        Json(json!({ "user": admin_user() })).into_response()
    } else {
        (
            AxumStatus::UNAUTHORIZED,
            Json(json!({ "error": "Usuário não autenticado" })),
        )
            .into_response()
    }
}

async fn login(Json(body): Json<serde_json::Value>) -> Response {
    if body.get("password").and_then(serde_json::Value::as_str) == Some("right") {
        (
            [(header::SET_COOKIE, format!("session={TOKEN}; Path=/; HttpOnly"))],
            Json(json!({ "message": "Login realizado com sucesso", "user": admin_user() })),
        )
            .into_response()
    } else {
        (
            AxumStatus::UNAUTHORIZED,
            Json(json!({ "error": "Credenciais inválidas" })),
        )
            .into_response()
    }
}

async fn logout() -> AxumStatus {
    AxumStatus::NO_CONTENT
}

async fn delete_document() -> AxumStatus {
    AxumStatus::NO_CONTENT
}

async fn list_properties(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
    Json(json!({ "properties": [], "filters": params }))
}

async fn broken() -> Response {
    (AxumStatus::INTERNAL_SERVER_ERROR, "stack trace, not json").into_response()
}

/// Bind an in-process backend on an ephemeral port; returns its base URL.
async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/documents/7", axum_delete(delete_document))
        .route("/api/properties", get(list_properties))
        .route("/api/broken", get(broken));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn client_for(base: &str) -> ApiClient {
    ApiClient::new(&ClientConfig {
        api_url: base.to_owned(),
        ..ClientConfig::default()
    })
    .unwrap()
}

fn credentials(password: &str) -> LoginRequest {
    LoginRequest {
        email: "admin@prefeitura.gov.br".to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn login_captures_the_session_cookie() {
    let base = spawn_backend().await;
    let client = client_for(&base);
    assert!(client.session_token().is_none());

    let response = services::auth::login(&client, &credentials("right"))
        .await
        .unwrap();

    assert_eq!(response.user.role, "admin");
    assert_eq!(client.session_token().as_deref(), Some(TOKEN));

    // The captured token authenticates the next request.
    let session = services::auth::current_user(&client).await.unwrap();
    assert_eq!(session.user.email, "admin@prefeitura.gov.br");
}

#[tokio::test]
async fn unauthorized_carries_the_server_error_field() {
    let base = spawn_backend().await;
    let client = client_for(&base);

    let error = services::auth::current_user(&client).await.unwrap_err();

    assert_eq!(error.to_string(), "Usuário não autenticado");
    assert_eq!(error.kind(), ErrorKind::InvalidCredentials);
}

#[tokio::test]
async fn failed_login_surfaces_credentials_message() {
    let base = spawn_backend().await;
    let client = client_for(&base);

    let error = services::auth::login(&client, &credentials("wrong"))
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "Credenciais inválidas");
    assert!(client.session_token().is_none());
}

#[tokio::test]
async fn no_content_maps_to_none() {
    let base = spawn_backend().await;
    let client = client_for(&base);

    let body = client.delete("/documents/7").await.unwrap();
    assert!(body.is_none());
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_message() {
    let base = spawn_backend().await;
    let client = client_for(&base);

    let error = client.get("/broken", &[]).await.unwrap_err();
    assert_eq!(error.to_string(), "HTTP 500");
    assert_eq!(error.kind(), ErrorKind::ServerError);
}

#[tokio::test]
async fn query_parameters_reach_the_server() {
    let base = spawn_backend().await;
    let client = client_for(&base);

    let body = services::properties::list(
        &client,
        &[("status", "in_progress"), ("neighborhood", "Centro")],
    )
    .await
    .unwrap();

    assert_eq!(body["filters"]["status"], "in_progress");
    assert_eq!(body["filters"]["neighborhood"], "Centro");
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    // Bind and immediately drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{addr}/api"));
    let error = client.get("/auth/me", &[]).await.unwrap_err();

    assert!(matches!(error, ApiError::Network(_)));
    assert_eq!(error.kind(), ErrorKind::NetworkUnavailable);
}

// Full session-guard round trip over the real gateway.
#[tokio::test]
async fn session_store_round_trip_over_http() {
    let base = spawn_backend().await;
    let store = SessionStore::new(client_for(&base));

    store.initialize().await.unwrap();
    assert!(store.user().is_none());

    store.login(&credentials("right")).await.unwrap();
    assert!(store.state().is_admin());
    assert!(store.transport().session_token().is_some());

    store.logout().await.unwrap();
    assert!(store.user().is_none());
    assert!(store.transport().session_token().is_none());

    // Post-logout refresh stays anonymous: the credential is gone.
    store.refresh().await.unwrap();
    assert!(store.user().is_none());
}
