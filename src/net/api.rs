//! The API gateway client.
//!
//! DESIGN
//! ======
//! One request path for every domain service: the session credential is an
//! explicit stored token attached as a `Cookie` header (and captured back
//! from `Set-Cookie`), bodies are JSON unless multipart, `204` means
//! "success with no payload", and every failure is normalized to an
//! [`ApiError`] whose message prefers the server's JSON `error` field.
//! Failures are logged before they are raised.

use std::sync::{Mutex, PoisonError};

use reqwest::header::{COOKIE, HeaderMap, SET_COOKIE};
use reqwest::{Method, RequestBuilder, StatusCode, multipart};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::net::error::ApiError;

/// Cookie name the backend issues its session under.
const SESSION_COOKIE: &str = "session";

/// HTTP client for the regularization API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Mutex<Option<String>>,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|error| ApiError::Config(error.to_string()))?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_owned(),
            session: Mutex::new(config.session_token.clone()),
        })
    }

    /// Currently stored session token, if any.
    #[must_use]
    pub fn session_token(&self) -> Option<String> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace (or clear) the stored session token.
    pub fn set_session_token(&self, token: Option<String>) {
        *self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Issue a request with an optional JSON body.
    ///
    /// Returns `Ok(None)` when the server answers with no content (204 or
    /// an empty body), otherwise the parsed JSON payload.
    ///
    /// # Errors
    ///
    /// [`ApiError::Network`] when no response is obtained,
    /// [`ApiError::Server`] for any non-success status, and
    /// [`ApiError::Decode`] when a success body is not valid JSON.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>, ApiError> {
        let mut builder = self.builder(method, path);
        if let Some(json) = &body {
            builder = builder.json(json);
        }
        self.dispatch(builder, path).await
    }

    /// GET with query parameters appended to the URL.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<Value>, ApiError> {
        let mut builder = self.builder(Method::GET, path);
        if !params.is_empty() {
            builder = builder.query(params);
        }
        self.dispatch(builder, path).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<Option<Value>, ApiError> {
        self.request(Method::POST, path, body).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn put(&self, path: &str, body: Option<Value>) -> Result<Option<Value>, ApiError> {
        self.request(Method::PUT, path, body).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete(&self, path: &str) -> Result<Option<Value>, ApiError> {
        self.request(Method::DELETE, path, None).await
    }

    /// POST a multipart form (file upload). No content-type header is set
    /// here; the transport owns the boundary.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn upload(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<Option<Value>, ApiError> {
        let builder = self.builder(Method::POST, path).multipart(form);
        self.dispatch(builder, path).await
    }

    /// Absolute URL for an endpoint path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url_for(path));
        if let Some(token) = self.session_token() {
            builder = builder.header(COOKIE, format!("{SESSION_COOKIE}={token}"));
        }
        builder
    }

    async fn dispatch(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> Result<Option<Value>, ApiError> {
        let response = builder.send().await.map_err(|error| {
            let failure = ApiError::Network(error.to_string());
            tracing::error!(path, error = %failure, "api request failed");
            failure
        })?;

        if let Some(token) = session_cookie(response.headers()) {
            self.set_session_token(Some(token));
        }

        let status = response.status();
        let bytes = response.bytes().await.map_err(|error| {
            let failure = ApiError::Network(error.to_string());
            tracing::error!(path, error = %failure, "api response read failed");
            failure
        })?;

        if !status.is_success() {
            let failure = ApiError::Server {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &bytes),
            };
            tracing::error!(path, status = status.as_u16(), error = %failure, "api request failed");
            return Err(failure);
        }

        if status == StatusCode::NO_CONTENT || bytes.is_empty() {
            return Ok(None);
        }

        let value = serde_json::from_slice::<Value>(&bytes).map_err(|error| {
            let failure = ApiError::Decode(error.to_string());
            tracing::error!(path, error = %failure, "api response parse failed");
            failure
        })?;
        Ok(Some(value))
    }
}

/// Resolve the message for a non-success response: the JSON `error` field
/// when the body parses, otherwise `HTTP <status>`.
fn error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
        })
        .unwrap_or_else(|| format!("HTTP {status}"))
}

/// Extract the session token from `Set-Cookie` headers, if one is issued.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(parse_session_cookie)
}

fn parse_session_cookie(raw: &str) -> Option<String> {
    let pair = raw.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    if name == SESSION_COOKIE && !value.is_empty() {
        Some(value.to_owned())
    } else {
        None
    }
}

/// Decode a JSON payload into a typed response.
///
/// # Errors
///
/// [`ApiError::Decode`] when the payload does not match `T`.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|error| ApiError::Decode(error.to_string()))
}

/// Unwrap a response body that must be present.
///
/// # Errors
///
/// [`ApiError::Decode`] when the server answered with no content.
pub fn require_body(body: Option<Value>, what: &str) -> Result<Value, ApiError> {
    body.ok_or_else(|| ApiError::Decode(format!("empty response for {what}")))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
