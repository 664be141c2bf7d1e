//! Session state and its four mutating operations.
//!
//! STATE MACHINE
//! =============
//! `(user, loading, last_error)` collapses Uninitialized / CheckingSession
//! / Authenticated / Anonymous / LoggingIn. Transitions:
//!
//! - initialize: session check, once. Any failure resolves to anonymous
//!   (an anonymous visit is expected, not exceptional; no `last_error`).
//! - login: clears `last_error`; failure records it and re-raises so the
//!   form can react.
//! - logout: network failure is logged and swallowed; `user` becomes
//!   `None` unconditionally.
//! - change-password: clears `last_error`; failure records it and
//!   re-raises; never touches `user` or `loading`.
//!
//! TRADE-OFFS
//! ==========
//! Concurrent operations are rejected, not queued: a `try_lock` on a
//! single-flight slot fails fast with [`ApiError::Busy`], which removes
//! the last-write-wins race between overlapping login/logout. Every
//! transport call runs under a deadline so a hung network call cannot
//! pin `loading` forever.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::net::error::ApiError;
use crate::net::services;
use crate::net::types::{
    ChangePasswordRequest, LoginRequest, LoginResponse, SessionResponse, User,
};
use crate::net::ApiClient;
use crate::session::role::{self, Role};

/// Snapshot of the session. Cloned out to consumers; only the store
/// mutates it.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Current authenticated user, `None` when anonymous.
    pub user: Option<User>,
    /// True exactly while a session check or login is in flight.
    pub loading: bool,
    /// Message from the most recent failed login or password change.
    pub last_error: Option<String>,
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Parsed role of the current user, if recognized.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().and_then(role::user_role)
    }

    /// Membership test against a role set.
    #[must_use]
    pub fn has_role(&self, roles: &[Role]) -> bool {
        role::has_role(self.user.as_ref(), roles)
    }

    /// Whether the current user carries at least `required` privileges.
    #[must_use]
    pub fn meets_minimum(&self, required: Role) -> bool {
        self.role()
            .is_some_and(|role| role.meets_minimum(required))
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.meets_minimum(Role::Admin)
    }

    #[must_use]
    pub fn is_manager(&self) -> bool {
        self.meets_minimum(Role::Manager)
    }

    #[must_use]
    pub fn is_operator(&self) -> bool {
        self.meets_minimum(Role::Operator)
    }
}

/// Transport seam the session guard drives. Implemented by [`ApiClient`];
/// tests substitute stubs.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    async fn fetch_session(&self) -> Result<SessionResponse, ApiError>;
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError>;

    /// Drop any stored credential. Called on logout regardless of the
    /// network outcome.
    fn clear_credential(&self) {}
}

#[async_trait]
impl AuthTransport for ApiClient {
    async fn fetch_session(&self) -> Result<SessionResponse, ApiError> {
        services::auth::current_user(self).await
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        services::auth::login(self, credentials).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        services::auth::logout(self).await
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError> {
        services::auth::change_password(self, request).await
    }

    fn clear_credential(&self) {
        self.set_session_token(None);
    }
}

#[async_trait]
impl<T: AuthTransport> AuthTransport for Arc<T> {
    async fn fetch_session(&self) -> Result<SessionResponse, ApiError> {
        (**self).fetch_session().await
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        (**self).login(credentials).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        (**self).logout().await
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError> {
        (**self).change_password(request).await
    }

    fn clear_credential(&self) {
        (**self).clear_credential();
    }
}

/// Owner of the session. Shared by reference with every protected route;
/// all mutation funnels through the four operations below.
pub struct SessionStore<T: AuthTransport> {
    transport: T,
    state: Mutex<SessionState>,
    slot: tokio::sync::Mutex<()>,
    initialized: AtomicBool,
    timeout: Duration,
}

impl<T: AuthTransport> SessionStore<T> {
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self::with_timeout(transport, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    /// `timeout` bounds each transport call; expiry resolves the
    /// operation as a failure instead of leaving `loading` stuck.
    #[must_use]
    pub fn with_timeout(transport: T, timeout: Duration) -> Self {
        Self {
            transport,
            state: Mutex::new(SessionState::default()),
            slot: tokio::sync::Mutex::new(()),
            initialized: AtomicBool::new(false),
            timeout,
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.lock().clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    /// Underlying transport (e.g. to reach the gateway for domain calls).
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run the session check once, on application start. Later calls are
    /// no-ops; use [`SessionStore::refresh`] to re-check on demand.
    ///
    /// # Errors
    ///
    /// Only [`ApiError::Busy`]; check failures resolve to anonymous.
    pub async fn initialize(&self) -> Result<(), ApiError> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let result = self.refresh().await;
        if matches!(result, Err(ApiError::Busy)) {
            // Did not actually run; let a later call try again.
            self.initialized.store(false, Ordering::SeqCst);
        }
        result
    }

    /// Re-run the current-session check.
    ///
    /// # Errors
    ///
    /// Only [`ApiError::Busy`]; check failures resolve to anonymous.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let _slot = self.try_slot()?;
        self.lock().loading = true;

        let result = self
            .bounded("session check", self.transport.fetch_session())
            .await;

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(response) => state.user = Some(response.user),
            Err(error) => {
                // Logged out and unreachable server both land here; the
                // kind is logged so diagnostics can tell them apart.
                tracing::debug!(kind = ?error.kind(), error = %error, "session check resolved anonymous");
                state.user = None;
            }
        }
        Ok(())
    }

    /// Authenticate. On success the session holds the returned user; on
    /// failure `last_error` records the message and the failure is
    /// re-raised for the caller's form.
    ///
    /// # Errors
    ///
    /// [`ApiError::Busy`] while another operation is in flight, otherwise
    /// the transport failure.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let _slot = self.try_slot()?;
        {
            let mut state = self.lock();
            state.last_error = None;
            state.loading = true;
        }

        let result = self.bounded("login", self.transport.login(credentials)).await;

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(response) => {
                state.user = Some(response.user.clone());
                Ok(response)
            }
            Err(error) => {
                state.last_error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// End the session. The network call's outcome does not matter: the
    /// user and the stored credential are always cleared.
    ///
    /// # Errors
    ///
    /// Only [`ApiError::Busy`].
    pub async fn logout(&self) -> Result<(), ApiError> {
        let _slot = self.try_slot()?;

        if let Err(error) = self.bounded("logout", self.transport.logout()).await {
            tracing::warn!(error = %error, "logout request failed");
        }

        self.transport.clear_credential();
        self.lock().user = None;
        Ok(())
    }

    /// Change the current user's password. Does not touch `user` or
    /// `loading`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Busy`] while another operation is in flight, otherwise
    /// the transport failure (also recorded in `last_error`).
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError> {
        let _slot = self.try_slot()?;
        self.lock().last_error = None;

        let result = self
            .bounded("password change", self.transport.change_password(request))
            .await;

        if let Err(error) = &result {
            self.lock().last_error = Some(error.to_string());
        }
        result
    }

    fn try_slot(&self) -> Result<tokio::sync::MutexGuard<'_, ()>, ApiError> {
        self.slot.try_lock().map_err(|_| ApiError::Busy)
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn bounded<R>(
        &self,
        op: &'static str,
        call: impl Future<Output = Result<R, ApiError>>,
    ) -> Result<R, ApiError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout(op)),
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
