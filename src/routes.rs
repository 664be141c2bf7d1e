//! Route guard: the pure decision gating navigation to protected content.
//!
//! The precedence is significant: a pending session check must short-
//! circuit everything (otherwise the first paint of a protected route
//! would flash a redirect to login while `/auth/me` is still in flight),
//! absence of a user is checked before role membership.

use crate::session::role::{Role, has_role};
use crate::session::store::SessionState;

/// Outcome of guarding one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session check still in flight; show a pending indicator, decide
    /// nothing.
    Pending,
    /// Render the protected content.
    Render,
    /// Anonymous: go to login, carrying the originally requested path so
    /// a successful login can return there.
    RedirectToLogin { from: String },
    /// Authenticated but lacking the required role.
    RedirectToUnauthorized,
}

impl GuardDecision {
    /// Path a redirect decision targets, if any.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::RedirectToLogin { .. } => Some(LOGIN_PATH),
            Self::RedirectToUnauthorized => Some(UNAUTHORIZED_PATH),
            Self::Pending | Self::Render => None,
        }
    }
}

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Access requirement a route declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// No session needed (the login page itself).
    Public,
    /// Session required; the role set, when non-empty, further restricts.
    Protected(&'static [Role]),
}

/// Guard one navigation given the session and the route's required role
/// set. An empty set means "any authenticated user".
#[must_use]
pub fn decide(session: &SessionState, required: &[Role], path: &str) -> GuardDecision {
    if session.loading {
        return GuardDecision::Pending;
    }
    if session.user.is_none() {
        return GuardDecision::RedirectToLogin {
            from: path.to_owned(),
        };
    }
    if !required.is_empty() && !has_role(session.user.as_ref(), required) {
        return GuardDecision::RedirectToUnauthorized;
    }
    GuardDecision::Render
}

/// The application shell's route surface: a public login path and a
/// wildcard-protected region, with user administration restricted to
/// admins.
#[must_use]
pub fn route_access(path: &str) -> RouteAccess {
    match first_segment(path) {
        "login" => RouteAccess::Public,
        "users" => RouteAccess::Protected(&[Role::Admin]),
        _ => RouteAccess::Protected(&[]),
    }
}

/// Guard a navigation using the shell's route table.
#[must_use]
pub fn decide_for_path(session: &SessionState, path: &str) -> GuardDecision {
    match route_access(path) {
        RouteAccess::Public => GuardDecision::Render,
        RouteAccess::Protected(required) => decide(session, required, path),
    }
}

/// Where a successful login should navigate: the path the guard carried,
/// or the dashboard root.
#[must_use]
pub fn login_destination(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path) if !path.is_empty() => path,
        _ => "/",
    }
}

fn first_segment(path: &str) -> &str {
    path.trim_start_matches('/')
        .split(['/', '?'])
        .next()
        .unwrap_or("")
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;
