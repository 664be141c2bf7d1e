//! Wire types for the regularization API.
//!
//! Only shapes the client depends on are typed; loosely-shaped list
//! payloads (filters, report rows) travel as `serde_json::Value`.

use serde::{Deserialize, Serialize};

/// Authenticated user record as returned by `/auth/me` and `/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Open string on the wire; only `admin`, `manager` and `operator`
    /// are semantically recognized. See [`crate::session::Role`].
    pub role: String,
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload: `{ message, user }`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: User,
}

/// `GET /auth/me` payload: `{ user }`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    pub user: User,
}

/// Body for `POST /auth/change-password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Property counters in the dashboard overview, keyed by regularization
/// status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyCounts {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub municipal_registered: i64,
    pub registry_completed: i64,
}

/// Workflow-step counters in the dashboard overview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCounts {
    pub total: i64,
    pub active: i64,
    pub completed: i64,
    pub blocked: i64,
}

/// Single-total counter group (`documents`, `users`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalCount {
    pub total: i64,
}

/// `GET /dashboard/overview` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub properties: PropertyCounts,
    pub steps: StepCounts,
    pub documents: TotalCount,
    pub users: TotalCount,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
