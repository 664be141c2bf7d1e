//! Typed domain service wrappers over the gateway client.
//!
//! One group per backend blueprint, mirroring the endpoint surface the
//! dashboard consumes. Stable shapes (auth, dashboard overview) decode to
//! structs; list and report payloads stay as `serde_json::Value` since the
//! views render them as-is. Every function re-raises the gateway's
//! normalized [`ApiError`] unchanged.

use serde::Serialize;
use serde_json::Value;

use crate::net::api::{ApiClient, decode, require_body};
use crate::net::error::ApiError;
use crate::net::types::{
    ChangePasswordRequest, DashboardOverview, LoginRequest, LoginResponse, SessionResponse,
};

fn json_body<T: Serialize>(value: &T) -> Result<Option<Value>, ApiError> {
    serde_json::to_value(value)
        .map(Some)
        .map_err(|error| ApiError::Decode(error.to_string()))
}

/// Authentication endpoints (`/auth/*`).
pub mod auth {
    use super::*;

    /// `POST /auth/login`. A 401 carries the server's credential message.
    pub async fn login(
        api: &ApiClient,
        credentials: &LoginRequest,
    ) -> Result<LoginResponse, ApiError> {
        let body = api.post("/auth/login", json_body(credentials)?).await?;
        decode(require_body(body, "login")?)
    }

    /// `POST /auth/logout`.
    pub async fn logout(api: &ApiClient) -> Result<(), ApiError> {
        api.post("/auth/logout", None).await?;
        Ok(())
    }

    /// `GET /auth/me`. A 401 here means "not logged in"; callers decide
    /// whether that is exceptional.
    pub async fn current_user(api: &ApiClient) -> Result<SessionResponse, ApiError> {
        let body = api.get("/auth/me", &[]).await?;
        decode(require_body(body, "current session")?)
    }

    /// `POST /auth/change-password`. A wrong current password is a 400
    /// with the server's message.
    pub async fn change_password(
        api: &ApiClient,
        request: &ChangePasswordRequest,
    ) -> Result<(), ApiError> {
        api.post("/auth/change-password", json_body(request)?)
            .await?;
        Ok(())
    }
}

/// User administration endpoints (`/users/*`). Admin-only on the server.
pub mod users {
    use super::*;

    pub async fn list(api: &ApiClient, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        require_body(api.get("/users", params).await?, "users")
    }

    pub async fn get(api: &ApiClient, id: i64) -> Result<Value, ApiError> {
        require_body(api.get(&format!("/users/{id}"), &[]).await?, "user")
    }

    pub async fn create(api: &ApiClient, data: Value) -> Result<Value, ApiError> {
        require_body(api.post("/users", Some(data)).await?, "created user")
    }

    pub async fn update(api: &ApiClient, id: i64, data: Value) -> Result<Value, ApiError> {
        require_body(
            api.put(&format!("/users/{id}"), Some(data)).await?,
            "updated user",
        )
    }

    pub async fn delete(api: &ApiClient, id: i64) -> Result<Option<Value>, ApiError> {
        api.delete(&format!("/users/{id}")).await
    }

    pub async fn roles(api: &ApiClient) -> Result<Value, ApiError> {
        require_body(api.get("/users/roles", &[]).await?, "roles")
    }
}

/// Property endpoints (`/properties/*`).
pub mod properties {
    use super::*;

    pub async fn list(api: &ApiClient, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        require_body(api.get("/properties", params).await?, "properties")
    }

    pub async fn get(
        api: &ApiClient,
        id: i64,
        params: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        require_body(
            api.get(&format!("/properties/{id}"), params).await?,
            "property",
        )
    }

    pub async fn create(api: &ApiClient, data: Value) -> Result<Value, ApiError> {
        require_body(api.post("/properties", Some(data)).await?, "created property")
    }

    pub async fn update(api: &ApiClient, id: i64, data: Value) -> Result<Value, ApiError> {
        require_body(
            api.put(&format!("/properties/{id}"), Some(data)).await?,
            "updated property",
        )
    }

    pub async fn delete(api: &ApiClient, id: i64) -> Result<Option<Value>, ApiError> {
        api.delete(&format!("/properties/{id}")).await
    }

    pub async fn status_options(api: &ApiClient) -> Result<Value, ApiError> {
        require_body(
            api.get("/properties/status-options", &[]).await?,
            "status options",
        )
    }

    pub async fn neighborhoods(api: &ApiClient) -> Result<Value, ApiError> {
        require_body(
            api.get("/properties/neighborhoods", &[]).await?,
            "neighborhoods",
        )
    }

    /// Per-property regularization progress.
    pub async fn progress(api: &ApiClient, id: i64) -> Result<Value, ApiError> {
        require_body(
            api.get(&format!("/properties/{id}/progress"), &[]).await?,
            "property progress",
        )
    }
}

/// Workflow-step template endpoints (`/steps/*`).
pub mod steps {
    use super::*;

    pub async fn list(api: &ApiClient, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        require_body(api.get("/steps", params).await?, "steps")
    }

    pub async fn get(api: &ApiClient, id: i64) -> Result<Value, ApiError> {
        require_body(api.get(&format!("/steps/{id}"), &[]).await?, "step")
    }

    pub async fn create(api: &ApiClient, data: Value) -> Result<Value, ApiError> {
        require_body(api.post("/steps", Some(data)).await?, "created step")
    }

    pub async fn update(api: &ApiClient, id: i64, data: Value) -> Result<Value, ApiError> {
        require_body(
            api.put(&format!("/steps/{id}"), Some(data)).await?,
            "updated step",
        )
    }

    pub async fn delete(api: &ApiClient, id: i64) -> Result<Option<Value>, ApiError> {
        api.delete(&format!("/steps/{id}")).await
    }

    pub async fn reorder(api: &ApiClient, data: Value) -> Result<Value, ApiError> {
        require_body(api.post("/steps/reorder", Some(data)).await?, "reordered steps")
    }
}

/// Per-property step-record endpoints (`/step-records/*`).
pub mod step_records {
    use super::*;

    pub async fn list(api: &ApiClient, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        require_body(api.get("/step-records", params).await?, "step records")
    }

    pub async fn get(api: &ApiClient, id: i64) -> Result<Value, ApiError> {
        require_body(
            api.get(&format!("/step-records/{id}"), &[]).await?,
            "step record",
        )
    }

    pub async fn update(api: &ApiClient, id: i64, data: Value) -> Result<Value, ApiError> {
        require_body(
            api.put(&format!("/step-records/{id}"), Some(data)).await?,
            "updated step record",
        )
    }

    pub async fn for_property(api: &ApiClient, property_id: i64) -> Result<Value, ApiError> {
        require_body(
            api.get(&format!("/step-records/property/{property_id}"), &[])
                .await?,
            "property step records",
        )
    }

    pub async fn status_options(api: &ApiClient) -> Result<Value, ApiError> {
        require_body(
            api.get("/step-records/status-options", &[]).await?,
            "status options",
        )
    }

    pub async fn overdue(api: &ApiClient) -> Result<Value, ApiError> {
        require_body(api.get("/step-records/overdue", &[]).await?, "overdue records")
    }

    pub async fn statistics(api: &ApiClient) -> Result<Value, ApiError> {
        require_body(
            api.get("/step-records/statistics", &[]).await?,
            "step statistics",
        )
    }
}

/// Document endpoints (`/documents/*`).
pub mod documents {
    use super::*;
    use reqwest::multipart;

    pub async fn list(api: &ApiClient, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        require_body(api.get("/documents", params).await?, "documents")
    }

    pub async fn get(api: &ApiClient, id: i64) -> Result<Value, ApiError> {
        require_body(api.get(&format!("/documents/{id}"), &[]).await?, "document")
    }

    /// Upload a document as a multipart form.
    pub async fn upload(api: &ApiClient, form: multipart::Form) -> Result<Value, ApiError> {
        require_body(api.upload("/documents/upload", form).await?, "uploaded document")
    }

    pub async fn update(api: &ApiClient, id: i64, data: Value) -> Result<Value, ApiError> {
        require_body(
            api.put(&format!("/documents/{id}"), Some(data)).await?,
            "updated document",
        )
    }

    pub async fn delete(api: &ApiClient, id: i64) -> Result<Option<Value>, ApiError> {
        api.delete(&format!("/documents/{id}")).await
    }

    /// Direct download URL for a document; the caller opens it, the
    /// gateway does not stream file bodies.
    #[must_use]
    pub fn download_url(api: &ApiClient, id: i64) -> String {
        api.url_for(&format!("/documents/{id}/download"))
    }

    pub async fn for_step_record(api: &ApiClient, step_record_id: i64) -> Result<Value, ApiError> {
        require_body(
            api.get(&format!("/documents/step-record/{step_record_id}"), &[])
                .await?,
            "step record documents",
        )
    }

    pub async fn types(api: &ApiClient) -> Result<Value, ApiError> {
        require_body(api.get("/documents/types", &[]).await?, "document types")
    }

    pub async fn statistics(api: &ApiClient) -> Result<Value, ApiError> {
        require_body(
            api.get("/documents/statistics", &[]).await?,
            "document statistics",
        )
    }
}

/// Aggregate dashboard endpoints (`/dashboard/*`).
pub mod dashboard {
    use super::*;

    /// Typed overview counters (properties, steps, documents, users).
    pub async fn overview(api: &ApiClient) -> Result<DashboardOverview, ApiError> {
        let body = api.get("/dashboard/overview", &[]).await?;
        decode(require_body(body, "dashboard overview")?)
    }

    pub async fn properties_by_status(api: &ApiClient) -> Result<Value, ApiError> {
        require_body(
            api.get("/dashboard/properties-by-status", &[]).await?,
            "properties by status",
        )
    }

    pub async fn properties_by_neighborhood(api: &ApiClient) -> Result<Value, ApiError> {
        require_body(
            api.get("/dashboard/properties-by-neighborhood", &[]).await?,
            "properties by neighborhood",
        )
    }

    pub async fn steps_progress(api: &ApiClient) -> Result<Value, ApiError> {
        require_body(api.get("/dashboard/steps-progress", &[]).await?, "steps progress")
    }

    pub async fn monthly_progress(api: &ApiClient) -> Result<Value, ApiError> {
        require_body(
            api.get("/dashboard/monthly-progress", &[]).await?,
            "monthly progress",
        )
    }

    pub async fn overdue_steps(api: &ApiClient) -> Result<Value, ApiError> {
        require_body(api.get("/dashboard/overdue-steps", &[]).await?, "overdue steps")
    }

    pub async fn recent_activities(
        api: &ApiClient,
        params: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        require_body(
            api.get("/dashboard/recent-activities", params).await?,
            "recent activities",
        )
    }

    pub async fn performance_metrics(api: &ApiClient) -> Result<Value, ApiError> {
        require_body(
            api.get("/dashboard/performance-metrics", &[]).await?,
            "performance metrics",
        )
    }
}
