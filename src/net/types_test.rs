use super::*;

#[test]
fn user_deserializes_and_ignores_extra_fields() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 7,
        "name": "Maria Souza",
        "email": "maria@mogimirim.sp.gov.br",
        "role": "manager",
        "active": true,
        "created_at": "2025-01-15T12:00:00"
    }))
    .unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.role, "manager");
}

#[test]
fn login_response_message_is_optional() {
    let resp: LoginResponse = serde_json::from_value(serde_json::json!({
        "user": { "id": 1, "name": "Admin", "email": "a@b.c", "role": "admin" }
    }))
    .unwrap();
    assert!(resp.message.is_none());
    assert_eq!(resp.user.role, "admin");
}

#[test]
fn dashboard_overview_matches_backend_shape() {
    let overview: DashboardOverview = serde_json::from_value(serde_json::json!({
        "properties": {
            "total": 120,
            "pending": 40,
            "in_progress": 50,
            "municipal_registered": 20,
            "registry_completed": 10
        },
        "steps": { "total": 300, "active": 80, "completed": 200, "blocked": 20 },
        "documents": { "total": 75 },
        "users": { "total": 9 }
    }))
    .unwrap();
    assert_eq!(overview.properties.in_progress, 50);
    assert_eq!(overview.steps.blocked, 20);
    assert_eq!(overview.documents.total, 75);
    assert_eq!(overview.users.total, 9);
}
