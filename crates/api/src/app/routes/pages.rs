//! Placeholder pages; the UI layer renders the real ones.

use axum::{extract::Extension, response::IntoResponse, Json};

use crate::context::SessionContext;

pub async fn home() -> impl IntoResponse {
    Json(serde_json::json!({ "page": "home" }))
}

pub async fn login() -> impl IntoResponse {
    Json(serde_json::json!({ "page": "login" }))
}

pub async fn dashboard(Extension(ctx): Extension<SessionContext>) -> impl IntoResponse {
    let user = ctx.user();
    Json(serde_json::json!({
        "page": "dashboard",
        "user_id": user.map(|u| u.id.to_string()),
        "email": user.and_then(|u| u.email.clone()),
    }))
}
