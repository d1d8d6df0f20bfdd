use axum::extract::Extension;
use serde_json::{json, Value};

use crate::middleware::ApiResponse;
use crate::session::SessionUser;

/// GET /dashboard - signed-in user and the dashboard's API surface
///
/// Only reachable through the session middleware, which injects `SessionUser`.
pub async fn dashboard_get(Extension(user): Extension<SessionUser>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "user": user,
        "resources": {
            "contacts": "/contacts[/:id]",
            "leads": "/leads[/:id]",
            "tiktok": "/auth/tiktok",
            "signout": "/auth/signout"
        }
    }))
}
