// Route table and layer chain
//
// Layers run outside-in: trace -> CORS -> session middleware -> router.
// The session middleware short-circuits with a redirect before any handler
// runs when a request hits the secondary-domain root or a protected path
// without a session.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::handlers::{auth, crm, dashboard, site};
use crate::middleware::{session_middleware, ApiResponse};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(site_routes())
        .merge(auth_routes())
        .merge(crm_routes())
        // Session protected
        .route("/dashboard", get(dashboard::dashboard_get))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn site_routes() -> Router<AppState> {
    Router::new()
        .route("/sitemap.xml", get(site::sitemap_xml))
        .route("/api/profile", get(site::profile_get))
        .route("/api/about", get(site::about_get))
        .route("/api/placeholder", get(site::placeholder_png))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/tiktok", get(auth::tiktok_authorize))
        .route("/auth/tiktok/callback", get(auth::tiktok_callback))
        .route("/auth/signout", post(auth::signout))
}

fn crm_routes() -> Router<AppState> {
    use crm::{contacts, leads};

    Router::new()
        .route("/contacts", get(contacts::index).post(contacts::create))
        .route(
            "/contacts/:id",
            get(contacts::get).put(contacts::put).delete(contacts::delete),
        )
        .route("/leads", get(leads::index).post(leads::create))
        .route(
            "/leads/:id",
            get(leads::get).put(leads::put).delete(leads::delete),
        )
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Folio API",
            "version": version,
            "description": "Portfolio and dashboard backend",
            "endpoints": {
                "health": "/health (public)",
                "sitemap": "/sitemap.xml (public)",
                "profile": "/api/profile, /api/about (public)",
                "placeholder": "/api/placeholder (public)",
                "contacts": "/contacts[/:id] (CRM proxy)",
                "leads": "/leads[/:id] (CRM proxy)",
                "oauth": "/auth/tiktok, /auth/tiktok/callback",
                "signout": "/auth/signout (POST)",
                "dashboard": "/dashboard (session required)",
            }
        }
    }))
}

async fn health() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
