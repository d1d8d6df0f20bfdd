use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::sitemap;
use crate::state::AppState;

/// GET /sitemap.xml - fixed page list stamped with the current time
pub async fn sitemap_xml(State(state): State<AppState>) -> impl IntoResponse {
    let entries = sitemap::entries(&state.config.site.site_url, chrono::Utc::now());
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        sitemap::to_xml(&entries),
    )
}
