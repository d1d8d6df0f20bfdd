use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::{found, AUTH_ERROR_PATH};
use crate::oauth::{self, STATE_COOKIE, STATE_MAX_AGE_SECS, TIKTOK_TOKEN_COOKIE};
use crate::session::cookie_value;
use crate::state::AppState;

/// Where the browser lands after a successful TikTok connection
pub const CONNECTED_PATH: &str = "/dashboard";

/// GET /auth/tiktok - redirect to TikTok's authorization page
///
/// The anti-forgery state is random per request and parked in a short-lived
/// cookie for the callback to check.
pub async fn authorize(State(state): State<AppState>, jar: CookieJar) -> Response {
    let config = &state.config;
    match oauth::authorization_request(&config.tiktok, &config.site) {
        Ok(request) => {
            let cookie = state
                .cookie_options()
                .build(STATE_COOKIE, request.state, STATE_MAX_AGE_SECS);
            (jar.add(cookie), found(request.url)).into_response()
        }
        Err(e) => {
            tracing::error!("Cannot start TikTok OAuth: {}", e);
            ApiError::internal_server_error(e.to_string()).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// GET /auth/tiktok/callback - verify state, exchange the code, store the token cookie
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Response {
    if let Some(error) = query.error.as_deref() {
        tracing::warn!(
            "TikTok authorization denied: {} ({})",
            error,
            query.error_description.as_deref().unwrap_or("")
        );
        return found(AUTH_ERROR_PATH);
    }

    let expected = cookie_value(&jar, STATE_COOKIE);
    let (code, returned) = match (query.code.as_deref(), query.state.as_deref()) {
        (Some(code), Some(returned)) if !code.is_empty() => (code, returned),
        _ => {
            tracing::warn!("TikTok callback missing code or state");
            return found(AUTH_ERROR_PATH);
        }
    };

    if expected != Some(returned) {
        tracing::warn!("TikTok callback state mismatch");
        return found(AUTH_ERROR_PATH);
    }

    let redirect_uri = oauth::callback_url(&state.config.site);
    match state.tokens.exchange_code(code, &redirect_uri).await {
        Ok(token) => {
            let options = state.cookie_options();
            let max_age = token.cookie_max_age_secs();
            let jar = jar
                .add(options.expire(STATE_COOKIE))
                .add(options.build(TIKTOK_TOKEN_COOKIE, token.access_token, max_age));
            (jar, found(CONNECTED_PATH)).into_response()
        }
        Err(e) => {
            tracing::error!("TikTok code exchange failed: {}", e);
            found(AUTH_ERROR_PATH)
        }
    }
}
