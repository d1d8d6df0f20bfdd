use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::middleware::{found, AUTH_ERROR_PATH};
use crate::session::{clear_session_cookies, cookie_value, ACCESS_TOKEN_COOKIE};
use crate::state::AppState;

/// POST /auth/signout - revoke the session, clear cookies, go home
///
/// Without an access token there is nothing to revoke and the request
/// succeeds. A failed revocation sends the browser to the error page and
/// leaves the cookies alone.
pub async fn signout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(token) = cookie_value(&jar, ACCESS_TOKEN_COOKIE) {
        if let Err(e) = state.sessions.sign_out(token).await {
            tracing::error!("Sign-out failed: {}", e);
            return found(AUTH_ERROR_PATH);
        }
    }

    let jar = clear_session_cookies(jar, state.cookie_options());
    (jar, found("/")).into_response()
}
