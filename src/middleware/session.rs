use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use url::form_urlencoded;

use super::response::found;
use crate::config::SessionConfig;
use crate::session::SessionState;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/login";
pub const AUTH_ERROR_PATH: &str = "/auth/error";

const STATIC_PREFIXES: [&str; 4] = ["/_next/static/", "/_next/image", "/favicon.ico", "/static/"];
const STATIC_EXTENSIONS: [&str; 7] = [".svg", ".png", ".jpg", ".jpeg", ".gif", ".webp", ".ico"];

/// What the middleware decided for a request before any collaborator call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Forward untouched
    PassThrough,
    /// Secondary-domain root, redirect to the configured path
    HostRedirect(String),
    /// Protected path, needs a session
    Protected,
}

/// Ordered matching; the first rule that applies wins
///
/// `host` is the lowercased request host without port, see [`request_host`].
pub fn classify(config: &SessionConfig, host: Option<&str>, path: &str) -> Route {
    if is_static_asset(path) {
        return Route::PassThrough;
    }

    if path == "/" {
        if let Some(secondary) = config.secondary_host.as_deref() {
            if host == Some(secondary) {
                return Route::HostRedirect(config.secondary_host_path.clone());
            }
        }
    }

    if config
        .protected_prefixes
        .iter()
        .any(|prefix| matches_prefix(path, prefix))
    {
        return Route::Protected;
    }

    Route::PassThrough
}

pub fn is_static_asset(path: &str) -> bool {
    if STATIC_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return true;
    }
    let lower = path.to_ascii_lowercase();
    STATIC_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// `/dashboard` matches `/dashboard` and `/dashboard/...`, not `/dashboards`
pub fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Lowercased request host without port.
///
/// Reads the `Host` header, falling back to the URI authority that HTTP/2
/// requests carry as `:authority`.
pub fn request_host(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let host = match headers.get(header::HOST).and_then(|v| v.to_str().ok()) {
        Some(value) => value,
        None => uri.authority()?.host(),
    };
    let host = strip_port(host.trim());
    if host.is_empty() {
        return None;
    }
    Some(host.to_ascii_lowercase())
}

/// `example.com:443` -> `example.com`, `[::1]:80` -> `[::1]`; bare IPv6 is left alone
fn strip_port(host: &str) -> &str {
    if let Some(end) = host.rfind(']') {
        return &host[..=end];
    }
    match host.split_once(':') {
        Some((name, port)) if !port.contains(':') => name,
        _ => host,
    }
}

fn login_redirect(path: &str) -> String {
    let next: String = form_urlencoded::byte_serialize(path.as_bytes()).collect();
    format!("{}?next={}", LOGIN_PATH, next)
}

/// Host rewriting and session gating for protected sections.
///
/// Authenticated requests get a `SessionUser` extension and, when the auth
/// service rotated the tokens, fresh session cookies on the response.
pub async fn session_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let host = request_host(request.headers(), request.uri());

    match classify(&state.config.session, host.as_deref(), &path) {
        Route::PassThrough => next.run(request).await,
        Route::HostRedirect(location) => {
            tracing::debug!("Secondary host root, redirecting to {}", location);
            found(location)
        }
        Route::Protected => {
            let cookies = CookieJar::from_headers(request.headers());
            match state.sessions.refresh(&cookies).await {
                Ok(SessionState::Authenticated { user, refreshed }) => {
                    tracing::debug!("Session valid for user {} on {}", user.id, path);
                    request.extensions_mut().insert(user);
                    let response = next.run(request).await;
                    match refreshed {
                        Some(tokens) => {
                            let jar = tokens.add_to(CookieJar::new(), state.cookie_options());
                            (jar, response).into_response()
                        }
                        None => response,
                    }
                }
                Ok(SessionState::Anonymous) => {
                    tracing::debug!("No session for protected path {}", path);
                    found(login_redirect(&path))
                }
                Err(e) => {
                    tracing::error!("Session refresh failed for {}: {}", path, e);
                    found(AUTH_ERROR_PATH)
                }
            }
        }
    }
}
