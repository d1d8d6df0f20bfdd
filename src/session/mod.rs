//! Session collaborator backed by the hosted auth service.
//!
//! The service owns users and tokens; this process only validates, refreshes
//! and revokes them on behalf of the browser.

pub mod cookies;
pub mod gotrue;

use async_trait::async_trait;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

pub use cookies::{cookie_value, CookieOptions};
pub use gotrue::GoTrueSessionProvider;

pub const ACCESS_TOKEN_COOKIE: &str = "folio-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "folio-refresh-token";

/// Lifetime of the session cookies; the auth service enforces token expiry
pub const SESSION_COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 7;

/// Authenticated user, injected into request extensions by the session middleware
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl SessionTokens {
    /// Store both tokens in `jar`
    pub fn add_to(self, jar: CookieJar, options: CookieOptions) -> CookieJar {
        jar.add(options.build(ACCESS_TOKEN_COOKIE, self.access_token, SESSION_COOKIE_MAX_AGE_SECS))
            .add(options.build(REFRESH_TOKEN_COOKIE, self.refresh_token, SESSION_COOKIE_MAX_AGE_SECS))
    }
}

/// Expire both session cookies
pub fn clear_session_cookies(jar: CookieJar, options: CookieOptions) -> CookieJar {
    jar.add(options.expire(ACCESS_TOKEN_COOKIE))
        .add(options.expire(REFRESH_TOKEN_COOKIE))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Valid session; `refreshed` carries rotated tokens when the access token had expired
    Authenticated {
        user: SessionUser,
        refreshed: Option<SessionTokens>,
    },
    Anonymous,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Auth service is not configured: {0} missing")]
    NotConfigured(&'static str),
    #[error("Invalid auth service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Auth service request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Auth service responded with status {status}: {body}")]
    Status { status: u16, body: String },
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Validate the session carried by the request cookies, refreshing it if needed
    async fn refresh(&self, cookies: &CookieJar) -> Result<SessionState, SessionError>;

    /// Revoke the session behind `access_token`
    async fn sign_out(&self, access_token: &str) -> Result<(), SessionError>;
}
