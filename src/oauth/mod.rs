//! TikTok OAuth glue: authorization redirect and code exchange.

pub mod token;

use url::form_urlencoded;
use uuid::Uuid;

use crate::config::{SiteConfig, TikTokConfig};

pub use token::{TikTokToken, TikTokTokenClient, TokenExchange};

pub const TIKTOK_AUTHORIZE_URL: &str = "https://www.tiktok.com/v2/auth/authorize/";
pub const TIKTOK_TOKEN_URL: &str = "https://open.tiktokapis.com/v2/oauth/token/";

/// Cookie holding the anti-forgery state between redirect and callback
pub const STATE_COOKIE: &str = "folio-oauth-state";
pub const STATE_MAX_AGE_SECS: i64 = 600;

/// Cookie holding the TikTok access token after a successful callback
pub const TIKTOK_TOKEN_COOKIE: &str = "folio-tiktok-token";

/// Token cookie lifetime when the token response carries no usable `expires_in`
pub const DEFAULT_TOKEN_MAX_AGE_SECS: i64 = 60 * 60 * 24;

pub const CALLBACK_PATH: &str = "/auth/tiktok/callback";

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("TikTok client ID not configured")]
    MissingClientId,
    #[error("TikTok client secret not configured")]
    MissingClientSecret,
    #[error("Token request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Token endpoint responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("TikTok rejected the code: {error} ({description})")]
    Provider { error: String, description: String },
}

/// A ready-to-send authorization redirect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
}

/// Fresh random anti-forgery state
pub fn generate_state() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn callback_url(site: &SiteConfig) -> String {
    format!("{}{}", site.auth_base_url, CALLBACK_PATH)
}

/// Authorization URL for `state`.
///
/// `redirect_uri` and `state` are percent-encoded; `scope` is passed as-is so
/// the comma-separated scope list stays readable.
pub fn authorization_url(
    tiktok: &TikTokConfig,
    site: &SiteConfig,
    state: &str,
) -> Result<String, OAuthError> {
    let client_key = tiktok
        .client_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(OAuthError::MissingClientId)?;

    Ok(format!(
        "{}?client_key={}&response_type=code&redirect_uri={}&scope={}&state={}",
        TIKTOK_AUTHORIZE_URL,
        encode(client_key),
        encode(&callback_url(site)),
        tiktok.scope,
        encode(state),
    ))
}

/// Build the redirect with a freshly generated state
pub fn authorization_request(
    tiktok: &TikTokConfig,
    site: &SiteConfig,
) -> Result<AuthorizationRequest, OAuthError> {
    let state = generate_state();
    let url = authorization_url(tiktok, site, &state)?;
    Ok(AuthorizationRequest { url, state })
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
