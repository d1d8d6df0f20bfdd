// GoTrue-compatible auth service client
use async_trait::async_trait;
use axum_extra::extract::cookie::CookieJar;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::{
    cookie_value, SessionError, SessionProvider, SessionState, SessionTokens, SessionUser,
    ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE,
};
use crate::config::AuthConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: SessionUser,
}

pub struct GoTrueSessionProvider {
    client: Client,
    base_url: Option<String>,
    anon_key: Option<String>,
}

impl GoTrueSessionProvider {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.url.clone(),
            anon_key: config.anon_key.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, SessionError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or(SessionError::NotConfigured("AUTH_URL"))?;
        Ok(Url::parse(&format!("{}/auth/v1/{}", base, path))?)
    }

    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, SessionError> {
        let anon_key = self
            .anon_key
            .as_deref()
            .ok_or(SessionError::NotConfigured("AUTH_ANON_KEY"))?;
        Ok(self
            .client
            .request(method, url)
            .header("apikey", anon_key)
            .timeout(REQUEST_TIMEOUT))
    }

    /// `Ok(None)` when the token is rejected
    async fn fetch_user(&self, access_token: &str) -> Result<Option<SessionUser>, SessionError> {
        let url = self.endpoint("user")?;
        let response = self
            .request(Method::GET, url)?
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(Some(response.json::<SessionUser>().await?)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status => Err(SessionError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// `Ok(None)` when the refresh token is rejected
    async fn refresh_tokens(&self, refresh_token: &str) -> Result<Option<TokenResponse>, SessionError> {
        let mut url = self.endpoint("token")?;
        url.query_pairs_mut().append_pair("grant_type", "refresh_token");

        let response = self
            .request(Method::POST, url)?
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(Some(response.json::<TokenResponse>().await?)),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => Ok(None),
            status => Err(SessionError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl SessionProvider for GoTrueSessionProvider {
    async fn refresh(&self, cookies: &CookieJar) -> Result<SessionState, SessionError> {
        let access_token = cookie_value(cookies, ACCESS_TOKEN_COOKIE);
        let refresh_token = cookie_value(cookies, REFRESH_TOKEN_COOKIE);

        if access_token.is_none() && refresh_token.is_none() {
            return Ok(SessionState::Anonymous);
        }

        if let Some(token) = access_token {
            if let Some(user) = self.fetch_user(token).await? {
                return Ok(SessionState::Authenticated { user, refreshed: None });
            }
            debug!("Access token rejected, attempting refresh");
        }

        let Some(refresh_token) = refresh_token else {
            return Ok(SessionState::Anonymous);
        };

        match self.refresh_tokens(refresh_token).await? {
            Some(tokens) => Ok(SessionState::Authenticated {
                user: tokens.user,
                refreshed: Some(SessionTokens {
                    access_token: tokens.access_token,
                    refresh_token: tokens.refresh_token,
                }),
            }),
            None => {
                warn!("Refresh token rejected by auth service");
                Ok(SessionState::Anonymous)
            }
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), SessionError> {
        let url = self.endpoint("logout")?;
        let response = self
            .request(Method::POST, url)?
            .bearer_auth(access_token)
            .json(&json!({}))
            .send()
            .await?;

        let status = response.status();
        // An already-expired token has nothing left to revoke
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        Err(SessionError::Status {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        })
    }
}
