use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use super::{OAuthError, DEFAULT_TOKEN_MAX_AGE_SECS, TIKTOK_TOKEN_URL};
use crate::config::TikTokConfig;

/// Token issued by TikTok for an authorization code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TikTokToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub open_id: Option<String>,
    pub scope: Option<String>,
    /// Seconds until the access token expires, when TikTok reports it
    pub expires_in: Option<i64>,
}

impl TikTokToken {
    /// Lifetime for the token cookie; missing or non-positive expiry falls back to a day
    pub fn cookie_max_age_secs(&self) -> i64 {
        self.expires_in
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TOKEN_MAX_AGE_SECS)
    }
}

/// Raw token endpoint body; errors come back as 200 with `error` set
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    open_id: Option<String>,
    scope: Option<String>,
    expires_in: Option<i64>,
    error: Option<String>,
    error_description: Option<String>,
}

#[async_trait]
pub trait TokenExchange: Send + Sync {
    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TikTokToken, OAuthError>;
}

pub struct TikTokTokenClient {
    client: Client,
    client_key: Option<String>,
    client_secret: Option<String>,
    token_url: String,
}

impl TikTokTokenClient {
    pub fn new(config: &TikTokConfig) -> Self {
        Self {
            client: Client::new(),
            client_key: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token_url: TIKTOK_TOKEN_URL.to_string(),
        }
    }
}

#[async_trait]
impl TokenExchange for TikTokTokenClient {
    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TikTokToken, OAuthError> {
        let client_key = self.client_key.as_deref().ok_or(OAuthError::MissingClientId)?;
        let client_secret = self
            .client_secret
            .as_deref()
            .ok_or(OAuthError::MissingClientSecret)?;

        let response = self
            .client
            .post(&self.token_url)
            .timeout(Duration::from_secs(15))
            .form(&[
                ("client_key", client_key),
                ("client_secret", client_secret),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OAuthError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body: TokenResponse = response.json().await?;
        into_token(body)
    }
}

fn into_token(body: TokenResponse) -> Result<TikTokToken, OAuthError> {
    if let Some(error) = body.error.filter(|e| !e.is_empty()) {
        return Err(OAuthError::Provider {
            error,
            description: body.error_description.unwrap_or_default(),
        });
    }

    let access_token = body.access_token.ok_or_else(|| OAuthError::Provider {
        error: "missing_access_token".to_string(),
        description: "token response had no access_token".to_string(),
    })?;

    info!("TikTok token issued for open_id {:?}", body.open_id);

    Ok(TikTokToken {
        access_token,
        refresh_token: body.refresh_token,
        open_id: body.open_id,
        scope: body.scope,
        expires_in: body.expires_in,
    })
}
