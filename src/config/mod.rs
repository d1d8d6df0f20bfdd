use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub tiktok: TikTokConfig,
    pub crm: CrmConfig,
    pub auth: AuthConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Public base URL of the site, without trailing slash
    pub site_url: String,
    /// Base URL the OAuth callbacks are served from
    pub auth_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TikTokConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub scope: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub protected_prefixes: Vec<String>,
    pub secondary_host: Option<String>,
    pub secondary_host_path: String,
}

pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIKTOK_SCOPE: &str = "user.info.basic,video.list";

impl AppConfig {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = match get("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let port = get("FOLIO_API_PORT")
            .or_else(|| get("PORT"))
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(3000);

        let site_url = trim_base_url(&get("NEXT_PUBLIC_SITE_URL").unwrap_or_else(|| DEFAULT_SITE_URL.to_string()));
        let auth_base_url = get("NEXTAUTH_URL")
            .map(|u| trim_base_url(&u))
            .unwrap_or_else(|| site_url.clone());

        let protected_prefixes = get("PROTECTED_PREFIXES")
            .map(|v| parse_prefixes(&v))
            .unwrap_or_else(|| vec!["/dashboard".to_string(), "/family".to_string()]);

        Self {
            environment,
            server: ServerConfig {
                host: get("FOLIO_API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port,
            },
            site: SiteConfig { site_url, auth_base_url },
            tiktok: TikTokConfig {
                client_id: get("TIKTOK_CLIENT_ID"),
                client_secret: get("TIKTOK_CLIENT_SECRET"),
                scope: DEFAULT_TIKTOK_SCOPE.to_string(),
            },
            crm: CrmConfig {
                base_url: get("CRM_BASE_URL").map(|u| trim_base_url(&u)),
                api_key: get("CRM_API_KEY"),
                timeout_secs: get("CRM_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(15),
            },
            auth: AuthConfig {
                url: get("AUTH_URL").map(|u| trim_base_url(&u)),
                anon_key: get("AUTH_ANON_KEY"),
            },
            session: SessionConfig {
                protected_prefixes,
                secondary_host: get("SECONDARY_HOST").map(|h| h.to_ascii_lowercase()),
                secondary_host_path: get("SECONDARY_HOST_PATH").unwrap_or_else(|| "/family".to_string()),
            },
        }
    }

    /// Default `tracing` filter directive when RUST_LOG is not set
    pub fn default_log_filter(&self) -> &'static str {
        match self.environment {
            Environment::Development => "folio_api=debug,tower_http=debug",
            Environment::Staging | Environment::Production => "folio_api=info,tower_http=info",
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn parse_prefixes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            let s = s.trim_end_matches('/');
            if s.starts_with('/') {
                s.to_string()
            } else {
                format!("/{}", s)
            }
        })
        .collect()
}
