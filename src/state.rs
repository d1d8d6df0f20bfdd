use std::sync::Arc;

use crate::config::AppConfig;
use crate::crm::{CrmClient, EspoCrmClient};
use crate::oauth::{TikTokTokenClient, TokenExchange};
use crate::session::{CookieOptions, GoTrueSessionProvider, SessionProvider};

/// Shared, read-only state handed to every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub crm: Arc<dyn CrmClient>,
    pub sessions: Arc<dyn SessionProvider>,
    pub tokens: Arc<dyn TokenExchange>,
}

impl AppState {
    /// Wire the HTTP collaborators from configuration
    pub fn from_config(config: AppConfig) -> Self {
        let crm = Arc::new(EspoCrmClient::new(&config.crm));
        let sessions = Arc::new(GoTrueSessionProvider::new(&config.auth));
        let tokens = Arc::new(TikTokTokenClient::new(&config.tiktok));
        Self::new(config, crm, sessions, tokens)
    }

    pub fn new(
        config: AppConfig,
        crm: Arc<dyn CrmClient>,
        sessions: Arc<dyn SessionProvider>,
        tokens: Arc<dyn TokenExchange>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            crm,
            sessions,
            tokens,
        }
    }

    pub fn cookie_options(&self) -> CookieOptions {
        CookieOptions {
            secure: self.config.is_production(),
        }
    }
}
