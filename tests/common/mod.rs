#![allow(dead_code)]

use std::collections::HashMap;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::body::{to_bytes, Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};
use tower::ServiceExt;

use folio_api::config::AppConfig;
use folio_api::crm::{CrmClient, CrmEntity, CrmError, PaginationQuery};
use folio_api::oauth::{OAuthError, TikTokToken, TokenExchange};
use folio_api::session::{cookie_value, SessionError, SessionProvider, SessionState, ACCESS_TOKEN_COOKIE};
use folio_api::{app, AppState};

// ---------------------------------------------------------------------------
// Spawned server
// ---------------------------------------------------------------------------

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_folio-api"));
        cmd.env("FOLIO_API_PORT", port.to_string())
            .env("FOLIO_API_HOST", "127.0.0.1")
            .env("NEXT_PUBLIC_SITE_URL", "https://folio.test")
            // Empty values win over .env and count as unset
            .env("CRM_BASE_URL", "")
            .env("CRM_API_KEY", "")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

// ---------------------------------------------------------------------------
// In-process app with mock collaborators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum CrmCall {
    Get(CrmEntity, String),
    List(CrmEntity, PaginationQuery),
    Create(CrmEntity, Value),
    Update(CrmEntity, String, Value),
    Delete(CrmEntity, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrmFailure {
    NotFound,
    Upstream,
    NotConfigured,
}

#[derive(Default)]
pub struct MockCrm {
    pub calls: Mutex<Vec<CrmCall>>,
    pub failure: Option<CrmFailure>,
}

impl MockCrm {
    pub fn failing(failure: CrmFailure) -> Self {
        Self { failure: Some(failure), ..Default::default() }
    }

    pub fn calls(&self) -> Vec<CrmCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The record the mock hands back for `id`
    pub fn record(entity: CrmEntity, id: &str) -> Value {
        json!({
            "id": id,
            "entity": entity.path(),
            "name": "Ada Lovelace",
            "emailAddress": "ada@example.com",
            "createdAt": "2024-01-02 03:04:05",
            "custom": { "tags": ["vip", "2024"], "score": 42.5, "archived": null }
        })
    }

    fn check(&self, entity: CrmEntity, id: &str) -> Result<(), CrmError> {
        match self.failure {
            None => Ok(()),
            Some(CrmFailure::NotFound) => Err(CrmError::NotFound { entity, id: id.to_string() }),
            Some(CrmFailure::Upstream) => Err(CrmError::Status { status: 502, body: "bad gateway".to_string() }),
            Some(CrmFailure::NotConfigured) => Err(CrmError::NotConfigured("CRM_BASE_URL")),
        }
    }
}

#[async_trait]
impl CrmClient for MockCrm {
    async fn get(&self, entity: CrmEntity, id: &str) -> Result<Value, CrmError> {
        self.calls.lock().unwrap().push(CrmCall::Get(entity, id.to_string()));
        self.check(entity, id)?;
        Ok(Self::record(entity, id))
    }

    async fn list(&self, entity: CrmEntity, query: &PaginationQuery) -> Result<Value, CrmError> {
        self.calls.lock().unwrap().push(CrmCall::List(entity, query.clone()));
        self.check(entity, "")?;
        Ok(json!({ "total": 1, "list": [Self::record(entity, "1")] }))
    }

    async fn create(&self, entity: CrmEntity, payload: Value) -> Result<Value, CrmError> {
        self.calls.lock().unwrap().push(CrmCall::Create(entity, payload.clone()));
        self.check(entity, "")?;
        let mut created = payload;
        created["id"] = json!("new-1");
        Ok(created)
    }

    async fn update(&self, entity: CrmEntity, id: &str, payload: Value) -> Result<Value, CrmError> {
        self.calls.lock().unwrap().push(CrmCall::Update(entity, id.to_string(), payload.clone()));
        self.check(entity, id)?;
        let mut updated = Self::record(entity, id);
        if let (Some(target), Value::Object(changes)) = (updated.as_object_mut(), payload) {
            target.extend(changes);
        }
        Ok(updated)
    }

    async fn delete(&self, entity: CrmEntity, id: &str) -> Result<(), CrmError> {
        self.calls.lock().unwrap().push(CrmCall::Delete(entity, id.to_string()));
        self.check(entity, id)
    }
}

pub struct MockSessions {
    pub state: SessionState,
    pub refresh_fails: bool,
    pub sign_out_fails: bool,
    pub signed_out: Mutex<Vec<String>>,
    pub refresh_calls: Mutex<usize>,
}

impl MockSessions {
    pub fn with_state(state: SessionState) -> Self {
        Self {
            state,
            refresh_fails: false,
            sign_out_fails: false,
            signed_out: Mutex::new(Vec::new()),
            refresh_calls: Mutex::new(0),
        }
    }

    pub fn anonymous() -> Self {
        Self::with_state(SessionState::Anonymous)
    }

    pub fn refresh_count(&self) -> usize {
        *self.refresh_calls.lock().unwrap()
    }
}

#[async_trait]
impl SessionProvider for MockSessions {
    async fn refresh(&self, cookies: &CookieJar) -> Result<SessionState, SessionError> {
        *self.refresh_calls.lock().unwrap() += 1;
        if self.refresh_fails {
            return Err(SessionError::Status { status: 503, body: "unavailable".to_string() });
        }
        // Anything authenticated needs at least an access token cookie
        if cookie_value(cookies, ACCESS_TOKEN_COOKIE).is_none() {
            return Ok(SessionState::Anonymous);
        }
        Ok(self.state.clone())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), SessionError> {
        self.signed_out.lock().unwrap().push(access_token.to_string());
        if self.sign_out_fails {
            return Err(SessionError::Status { status: 500, body: "boom".to_string() });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockTokens {
    pub fail: bool,
    /// Respond without `expires_in`
    pub no_expiry: bool,
    pub calls: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl TokenExchange for MockTokens {
    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TikTokToken, OAuthError> {
        self.calls.lock().unwrap().push((code.to_string(), redirect_uri.to_string()));
        if self.fail {
            return Err(OAuthError::Provider {
                error: "invalid_grant".to_string(),
                description: "expired".to_string(),
            });
        }
        Ok(TikTokToken {
            access_token: "act.test".to_string(),
            refresh_token: Some("rft.test".to_string()),
            open_id: Some("open-1".to_string()),
            scope: Some("user.info.basic,video.list".to_string()),
            expires_in: if self.no_expiry { None } else { Some(86400) },
        })
    }
}

pub fn config_with(pairs: &[(&str, &str)]) -> AppConfig {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| map.get(key).cloned())
}

pub struct TestApp {
    pub router: Router,
    pub crm: Arc<MockCrm>,
    pub sessions: Arc<MockSessions>,
    pub tokens: Arc<MockTokens>,
}

impl TestApp {
    pub fn new(config: AppConfig, crm: MockCrm, sessions: MockSessions, tokens: MockTokens) -> Self {
        let crm = Arc::new(crm);
        let sessions = Arc::new(sessions);
        let tokens = Arc::new(tokens);
        let state = AppState::new(config, crm.clone(), sessions.clone(), tokens.clone());
        Self { router: app(state), crm, sessions, tokens }
    }

    /// Default config, working CRM, no session
    pub fn basic() -> Self {
        Self::with_crm(MockCrm::default())
    }

    pub fn with_crm(crm: MockCrm) -> Self {
        Self::new(config_with(&[]), crm, MockSessions::anonymous(), MockTokens::default())
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        Ok(TestResponse { status, headers, body })
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.send(Request::get(uri).body(Body::empty())?).await
    }

    pub async fn json(&self, method: &str, uri: &str, body: &str) -> Result<TestResponse> {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))?,
        )
        .await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get("location").and_then(|v| v.to_str().ok())
    }

    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect()
    }
}
