// EspoCRM REST v1 client
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{CrmClient, CrmEntity, CrmError, PaginationQuery};
use crate::config::CrmConfig;

const API_KEY_HEADER: &str = "X-Api-Key";

pub struct EspoCrmClient {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl EspoCrmClient {
    /// Build the client. Missing configuration is reported per call, so the
    /// server can start without CRM credentials.
    pub fn new(config: &CrmConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// `{base}/api/v1/{Entity}[/{id}]`, with the id percent-encoded as a path segment
    pub fn entity_url(&self, entity: CrmEntity, id: Option<&str>) -> Result<Url, CrmError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or(CrmError::NotConfigured("CRM_BASE_URL"))?;

        let mut url = Url::parse(base)?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
            segments.pop_if_empty().extend(["api", "v1", entity.path()]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, CrmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CrmError::NotConfigured("CRM_API_KEY"))?;

        debug!("CRM {} {}", method, url.path());

        Ok(self
            .client
            .request(method, url)
            .header(API_KEY_HEADER, api_key)
            .timeout(self.timeout))
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        entity: CrmEntity,
        id: Option<&str>,
    ) -> Result<Value, CrmError> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(CrmError::NotFound { entity, id: id.to_string() });
            }
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(CrmError::Status { status: status.as_u16(), body });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CrmClient for EspoCrmClient {
    async fn get(&self, entity: CrmEntity, id: &str) -> Result<Value, CrmError> {
        let url = self.entity_url(entity, Some(id))?;
        let builder = self.request(Method::GET, url)?;
        self.send(builder, entity, Some(id)).await
    }

    async fn list(&self, entity: CrmEntity, query: &PaginationQuery) -> Result<Value, CrmError> {
        let url = self.entity_url(entity, None)?;
        let builder = self.request(Method::GET, url)?.query(&query.to_query_pairs());
        self.send(builder, entity, None).await
    }

    async fn create(&self, entity: CrmEntity, payload: Value) -> Result<Value, CrmError> {
        let url = self.entity_url(entity, None)?;
        let builder = self.request(Method::POST, url)?.json(&payload);
        self.send(builder, entity, None).await
    }

    async fn update(&self, entity: CrmEntity, id: &str, payload: Value) -> Result<Value, CrmError> {
        let url = self.entity_url(entity, Some(id))?;
        let builder = self.request(Method::PUT, url)?.json(&payload);
        self.send(builder, entity, Some(id)).await
    }

    async fn delete(&self, entity: CrmEntity, id: &str) -> Result<(), CrmError> {
        let url = self.entity_url(entity, Some(id))?;
        let builder = self.request(Method::DELETE, url)?;
        self.send(builder, entity, Some(id)).await.map(|_| ())
    }
}
