//! CRM client adapter.
//!
//! Records are opaque JSON owned by the CRM; this layer only moves ids and
//! payloads back and forth.

pub mod espo;
pub mod pagination;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub use espo::EspoCrmClient;
pub use pagination::{PaginationQuery, SortOrder};

/// CRM entity types the dashboard proxies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrmEntity {
    Contact,
    Lead,
}

impl CrmEntity {
    /// Path segment used by the CRM REST API
    pub fn path(&self) -> &'static str {
        match self {
            CrmEntity::Contact => "Contact",
            CrmEntity::Lead => "Lead",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CrmEntity::Contact => "contact",
            CrmEntity::Lead => "lead",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            CrmEntity::Contact => "contacts",
            CrmEntity::Lead => "leads",
        }
    }
}

impl fmt::Display for CrmEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CrmEntity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "contact" | "contacts" => Ok(CrmEntity::Contact),
            "lead" | "leads" => Ok(CrmEntity::Lead),
            other => Err(format!("unknown CRM entity '{}'", other)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrmError {
    #[error("CRM is not configured: {0} missing")]
    NotConfigured(&'static str),
    #[error("Invalid CRM URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("CRM request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{entity} '{id}' not found")]
    NotFound { entity: CrmEntity, id: String },
    #[error("CRM responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid CRM response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// CRUD operations against the external CRM
#[async_trait]
pub trait CrmClient: Send + Sync {
    async fn get(&self, entity: CrmEntity, id: &str) -> Result<Value, CrmError>;

    async fn list(&self, entity: CrmEntity, query: &PaginationQuery) -> Result<Value, CrmError>;

    async fn create(&self, entity: CrmEntity, payload: Value) -> Result<Value, CrmError>;

    async fn update(&self, entity: CrmEntity, id: &str, payload: Value) -> Result<Value, CrmError>;

    async fn delete(&self, entity: CrmEntity, id: &str) -> Result<(), CrmError>;
}
