// handlers/crm - CRM proxy routes
//
// Every handler makes one call to the CRM adapter and relays the JSON it gets
// back untouched. Any failure, including a malformed request body or a record
// the CRM reports as missing, is logged and answered with a flat 500.

pub mod contacts;
pub mod leads;

use axum::{body::Bytes, Json};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt::Display;

use crate::crm::{CrmEntity, PaginationQuery};
use crate::error::ApiError;
use crate::state::AppState;

pub type CrmResult = Result<Json<Value>, ApiError>;

/// Log the real cause, hand the client a fixed message
///
/// `subject` is the entity label, plural for list calls.
fn failure(action: &str, subject: &str, id: Option<&str>, err: impl Display) -> ApiError {
    match id {
        Some(id) => tracing::error!("Failed to {} {} '{}': {}", action, subject, id, err),
        None => tracing::error!("Failed to {} {}: {}", action, subject, err),
    }
    ApiError::internal_server_error(format!("Failed to {} {}", action, subject))
}

fn parse_body(body: &Bytes) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(body)
}

pub(crate) async fn show(state: &AppState, entity: CrmEntity, id: &str) -> CrmResult {
    state
        .crm
        .get(entity, id)
        .await
        .map(Json)
        .map_err(|e| failure("fetch", entity.label(), Some(id), e))
}

pub(crate) async fn list(state: &AppState, entity: CrmEntity, params: &HashMap<String, String>) -> CrmResult {
    let query = PaginationQuery::from_params(params);
    tracing::debug!("Listing {} records: {:?}", entity, query);
    state
        .crm
        .list(entity, &query)
        .await
        .map(Json)
        .map_err(|e| failure("list", entity.plural(), None, e))
}

pub(crate) async fn create(state: &AppState, entity: CrmEntity, body: &Bytes) -> CrmResult {
    let payload = parse_body(body).map_err(|e| failure("create", entity.label(), None, e))?;
    state
        .crm
        .create(entity, payload)
        .await
        .map(Json)
        .map_err(|e| failure("create", entity.label(), None, e))
}

pub(crate) async fn update(state: &AppState, entity: CrmEntity, id: &str, body: &Bytes) -> CrmResult {
    let payload = parse_body(body).map_err(|e| failure("update", entity.label(), Some(id), e))?;
    state
        .crm
        .update(entity, id, payload)
        .await
        .map(Json)
        .map_err(|e| failure("update", entity.label(), Some(id), e))
}

pub(crate) async fn remove(state: &AppState, entity: CrmEntity, id: &str) -> CrmResult {
    state
        .crm
        .delete(entity, id)
        .await
        .map(|_| Json(json!({ "success": true })))
        .map_err(|e| failure("delete", entity.label(), Some(id), e))
}
