use axum::{
    body::Bytes,
    extract::{Path, Query, State},
};
use std::collections::HashMap;

use super::CrmResult;
use crate::crm::CrmEntity;
use crate::state::AppState;

const ENTITY: CrmEntity = CrmEntity::Contact;

/// GET /contacts - page of contacts (`offset`, `maxSize`, `orderBy`, `order`)
pub async fn index(State(state): State<AppState>, Query(params): Query<HashMap<String, String>>) -> CrmResult {
    super::list(&state, ENTITY, &params).await
}

/// POST /contacts - create a contact from the JSON body
pub async fn create(State(state): State<AppState>, body: Bytes) -> CrmResult {
    super::create(&state, ENTITY, &body).await
}

/// GET /contacts/:id - contact exactly as the CRM returns it
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> CrmResult {
    super::show(&state, ENTITY, &id).await
}

/// PUT /contacts/:id - forward the JSON body as an update
pub async fn put(State(state): State<AppState>, Path(id): Path<String>, body: Bytes) -> CrmResult {
    super::update(&state, ENTITY, &id, &body).await
}

/// DELETE /contacts/:id - `{"success": true}` once the CRM confirms
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> CrmResult {
    super::remove(&state, ENTITY, &id).await
}
