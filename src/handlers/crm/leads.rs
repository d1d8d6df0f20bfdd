use axum::{
    body::Bytes,
    extract::{Path, Query, State},
};
use std::collections::HashMap;

use super::CrmResult;
use crate::crm::CrmEntity;
use crate::state::AppState;

const ENTITY: CrmEntity = CrmEntity::Lead;

/// GET /leads - page of leads, defaults `offset=0&maxSize=20&orderBy=createdAt&order=desc`
pub async fn index(State(state): State<AppState>, Query(params): Query<HashMap<String, String>>) -> CrmResult {
    super::list(&state, ENTITY, &params).await
}

/// POST /leads
pub async fn create(State(state): State<AppState>, body: Bytes) -> CrmResult {
    super::create(&state, ENTITY, &body).await
}

/// GET /leads/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> CrmResult {
    super::show(&state, ENTITY, &id).await
}

/// PUT /leads/:id
pub async fn put(State(state): State<AppState>, Path(id): Path<String>, body: Bytes) -> CrmResult {
    super::update(&state, ENTITY, &id, &body).await
}

/// DELETE /leads/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> CrmResult {
    super::remove(&state, ENTITY, &id).await
}
