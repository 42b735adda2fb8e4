//! Collection handlers: list, get, create, update, delete.

use super::{item_payload, present};
use crate::error::AppError;
use crate::extractors::{JsonBody, PathParams};
use crate::model::{collection_by_path, ResourceSpec};
use crate::response::{self, Empty};
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

fn collection(segment: &str) -> Result<&'static ResourceSpec, AppError> {
    collection_by_path(segment).ok_or_else(|| AppError::NotFound(format!("unknown resource '{}'", segment)))
}

pub async fn list(
    State(state): State<AppState>,
    PathParams(segment): PathParams<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let spec = collection(&segment)?;
    let page = CrudService::list(state.store.as_ref(), spec, &params).await?;
    let items: Vec<Value> = page.items.into_iter().map(|r| present(spec, r)).collect();
    let mut data = Map::new();
    data.insert(spec.path_segment.to_string(), Value::Array(items));
    let pagination = serde_json::to_value(&page.pagination).map_err(|e| AppError::Internal(e.to_string()))?;
    data.insert("pagination".to_string(), pagination);
    Ok(response::success(spec.messages.listed, Value::Object(data)))
}

pub async fn read(
    State(state): State<AppState>,
    PathParams((segment, id)): PathParams<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let spec = collection(&segment)?;
    let (_, row) = CrudService::find(state.store.as_ref(), spec, &id).await?;
    Ok(response::success(spec.messages.fetched, item_payload(spec, row)))
}

pub async fn create(
    State(state): State<AppState>,
    PathParams(segment): PathParams<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let spec = collection(&segment)?;
    let row = CrudService::create(state.store.as_ref(), spec, body).await?;
    tracing::info!(resource = spec.path_segment, id = ?row.get("id"), "created");
    Ok(response::created(spec.messages.created, item_payload(spec, row)))
}

pub async fn update(
    State(state): State<AppState>,
    PathParams((segment, id)): PathParams<(String, String)>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let spec = collection(&segment)?;
    let row = CrudService::update(state.store.as_ref(), spec, &id, body).await?;
    Ok(response::success(spec.messages.updated, item_payload(spec, row)))
}

pub async fn delete(
    State(state): State<AppState>,
    PathParams((segment, id)): PathParams<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let spec = collection(&segment)?;
    CrudService::delete(state.store.as_ref(), spec, &id).await?;
    tracing::info!(resource = spec.path_segment, id = %id, "deleted");
    Ok(response::success(spec.messages.deleted, Empty::default()))
}
