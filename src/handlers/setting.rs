//! Settings singleton handlers: get and update, no id in the path.

use super::item_payload;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::SETTINGS;
use crate::response;
use crate::service::SingletonService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn read_setting(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let (_, row) = SingletonService::get(state.store.as_ref(), &SETTINGS).await?;
    Ok(response::success(SETTINGS.messages.fetched, item_payload(&SETTINGS, row)))
}

pub async fn update_setting(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let row = SingletonService::update(state.store.as_ref(), &SETTINGS, body).await?;
    Ok(response::success(SETTINGS.messages.updated, item_payload(&SETTINGS, row)))
}
