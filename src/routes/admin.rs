//! Admin resource routes.
//! Collections share parameterized paths and resolve the resource by segment; the settings
//! singleton has static paths, which take precedence over `/:resource`.

use crate::error::AppError;
use crate::handlers::{create, delete, list, read, read_setting, update, update_setting};
use crate::state::AppState;
use axum::{
    http::{Method, Uri},
    routing::get,
    Router,
};

async fn unknown_route(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

/// A known path with an unsupported method is reported like an unknown route.
async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {} {}", method, uri.path()))
}

pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/settings", get(read_setting).put(update_setting))
        .route("/:resource", get(list).post(create))
        .route("/:resource/:id", get(read).put(update).delete(delete))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(unknown_route)
        .with_state(state)
}
