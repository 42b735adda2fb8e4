//! Path parameters whose rejection is a not-found failure instead of axum's plain-text 400.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// A path segment that cannot be decoded (e.g. invalid UTF-8 after percent-decoding) names no resource.
#[derive(Debug)]
pub struct PathParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(PathParams(value)),
            Err(rejection) => {
                tracing::debug!(path = %parts.uri.path(), reason = %rejection.body_text(), "path rejected");
                Err(AppError::NotFound(format!("no route for {}", parts.uri.path())))
            }
        }
    }
}
