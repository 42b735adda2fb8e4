//! Standard response envelope: `{status, message, data}` on success, `{status, message, error|errors}` on failure.

use crate::error::{AppError, ErrorKind};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const VALIDATION_MESSAGE: &str = "request parameter error";
pub const NOT_FOUND_MESSAGE: &str = "resource not found";
pub const SERVER_ERROR_MESSAGE: &str = "server error";

#[derive(Serialize, Debug)]
pub struct Success<T> {
    pub status: bool,
    pub message: String,
    pub data: T,
}

/// Serializes as `{}`.
#[derive(Serialize, Debug, Default)]
pub struct Empty {}

#[derive(Serialize, Debug)]
pub struct Failure {
    pub status: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn success<T: Serialize>(message: impl Into<String>, data: T) -> (StatusCode, Json<Success<T>>) {
    success_with(StatusCode::OK, message, data)
}

pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> (StatusCode, Json<Success<T>>) {
    success_with(StatusCode::CREATED, message, data)
}

pub fn success_with<T: Serialize>(
    code: StatusCode,
    message: impl Into<String>,
    data: T,
) -> (StatusCode, Json<Success<T>>) {
    (
        code,
        Json(Success {
            status: true,
            message: message.into(),
            data,
        }),
    )
}

/// Status code and body for an error, chosen by its kind.
pub fn failure_body(err: &AppError) -> (StatusCode, Failure) {
    match err.kind() {
        ErrorKind::Validation => {
            let messages = match err {
                AppError::Validation(messages) => messages.clone(),
                other => vec![other.to_string()],
            };
            (
                StatusCode::BAD_REQUEST,
                Failure {
                    status: false,
                    message: VALIDATION_MESSAGE,
                    errors: Some(messages),
                    error: None,
                },
            )
        }
        ErrorKind::NotFound => (
            StatusCode::NOT_FOUND,
            Failure {
                status: false,
                message: NOT_FOUND_MESSAGE,
                errors: None,
                error: Some(err.to_string()),
            },
        ),
        ErrorKind::Unknown => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Failure {
                status: false,
                message: SERVER_ERROR_MESSAGE,
                errors: None,
                error: Some(err.to_string()),
            },
        ),
    }
}

pub fn failure(err: &AppError) -> Response {
    let (status, body) = failure_body(err);
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    } else {
        tracing::debug!(status = status.as_u16(), error = %err, "request rejected");
    }
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validation_lists_every_message() {
        let err = AppError::Validation(vec!["标题必须填写".into(), "内容过长".into()]);
        let (status, body) = failure_body(&err);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "status": false,
                "message": "request parameter error",
                "errors": ["标题必须填写", "内容过长"]
            })
        );
    }

    #[test]
    fn not_found_carries_resource_message() {
        let (status, body) = failure_body(&AppError::NotFound("用户不存在".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"status": false, "message": "resource not found", "error": "用户不存在"})
        );
    }

    #[test]
    fn everything_else_is_a_server_error() {
        for err in [
            AppError::Db(sqlx::Error::PoolTimedOut),
            AppError::Db(sqlx::Error::RowNotFound),
            AppError::Internal("invalid pattern".into()),
        ] {
            let (status, body) = failure_body(&err);
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body.message, "server error");
            assert!(body.error.is_some());
            assert!(body.errors.is_none());
        }
    }

    #[test]
    fn empty_data_is_an_empty_object() {
        let (status, Json(body)) = success("删除成功", Empty::default());
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"status": true, "message": "删除成功", "data": {}})
        );
    }
}
