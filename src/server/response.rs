//! Usage: `AppError` → HTTP response mapping shared by all handlers.

use crate::shared::error::AppError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

pub(super) type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub(super) struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.code() {
            "SEC_INVALID_INPUT" => StatusCode::BAD_REQUEST,
            "STORE_NOT_FOUND" => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.message() }))).into_response()
    }
}

pub(super) fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}

pub(super) fn success_with_id(id: String) -> Json<Value> {
    Json(json!({ "success": true, "id": id }))
}
