//! API response types.
//!
//! Every response, success or failure, uses the same envelope:
//! `code` is `0` on success and the business code on failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shelf_core::{BizCode, ShelfError};
use tracing::{debug, error};

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
    pub timestamp: String,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl<T> ApiResponse<T> {
    /// Creates a successful response labelled with a success code.
    pub fn success(biz: BizCode, data: T) -> Self {
        Self {
            code: 0,
            message: biz.message().to_string(),
            data: Some(data),
            errors: None,
            timestamp: now(),
        }
    }
}

impl ApiResponse<()> {
    /// Creates an error response.
    pub fn error(biz: BizCode, message: String, errors: Option<Value>) -> Self {
        Self {
            code: biz.code(),
            message,
            data: None,
            errors,
            timestamp: now(),
        }
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub ShelfError);

impl From<ShelfError> for AppError {
    fn from(err: ShelfError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let biz = err.biz_code();

        // Server-side details stay in the log.
        let message = if err.is_server_error() {
            error!(code = biz.code(), error = %err, "Request failed");
            biz.message().to_string()
        } else {
            debug!(code = biz.code(), error = %err, "Request rejected");
            err.to_string()
        };

        let body = Json(ApiResponse::error(biz, message, err.details()));
        (status, body).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Result type for handlers answering `201 Created`.
pub type CreatedResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(BizCode::Ok, data)))
}

/// Helper to create a created (201) response.
pub fn created<T: Serialize>(data: T) -> CreatedResult<T> {
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BizCode::Created, data)),
    ))
}

/// Helper for a successful update.
pub fn updated<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(BizCode::Updated, data)))
}

/// Helper for a successful delete; echoes the id.
pub fn deleted(id: i64) -> ApiResult<Value> {
    Ok(Json(ApiResponse::success(BizCode::Deleted, json!({ "id": id }))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_success_envelope() {
        let response = ApiResponse::success(BizCode::Ok, json!({ "id": 1 }));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["code"], 0);
        assert_eq!(value["message"], "OK");
        assert_eq!(value["data"]["id"], 1);
        assert!(value.get("errors").is_none());
        assert!(chrono::DateTime::parse_from_rfc3339(value["timestamp"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_not_found_error() {
        let response = AppError(ShelfError::not_found("album", 7)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["code"], 4004);
        assert_eq!(body["errors"], json!({ "resource": "album", "id": "7" }));
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let err = ShelfError::DatabaseOperation {
            operation: "create_album".to_string(),
            message: "Access denied for user 'root'".to_string(),
        };
        let response = AppError(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], 5104);
        assert_eq!(body["message"], "Database insert failed");
        assert_eq!(body["errors"], json!({ "operation": "create_album" }));
    }

    #[tokio::test]
    async fn test_pagination_error() {
        let response = AppError(ShelfError::InvalidPagination("bad".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], 4101);
    }
}
