//! Unified error type for all layers of the application.
//!
//! Every fallible operation returns a `ShelfError`. The REST layer turns it
//! into the wire envelope using [`ShelfError::status_code`],
//! [`ShelfError::biz_code`] and [`ShelfError::details`].

use crate::BizCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the Shelf API.
#[derive(Error, Debug)]
pub enum ShelfError {
    // ============ Request Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Malformed input that is not tied to a single field
    #[error("Validation error: {0}")]
    Validation(String),

    /// Field-level validation failures
    #[error("Validation failed: {}", summarize_fields(.0))]
    InvalidFields(Vec<FieldError>),

    /// Bad `current`/`pageSize` values
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    /// Path id missing or not a positive integer
    #[error("Invalid id: {0}")]
    MissingId(String),

    /// Conflict error (e.g., duplicate entry)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Upload too large
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Upload of a type we do not accept
    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    // ============ Authentication/Authorization Errors ============
    /// Unauthorized access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// No bearer token on a protected route
    #[error("Missing token: {0}")]
    MissingToken(String),

    /// Invalid token
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token expired
    #[error("Token expired")]
    TokenExpired,

    /// Invalid credentials
    #[error("Invalid credentials")]
    InvalidCredentials,

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Database error tagged with the failing operation
    #[error("Database error during {operation}: {message}")]
    DatabaseOperation { operation: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// File storage error
    #[error("Storage error: {0}")]
    Storage(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn summarize_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ShelfError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_)
            | Self::InvalidFields(_)
            | Self::InvalidPagination(_)
            | Self::MissingId(_) => 400,
            Self::Conflict(_) => 409,
            Self::PayloadTooLarge(_) => 413,
            Self::UnsupportedMedia(_) => 415,
            Self::Unauthorized(_)
            | Self::MissingToken(_)
            | Self::InvalidToken(_)
            | Self::TokenExpired
            | Self::InvalidCredentials => 401,
            Self::Database(_)
            | Self::DatabaseOperation { .. }
            | Self::Configuration(_)
            | Self::Cache(_)
            | Self::Storage(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns the business code reported in the response envelope.
    #[must_use]
    pub fn biz_code(&self) -> BizCode {
        match self {
            Self::NotFound { .. } => BizCode::NotFound,
            Self::Validation(_)
            | Self::InvalidFields(_)
            | Self::PayloadTooLarge(_)
            | Self::UnsupportedMedia(_) => BizCode::BadRequest,
            Self::InvalidPagination(_) => BizCode::InvalidPage,
            Self::MissingId(_) => BizCode::MissingId,
            Self::Conflict(_) => BizCode::DbDuplicate,
            Self::Unauthorized(_) => BizCode::Unauthorized,
            Self::MissingToken(_) => BizCode::TokenNotFound,
            Self::InvalidToken(_) => BizCode::TokenInvalid,
            Self::TokenExpired => BizCode::TokenExpired,
            Self::InvalidCredentials => BizCode::InvalidPassword,
            Self::Database(_) => BizCode::DbQuery,
            Self::DatabaseOperation { operation, .. } => BizCode::for_operation(operation),
            Self::Configuration(_)
            | Self::Cache(_)
            | Self::Storage(_)
            | Self::Internal(_)
            | Self::Other(_) => BizCode::Internal,
        }
    }

    /// Structured detail map for the envelope's `errors` field.
    #[must_use]
    pub fn details(&self) -> Option<Value> {
        match self {
            Self::NotFound { resource_type, id } => {
                Some(json!({ "resource": resource_type, "id": id }))
            }
            Self::InvalidFields(fields) => {
                let map: Map<String, Value> = fields
                    .iter()
                    .map(|e| (e.field.clone(), Value::String(e.message.clone())))
                    .collect();
                Some(json!({ "validation": map }))
            }
            Self::DatabaseOperation { operation, .. } => Some(json!({ "operation": operation })),
            _ => None,
        }
    }

    /// Returns true for errors that are the server's fault.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for ShelfError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "record",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    return Self::Conflict(db_err.message().to_string());
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ShelfError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {err}"))
    }
}

impl From<std::io::Error> for ShelfError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}
