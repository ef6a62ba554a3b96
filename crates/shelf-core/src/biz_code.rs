//! Business codes carried in every API envelope.
//!
//! Codes are grouped by range: `2xxx` success, `40xx` generic client errors,
//! `41xx` parameter errors, `43xx` token errors and
//! `5xxx` server errors.

use serde::{Deserialize, Serialize};

/// Machine-readable business outcome, independent of the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum BizCode {
    // ============ Success ============
    Ok = 2000,
    Created = 2001,
    Deleted = 2004,
    Updated = 2005,

    // ============ Client Errors ============
    BadRequest = 4000,
    Unauthorized = 4001,
    NotFound = 4004,

    // ============ Parameter Errors ============
    InvalidPassword = 4100,
    InvalidPage = 4101,
    MissingId = 4103,

    // ============ Token Errors ============
    TokenInvalid = 4303,
    TokenExpired = 4304,
    TokenNotFound = 4305,

    // ============ Server Errors ============
    Internal = 5000,
    DbQuery = 5100,
    DbCount = 5101,
    DbDelete = 5102,
    DbUpdate = 5103,
    DbCreate = 5104,
    DbDuplicate = 5105,
}

impl BizCode {
    /// Numeric value of the code.
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Default human-readable message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Created => "Created",
            Self::Deleted => "Deleted",
            Self::Updated => "Updated",
            Self::BadRequest => "Bad request",
            Self::Unauthorized => "Unauthorized",
            Self::NotFound => "Resource not found",
            Self::InvalidPassword => "Invalid username or password",
            Self::InvalidPage => "Invalid pagination parameters",
            Self::MissingId => "Missing or invalid id",
            Self::TokenInvalid => "Invalid token",
            Self::TokenExpired => "Token expired",
            Self::TokenNotFound => "Token not provided",
            Self::Internal => "Internal server error",
            Self::DbQuery => "Database query failed",
            Self::DbCount => "Database count failed",
            Self::DbDelete => "Database delete failed",
            Self::DbUpdate => "Database update failed",
            Self::DbCreate => "Database insert failed",
            Self::DbDuplicate => "Duplicate record",
        }
    }

    /// Picks the database code matching a store operation name such as
    /// `create_album` or `count_books`.
    #[must_use]
    pub fn for_operation(operation: &str) -> Self {
        let verb = operation.split('_').next().unwrap_or_default();
        match verb {
            "create" | "insert" => Self::DbCreate,
            "update" => Self::DbUpdate,
            "delete" => Self::DbDelete,
            "count" => Self::DbCount,
            _ => Self::DbQuery,
        }
    }
}

impl std::fmt::Display for BizCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
