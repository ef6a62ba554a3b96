use crate::{resources, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata of an uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FileRecord {
    pub id: i64,
    /// Name the client uploaded the file under.
    pub file_name: String,
    /// Path of the stored object.
    pub file_path: String,
    /// Public URL the object is served from.
    pub url: String,
    pub mime_type: String,
    pub size: i64,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for FileRecord {
    const NAME: &'static str = resources::FILE;
}

/// Row to insert after the object has been stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFileRecord {
    pub file_name: String,
    pub file_path: String,
    pub url: String,
    pub mime_type: String,
    pub size: i64,
}
