use crate::{resources, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A track on an album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Song {
    pub id: i64,
    pub album_id: i64,
    pub title: String,
    /// Length in seconds.
    pub duration: i32,
    pub track_number: i32,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Song {
    const NAME: &'static str = resources::SONG;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SongForm {
    #[validate(length(min = 1, max = 100, message = "title must be 1-100 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "duration must not be negative"))]
    pub duration: i32,
    #[validate(range(min = 1, message = "track_number must be at least 1"))]
    pub track_number: i32,
    #[validate(range(min = 1, message = "album_id is required"))]
    pub album_id: i64,
}
