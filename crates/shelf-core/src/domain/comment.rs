use crate::{resources, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A comment left on a photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Comment {
    pub id: i64,
    pub photo_id: i64,
    pub content: String,
    pub author: String,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Comment {
    const NAME: &'static str = resources::COMMENT;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CommentForm {
    #[validate(range(min = 1, message = "photo_id is required"))]
    pub photo_id: i64,
    #[validate(length(min = 1, max = 500, message = "content must be 1-500 characters"))]
    pub content: String,
    #[validate(length(min = 1, max = 100, message = "author must be 1-100 characters"))]
    pub author: String,
}
