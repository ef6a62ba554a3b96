use crate::{resources, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A photo belonging to an album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Photo {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub album_id: i64,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Photo {
    const NAME: &'static str = resources::PHOTO;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PhotoForm {
    #[validate(length(min = 2, max = 100, message = "title must be 2-100 characters"))]
    pub title: String,
    #[validate(url(message = "url must be a valid URL"))]
    pub url: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: String,
    #[validate(range(min = 1, message = "album_id is required"))]
    pub album_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidateExt;

    #[test]
    fn test_rejects_bad_url_and_missing_album() {
        let form = PhotoForm {
            title: "Sunset".to_string(),
            url: "not a url".to_string(),
            description: String::new(),
            album_id: 0,
        };
        match form.validate_request() {
            Err(crate::ShelfError::InvalidFields(fields)) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["album_id", "url"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
