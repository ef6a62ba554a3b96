use crate::{resources, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A music album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Album {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub description: String,
    pub liked: i64,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Album {
    const NAME: &'static str = resources::ALBUM;
}

/// Create/update body for an album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AlbumForm {
    #[validate(length(min = 2, max = 100, message = "name must be 2-100 characters"))]
    pub name: String,
    #[validate(length(min = 2, max = 100, message = "author must be 2-100 characters"))]
    pub author: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "liked must not be negative"))]
    pub liked: i64,
}

/// Query for `GET /albums/search`.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct AlbumSearch {
    /// Substring of the album author.
    pub author: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidateExt;

    fn form() -> AlbumForm {
        AlbumForm {
            name: "Blue Train".to_string(),
            author: "John Coltrane".to_string(),
            description: String::new(),
            liked: 0,
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(form().validate_request().is_ok());
    }

    #[test]
    fn test_rejects_short_name_and_negative_likes() {
        let invalid = AlbumForm {
            name: "B".to_string(),
            liked: -1,
            ..form()
        };
        assert!(invalid.validate_request().is_err());
    }

    #[test]
    fn test_timestamps_serialize_as_millis() {
        let album = Album {
            id: 1,
            name: "Blue Train".to_string(),
            author: "John Coltrane".to_string(),
            description: String::new(),
            liked: 3,
            created_at: DateTime::from_timestamp_millis(1_700_000_000_123),
            updated_at: None,
        };
        let json = serde_json::to_value(&album).unwrap();
        assert_eq!(json["created_at"], 1_700_000_000_123_i64);
        assert!(json["updated_at"].is_null());
    }

    #[test]
    fn test_form_defaults_optional_fields() {
        let form: AlbumForm =
            serde_json::from_str(r#"{"name":"Giant Steps","author":"John Coltrane"}"#).unwrap();
        assert_eq!(form.liked, 0);
        assert!(form.description.is_empty());
    }
}
