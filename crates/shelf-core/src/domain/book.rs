use crate::{resources, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A book in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Book {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub stock: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub publisher: String,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub publish_date: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Book {
    const NAME: &'static str = resources::BOOK;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookForm {
    #[validate(length(min = 5, max = 15, message = "isbn must be 5-15 characters"))]
    pub isbn: String,
    #[validate(length(min = 2, max = 50, message = "title must be 2-50 characters"))]
    pub title: String,
    #[validate(length(min = 2, max = 50, message = "author must be 2-50 characters"))]
    pub author: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: i32,
    #[serde(default)]
    pub publisher: String,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub publish_date: Option<DateTime<Utc>>,
}

/// Query for `GET /books/search`; filters are OR-ed together.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct BookSearch {
    pub author: Option<String>,
    pub title: Option<String>,
    pub isbn: Option<String>,
}

impl BookSearch {
    /// Non-empty filters as `(column, needle)` pairs.
    #[must_use]
    pub fn filters(&self) -> Vec<(&'static str, &str)> {
        [
            ("author", self.author.as_deref()),
            ("title", self.title.as_deref()),
            ("isbn", self.isbn.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (column, v))
        })
        .collect()
    }

    /// True when no filter was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_filters_skip_blank_values() {
        let search = BookSearch {
            author: Some("  ".to_string()),
            title: Some("Rust".to_string()),
            isbn: None,
        };
        assert_eq!(search.filters(), vec![("title", "Rust")]);
        assert!(!search.is_empty());
        assert!(BookSearch::default().is_empty());
    }

    #[test]
    fn test_publisher_omitted_when_empty() {
        let book = Book {
            id: 1,
            isbn: "978-1".to_string(),
            title: "Rust".to_string(),
            author: "Ferris".to_string(),
            stock: 2,
            publisher: String::new(),
            publish_date: None,
            created_at: None,
            updated_at: None,
        };
        let json = serde_json::to_value(&book).unwrap();
        assert!(json.get("publisher").is_none());
    }
}
