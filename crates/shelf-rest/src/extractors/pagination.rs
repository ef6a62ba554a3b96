//! Pagination extractor.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use shelf_core::{PageRequest, ShelfError};
use utoipa::IntoParams;

/// Raw `current`/`pageSize` query parameters.
///
/// Kept as strings so malformed numbers surface as pagination errors
/// instead of generic query rejections.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number, starting at 1.
    #[serde(default)]
    #[param(value_type = Option<u32>)]
    pub current: Option<String>,
    /// Records per page, 1 to 100.
    #[serde(default, rename = "pageSize")]
    #[param(value_type = Option<u32>)]
    pub page_size: Option<String>,
}

impl TryFrom<PaginationQuery> for PageRequest {
    type Error = ShelfError;

    fn try_from(query: PaginationQuery) -> Result<Self, Self::Error> {
        PageRequest::parse(query.current.as_deref(), query.page_size.as_deref())
    }
}

/// A validated page window taken from the query string.
#[derive(Debug, Clone, Copy)]
pub struct Pagination(pub PageRequest);

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PaginationQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ShelfError::InvalidPagination(rejection.body_text()))?;
        Ok(Self(PageRequest::try_from(query)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(uri: &str) -> Result<PageRequest, AppError> {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        Pagination::from_request_parts(&mut parts, &())
            .await
            .map(|Pagination(page)| page)
    }

    #[tokio::test]
    async fn test_defaults() {
        assert_eq!(extract("/albums").await.unwrap(), PageRequest::new(10, 0));
    }

    #[tokio::test]
    async fn test_explicit_page() {
        let page = extract("/albums?current=3&pageSize=5").await.unwrap();
        assert_eq!(page, PageRequest::new(5, 10));
    }

    #[tokio::test]
    async fn test_bad_values_are_pagination_errors() {
        for uri in ["/albums?current=0", "/albums?pageSize=abc", "/albums?pageSize=101"] {
            let AppError(err) = extract(uri).await.unwrap_err();
            assert!(matches!(err, ShelfError::InvalidPagination(_)), "{uri}");
        }
    }
}
