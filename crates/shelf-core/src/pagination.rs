//! Pagination types for list operations.

use crate::{ShelfError, ShelfResult};
use serde::{Deserialize, Serialize};

/// A limit/offset window over a resource collection.
///
/// Clients address pages by `current` (1-indexed) and `pageSize`; the store
/// and the list cache only ever see the derived limit and offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of records to return.
    pub limit: u32,
    /// Number of records to skip.
    pub offset: u32,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    /// The maximum allowed page size.
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Creates a window from a raw limit and offset.
    #[must_use]
    pub const fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// Creates a window from a 1-indexed page number and a page size.
    pub fn from_page(current: u32, page_size: u32) -> ShelfResult<Self> {
        if current < 1 {
            return Err(ShelfError::InvalidPagination(
                "current must be at least 1".to_string(),
            ));
        }
        if !(1..=Self::MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ShelfError::InvalidPagination(format!(
                "pageSize must be between 1 and {}",
                Self::MAX_PAGE_SIZE
            )));
        }
        let offset = (current - 1)
            .checked_mul(page_size)
            .ok_or_else(|| ShelfError::InvalidPagination("current is too large".to_string()))?;
        Ok(Self::new(page_size, offset))
    }

    /// Parses the raw `current` and `pageSize` query values, applying the
    /// defaults (page 1, size 10) when a value is absent or empty.
    pub fn parse(current: Option<&str>, page_size: Option<&str>) -> ShelfResult<Self> {
        let current = parse_param("current", current, 1)?;
        let page_size = parse_param("pageSize", page_size, Self::DEFAULT_PAGE_SIZE)?;
        Self::from_page(current, page_size)
    }
}

fn parse_param(name: &str, raw: Option<&str>, default: u32) -> ShelfResult<u32> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<u32>()
            .map_err(|_| ShelfError::InvalidPagination(format!("{name} must be a positive integer"))),
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_SIZE, 0)
    }
}

/// A page of records together with the collection's total row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListResponse<T> {
    /// The records in this window.
    pub list: Vec<T>,
    /// Total number of records in the collection.
    pub total: i64,
}

impl<T> ListResponse<T> {
    /// Creates a new list response.
    #[must_use]
    pub fn new(list: Vec<T>, total: i64) -> Self {
        Self { list, total }
    }
}
