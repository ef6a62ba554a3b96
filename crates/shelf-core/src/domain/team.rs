use crate::{resources, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A sports team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Team {
    pub id: i64,
    pub champions: i8,
    pub city: String,
    pub divide: String,
    pub logo: String,
    pub name: String,
    pub part: String,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Team {
    const NAME: &'static str = resources::TEAM;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TeamForm {
    #[validate(length(min = 2, max = 50, message = "name must be 2-50 characters"))]
    pub name: String,
    #[validate(length(min = 2, max = 50, message = "city must be 2-50 characters"))]
    pub city: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "champions must not be negative"))]
    pub champions: i8,
    #[serde(default)]
    pub divide: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub part: String,
}
