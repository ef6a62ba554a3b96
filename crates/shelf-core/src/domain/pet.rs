use crate::{resources, Resource};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A pet record. Read-only through the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub owner: String,
    pub species: String,
    /// Single-letter sex marker (`m`/`f`).
    pub sex: String,
    pub birth: Option<NaiveDate>,
    pub death: Option<NaiveDate>,
    #[serde(rename = "databaseColumn")]
    pub database_column: Option<i8>,
    /// Soft-delete flag, never exposed.
    #[serde(skip)]
    pub del: bool,
}

impl Resource for Pet {
    const NAME: &'static str = resources::PET;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let pet = Pet {
            id: 1,
            name: "Fluffy".to_string(),
            owner: "Harold".to_string(),
            species: "cat".to_string(),
            sex: "f".to_string(),
            birth: NaiveDate::from_ymd_opt(1993, 2, 4),
            death: None,
            database_column: Some(1),
            del: true,
        };
        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["birth"], "1993-02-04");
        assert_eq!(json["databaseColumn"], 1);
        assert!(json.get("del").is_none());
    }
}
