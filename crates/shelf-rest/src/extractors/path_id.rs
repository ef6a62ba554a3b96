//! Path id parsing.

use crate::responses::AppError;
use shelf_core::ShelfError;

/// Parses a path segment as a record id.
///
/// Anything other than a positive integer is rejected with `MissingId`.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError(ShelfError::MissingId(format!(
            "'{raw}' is not a valid id"
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        for raw in ["0", "-3", "abc", "", "1.5"] {
            let AppError(err) = parse_id(raw).unwrap_err();
            assert!(matches!(err, ShelfError::MissingId(_)), "{raw}");
        }
    }
}
