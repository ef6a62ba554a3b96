//! Result type aliases.

use crate::ShelfError;

/// Result type alias using `ShelfError`.
pub type ShelfResult<T> = Result<T, ShelfError>;

/// Attaches the failing store operation to database errors.
pub trait OperationContext<T> {
    /// Tags a `Database` error with the operation that produced it
    /// (for example `create_album`). Other errors pass through untouched.
    fn during(self, operation: &str) -> ShelfResult<T>;
}

impl<T> OperationContext<T> for ShelfResult<T> {
    fn during(self, operation: &str) -> ShelfResult<T> {
        self.map_err(|err| match err {
            ShelfError::Database(message) => ShelfError::DatabaseOperation {
                operation: operation.to_string(),
                message,
            },
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_during_tags_database_errors() {
        let result: ShelfResult<()> = Err(ShelfError::Database("gone".to_string()));
        match result.during("create_album") {
            Err(ShelfError::DatabaseOperation { operation, message }) => {
                assert_eq!(operation, "create_album");
                assert_eq!(message, "gone");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_during_keeps_other_errors() {
        let result: ShelfResult<()> = Err(ShelfError::not_found("album", 7));
        assert!(matches!(
            result.during("update_album"),
            Err(ShelfError::NotFound { .. })
        ));
    }
}
