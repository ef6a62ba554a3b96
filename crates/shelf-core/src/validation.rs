//! Validation utilities.

use crate::{FieldError, ShelfError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `ShelfError` on failure.
    fn validate_request(&self) -> Result<(), ShelfError> {
        self.validate().map_err(validation_errors_to_shelf_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `ShelfError::InvalidFields`.
///
/// Fields are sorted by name so the resulting message is stable.
#[must_use]
pub fn validation_errors_to_shelf_error(errors: ValidationErrors) -> ShelfError {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    ShelfError::InvalidFields(field_errors)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 2, message = "name must be at least 2 characters"))]
        name: String,
        #[validate(custom(function = "rules::not_blank"))]
        author: String,
    }

    #[test]
    fn test_valid_request() {
        let probe = Probe {
            name: "ok".to_string(),
            author: "someone".to_string(),
        };
        assert!(probe.validate_request().is_ok());
    }

    #[test]
    fn test_invalid_request_collects_fields() {
        let probe = Probe {
            name: "x".to_string(),
            author: "   ".to_string(),
        };
        match probe.validate_request() {
            Err(ShelfError::InvalidFields(fields)) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].field, "author");
                assert_eq!(fields[0].code, "not_blank");
                assert_eq!(fields[1].field, "name");
                assert_eq!(fields[1].message, "name must be at least 2 characters");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
