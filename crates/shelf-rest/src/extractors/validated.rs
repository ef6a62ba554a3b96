//! Validated JSON extractor for automatic request validation.
//!
//! Deserializes the body with [`Json`] and then runs the `validator` rules.
//! Malformed JSON becomes a `Validation` error; rule violations become
//! `InvalidFields` carrying one entry per field.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use shelf_core::{ShelfError, ValidateExt};
use validator::Validate;

/// JSON extractor that automatically validates the deserialized value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ShelfError::validation(rejection.body_text()))?;

        value.validate_request()?;
        Ok(Self(value))
    }
}
