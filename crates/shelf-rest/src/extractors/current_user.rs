//! Authenticated user extractor.

use crate::middleware::{AuthFailure, CurrentUser};
use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use shelf_core::{domain::User, ShelfError};

/// The user behind the request's bearer token.
///
/// Relies on [`auth_middleware`](crate::middleware::auth_middleware) having
/// resolved the token. Rejects with the recorded failure when the token was
/// bad, and with `MissingToken` when no token was sent.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl std::ops::Deref for AuthenticatedUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(CurrentUser(user)) = parts.extensions.get::<CurrentUser>() {
            return Ok(Self(user.clone()));
        }

        if let Some(failure) = parts.extensions.get::<AuthFailure>() {
            return Err(AppError(failure.clone().into()));
        }

        Err(AppError(ShelfError::MissingToken(
            "authorization header is required".to_string(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts() -> Parts {
        Request::builder().body(()).unwrap().into_parts().0
    }

    fn user() -> User {
        User {
            id: 3,
            username: "ferris".to_string(),
            password_hash: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_resolved_user() {
        let mut parts = parts();
        parts.extensions.insert(CurrentUser(user()));
        let current = AuthenticatedUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(current.username, "ferris");
    }

    #[tokio::test]
    async fn test_missing_token() {
        let AppError(err) = AuthenticatedUser::from_request_parts(&mut parts(), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfError::MissingToken(_)));
    }

    #[tokio::test]
    async fn test_recorded_failure_wins() {
        let mut parts = parts();
        parts.extensions.insert(AuthFailure::Expired);
        let AppError(err) = AuthenticatedUser::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfError::TokenExpired));
    }
}
