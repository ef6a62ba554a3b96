//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use shelf_core::{domain::User, ShelfError};
use shelf_service::{AuthService, BEARER};
use std::sync::Arc;
use tracing::debug;

/// Authentication middleware state.
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub auth_service: Arc<dyn AuthService>,
}

/// Request extension holding the user a valid token resolved to.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Request extension recording why a presented token was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// The header is not `Bearer <token>`.
    Malformed,
    Expired,
    Invalid(String),
    /// The token is valid but its user is gone.
    UnknownUser(String),
    /// The user lookup itself failed.
    Unavailable(String),
}

impl AuthFailure {
    fn from_error(err: &ShelfError) -> Self {
        match err {
            ShelfError::TokenExpired => Self::Expired,
            ShelfError::InvalidToken(message) => Self::Invalid(message.clone()),
            ShelfError::Unauthorized(message) => Self::UnknownUser(message.clone()),
            other => Self::Unavailable(other.to_string()),
        }
    }
}

impl From<AuthFailure> for ShelfError {
    fn from(failure: AuthFailure) -> Self {
        match failure {
            AuthFailure::Malformed => {
                Self::InvalidToken("authorization header must be 'Bearer <token>'".to_string())
            }
            AuthFailure::Expired => Self::TokenExpired,
            AuthFailure::Invalid(message) => Self::InvalidToken(message),
            AuthFailure::UnknownUser(message) => Self::Unauthorized(message),
            AuthFailure::Unavailable(message) => Self::Internal(message),
        }
    }
}

/// Resolves the bearer token, if any, into a [`CurrentUser`].
///
/// Never rejects: handlers that need a user use the
/// [`AuthenticatedUser`](crate::extractors::AuthenticatedUser) extractor,
/// which reports the recorded [`AuthFailure`].
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default().to_string());

    if let Some(header) = header {
        let token = header
            .strip_prefix(BEARER)
            .and_then(|rest| rest.strip_prefix(' '))
            .map(str::trim)
            .filter(|token| !token.is_empty());

        match token {
            Some(token) => match state.auth_service.authenticate(token).await {
                Ok(user) => {
                    debug!("Authenticated user: {}", user.username);
                    request.extensions_mut().insert(CurrentUser(user));
                }
                Err(e) => {
                    debug!("Token rejected: {}", e);
                    request.extensions_mut().insert(AuthFailure::from_error(&e));
                }
            },
            None => {
                request.extensions_mut().insert(AuthFailure::Malformed);
            }
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_mapping() {
        assert_eq!(AuthFailure::from_error(&ShelfError::TokenExpired), AuthFailure::Expired);
        assert!(matches!(
            ShelfError::from(AuthFailure::Malformed),
            ShelfError::InvalidToken(_)
        ));
        assert!(matches!(
            ShelfError::from(AuthFailure::from_error(&ShelfError::unauthorized("gone"))),
            ShelfError::Unauthorized(_)
        ));
        assert!(ShelfError::from(AuthFailure::from_error(&ShelfError::Database("down".into())))
            .is_server_error());
    }
}
