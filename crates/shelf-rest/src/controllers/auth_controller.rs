//! Authentication controller.

use crate::{
    extractors::{AuthenticatedUser, ValidatedJson},
    responses::{created, ok, ApiResult, CreatedResult},
    state::AppState,
};
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use shelf_core::domain::Credentials;
use shelf_service::{AccessTokenResponse, LoginResponse, RefreshTokenRequest, UserResponse};
use tracing::debug;

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/me", get(get_current_user))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 409, description = "Username taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<Credentials>,
) -> CreatedResult<UserResponse> {
    debug!("Registration request for: {}", request.username);

    let response = state.auth_service.register(request).await?;
    created(response)
}

/// Login with username and password.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Token pair issued", body = LoginResponse),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<Credentials>,
) -> ApiResult<LoginResponse> {
    debug!("Login request for: {}", request.username);

    let response = state.auth_service.login(request).await?;
    ok(response)
}

/// Exchange a refresh token for a new access token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "auth",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Access token issued", body = AccessTokenResponse),
        (status = 401, description = "Invalid or expired refresh token")
    )
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<AccessTokenResponse> {
    debug!("Token refresh request");

    let response = state.auth_service.refresh_token(request).await?;
    ok(response)
}

/// Get the current authenticated user.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_current_user(user: AuthenticatedUser) -> ApiResult<UserResponse> {
    debug!("Get current user: {}", user.username);
    ok(UserResponse::from(user.0))
}
