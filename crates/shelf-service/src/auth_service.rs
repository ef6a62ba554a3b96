//! Authentication service implementation.

use crate::dto::{AccessTokenResponse, LoginResponse, RefreshTokenRequest, UserResponse, BEARER};
use async_trait::async_trait;
use shelf_core::domain::{Credentials, User};
use shelf_core::{Resource, ShelfError, ShelfResult, ValidateExt};
use shelf_repository::UserRepository;
use shelf_security::{PasswordHasher, TokenProvider};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account.
    async fn register(&self, request: Credentials) -> ShelfResult<UserResponse>;

    /// Exchanges credentials for an access/refresh token pair.
    async fn login(&self, request: Credentials) -> ShelfResult<LoginResponse>;

    /// Exchanges a refresh token for a new access token.
    async fn refresh_token(&self, request: RefreshTokenRequest) -> ShelfResult<AccessTokenResponse>;

    /// Resolves a bearer access token to its (still existing) user.
    async fn authenticate(&self, token: &str) -> ShelfResult<User>;
}

/// Authentication service implementation.
pub struct AuthServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<PasswordHasher>,
    token_provider: Arc<TokenProvider>,
}

impl AuthServiceImpl {
    /// Creates a new authentication service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<PasswordHasher>,
        token_provider: Arc<TokenProvider>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_provider,
        }
    }

    async fn load_user(&self, user_id: i64) -> ShelfResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ShelfError::unauthorized(format!("{} {user_id} no longer exists", User::NAME)))
    }

    async fn hash_password(&self, password: String) -> ShelfResult<String> {
        let hasher = Arc::clone(&self.password_hasher);
        run_blocking(move || hasher.hash(&password)).await
    }

    async fn verify_password(&self, password: String, hash: String) -> ShelfResult<bool> {
        let hasher = Arc::clone(&self.password_hasher);
        run_blocking(move || hasher.verify(&password, &hash)).await
    }
}

/// Runs CPU-heavy work such as Argon2 on the blocking pool.
async fn run_blocking<T, F>(work: F) -> ShelfResult<T>
where
    F: FnOnce() -> ShelfResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ShelfError::Internal(format!("Blocking task failed: {e}")))?
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(&self, request: Credentials) -> ShelfResult<UserResponse> {
        debug!("Registering user: {}", request.username);

        request.validate_request()?;

        if self.user_repository.exists_by_username(&request.username).await? {
            return Err(ShelfError::conflict(format!(
                "Username '{}' already exists",
                request.username
            )));
        }

        let password_hash = self.hash_password(request.password.clone()).await?;
        let user = self
            .user_repository
            .create(&request.username, &password_hash)
            .await?;

        info!("User registered: {}", user.id);
        Ok(UserResponse::from(user))
    }

    async fn login(&self, request: Credentials) -> ShelfResult<LoginResponse> {
        debug!("Login attempt: {}", request.username);

        request.validate_request()?;

        let Some(user) = self.user_repository.find_by_username(&request.username).await? else {
            warn!("Login failed: unknown user {}", request.username);
            return Err(ShelfError::InvalidCredentials);
        };

        if !self
            .verify_password(request.password.clone(), user.password_hash.clone())
            .await?
        {
            warn!("Login failed: wrong password for {}", request.username);
            return Err(ShelfError::InvalidCredentials);
        }

        let tokens = self.token_provider.generate_tokens(user.id, &user.username)?;

        info!("User logged in: {}", user.id);
        Ok(LoginResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: BEARER.to_string(),
            expires_in: tokens.expires_in,
        })
    }

    async fn refresh_token(&self, request: RefreshTokenRequest) -> ShelfResult<AccessTokenResponse> {
        let claims = self.token_provider.validate_refresh_token(&request.refresh_token)?;
        let user = self.load_user(claims.user_id).await?;

        let access_token = self
            .token_provider
            .generate_access_token(user.id, &user.username)?;

        debug!("Access token refreshed for user {}", user.id);
        Ok(AccessTokenResponse {
            access_token,
            token_type: BEARER.to_string(),
            expires_in: self.token_provider.access_lifetime().num_seconds(),
        })
    }

    async fn authenticate(&self, token: &str) -> ShelfResult<User> {
        let claims = self.token_provider.validate_access_token(token)?;
        self.load_user(claims.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_config::SecurityConfig;
    use shelf_repository::memory::InMemoryStore;

    fn service() -> (AuthServiceImpl, Arc<TokenProvider>) {
        let config = SecurityConfig {
            jwt_secret: "auth-service-test-secret".to_string(),
            ..SecurityConfig::default()
        };
        let tokens = Arc::new(TokenProvider::new(Arc::new(config)));
        let service = AuthServiceImpl::new(
            Arc::new(InMemoryStore::<User>::new()),
            Arc::new(PasswordHasher::with_cost(1)),
            tokens.clone(),
        );
        (service, tokens)
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let (auth, _) = service();
        let user = auth.register(credentials("alice", "s3cret!")).await.unwrap();
        assert_eq!(user.username, "alice");

        let login = auth.login(credentials("alice", "s3cret!")).await.unwrap();
        assert_eq!(login.token_type, "Bearer");
        assert_eq!(login.expires_in, 900);

        let me = auth.authenticate(&login.access_token).await.unwrap();
        assert_eq!(me.id, user.id);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_password_work_leaves_the_runtime_thread() {
        let runtime_thread = std::thread::current().id();
        let worker = run_blocking(|| Ok(std::thread::current().id())).await.unwrap();
        assert_ne!(worker, runtime_thread);

        let (auth, _) = service();
        auth.register(credentials("alice", "s3cret!")).await.unwrap();
        assert!(auth.login(credentials("alice", "s3cret!")).await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let (auth, _) = service();
        auth.register(credentials("alice", "s3cret!")).await.unwrap();
        assert!(matches!(
            auth.register(credentials("alice", "other-pass")).await,
            Err(ShelfError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let (auth, _) = service();
        auth.register(credentials("alice", "s3cret!")).await.unwrap();
        assert!(matches!(
            auth.login(credentials("alice", "wrong-pass")).await,
            Err(ShelfError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login(credentials("mallory", "s3cret!")).await,
            Err(ShelfError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_short_password_is_rejected() {
        let (auth, _) = service();
        assert!(matches!(
            auth.register(credentials("alice", "123")).await,
            Err(ShelfError::InvalidFields(_))
        ));
    }

    #[tokio::test]
    async fn test_refresh() {
        let (auth, _) = service();
        auth.register(credentials("alice", "s3cret!")).await.unwrap();
        let login = auth.login(credentials("alice", "s3cret!")).await.unwrap();

        let refreshed = auth
            .refresh_token(RefreshTokenRequest {
                refresh_token: login.refresh_token.clone(),
            })
            .await
            .unwrap();
        assert!(auth.authenticate(&refreshed.access_token).await.is_ok());

        // An access token is not accepted as a refresh token, and vice versa.
        assert!(matches!(
            auth.refresh_token(RefreshTokenRequest {
                refresh_token: login.access_token,
            })
            .await,
            Err(ShelfError::InvalidToken(_))
        ));
        assert!(matches!(
            auth.authenticate(&login.refresh_token).await,
            Err(ShelfError::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn test_token_for_deleted_user() {
        let (auth, tokens) = service();
        let token = tokens.generate_access_token(77, "ghost").unwrap();
        assert!(matches!(
            auth.authenticate(&token).await,
            Err(ShelfError::Unauthorized(_))
        ));
    }
}
