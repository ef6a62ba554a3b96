//! JWT token provider for creating and validating tokens.

use super::{Claims, TokenType};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use shelf_config::SecurityConfig;
use shelf_core::{ShelfError, ShelfResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// Access and refresh tokens issued at login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// HS256 token issuer and verifier.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Issues an access/refresh pair for a user.
    pub fn generate_tokens(&self, user_id: i64, username: &str) -> ShelfResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.generate_access_token(user_id, username)?,
            refresh_token: self.generate_refresh_token(user_id, username)?,
            expires_in: self.access_lifetime().num_seconds(),
        })
    }

    pub fn generate_access_token(&self, user_id: i64, username: &str) -> ShelfResult<String> {
        self.issue(TokenType::Access, user_id, username, self.access_lifetime())
    }

    pub fn generate_refresh_token(&self, user_id: i64, username: &str) -> ShelfResult<String> {
        self.issue(TokenType::Refresh, user_id, username, self.refresh_lifetime())
    }

    /// Access token lifetime.
    #[must_use]
    pub fn access_lifetime(&self) -> Duration {
        seconds(self.config.jwt_access_expiration_secs)
    }

    fn refresh_lifetime(&self) -> Duration {
        seconds(self.config.jwt_refresh_expiration_secs)
    }

    fn issue(
        &self,
        token_type: TokenType,
        user_id: i64,
        username: &str,
        lifetime: Duration,
    ) -> ShelfResult<String> {
        let claims = Claims::new(
            token_type,
            user_id,
            username.to_string(),
            self.config.jwt_issuer.clone(),
            self.config.jwt_audience.clone(),
            Utc::now() + lifetime,
        );

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ShelfError::Internal(format!("Failed to generate {token_type:?} token: {e}")))?;

        debug!("Generated {:?} token for user {}", token_type, user_id);
        Ok(token)
    }

    /// Validates signature, issuer, audience and expiry.
    pub fn validate_token(&self, token: &str) -> ShelfResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            warn!("Token validation failed: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => ShelfError::TokenExpired,
                ErrorKind::InvalidToken | ErrorKind::InvalidSignature => {
                    ShelfError::InvalidToken("Invalid token signature".to_string())
                }
                ErrorKind::InvalidIssuer => {
                    ShelfError::InvalidToken("Invalid token issuer".to_string())
                }
                ErrorKind::InvalidAudience => {
                    ShelfError::InvalidToken("Invalid token audience".to_string())
                }
                _ => ShelfError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    pub fn validate_access_token(&self, token: &str) -> ShelfResult<Claims> {
        let claims = self.validate_token(token)?;
        if !claims.is_access_token() {
            return Err(ShelfError::InvalidToken("Expected access token".to_string()));
        }
        Ok(claims)
    }

    pub fn validate_refresh_token(&self, token: &str) -> ShelfResult<Claims> {
        let claims = self.validate_token(token)?;
        if !claims.is_refresh_token() {
            return Err(ShelfError::InvalidToken("Expected refresh token".to_string()));
        }
        Ok(claims)
    }
}

fn seconds(secs: u64) -> Duration {
    Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX / 1_000))
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: "test-secret-key-for-testing-only".to_string(),
            jwt_issuer: "test-issuer".to_string(),
            jwt_audience: "test-audience".to_string(),
            ..Default::default()
        }
    }

    fn create_test_provider() -> TokenProvider {
        TokenProvider::new(Arc::new(config()))
    }

    #[test]
    fn test_generate_and_validate_tokens() {
        let provider = create_test_provider();
        let tokens = provider.generate_tokens(7, "ferris").unwrap();
        assert_eq!(tokens.expires_in, 900);

        let claims = provider.validate_access_token(&tokens.access_token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "ferris");

        let refresh = provider.validate_refresh_token(&tokens.refresh_token).unwrap();
        assert_eq!(refresh.user_id, 7);
        assert!(refresh.exp - refresh.iat >= 7 * 24 * 60 * 60 - 1);
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let provider = create_test_provider();
        let tokens = provider.generate_tokens(1, "ferris").unwrap();

        assert!(matches!(
            provider.validate_access_token(&tokens.refresh_token),
            Err(ShelfError::InvalidToken(_))
        ));
        assert!(matches!(
            provider.validate_refresh_token(&tokens.access_token),
            Err(ShelfError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        let provider = create_test_provider();
        let claims = Claims::new(
            TokenType::Access,
            1,
            "ferris".to_string(),
            "test-issuer".to_string(),
            "test-audience".to_string(),
            Utc::now() - Duration::minutes(5),
        );
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-for-testing-only"),
        )
        .unwrap();

        assert!(matches!(
            provider.validate_token(&token),
            Err(ShelfError::TokenExpired)
        ));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let provider = create_test_provider();
        let other = TokenProvider::new(Arc::new(SecurityConfig {
            jwt_secret: "some-other-secret".to_string(),
            ..config()
        }));
        let token = other.generate_access_token(1, "ferris").unwrap();
        assert!(matches!(
            provider.validate_token(&token),
            Err(ShelfError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_invalid_token() {
        let provider = create_test_provider();
        assert!(provider.validate_token("invalid-token").is_err());
    }
}
