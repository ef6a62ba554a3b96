//! JWT claims structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token sent on every protected request.
    Access,
    /// Long-lived token exchanged for new access tokens.
    Refresh,
}

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id as a string).
    pub sub: String,
    pub user_id: i64,
    pub username: String,
    pub token_type: TokenType,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// Not before timestamp.
    pub nbf: i64,
    pub iss: String,
    pub aud: String,
    /// Unique token id.
    pub jti: String,
}

impl Claims {
    /// Builds claims for a token of the given type.
    #[must_use]
    pub fn new(
        token_type: TokenType,
        user_id: i64,
        username: String,
        issuer: String,
        audience: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            user_id,
            username,
            token_type,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            nbf: now.timestamp(),
            iss: issuer,
            aud: audience,
            jti: Uuid::now_v7().to_string(),
        }
    }

    #[must_use]
    pub fn is_access_token(&self) -> bool {
        self.token_type == TokenType::Access
    }

    #[must_use]
    pub fn is_refresh_token(&self) -> bool {
        self.token_type == TokenType::Refresh
    }

    /// Seconds until expiry, zero once expired.
    #[must_use]
    pub fn expires_in(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_new() {
        let claims = Claims::new(
            TokenType::Refresh,
            42,
            "ferris".to_string(),
            "iss".to_string(),
            "aud".to_string(),
            Utc::now() + Duration::minutes(15),
        );
        assert_eq!(claims.sub, "42");
        assert!(claims.is_refresh_token());
        assert!(!claims.is_access_token());
        assert!(claims.expires_in() > 14 * 60);
    }
}
