//! Password hashing using Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2, Params,
};
use shelf_core::{ShelfError, ShelfResult};
use std::sync::Arc;
use tracing::debug;

/// Argon2id password hasher producing PHC strings.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Arc<Argon2<'static>>,
}

impl PasswordHasher {
    /// Creates a hasher with the library's default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::DEFAULT)
    }

    #[must_use]
    pub fn with_params(params: Params) -> Self {
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        Self {
            argon2: Arc::new(argon2),
        }
    }

    /// Creates a hasher whose memory cost is `cost` MiB.
    #[must_use]
    pub fn with_cost(cost: u32) -> Self {
        let params = Params::new(cost.saturating_mul(1024), 2, 1, None).unwrap_or(Params::DEFAULT);
        Self::with_params(params)
    }

    pub fn hash(&self, password: &str) -> ShelfResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ShelfError::Internal(format!("Failed to hash password: {e}")))?;

        Ok(hash.to_string())
    }

    /// Returns `Ok(false)` on a wrong password; errors only on a corrupt hash.
    pub fn verify(&self, password: &str, hash: &str) -> ShelfResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| ShelfError::Internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed: incorrect password");
                Ok(false)
            }
            Err(e) => Err(ShelfError::Internal(format!(
                "Password verification error: {e}"
            ))),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::with_cost(1);
        let hash = hasher.hash("s3cret-pass").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("s3cret-pass", &hash).unwrap());
        assert!(!hasher.verify("wrong-pass", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let hasher = PasswordHasher::with_cost(1);
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn test_corrupt_hash_is_an_error() {
        let hasher = PasswordHasher::with_cost(1);
        assert!(hasher.verify("anything", "not-a-phc-string").is_err());
    }
}
