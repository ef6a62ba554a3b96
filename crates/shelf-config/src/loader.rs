//! Configuration loader with layered sources.

use crate::{AppConfig, CacheBackend};
use config::{Config, ConfigError, Environment, File};
use shelf_core::{ShelfError, ShelfResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable selecting the environment-specific file.
pub const ENVIRONMENT_VAR: &str = "SHELF_ENVIRONMENT";

/// Loads [`AppConfig`] from a config directory.
///
/// Sources are applied in order, later ones overriding earlier ones:
/// 1. `{dir}/default.toml`
/// 2. `{dir}/{environment}.toml`
/// 3. `{dir}/local.toml`
/// 4. Environment variables with the `SHELF_` prefix and `__` separator
///    (e.g. `SHELF_DATABASE__URL`)
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a loader for the given directory.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Loader for `./config`.
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Loads, merges and validates the configuration.
    pub fn load(&self) -> ShelfResult<AppConfig> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", e);
        }

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();
        for name in ["default", environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{name}.toml"));
            if path.exists() {
                debug!("Loading config file: {}", path.display());
                builder = builder.add_source(File::from(path.as_path()).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("SHELF")
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(config_error)?;

        validate_config(&app_config)?;
        Ok(app_config)
    }

    /// The directory this loader reads from.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

/// Rejects configurations the server cannot start with.
pub fn validate_config(config: &AppConfig) -> ShelfResult<()> {
    if config.app.environment == "production"
        && config.security.jwt_secret == "change-me-in-production"
    {
        warn!("Using default JWT secret in production! This is a security risk.");
    }

    if config.database.url.is_empty() {
        return Err(ShelfError::Configuration("Database URL is required".to_string()));
    }

    if config.cache.backend == CacheBackend::Redis && config.redis.url.is_empty() {
        return Err(ShelfError::Configuration(
            "Redis URL is required when the redis cache backend is selected".to_string(),
        ));
    }

    if config.cache.list_ttl_secs == 0 {
        return Err(ShelfError::Configuration(
            "cache.list_ttl_secs must be greater than zero".to_string(),
        ));
    }

    if config.cache.backend == CacheBackend::Memory && config.cache.memory_max_entries == 0 {
        return Err(ShelfError::Configuration(
            "cache.memory_max_entries must be greater than zero".to_string(),
        ));
    }

    if config.security.jwt_secret.is_empty() {
        return Err(ShelfError::Configuration("JWT secret is required".to_string()));
    }

    Ok(())
}

fn config_error(err: ConfigError) -> ShelfError {
    ShelfError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_merges_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[server]\nport = 9000\n\n[cache]\nbackend = \"memory\"\nlist_ttl_secs = 60\n",
        )
        .unwrap();
        fs::write(dir.path().join("local.toml"), "[server]\nhost = \"127.0.0.1\"\n").unwrap();

        let config = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(config.server.addr(), "127.0.0.1:9000");
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.cache.list_ttl_secs, 60);
        // untouched sections keep their defaults
        assert_eq!(config.storage.max_file_size, 5 * 1024 * 1024);
    }

    #[test]
    fn test_missing_directory_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path().join("absent"));
        let config = loader.load().unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_rejects_zero_ttl() {
        let mut config = AppConfig::default();
        config.cache.list_ttl_secs = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ShelfError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_empty_redis_url_only_for_redis_backend() {
        let mut config = AppConfig::default();
        config.redis.url = String::new();
        assert!(validate_config(&config).is_err());

        config.cache.backend = CacheBackend::Disabled;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_unbounded_memory_cache() {
        let mut config = AppConfig::default();
        config.cache.backend = CacheBackend::Memory;
        config.cache.memory_max_entries = 0;
        assert!(validate_config(&config).is_err());

        config.cache.memory_max_entries = 64;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_empty_database_url() {
        let mut config = AppConfig::default();
        config.database.url = String::new();
        assert!(validate_config(&config).is_err());
    }
}
