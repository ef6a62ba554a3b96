//! Explicit dependency wiring.
//!
//! Every component is built through its constructor and shared with `Arc`;
//! nothing is global. [`AppModuleBuilder`] turns configuration plus a
//! database pool into the [`AppState`] the router serves.

use shelf_config::{AppConfig, CacheBackend, CacheConfig, RedisConfig};
use shelf_core::{
    domain::{Album, Book, Comment, FileRecord, Pet, Photo, Song, Team},
    ShelfError, ShelfResult,
};
use shelf_repository::{
    AlbumRepository, BookRepository, CommentRepository, DatabasePool, FileRepository,
    MySqlStore, MySqlUserRepository, PetRepository, PhotoRepository, SongRepository,
    TeamRepository, UserRepository,
};
use shelf_rest::AppState;
use shelf_security::{PasswordHasher, TokenProvider};
use shelf_service::{
    AlbumService, AuthService, AuthServiceImpl, BookService, CacheStore, CommentService,
    FileService, FileStorage, InMemoryCache, ListCache, LocalFileStorage, PetService,
    PhotoService, RedisCacheService, ResourceService, SongService, TeamService,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// How long the startup Redis probe may take.
const REDIS_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Builds the list cache backend selected by `cache.backend`.
///
/// A Redis server that does not answer at startup is only logged: the
/// pool connects lazily and the list cache treats failures as misses.
pub async fn build_cache_store(
    cache: &CacheConfig,
    redis: &RedisConfig,
) -> ShelfResult<Arc<dyn CacheStore>> {
    let store: Arc<dyn CacheStore> = match cache.backend {
        CacheBackend::Redis => {
            let service = RedisCacheService::connect(redis)?;
            match tokio::time::timeout(REDIS_PROBE_TIMEOUT, service.ping()).await {
                Ok(Ok(())) => info!("Redis cache connected"),
                Ok(Err(e)) => warn!("Redis is not reachable, list reads go to the database: {}", e),
                Err(_) => warn!("Redis did not answer within {:?}", REDIS_PROBE_TIMEOUT),
            }
            Arc::new(service)
        }
        CacheBackend::Memory => {
            info!(max_entries = cache.memory_max_entries, "Using the in-process list cache");
            Arc::new(InMemoryCache::with_capacity(cache.memory_max_entries))
        }
        CacheBackend::Disabled => {
            info!("List cache disabled");
            Arc::new(RedisCacheService::disabled())
        }
    };
    Ok(store)
}

/// Assembles repositories, services and the application state.
pub struct AppModuleBuilder {
    config: AppConfig,
    database_pool: Option<Arc<DatabasePool>>,
    cache_store: Option<Arc<dyn CacheStore>>,
}

impl AppModuleBuilder {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            database_pool: None,
            cache_store: None,
        }
    }

    #[must_use]
    pub fn with_database_pool(mut self, pool: Arc<DatabasePool>) -> Self {
        self.database_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_cache_store(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache_store = Some(cache);
        self
    }

    /// Wires the MySQL repositories into the services.
    ///
    /// Fails when no database pool was supplied. Without a cache store the
    /// list cache is disabled.
    pub fn build(self) -> ShelfResult<AppState> {
        let pool = self.database_pool.ok_or_else(|| {
            ShelfError::Configuration("a database pool is required to build the module".to_string())
        })?;
        let cache_store = self
            .cache_store
            .unwrap_or_else(|| Arc::new(RedisCacheService::disabled()));
        let list_cache = ListCache::new(cache_store.clone(), self.config.cache.list_ttl());

        let album_repository: Arc<dyn AlbumRepository> =
            Arc::new(MySqlStore::<Album>::new(pool.clone()));
        let book_repository: Arc<dyn BookRepository> =
            Arc::new(MySqlStore::<Book>::new(pool.clone()));
        let photo_repository: Arc<dyn PhotoRepository> =
            Arc::new(MySqlStore::<Photo>::new(pool.clone()));
        let song_repository: Arc<dyn SongRepository> =
            Arc::new(MySqlStore::<Song>::new(pool.clone()));
        let team_repository: Arc<dyn TeamRepository> =
            Arc::new(MySqlStore::<Team>::new(pool.clone()));
        let pet_repository: Arc<dyn PetRepository> =
            Arc::new(MySqlStore::<Pet>::new(pool.clone()));
        let comment_repository: Arc<dyn CommentRepository> =
            Arc::new(MySqlStore::<Comment>::new(pool.clone()));
        let file_repository: Arc<dyn FileRepository> =
            Arc::new(MySqlStore::<FileRecord>::new(pool.clone()));
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(MySqlUserRepository::new(pool.clone()));

        let albums = AlbumService::new(album_repository, list_cache.clone());
        let photos = PhotoService::new(
            ResourceService::new(photo_repository, list_cache.clone()),
            albums.clone(),
        );
        let songs = SongService::new(
            ResourceService::new(song_repository, list_cache.clone()),
            albums.clone(),
        );
        let comments = CommentService::new(
            ResourceService::new(comment_repository, list_cache.clone()),
            photos.clone(),
        );

        let storage: Arc<dyn FileStorage> =
            Arc::new(LocalFileStorage::new(&self.config.storage.upload_dir));
        let files = FileService::new(file_repository, storage, self.config.storage.clone());

        let password_hasher = Arc::new(PasswordHasher::with_cost(
            self.config.security.password_hash_cost,
        ));
        let token_provider = Arc::new(TokenProvider::new(Arc::new(self.config.security.clone())));
        let auth_service: Arc<dyn AuthService> = Arc::new(AuthServiceImpl::new(
            user_repository,
            password_hasher,
            token_provider,
        ));

        info!("Application module built");

        Ok(AppState {
            albums,
            books: BookService::new(book_repository, list_cache.clone()),
            photos,
            songs,
            teams: TeamService::new(team_repository, list_cache.clone()),
            pets: PetService::new(pet_repository, list_cache),
            comments,
            files: Arc::new(files),
            auth_service,
            cache: cache_store,
            database: Some(pool),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_a_database_pool() {
        let err = AppModuleBuilder::new(AppConfig::default()).build().err().unwrap();
        assert!(matches!(err, ShelfError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_memory_backend() {
        let cache = CacheConfig {
            backend: CacheBackend::Memory,
            ..CacheConfig::default()
        };
        let store = build_cache_store(&cache, &RedisConfig::default()).await.unwrap();
        assert!(store.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_backend() {
        let cache = CacheConfig {
            backend: CacheBackend::Disabled,
            ..CacheConfig::default()
        };
        let store = build_cache_store(&cache, &RedisConfig::default()).await.unwrap();
        assert!(!store.is_enabled());
        assert!(store.get_raw("album:total").await.unwrap().is_none());
    }
}
