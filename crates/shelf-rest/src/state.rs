//! Application state for Axum handlers.

use shelf_repository::DatabasePool;
use shelf_service::{
    AlbumService, AuthService, BookService, CacheStore, CommentService, FileService, PetService,
    PhotoService, SongService, TeamService,
};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub albums: AlbumService,
    pub books: BookService,
    pub photos: PhotoService,
    pub songs: SongService,
    pub teams: TeamService,
    pub pets: PetService,
    pub comments: CommentService,
    pub files: Arc<FileService>,
    pub auth_service: Arc<dyn AuthService>,
    /// Backing store of the list cache, probed by the health check.
    pub cache: Arc<dyn CacheStore>,
    /// `None` when the stores are not database backed.
    pub database: Option<Arc<DatabasePool>>,
}
