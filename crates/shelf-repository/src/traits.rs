//! Store traits consumed by the service layer.
//!
//! [`ListStore`] is the authoritative side of the list cache: a row count
//! and a limit/offset window. [`CrudStore`] adds single-record access. Each
//! resource gets its own trait so services can depend on `dyn` handles.

use async_trait::async_trait;
use shelf_core::domain::{
    Album, AlbumForm, Book, BookForm, BookSearch, Comment, CommentForm, FileRecord, NewFileRecord,
    Pet, Photo, PhotoForm, Song, SongForm, Team, TeamForm, User,
};
use shelf_core::{PageRequest, ShelfResult};

/// Counted, paginated access to a whole collection.
#[async_trait]
pub trait ListStore<E>: Send + Sync {
    /// Total number of records.
    async fn count(&self) -> ShelfResult<i64>;

    /// Records in the window, in a stable order.
    async fn find_page(&self, page: PageRequest) -> ShelfResult<Vec<E>>;
}

/// Single-record access on top of [`ListStore`].
#[async_trait]
pub trait CrudStore<E, F>: ListStore<E> {
    async fn find_by_id(&self, id: i64) -> ShelfResult<Option<E>>;

    /// Inserts a record and returns it as stored.
    async fn insert(&self, form: &F) -> ShelfResult<E>;

    /// Overwrites a record. Returns `None` when the id does not exist.
    async fn update(&self, id: i64, form: &F) -> ShelfResult<Option<E>>;

    /// Returns `false` when the id did not exist.
    async fn delete(&self, id: i64) -> ShelfResult<bool>;
}

#[async_trait]
pub trait AlbumRepository: CrudStore<Album, AlbumForm> {
    /// Albums whose author contains `author`.
    async fn search_by_author(&self, author: &str) -> ShelfResult<Vec<Album>>;
}

#[async_trait]
pub trait BookRepository: CrudStore<Book, BookForm> {
    /// Books matching any of the supplied filters.
    async fn search(&self, criteria: &BookSearch) -> ShelfResult<Vec<Book>>;
}

#[async_trait]
pub trait PhotoRepository: CrudStore<Photo, PhotoForm> {
    async fn count_by_album(&self, album_id: i64) -> ShelfResult<i64>;

    async fn find_by_album(&self, album_id: i64, page: PageRequest) -> ShelfResult<Vec<Photo>>;
}

#[async_trait]
pub trait SongRepository: CrudStore<Song, SongForm> {
    async fn count_by_album(&self, album_id: i64) -> ShelfResult<i64>;

    /// Songs of an album ordered by track number.
    async fn find_by_album(&self, album_id: i64, page: PageRequest) -> ShelfResult<Vec<Song>>;
}

pub trait TeamRepository: CrudStore<Team, TeamForm> {}

#[async_trait]
pub trait CommentRepository: CrudStore<Comment, CommentForm> {
    async fn count_by_photo(&self, photo_id: i64) -> ShelfResult<i64>;

    /// Comments on a photo, newest first.
    async fn find_by_photo(&self, photo_id: i64, page: PageRequest) -> ShelfResult<Vec<Comment>>;
}

#[async_trait]
pub trait PetRepository: ListStore<Pet> {
    async fn find_by_id(&self, id: i64) -> ShelfResult<Option<Pet>>;
}

pub trait FileRepository: CrudStore<FileRecord, NewFileRecord> {}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> ShelfResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> ShelfResult<Option<User>>;

    async fn exists_by_username(&self, username: &str) -> ShelfResult<bool>;

    /// Creates an account. A taken username yields `ShelfError::Conflict`.
    async fn create(&self, username: &str, password_hash: &str) -> ShelfResult<User>;
}
