//! In-memory stores for tests.
//!
//! [`InMemoryStore`] implements every store trait over a `BTreeMap` and
//! counts the `count`/`find_page` calls it receives, so tests can assert
//! whether a read reached the authoritative store or was served from cache.

use crate::traits::{
    AlbumRepository, BookRepository, CommentRepository, CrudStore, FileRepository, ListStore,
    PetRepository, PhotoRepository, SongRepository, TeamRepository, UserRepository,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use shelf_core::domain::{
    now_millis, Album, AlbumForm, Book, BookForm, BookSearch, Comment, CommentForm, FileRecord,
    NewFileRecord, Pet, Photo, PhotoForm, Song, SongForm, Team, TeamForm, User,
};
use shelf_core::{PageRequest, ShelfError, ShelfResult};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

/// A record addressable by integer id.
pub trait MemoryRecord: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
}

/// A record that can be built from, and overwritten by, its write form.
pub trait FromForm: MemoryRecord {
    type Form: Send + Sync;

    fn from_form(id: i64, form: &Self::Form) -> Self;
    fn apply_form(&mut self, form: &Self::Form);
}

/// Map-backed store with call counters and failure injection.
pub struct InMemoryStore<E> {
    records: RwLock<BTreeMap<i64, E>>,
    next_id: AtomicI64,
    count_calls: AtomicUsize,
    page_calls: AtomicUsize,
    failing: AtomicBool,
}

impl<E: MemoryRecord> InMemoryStore<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Seeds the store. New ids continue after the largest seeded id.
    pub fn with_records(records: impl IntoIterator<Item = E>) -> Self {
        let records: BTreeMap<i64, E> = records.into_iter().map(|r| (r.id(), r)).collect();
        let next_id = records.keys().next_back().copied().unwrap_or(0) + 1;
        Self {
            records: RwLock::new(records),
            next_id: AtomicI64::new(next_id),
            count_calls: AtomicUsize::new(0),
            page_calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Number of `count` calls so far.
    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    /// Number of `find_page` calls so far.
    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn reset_calls(&self) {
        self.count_calls.store(0, Ordering::SeqCst);
        self.page_calls.store(0, Ordering::SeqCst);
    }

    /// Makes every subsequent operation fail with a database error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn check(&self, operation: &str) -> ShelfResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ShelfError::Database(format!("simulated failure during {operation}")));
        }
        Ok(())
    }

    fn get(&self, id: i64) -> ShelfResult<Option<E>> {
        self.check("find")?;
        Ok(self.records.read().get(&id).cloned())
    }

    fn matching(&self, predicate: impl Fn(&E) -> bool) -> Vec<E> {
        self.records
            .read()
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

impl<E: MemoryRecord> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn window<E>(records: Vec<E>, page: PageRequest) -> Vec<E> {
    records
        .into_iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[async_trait]
impl<E: MemoryRecord> ListStore<E> for InMemoryStore<E> {
    async fn count(&self) -> ShelfResult<i64> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.check("count")?;
        Ok(to_i64(self.len()))
    }

    async fn find_page(&self, page: PageRequest) -> ShelfResult<Vec<E>> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.check("list")?;
        Ok(window(self.matching(|_| true), page))
    }
}

#[async_trait]
impl<E: FromForm> CrudStore<E, E::Form> for InMemoryStore<E> {
    async fn find_by_id(&self, id: i64) -> ShelfResult<Option<E>> {
        self.get(id)
    }

    async fn insert(&self, form: &E::Form) -> ShelfResult<E> {
        self.check("create")?;
        let record = E::from_form(self.allocate_id(), form);
        self.records.write().insert(record.id(), record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, form: &E::Form) -> ShelfResult<Option<E>> {
        self.check("update")?;
        let mut records = self.records.write();
        Ok(records.get_mut(&id).map(|record| {
            record.apply_form(form);
            record.clone()
        }))
    }

    async fn delete(&self, id: i64) -> ShelfResult<bool> {
        self.check("delete")?;
        Ok(self.records.write().remove(&id).is_some())
    }
}

#[async_trait]
impl AlbumRepository for InMemoryStore<Album> {
    async fn search_by_author(&self, author: &str) -> ShelfResult<Vec<Album>> {
        self.check("search")?;
        Ok(self.matching(|a| contains_ignore_case(&a.author, author)))
    }
}

#[async_trait]
impl BookRepository for InMemoryStore<Book> {
    async fn search(&self, criteria: &BookSearch) -> ShelfResult<Vec<Book>> {
        self.check("search")?;
        let filters = criteria.filters();
        Ok(self.matching(|b| {
            filters.iter().any(|(column, needle)| {
                let value = match *column {
                    "author" => &b.author,
                    "title" => &b.title,
                    _ => &b.isbn,
                };
                contains_ignore_case(value, needle)
            })
        }))
    }
}

#[async_trait]
impl PhotoRepository for InMemoryStore<Photo> {
    async fn count_by_album(&self, album_id: i64) -> ShelfResult<i64> {
        self.check("count")?;
        Ok(to_i64(self.matching(|p| p.album_id == album_id).len()))
    }

    async fn find_by_album(&self, album_id: i64, page: PageRequest) -> ShelfResult<Vec<Photo>> {
        self.check("list")?;
        Ok(window(self.matching(|p| p.album_id == album_id), page))
    }
}

#[async_trait]
impl SongRepository for InMemoryStore<Song> {
    async fn count_by_album(&self, album_id: i64) -> ShelfResult<i64> {
        self.check("count")?;
        Ok(to_i64(self.matching(|s| s.album_id == album_id).len()))
    }

    async fn find_by_album(&self, album_id: i64, page: PageRequest) -> ShelfResult<Vec<Song>> {
        self.check("list")?;
        let mut songs = self.matching(|s| s.album_id == album_id);
        songs.sort_by_key(|s| (s.track_number, s.id));
        Ok(window(songs, page))
    }
}

impl TeamRepository for InMemoryStore<Team> {}

#[async_trait]
impl CommentRepository for InMemoryStore<Comment> {
    async fn count_by_photo(&self, photo_id: i64) -> ShelfResult<i64> {
        self.check("count")?;
        Ok(to_i64(self.matching(|c| c.photo_id == photo_id).len()))
    }

    async fn find_by_photo(&self, photo_id: i64, page: PageRequest) -> ShelfResult<Vec<Comment>> {
        self.check("list")?;
        let mut comments = self.matching(|c| c.photo_id == photo_id);
        comments.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(window(comments, page))
    }
}

#[async_trait]
impl PetRepository for InMemoryStore<Pet> {
    async fn find_by_id(&self, id: i64) -> ShelfResult<Option<Pet>> {
        self.get(id)
    }
}

impl FileRepository for InMemoryStore<FileRecord> {}

#[async_trait]
impl UserRepository for InMemoryStore<User> {
    async fn find_by_id(&self, id: i64) -> ShelfResult<Option<User>> {
        self.get(id)
    }

    async fn find_by_username(&self, username: &str) -> ShelfResult<Option<User>> {
        self.check("find")?;
        Ok(self.matching(|u| u.username == username).into_iter().next())
    }

    async fn exists_by_username(&self, username: &str) -> ShelfResult<bool> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    async fn create(&self, username: &str, password_hash: &str) -> ShelfResult<User> {
        self.check("create")?;
        let mut records = self.records.write();
        if records.values().any(|u| u.username == username) {
            return Err(ShelfError::conflict(format!("username {username} is taken")));
        }
        let now = now_millis();
        let user = User {
            id: self.allocate_id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        records.insert(user.id, user.clone());
        Ok(user)
    }
}

macro_rules! memory_record {
    ($($entity:ty),* $(,)?) => {
        $(impl MemoryRecord for $entity {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

memory_record!(Album, Book, Photo, Song, Team, Pet, Comment, User, FileRecord);

impl FromForm for Album {
    type Form = AlbumForm;

    fn from_form(id: i64, form: &AlbumForm) -> Self {
        let now = now_millis();
        Self {
            id,
            name: form.name.clone(),
            author: form.author.clone(),
            description: form.description.clone(),
            liked: form.liked,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn apply_form(&mut self, form: &AlbumForm) {
        self.name.clone_from(&form.name);
        self.author.clone_from(&form.author);
        self.description.clone_from(&form.description);
        self.liked = form.liked;
        self.updated_at = Some(now_millis());
    }
}

impl FromForm for Book {
    type Form = BookForm;

    fn from_form(id: i64, form: &BookForm) -> Self {
        let now = now_millis();
        Self {
            id,
            isbn: form.isbn.clone(),
            title: form.title.clone(),
            author: form.author.clone(),
            stock: form.stock,
            publisher: form.publisher.clone(),
            publish_date: form.publish_date,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn apply_form(&mut self, form: &BookForm) {
        self.isbn.clone_from(&form.isbn);
        self.title.clone_from(&form.title);
        self.author.clone_from(&form.author);
        self.stock = form.stock;
        self.publisher.clone_from(&form.publisher);
        self.publish_date = form.publish_date;
        self.updated_at = Some(now_millis());
    }
}

impl FromForm for Photo {
    type Form = PhotoForm;

    fn from_form(id: i64, form: &PhotoForm) -> Self {
        let now = now_millis();
        Self {
            id,
            title: form.title.clone(),
            url: form.url.clone(),
            description: form.description.clone(),
            album_id: form.album_id,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn apply_form(&mut self, form: &PhotoForm) {
        self.title.clone_from(&form.title);
        self.url.clone_from(&form.url);
        self.description.clone_from(&form.description);
        self.album_id = form.album_id;
        self.updated_at = Some(now_millis());
    }
}

impl FromForm for Song {
    type Form = SongForm;

    fn from_form(id: i64, form: &SongForm) -> Self {
        let now = now_millis();
        Self {
            id,
            album_id: form.album_id,
            title: form.title.clone(),
            duration: form.duration,
            track_number: form.track_number,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn apply_form(&mut self, form: &SongForm) {
        self.album_id = form.album_id;
        self.title.clone_from(&form.title);
        self.duration = form.duration;
        self.track_number = form.track_number;
        self.updated_at = Some(now_millis());
    }
}

impl FromForm for Team {
    type Form = TeamForm;

    fn from_form(id: i64, form: &TeamForm) -> Self {
        let now = now_millis();
        Self {
            id,
            champions: form.champions,
            city: form.city.clone(),
            divide: form.divide.clone(),
            logo: form.logo.clone(),
            name: form.name.clone(),
            part: form.part.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn apply_form(&mut self, form: &TeamForm) {
        self.champions = form.champions;
        self.city.clone_from(&form.city);
        self.divide.clone_from(&form.divide);
        self.logo.clone_from(&form.logo);
        self.name.clone_from(&form.name);
        self.part.clone_from(&form.part);
        self.updated_at = Some(now_millis());
    }
}

impl FromForm for Comment {
    type Form = CommentForm;

    fn from_form(id: i64, form: &CommentForm) -> Self {
        let now = now_millis();
        Self {
            id,
            photo_id: form.photo_id,
            content: form.content.clone(),
            author: form.author.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn apply_form(&mut self, form: &CommentForm) {
        self.photo_id = form.photo_id;
        self.content.clone_from(&form.content);
        self.author.clone_from(&form.author);
        self.updated_at = Some(now_millis());
    }
}

impl FromForm for FileRecord {
    type Form = NewFileRecord;

    fn from_form(id: i64, form: &NewFileRecord) -> Self {
        Self {
            id,
            file_name: form.file_name.clone(),
            file_path: form.file_path.clone(),
            url: form.url.clone(),
            mime_type: form.mime_type.clone(),
            size: form.size,
            created_at: Some(now_millis()),
        }
    }

    fn apply_form(&mut self, form: &NewFileRecord) {
        *self = Self::from_form(self.id, form);
    }
}
