//! Table metadata that lets [`MySqlStore`](super::MySqlStore) generate SQL.

use shelf_core::domain::{
    Album, AlbumForm, Book, BookForm, Comment, CommentForm, FileRecord, NewFileRecord, Pet, Photo,
    PhotoForm, Song, SongForm, Team, TeamForm,
};
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::{FromRow, MySql};

/// A query with positional arguments bound so far.
pub type MySqlQuery<'q> = sqlx::query::Query<'q, MySql, MySqlArguments>;

/// An entity mapped to a table.
pub trait TableRecord: for<'r> FromRow<'r, MySqlRow> + Send + Unpin + 'static {
    const TABLE: &'static str;
    /// Select list, in `FromRow` field order.
    const COLUMNS: &'static str;
    /// Ordering for unfiltered pages.
    const ORDER_BY: &'static str = "id ASC";
}

/// An entity writable through a form.
pub trait FormTable: TableRecord {
    type Form: TableForm;
}

/// A write form: the columns it sets and how it binds them.
pub trait TableForm: Send + Sync {
    const COLUMNS: &'static [&'static str];

    /// Binds one value per entry in `COLUMNS`, in order.
    fn bind_values<'q>(&'q self, query: MySqlQuery<'q>) -> MySqlQuery<'q>;
}

impl TableRecord for Album {
    const TABLE: &'static str = "albums";
    const COLUMNS: &'static str = "id, name, author, description, liked, created_at, updated_at";
}

impl FormTable for Album {
    type Form = AlbumForm;
}

impl TableForm for AlbumForm {
    const COLUMNS: &'static [&'static str] = &["name", "author", "description", "liked"];

    fn bind_values<'q>(&'q self, query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        query
            .bind(&self.name)
            .bind(&self.author)
            .bind(&self.description)
            .bind(self.liked)
    }
}

impl TableRecord for Book {
    const TABLE: &'static str = "books";
    const COLUMNS: &'static str =
        "id, isbn, title, author, stock, publisher, publish_date, created_at, updated_at";
}

impl FormTable for Book {
    type Form = BookForm;
}

impl TableForm for BookForm {
    const COLUMNS: &'static [&'static str] =
        &["isbn", "title", "author", "stock", "publisher", "publish_date"];

    fn bind_values<'q>(&'q self, query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        query
            .bind(&self.isbn)
            .bind(&self.title)
            .bind(&self.author)
            .bind(self.stock)
            .bind(&self.publisher)
            .bind(self.publish_date)
    }
}

impl TableRecord for Photo {
    const TABLE: &'static str = "photos";
    const COLUMNS: &'static str = "id, title, url, description, album_id, created_at, updated_at";
}

impl FormTable for Photo {
    type Form = PhotoForm;
}

impl TableForm for PhotoForm {
    const COLUMNS: &'static [&'static str] = &["title", "url", "description", "album_id"];

    fn bind_values<'q>(&'q self, query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        query
            .bind(&self.title)
            .bind(&self.url)
            .bind(&self.description)
            .bind(self.album_id)
    }
}

impl TableRecord for Song {
    const TABLE: &'static str = "songs";
    const COLUMNS: &'static str =
        "id, album_id, title, duration, track_number, created_at, updated_at";
}

impl FormTable for Song {
    type Form = SongForm;
}

impl TableForm for SongForm {
    const COLUMNS: &'static [&'static str] = &["title", "duration", "track_number", "album_id"];

    fn bind_values<'q>(&'q self, query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        query
            .bind(&self.title)
            .bind(self.duration)
            .bind(self.track_number)
            .bind(self.album_id)
    }
}

impl TableRecord for Team {
    const TABLE: &'static str = "teams";
    const COLUMNS: &'static str =
        "id, champions, city, divide, logo, name, part, created_at, updated_at";
}

impl FormTable for Team {
    type Form = TeamForm;
}

impl TableForm for TeamForm {
    const COLUMNS: &'static [&'static str] = &["name", "city", "champions", "divide", "logo", "part"];

    fn bind_values<'q>(&'q self, query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        query
            .bind(&self.name)
            .bind(&self.city)
            .bind(self.champions)
            .bind(&self.divide)
            .bind(&self.logo)
            .bind(&self.part)
    }
}

impl TableRecord for Pet {
    const TABLE: &'static str = "pets";
    const COLUMNS: &'static str =
        "id, name, owner, species, sex, birth, death, database_column, del";
}

impl TableRecord for Comment {
    const TABLE: &'static str = "comments";
    const COLUMNS: &'static str = "id, photo_id, content, author, created_at, updated_at";
}

impl FormTable for Comment {
    type Form = CommentForm;
}

impl TableForm for CommentForm {
    const COLUMNS: &'static [&'static str] = &["photo_id", "content", "author"];

    fn bind_values<'q>(&'q self, query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        query
            .bind(self.photo_id)
            .bind(&self.content)
            .bind(&self.author)
    }
}

impl TableRecord for FileRecord {
    const TABLE: &'static str = "files";
    const COLUMNS: &'static str = "id, file_name, file_path, url, mime_type, size, created_at";
}

impl FormTable for FileRecord {
    type Form = NewFileRecord;
}

impl TableForm for NewFileRecord {
    const COLUMNS: &'static [&'static str] = &["file_name", "file_path", "url", "mime_type", "size"];

    fn bind_values<'q>(&'q self, query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        query
            .bind(&self.file_name)
            .bind(&self.file_path)
            .bind(&self.url)
            .bind(&self.mime_type)
            .bind(self.size)
    }
}
