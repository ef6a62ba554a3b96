//! MySQL implementations of the store traits.
//!
//! Most resources share [`MySqlStore`], which builds its SQL from the
//! table metadata in [`table`]. Resource-specific queries (searches and
//! parent-filtered listings) live in the per-resource modules.

mod album_repository;
mod book_repository;
mod comment_repository;
mod photo_repository;
mod song_repository;
mod store;
pub mod table;
mod user_repository;

pub use store::MySqlStore;
pub use user_repository::MySqlUserRepository;

/// Escapes `LIKE` wildcards and wraps the needle in `%`.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
