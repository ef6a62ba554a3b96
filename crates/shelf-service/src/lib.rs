//! # Shelf Service
//!
//! Business logic for the Shelf API: the cache-aside list cache, one
//! service per resource, authentication and file uploads.

pub mod album_service;
pub mod auth_service;
pub mod book_service;
pub mod cache;
pub mod comment_service;
pub mod dto;
pub mod file_service;
pub mod pet_service;
pub mod photo_service;
pub mod resource_service;
pub mod song_service;
pub mod storage;
pub mod team_service;

#[cfg(test)]
mod test_support;

pub use album_service::*;
pub use auth_service::*;
pub use book_service::*;
pub use cache::*;
pub use comment_service::*;
pub use dto::*;
pub use file_service::*;
pub use pet_service::*;
pub use photo_service::*;
pub use resource_service::*;
pub use song_service::*;
pub use storage::*;
pub use team_service::*;
